use std::sync::Arc;

use super::coordinator::StackCoordinator;
use super::snapshot::StackState;
use crate::config::NavigatorConfig;
use crate::error::Result;
use crate::host::{HostNavigation, NavigationEventKind, NavigationEventReceiver};
use crate::view::{NavigationParameter, PresentationKind, ViewLocator, ViewModel, ViewModelFactory};

/// Page navigation over a host's primary stack
///
/// Translates "show this view-model" and "go back" into host operations and mirrors
/// the presented view-models. Events come straight from the host: subscribe with
/// [`pushing`](Self::pushing), [`pushed`](Self::pushed), [`popping`](Self::popping) and
/// [`popped`](Self::popped).
///
/// Drive a service from one UI context at a time; concurrent mutation of the same stack
/// is not supported.
pub struct ViewStackService {
    coordinator: StackCoordinator,
}

impl ViewStackService {
    pub fn new(
        host: Arc<dyn HostNavigation>,
        locator: Arc<dyn ViewLocator>,
        factory: Arc<dyn ViewModelFactory>,
    ) -> Self {
        Self::with_config(host, locator, factory, NavigatorConfig::default())
    }

    pub fn with_config(
        host: Arc<dyn HostNavigation>,
        locator: Arc<dyn ViewLocator>,
        factory: Arc<dyn ViewModelFactory>,
        config: NavigatorConfig,
    ) -> Self {
        Self {
            coordinator: StackCoordinator::new(
                PresentationKind::Page,
                host,
                locator,
                factory,
                config,
            ),
        }
    }

    /// Resolve a page for `view_model`, present it, then record it
    ///
    /// Fails with `ViewResolution` before touching the host when no page is registered
    /// for the view-model type and contract.
    pub async fn push(
        &self,
        view_model: Arc<dyn ViewModel>,
        contract: Option<&str>,
        animate: bool,
    ) -> Result<()> {
        self.coordinator.push(view_model, contract, animate, None).await
    }

    /// Like [`push`](Self::push), handing `parameter` to the view-model's
    /// `navigated_to` hook once the page is presented
    pub async fn push_with_parameter(
        &self,
        view_model: Arc<dyn ViewModel>,
        parameter: &NavigationParameter,
        contract: Option<&str>,
        animate: bool,
    ) -> Result<()> {
        self.coordinator
            .push(view_model, contract, animate, Some(parameter))
            .await
    }

    /// Create a `VM` through the factory and push it
    pub async fn push_new<VM: ViewModel>(
        &self,
        contract: Option<&str>,
        animate: bool,
    ) -> Result<Arc<dyn ViewModel>> {
        let view_model = self.coordinator.create::<VM>()?;
        self.push(view_model.clone(), contract, animate).await?;
        Ok(view_model)
    }

    /// Pop the top page; the host reports `EmptyStack`
    ///
    /// Returns the departed view-model when it is known.
    pub async fn pop(&self, animate: bool) -> Result<Option<Arc<dyn ViewModel>>> {
        self.coordinator.pop(animate).await
    }

    pub async fn pop_all(&self, animate: bool) -> Result<Vec<Arc<dyn ViewModel>>> {
        self.coordinator.pop_all(animate).await
    }

    /// Remove `view_model`'s page from wherever it sits in the stack
    pub async fn remove(
        &self,
        view_model: &Arc<dyn ViewModel>,
        contract: Option<&str>,
        animate: bool,
    ) -> Result<()> {
        self.coordinator.remove(view_model, contract, animate).await
    }

    pub fn pushing(&self) -> NavigationEventReceiver {
        self.coordinator.subscribe(NavigationEventKind::Pushing)
    }

    pub fn pushed(&self) -> NavigationEventReceiver {
        self.coordinator.subscribe(NavigationEventKind::Pushed)
    }

    pub fn popping(&self) -> NavigationEventReceiver {
        self.coordinator.subscribe(NavigationEventKind::Popping)
    }

    pub fn popped(&self) -> NavigationEventReceiver {
        self.coordinator.subscribe(NavigationEventKind::Popped)
    }

    /// Presented view-models, bottom first
    pub fn current_stack(&self) -> Vec<Arc<dyn ViewModel>> {
        self.coordinator.current_stack()
    }

    pub fn top(&self) -> Option<Arc<dyn ViewModel>> {
        self.coordinator.top()
    }

    /// Versioned service-tracked snapshot
    pub fn snapshot(&self) -> Arc<StackState> {
        self.coordinator.snapshot()
    }

    pub fn host(&self) -> &Arc<dyn HostNavigation> {
        self.coordinator.host()
    }

    pub fn config(&self) -> &NavigatorConfig {
        self.coordinator.config()
    }
}
