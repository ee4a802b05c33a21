//! Popup navigation layered over the page stack
//!
//! Popups live on their own host with their own depth and event streams. They float
//! above whatever page is active and never change the page stack.

use std::sync::Arc;

use super::coordinator::StackCoordinator;
use super::service::ViewStackService;
use crate::config::NavigatorConfig;
use crate::error::Result;
use crate::host::{HostNavigation, NavigationEventKind, NavigationEventReceiver, bound_view_models};
use crate::view::{
    NavigationParameter, PresentationKind, ViewLocator, ViewModel, ViewModelFactory, ViewModelId,
};

pub struct PopupViewStackService {
    pages: Arc<ViewStackService>,
    popups: StackCoordinator,
}

impl PopupViewStackService {
    pub fn new(
        pages: Arc<ViewStackService>,
        popup_host: Arc<dyn HostNavigation>,
        locator: Arc<dyn ViewLocator>,
        factory: Arc<dyn ViewModelFactory>,
    ) -> Self {
        let config = pages.config().clone();
        Self::with_config(pages, popup_host, locator, factory, config)
    }

    pub fn with_config(
        pages: Arc<ViewStackService>,
        popup_host: Arc<dyn HostNavigation>,
        locator: Arc<dyn ViewLocator>,
        factory: Arc<dyn ViewModelFactory>,
        config: NavigatorConfig,
    ) -> Self {
        Self {
            pages,
            popups: StackCoordinator::new(
                PresentationKind::Popup,
                popup_host,
                locator,
                factory,
                config,
            ),
        }
    }

    /// The page stack this popup layer floats above
    pub fn pages(&self) -> &Arc<ViewStackService> {
        &self.pages
    }

    /// Present `view_model` as a popup
    ///
    /// The registered view must be a popup; a page registration is a `ViewResolution`
    /// error.
    pub async fn push_popup(
        &self,
        view_model: Arc<dyn ViewModel>,
        contract: Option<&str>,
        animate: bool,
    ) -> Result<()> {
        self.popups.push(view_model, contract, animate, None).await
    }

    pub async fn push_popup_with_parameter(
        &self,
        view_model: Arc<dyn ViewModel>,
        parameter: &NavigationParameter,
        contract: Option<&str>,
        animate: bool,
    ) -> Result<()> {
        self.popups.push(view_model, contract, animate, Some(parameter)).await
    }

    pub async fn push_popup_new<VM: ViewModel>(
        &self,
        contract: Option<&str>,
        animate: bool,
    ) -> Result<Arc<dyn ViewModel>> {
        let view_model = self.popups.create::<VM>()?;
        self.push_popup(view_model.clone(), contract, animate).await?;
        Ok(view_model)
    }

    /// Push a popup and wait until it has left the popup stack
    ///
    /// Completes once the popup is popped, removed, or cleared by a pop-all, whoever
    /// triggers it.
    pub async fn push_popup_until_popped(
        &self,
        view_model: Arc<dyn ViewModel>,
        contract: Option<&str>,
        animate: bool,
    ) -> Result<()> {
        self.present_until_popped(view_model, None, contract, animate).await
    }

    pub async fn push_popup_until_popped_with_parameter(
        &self,
        view_model: Arc<dyn ViewModel>,
        parameter: &NavigationParameter,
        contract: Option<&str>,
        animate: bool,
    ) -> Result<()> {
        self.present_until_popped(view_model, Some(parameter), contract, animate).await
    }

    /// Create a `VM` through the factory, present it, and wait until it is gone
    ///
    /// Returns the created view-model once it has left the popup stack.
    pub async fn push_popup_until_popped_new<VM: ViewModel>(
        &self,
        contract: Option<&str>,
        animate: bool,
    ) -> Result<Arc<dyn ViewModel>> {
        let view_model = self.popups.create::<VM>()?;
        self.present_until_popped(view_model.clone(), None, contract, animate).await?;
        Ok(view_model)
    }

    async fn present_until_popped(
        &self,
        view_model: Arc<dyn ViewModel>,
        parameter: Option<&NavigationParameter>,
        contract: Option<&str>,
        animate: bool,
    ) -> Result<()> {
        let id = view_model.id();
        let mut popped = self.popped();
        self.popups.push(view_model, contract, animate, parameter).await?;

        while self.is_presented(id) {
            if popped.recv().await.is_none() {
                log::warn!("Popup host dropped its event bus while waiting for {}", id);
                break;
            }
        }
        Ok(())
    }

    pub async fn pop_popup(&self, animate: bool) -> Result<Option<Arc<dyn ViewModel>>> {
        self.popups.pop(animate).await
    }

    pub async fn pop_all_popups(&self, animate: bool) -> Result<Vec<Arc<dyn ViewModel>>> {
        self.popups.pop_all(animate).await
    }

    /// Remove a specific popup; both the view-model id and the view type must match
    pub async fn remove_popup(
        &self,
        view_model: &Arc<dyn ViewModel>,
        contract: Option<&str>,
        animate: bool,
    ) -> Result<()> {
        self.popups.remove(view_model, contract, animate).await
    }

    pub fn pushing(&self) -> NavigationEventReceiver {
        self.popups.subscribe(NavigationEventKind::Pushing)
    }

    pub fn pushed(&self) -> NavigationEventReceiver {
        self.popups.subscribe(NavigationEventKind::Pushed)
    }

    pub fn popping(&self) -> NavigationEventReceiver {
        self.popups.subscribe(NavigationEventKind::Popping)
    }

    pub fn popped(&self) -> NavigationEventReceiver {
        self.popups.subscribe(NavigationEventKind::Popped)
    }

    pub fn popup_stack(&self) -> Vec<Arc<dyn ViewModel>> {
        self.popups.current_stack()
    }

    pub fn top_popup(&self) -> Option<Arc<dyn ViewModel>> {
        self.popups.top()
    }

    pub fn popup_host(&self) -> &Arc<dyn HostNavigation> {
        self.popups.host()
    }

    fn is_presented(&self, id: ViewModelId) -> bool {
        bound_view_models(&**self.popups.host())
            .iter()
            .any(|view_model| view_model.id() == id)
    }
}
