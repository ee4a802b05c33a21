use std::sync::Arc;

use super::snapshot::{StackSnapshot, StackState};
use crate::config::NavigatorConfig;
use crate::error::{NavigationError, Result};
use crate::host::{HostNavigation, NavigationEventKind, NavigationEventReceiver};
use crate::view::{
    NavigationParameter, PageHandle, PresentationKind, ViewLocator, ViewModel, ViewModelFactory,
    view_model_type_name, view_type_name,
};

/// Push/pop/remove bookkeeping for one presentation surface
///
/// Resolution failures are raised before the host is called. The snapshot is only
/// replaced after the host reports the operation complete.
pub(crate) struct StackCoordinator {
    surface: PresentationKind,
    host: Arc<dyn HostNavigation>,
    locator: Arc<dyn ViewLocator>,
    factory: Arc<dyn ViewModelFactory>,
    snapshot: StackSnapshot,
    config: NavigatorConfig,
}

impl StackCoordinator {
    pub(crate) fn new(
        surface: PresentationKind,
        host: Arc<dyn HostNavigation>,
        locator: Arc<dyn ViewLocator>,
        factory: Arc<dyn ViewModelFactory>,
        config: NavigatorConfig,
    ) -> Self {
        log::info!(
            "Created {} stack coordinator (animations: {})",
            surface,
            config.animations
        );
        Self {
            surface,
            host,
            locator,
            factory,
            snapshot: StackSnapshot::new(),
            config,
        }
    }

    pub(crate) fn host(&self) -> &Arc<dyn HostNavigation> {
        &self.host
    }

    pub(crate) fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub(crate) fn subscribe(&self, kind: NavigationEventKind) -> NavigationEventReceiver {
        self.host.events().subscribe(kind)
    }

    /// Resolve a view of this surface's kind for `view_model`
    fn resolve(
        &self,
        view_model: &Arc<dyn ViewModel>,
        contract: Option<&str>,
    ) -> Result<PageHandle> {
        let resolved = self
            .locator
            .resolve_view(view_model, contract)
            .ok_or_else(|| {
                NavigationError::resolution(
                    view_model_type_name(view_model),
                    contract,
                    "no view is registered",
                )
            })?;

        if resolved.kind() != self.surface {
            return Err(NavigationError::resolution(
                view_model_type_name(view_model),
                contract,
                format!(
                    "resolved view '{}' is a {}, not a {}",
                    view_type_name(resolved.handle()),
                    resolved.kind(),
                    self.surface
                ),
            ));
        }

        Ok(resolved.into_handle())
    }

    pub(crate) fn create<VM: ViewModel>(&self) -> Result<Arc<dyn ViewModel>> {
        self.factory
            .create::<VM>()
            .ok_or_else(|| NavigationError::ViewModelCreation {
                type_name: std::any::type_name::<VM>().to_string(),
            })
    }

    pub(crate) async fn push(
        &self,
        view_model: Arc<dyn ViewModel>,
        contract: Option<&str>,
        animate: bool,
        parameter: Option<&NavigationParameter>,
    ) -> Result<()> {
        let page = self.resolve(&view_model, contract)?;
        page.bind(view_model.clone());

        log::debug!(
            "Pushing {} '{}' ({})",
            self.surface,
            view_model.title(),
            view_model.id()
        );
        self.host.push(page, self.config.animate(animate)).await?;
        self.snapshot.push(view_model.clone());

        let empty = NavigationParameter::default();
        view_model.navigated_to(parameter.unwrap_or(&empty));
        Ok(())
    }

    pub(crate) async fn pop(&self, animate: bool) -> Result<Option<Arc<dyn ViewModel>>> {
        self.host.pop(self.config.animate(animate)).await?;

        let departed = self.snapshot.pop();
        match &departed {
            Some(view_model) => {
                log::debug!("Popped {} '{}'", self.surface, view_model.title());
                view_model.navigated_from(&NavigationParameter::default());
            }
            None => log::warn!("Host popped a {} the snapshot did not hold", self.surface),
        }
        Ok(departed)
    }

    pub(crate) async fn pop_all(&self, animate: bool) -> Result<Vec<Arc<dyn ViewModel>>> {
        self.host.pop_all(self.config.animate(animate)).await?;
        let departed = self.snapshot.clear();
        log::debug!("Popped all {} entries ({})", self.surface, departed.len());
        let parameter = NavigationParameter::default();
        for view_model in departed.iter().rev() {
            view_model.navigated_from(&parameter);
        }
        Ok(departed)
    }

    /// Remove `view_model` from any position
    ///
    /// The page handed to the host is the presented page bound to `view_model` whose
    /// view type matches the registration for `contract`. When no such page is
    /// presented the freshly resolved view is passed instead and the host decides
    /// (empty stack, unknown page).
    pub(crate) async fn remove(
        &self,
        view_model: &Arc<dyn ViewModel>,
        contract: Option<&str>,
        animate: bool,
    ) -> Result<()> {
        let expected = self.resolve(view_model, contract)?;
        let expected_type = view_type_name(&expected);

        let page = self
            .host
            .stack()
            .into_iter()
            .find(|page| {
                view_type_name(page) == expected_type
                    && page
                        .view_model()
                        .is_some_and(|bound| bound.id() == view_model.id())
            })
            .unwrap_or(expected);

        log::debug!("Removing {} '{}'", self.surface, view_model.title());
        self.host.remove(page, self.config.animate(animate)).await?;

        if self.snapshot.remove(view_model.id()).is_none() {
            // host removal already happened and is not rolled back
            log::warn!(
                "Removed {} '{}' from the host but it was missing from the snapshot",
                self.surface,
                view_model.title()
            );
            return Err(NavigationError::ItemNotFound {
                view_model: view_model.title(),
            });
        }

        view_model.navigated_from(&NavigationParameter::default());
        Ok(())
    }

    pub(crate) fn current_stack(&self) -> Vec<Arc<dyn ViewModel>> {
        self.snapshot.load().entries().to_vec()
    }

    pub(crate) fn top(&self) -> Option<Arc<dyn ViewModel>> {
        self.snapshot.load().top().cloned()
    }

    pub(crate) fn snapshot(&self) -> Arc<StackState> {
        self.snapshot.load()
    }
}
