//! Mapping from view-model types to the views that present them

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{PageHandle, Presentable, PresentationKind, View, ViewModel, view_model_type_id};

/// Resolves a view for a view-model
///
/// Returns `None` when nothing is registered for the view-model's type and contract.
pub trait ViewLocator: Send + Sync {
    fn resolve_view(
        &self,
        view_model: &Arc<dyn ViewModel>,
        contract: Option<&str>,
    ) -> Option<Presentable>;
}

type ViewConstructor = Box<dyn Fn() -> PageHandle + Send + Sync>;

struct Registration {
    kind: PresentationKind,
    construct: ViewConstructor,
}

#[derive(Clone, PartialEq, Eq, Hash)]
struct RegistrationKey {
    view_model: TypeId,
    contract: Option<String>,
}

/// Default [`ViewLocator`] backed by an in-process table
///
/// Each registration records whether the view is a page or a popup, so resolution
/// hands back an already tagged [`Presentable`].
#[derive(Default)]
pub struct ViewRegistry {
    registrations: RwLock<HashMap<RegistrationKey, Registration>>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page view for `VM` under an optional contract
    pub fn register_page<VM, V, F>(&self, contract: Option<&str>, construct: F)
    where
        VM: ViewModel,
        V: View,
        F: Fn() -> V + Send + Sync + 'static,
    {
        self.register::<VM, V, F>(PresentationKind::Page, contract, construct);
    }

    /// Register a popup view for `VM` under an optional contract
    pub fn register_popup<VM, V, F>(&self, contract: Option<&str>, construct: F)
    where
        VM: ViewModel,
        V: View,
        F: Fn() -> V + Send + Sync + 'static,
    {
        self.register::<VM, V, F>(PresentationKind::Popup, contract, construct);
    }

    fn register<VM, V, F>(&self, kind: PresentationKind, contract: Option<&str>, construct: F)
    where
        VM: ViewModel,
        V: View,
        F: Fn() -> V + Send + Sync + 'static,
    {
        let key = RegistrationKey {
            view_model: TypeId::of::<VM>(),
            contract: contract.map(str::to_string),
        };
        let registration = Registration {
            kind,
            construct: Box::new(move || Arc::new(construct()) as PageHandle),
        };

        log::debug!(
            "Registered {} view {} for {} (contract: {:?})",
            kind,
            std::any::type_name::<V>(),
            std::any::type_name::<VM>(),
            contract
        );

        let mut registrations = match self.registrations.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        registrations.insert(key, registration);
    }

    /// Registered presentation kind for a view-model type and contract
    pub fn kind_of(&self, view_model: TypeId, contract: Option<&str>) -> Option<PresentationKind> {
        let key = RegistrationKey {
            view_model,
            contract: contract.map(str::to_string),
        };
        let registrations = match self.registrations.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        registrations.get(&key).map(|registration| registration.kind)
    }

    pub fn len(&self) -> usize {
        match self.registrations.read() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ViewLocator for ViewRegistry {
    fn resolve_view(
        &self,
        view_model: &Arc<dyn ViewModel>,
        contract: Option<&str>,
    ) -> Option<Presentable> {
        let key = RegistrationKey {
            view_model: view_model_type_id(view_model),
            contract: contract.map(str::to_string),
        };
        let registrations = match self.registrations.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let registration = registrations.get(&key)?;
        let handle = (registration.construct)();

        Some(match registration.kind {
            PresentationKind::Page => Presentable::Page(handle),
            PresentationKind::Popup => Presentable::Popup(handle),
        })
    }
}
