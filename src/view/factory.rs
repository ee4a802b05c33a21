use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::ViewModel;

/// Creates view-models on demand
///
/// Object safe so services can hold it as `Arc<dyn ViewModelFactory>`; call sites use
/// the typed `create::<VM>()` helper on the trait object.
pub trait ViewModelFactory: Send + Sync {
    fn create_by_type(&self, type_id: TypeId) -> Option<Arc<dyn ViewModel>>;
}

impl<'a> dyn ViewModelFactory + 'a {
    /// Create a new `VM`, or `None` when the factory cannot build one
    pub fn create<VM: ViewModel>(&self) -> Option<Arc<dyn ViewModel>> {
        self.create_by_type(TypeId::of::<VM>())
    }
}

type ViewModelConstructor = Box<dyn Fn() -> Arc<dyn ViewModel> + Send + Sync>;

/// Default [`ViewModelFactory`] holding one constructor per view-model type
#[derive(Default)]
pub struct ViewModelRegistry {
    constructors: RwLock<HashMap<TypeId, ViewModelConstructor>>,
}

impl ViewModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<VM, F>(&self, construct: F)
    where
        VM: ViewModel,
        F: Fn() -> VM + Send + Sync + 'static,
    {
        log::debug!("Registered view model constructor for {}", std::any::type_name::<VM>());
        let mut constructors = match self.constructors.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        constructors.insert(
            TypeId::of::<VM>(),
            Box::new(move || Arc::new(construct()) as Arc<dyn ViewModel>),
        );
    }

    /// Register `VM` using its `Default` impl
    pub fn register_default<VM>(&self)
    where
        VM: ViewModel + Default,
    {
        self.register::<VM, _>(VM::default);
    }

    pub fn contains<VM: ViewModel>(&self) -> bool {
        match self.constructors.read() {
            Ok(guard) => guard.contains_key(&TypeId::of::<VM>()),
            Err(poisoned) => poisoned.into_inner().contains_key(&TypeId::of::<VM>()),
        }
    }
}

impl ViewModelFactory for ViewModelRegistry {
    fn create_by_type(&self, type_id: TypeId) -> Option<Arc<dyn ViewModel>> {
        let constructors = match self.constructors.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        constructors.get(&type_id).map(|construct| construct())
    }
}
