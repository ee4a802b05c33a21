//! View-models, views and the handles the host presents
//!
//! A view-model is anything implementing [`ViewModel`]; its [`ViewModelId`] is the
//! identity used for equality and removal. A view is resolved per push by a
//! [`ViewLocator`] and carries a binding slot for its view-model. Whether a view is a
//! page or a popup is fixed when it is registered, see [`Presentable`].

pub mod factory;
pub mod locator;

use serde_json::Value;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

pub use factory::{ViewModelFactory, ViewModelRegistry};
pub use locator::{ViewLocator, ViewRegistry};

/// Type-erasure helper so trait objects can report their concrete type
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Stable identity of a view-model instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewModelId(Uuid);

impl ViewModelId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ViewModelId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ViewModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parameters handed to a view-model when it is navigated to or from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationParameter {
    values: HashMap<String, Value>,
}

impl NavigationParameter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Deserialize a single entry into a concrete type
    pub fn get_as<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.values
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// The navigable capability
///
/// The lifecycle hooks are called by the services after the host transition has
/// completed. They default to no-ops.
pub trait ViewModel: AsAny + Send + Sync {
    /// Identity used for equality and removal
    fn id(&self) -> ViewModelId;

    /// Human readable name, used in logs and errors
    fn title(&self) -> String {
        self.type_name().rsplit("::").next().unwrap_or("ViewModel").to_string()
    }

    /// Called after this view-model became the top of its stack
    fn navigated_to(&self, _parameter: &NavigationParameter) {}

    /// Called after this view-model was popped or removed
    fn navigated_from(&self, _parameter: &NavigationParameter) {}
}

/// A view that can display a bound view-model
pub trait View: AsAny + Send + Sync {
    fn view_model(&self) -> Option<Arc<dyn ViewModel>>;

    fn bind(&self, view_model: Arc<dyn ViewModel>);
}

/// Handle to a presented view, as held by the host
pub type PageHandle = Arc<dyn View>;

/// Binding slot most views embed to satisfy [`View`]
#[derive(Default)]
pub struct ViewModelSlot {
    inner: RwLock<Option<Arc<dyn ViewModel>>>,
}

impl ViewModelSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Arc<dyn ViewModel>> {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set(&self, view_model: Arc<dyn ViewModel>) {
        match self.inner.write() {
            Ok(mut guard) => *guard = Some(view_model),
            Err(poisoned) => *poisoned.into_inner() = Some(view_model),
        }
    }
}

impl fmt::Debug for ViewModelSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewModelSlot")
            .field("view_model", &self.get().map(|vm| vm.id()))
            .finish()
    }
}

/// Which surface a view is presented on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresentationKind {
    Page,
    Popup,
}

impl fmt::Display for PresentationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresentationKind::Page => write!(f, "page"),
            PresentationKind::Popup => write!(f, "popup"),
        }
    }
}

/// A resolved view, tagged with its presentation kind
#[derive(Clone)]
pub enum Presentable {
    Page(PageHandle),
    Popup(PageHandle),
}

impl Presentable {
    pub fn kind(&self) -> PresentationKind {
        match self {
            Presentable::Page(_) => PresentationKind::Page,
            Presentable::Popup(_) => PresentationKind::Popup,
        }
    }

    pub fn handle(&self) -> &PageHandle {
        match self {
            Presentable::Page(handle) | Presentable::Popup(handle) => handle,
        }
    }

    pub fn into_handle(self) -> PageHandle {
        match self {
            Presentable::Page(handle) | Presentable::Popup(handle) => handle,
        }
    }
}

impl fmt::Debug for Presentable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(match self.kind() {
            PresentationKind::Page => "Page",
            PresentationKind::Popup => "Popup",
        })
        .field(&view_type_name(self.handle()))
        .finish()
    }
}

/// Concrete type name of the view behind a handle
pub fn view_type_name(page: &PageHandle) -> &'static str {
    let view: &dyn View = page.as_ref();
    view.type_name()
}

/// Concrete type name of a view-model behind an `Arc`
pub fn view_model_type_name(view_model: &Arc<dyn ViewModel>) -> &'static str {
    let view_model: &dyn ViewModel = view_model.as_ref();
    view_model.type_name()
}

/// `TypeId` of the concrete view-model behind an `Arc`
pub fn view_model_type_id(view_model: &Arc<dyn ViewModel>) -> std::any::TypeId {
    let view_model: &dyn ViewModel = view_model.as_ref();
    view_model.as_any().type_id()
}

/// True when both handles point at the same view instance
pub fn same_page(a: &PageHandle, b: &PageHandle) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
