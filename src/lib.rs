//! Stack-based view/view-model navigation for MVVM applications
//!
//! [`ViewStackService`] drives a host's page stack, [`PopupViewStackService`] layers a
//! separate popup stack on top of it. Both re-publish the host's own push/pop events
//! and keep a copy-on-write mirror of the presented view-models.

pub mod config;
pub mod error;
pub mod host;
pub mod stack;
pub mod view;

pub use config::{NavigatorConfig, NavigatorConfigBuilder};
pub use error::{NavigationError, Result};
pub use host::{
    HostNavigation, InMemoryHost, NavigationEvent, NavigationEventKind, NavigationEventReceiver,
    NavigationEvents,
};
pub use stack::{PopupViewStackService, StackState, ViewStackService};
pub use view::{
    NavigationParameter, PageHandle, Presentable, PresentationKind, View, ViewLocator, ViewModel,
    ViewModelFactory, ViewModelId, ViewModelRegistry, ViewModelSlot, ViewRegistry,
};
