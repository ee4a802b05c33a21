//! Page and popup view stack services
//!
//! Both services share one coordinator: resolve a view through the locator, hand it to
//! the host, and only after the host completes replace the copy-on-write snapshot.

mod coordinator;
pub mod popup;
pub mod service;
pub mod snapshot;

pub use popup::PopupViewStackService;
pub use service::ViewStackService;
pub use snapshot::{StackSnapshot, StackState};
