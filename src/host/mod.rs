//! The boundary to the host framework's navigation container
//!
//! A host owns the stack of pages actually presented. It serializes every mutation as
//! pre-event, mutation, post-event and publishes those events on its
//! [`NavigationEvents`] bus.

pub mod events;
pub mod memory;

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::view::{PageHandle, ViewModel};

pub use events::{
    NavigationEvent, NavigationEventKind, NavigationEventReceiver, NavigationEvents,
};
pub use memory::InMemoryHost;

/// Host navigation adapter
#[async_trait]
pub trait HostNavigation: Send + Sync {
    /// Present `page` on top of the stack
    async fn push(&self, page: PageHandle, animate: bool) -> Result<()>;

    /// Remove the top page. Fails with `EmptyStack` when there is none.
    async fn pop(&self, animate: bool) -> Result<()>;

    /// Remove every page
    async fn pop_all(&self, animate: bool) -> Result<()>;

    /// Remove `page` from wherever it sits in the stack
    async fn remove(&self, page: PageHandle, animate: bool) -> Result<()>;

    /// Native stack, bottom first
    fn stack(&self) -> Vec<PageHandle>;

    /// Event bus this host publishes to
    fn events(&self) -> &NavigationEvents;

    fn depth(&self) -> usize {
        self.stack().len()
    }
}

/// View-models bound to the host's pages, bottom first; unbound pages are skipped
pub fn bound_view_models(host: &dyn HostNavigation) -> Vec<Arc<dyn ViewModel>> {
    host.stack()
        .iter()
        .filter_map(|page| page.view_model())
        .collect()
}
