//! Navigation events and the per-kind bus hosts publish to
//!
//! The bus is hot: a subscriber only sees events raised after it subscribed. Each
//! subscriber owns an unbounded queue, so every subscriber sees every event in emission
//! order no matter how far behind it reads.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;

use crate::view::{PageHandle, ViewModel, view_type_name};

/// A single push/pop transition as reported by the host
#[derive(Clone)]
pub struct NavigationEvent {
    page: PageHandle,
    animated: bool,
}

impl NavigationEvent {
    pub fn new(page: PageHandle, animated: bool) -> Self {
        Self { page, animated }
    }

    /// The page being pushed or popped
    pub fn page(&self) -> &PageHandle {
        &self.page
    }

    pub fn animated(&self) -> bool {
        self.animated
    }

    /// View-model bound to the page, if any
    pub fn view_model(&self) -> Option<Arc<dyn ViewModel>> {
        self.page.view_model()
    }
}

impl fmt::Debug for NavigationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationEvent")
            .field("page", &view_type_name(&self.page))
            .field("view_model", &self.view_model().map(|vm| vm.id()))
            .field("animated", &self.animated)
            .finish()
    }
}

/// The four lifecycle points a host reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationEventKind {
    /// Before a push mutates the host stack
    Pushing,
    /// After a push mutated the host stack
    Pushed,
    /// Before a pop mutates the host stack
    Popping,
    /// After a pop or removal mutated the host stack
    Popped,
}

impl NavigationEventKind {
    pub const ALL: [NavigationEventKind; 4] = [
        NavigationEventKind::Pushing,
        NavigationEventKind::Pushed,
        NavigationEventKind::Popping,
        NavigationEventKind::Popped,
    ];
}

impl fmt::Display for NavigationEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NavigationEventKind::Pushing => "pushing",
            NavigationEventKind::Pushed => "pushed",
            NavigationEventKind::Popping => "popping",
            NavigationEventKind::Popped => "popped",
        };
        write!(f, "{}", name)
    }
}

/// Receiving end handed to subscribers
///
/// `recv()` yields `None` once the host owning the bus is gone.
pub type NavigationEventReceiver = mpsc::UnboundedReceiver<NavigationEvent>;

type Subscribers = Mutex<Vec<mpsc::UnboundedSender<NavigationEvent>>>;

/// One subscriber list per event kind
///
/// Hosts write to it with [`emit`](Self::emit); services hand out receivers through
/// [`subscribe`](Self::subscribe). Dropped receivers are pruned on the next emit.
#[derive(Default)]
pub struct NavigationEvents {
    pushing: Subscribers,
    pushed: Subscribers,
    popping: Subscribers,
    popped: Subscribers,
}

impl NavigationEvents {
    pub fn new() -> Self {
        Self::default()
    }

    fn subscribers(
        &self,
        kind: NavigationEventKind,
    ) -> MutexGuard<'_, Vec<mpsc::UnboundedSender<NavigationEvent>>> {
        let subscribers = match kind {
            NavigationEventKind::Pushing => &self.pushing,
            NavigationEventKind::Pushed => &self.pushed,
            NavigationEventKind::Popping => &self.popping,
            NavigationEventKind::Popped => &self.popped,
        };
        match subscribers.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Subscribe to one kind of event from now on
    pub fn subscribe(&self, kind: NavigationEventKind) -> NavigationEventReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers(kind).push(tx);
        rx
    }

    /// Publish an event to every current subscriber of `kind`
    ///
    /// Returns how many subscribers received it. Having none is not an error.
    pub fn emit(&self, kind: NavigationEventKind, event: NavigationEvent) -> usize {
        log::trace!("Emitting {} event: {:?}", kind, event);
        let mut subscribers = self.subscribers(kind);
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        subscribers.len()
    }

    pub fn subscriber_count(&self, kind: NavigationEventKind) -> usize {
        let mut subscribers = self.subscribers(kind);
        subscribers.retain(|tx| !tx.is_closed());
        subscribers.len()
    }
}

impl fmt::Debug for NavigationEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("NavigationEvents");
        for kind in NavigationEventKind::ALL {
            debug.field(&kind.to_string(), &self.subscriber_count(kind));
        }
        debug.finish()
    }
}
