//! Copy-on-write record of the presented view-models
//!
//! The entry list is never mutated in place: every completed operation builds a new
//! [`StackState`] and swaps it in atomically, so readers always see a fully completed
//! state and never a partially applied one.

use arc_swap::ArcSwap;
use std::fmt;
use std::sync::Arc;

use crate::view::{ViewModel, ViewModelId};

/// One immutable version of the stack
#[derive(Clone, Default)]
pub struct StackState {
    entries: Vec<Arc<dyn ViewModel>>,
    version: u64,
}

impl StackState {
    /// Entries bottom first
    pub fn entries(&self) -> &[Arc<dyn ViewModel>] {
        &self.entries
    }

    /// Incremented on every replacement
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top(&self) -> Option<&Arc<dyn ViewModel>> {
        self.entries.last()
    }

    pub fn ids(&self) -> Vec<ViewModelId> {
        self.entries.iter().map(|entry| entry.id()).collect()
    }

    fn next(&self, entries: Vec<Arc<dyn ViewModel>>) -> Self {
        Self {
            entries,
            version: self.version + 1,
        }
    }
}

impl fmt::Debug for StackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackState")
            .field("version", &self.version)
            .field(
                "entries",
                &self.entries.iter().map(|entry| entry.title()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Atomically replaceable [`StackState`]
pub struct StackSnapshot {
    state: ArcSwap<StackState>,
}

impl StackSnapshot {
    pub fn new() -> Self {
        Self {
            state: ArcSwap::from_pointee(StackState::default()),
        }
    }

    /// Current state; stays valid and unchanged however the stack moves on
    pub fn load(&self) -> Arc<StackState> {
        self.state.load_full()
    }

    pub fn push(&self, view_model: Arc<dyn ViewModel>) {
        self.state.rcu(|state| {
            let mut entries = state.entries.clone();
            entries.push(view_model.clone());
            state.next(entries)
        });
    }

    /// Drop the top entry, returning it
    pub fn pop(&self) -> Option<Arc<dyn ViewModel>> {
        let previous = self.state.rcu(|state| {
            let mut entries = state.entries.clone();
            entries.pop();
            state.next(entries)
        });
        previous.top().cloned()
    }

    pub fn clear(&self) -> Vec<Arc<dyn ViewModel>> {
        let previous = self.state.rcu(|state| state.next(Vec::new()));
        previous.entries.clone()
    }

    /// Remove the entry with `id` from any position
    ///
    /// Returns the removed entry, or `None` (leaving the state untouched) when absent.
    pub fn remove(&self, id: ViewModelId) -> Option<Arc<dyn ViewModel>> {
        let mut removed = None;
        self.state.rcu(|state| {
            match state.entries.iter().position(|entry| entry.id() == id) {
                Some(index) => {
                    let mut entries = state.entries.clone();
                    removed = Some(entries.remove(index));
                    Arc::new(state.next(entries))
                }
                None => {
                    removed = None;
                    Arc::clone(state)
                }
            }
        });
        removed
    }
}

impl Default for StackSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StackSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.load().fmt(f)
    }
}
