//! In-process host used by the demo binary and the test-suite
//!
//! Behaves like a real page container: pre-event, optional transition delay,
//! mutation, post-event. Pop-all reports a single Popping/Popped pair for the
//! pre-pop top page; removal reports exactly one Popped event for the removed page.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{HostNavigation, NavigationEvent, NavigationEventKind, NavigationEvents};
use crate::error::{NavigationError, Result};
use crate::view::{PageHandle, ViewModel, same_page, view_type_name};

pub struct InMemoryHost {
    name: String,
    stack: Mutex<Vec<PageHandle>>,
    events: NavigationEvents,
    transition_delay: Option<Duration>,
    pending_failure: Mutex<Option<String>>,
    operations: AtomicUsize,
}

impl InMemoryHost {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stack: Mutex::new(Vec::new()),
            events: NavigationEvents::new(),
            transition_delay: None,
            pending_failure: Mutex::new(None),
            operations: AtomicUsize::new(0),
        }
    }

    /// Simulate an animated transition taking `delay` between pre- and post-event
    pub fn with_transition_delay(mut self, delay: Duration) -> Self {
        self.transition_delay = Some(delay);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Make the next operation fail with a host error, before any event is raised
    pub fn fail_next(&self, message: impl Into<String>) {
        *self.lock_failure() = Some(message.into());
    }

    /// Number of operations the host was asked to perform
    pub fn operation_count(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    fn lock_stack(&self) -> std::sync::MutexGuard<'_, Vec<PageHandle>> {
        match self.stack.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn lock_failure(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        match self.pending_failure.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn begin(&self, operation: &str) -> Result<()> {
        self.operations.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.lock_failure().take() {
            log::warn!("[{}] {} failed: {}", self.name, operation, message);
            return Err(NavigationError::Host(anyhow::anyhow!(message)));
        }
        Ok(())
    }

    async fn transition(&self, animate: bool) {
        if let (true, Some(delay)) = (animate, self.transition_delay) {
            tokio::time::sleep(delay).await;
        }
    }

    fn top(&self) -> Option<PageHandle> {
        self.lock_stack().last().cloned()
    }
}

#[async_trait]
impl HostNavigation for InMemoryHost {
    async fn push(&self, page: PageHandle, animate: bool) -> Result<()> {
        self.begin("push")?;
        log::debug!("[{}] push {}", self.name, view_type_name(&page));

        self.events
            .emit(NavigationEventKind::Pushing, NavigationEvent::new(page.clone(), animate));
        self.transition(animate).await;
        self.lock_stack().push(page.clone());
        self.events
            .emit(NavigationEventKind::Pushed, NavigationEvent::new(page, animate));
        Ok(())
    }

    async fn pop(&self, animate: bool) -> Result<()> {
        self.begin("pop")?;
        let top = self.top().ok_or(NavigationError::EmptyStack)?;
        log::debug!("[{}] pop {}", self.name, view_type_name(&top));

        self.events
            .emit(NavigationEventKind::Popping, NavigationEvent::new(top, animate));
        self.transition(animate).await;
        let popped = self.lock_stack().pop().ok_or(NavigationError::EmptyStack)?;
        self.events
            .emit(NavigationEventKind::Popped, NavigationEvent::new(popped, animate));
        Ok(())
    }

    async fn pop_all(&self, animate: bool) -> Result<()> {
        self.begin("pop_all")?;
        let Some(top) = self.top() else {
            log::debug!("[{}] pop_all on empty stack", self.name);
            return Ok(());
        };
        log::debug!("[{}] pop_all from {}", self.name, view_type_name(&top));

        self.events
            .emit(NavigationEventKind::Popping, NavigationEvent::new(top.clone(), animate));
        self.transition(animate).await;
        self.lock_stack().clear();
        self.events
            .emit(NavigationEventKind::Popped, NavigationEvent::new(top, animate));
        Ok(())
    }

    async fn remove(&self, page: PageHandle, animate: bool) -> Result<()> {
        self.begin("remove")?;
        {
            let stack = self.lock_stack();
            if stack.is_empty() {
                return Err(NavigationError::EmptyStack);
            }
            if !stack.iter().any(|presented| same_page(presented, &page)) {
                let view_model = match page.view_model() {
                    Some(view_model) => view_model.title(),
                    None => view_type_name(&page).to_string(),
                };
                return Err(NavigationError::ItemNotFound { view_model });
            }
        }
        log::debug!("[{}] remove {}", self.name, view_type_name(&page));

        self.transition(animate).await;
        self.lock_stack().retain(|presented| !same_page(presented, &page));
        self.events
            .emit(NavigationEventKind::Popped, NavigationEvent::new(page, animate));
        Ok(())
    }

    fn stack(&self) -> Vec<PageHandle> {
        self.lock_stack().clone()
    }

    fn events(&self) -> &NavigationEvents {
        &self.events
    }
}
