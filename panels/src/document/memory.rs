//! In-memory document for native hosts and tests.
//!
//! Keeps every write to every region so callers can observe the
//! placeholder -> result sequence, not only the final state.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, join_all};

use super::{Document, Subscription, TriggerHandler};

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;

#[derive(Default)]
pub struct MemoryDocument {
    /// Region id -> every markup string written, oldest first.
    regions: RefCell<HashMap<String, Vec<String>>>,
    /// Trigger id -> live subscriptions.
    triggers: RefCell<HashMap<String, Vec<(u64, TriggerHandler)>>>,
    next_id: Cell<u64>,
}

impl MemoryDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_region(self, region_id: &str) -> Self {
        self.add_region(region_id);
        self
    }

    #[must_use]
    pub fn with_trigger(self, trigger_id: &str) -> Self {
        self.add_trigger(trigger_id);
        self
    }

    pub fn add_region(&self, region_id: &str) {
        self.regions.borrow_mut().entry(region_id.to_owned()).or_default();
    }

    pub fn remove_region(&self, region_id: &str) {
        self.regions.borrow_mut().remove(region_id);
    }

    pub fn add_trigger(&self, trigger_id: &str) {
        self.triggers.borrow_mut().entry(trigger_id.to_owned()).or_default();
    }

    /// Current content of a region; empty if never written, `None` if absent.
    pub fn content(&self, region_id: &str) -> Option<String> {
        self.regions
            .borrow()
            .get(region_id)
            .map(|writes| writes.last().cloned().unwrap_or_default())
    }

    /// Every write made to a region, oldest first.
    pub fn history(&self, region_id: &str) -> Vec<String> {
        self.regions.borrow().get(region_id).cloned().unwrap_or_default()
    }

    pub fn listener_count(&self, trigger_id: &str) -> usize {
        self.triggers.borrow().get(trigger_id).map_or(0, Vec::len)
    }

    /// Activate a trigger.
    ///
    /// Handlers run synchronously up to their first await point; the
    /// returned future completes when every handler's future has settled.
    pub fn click(&self, trigger_id: &str) -> LocalBoxFuture<'static, ()> {
        let handlers: Vec<TriggerHandler> = self
            .triggers
            .borrow()
            .get(trigger_id)
            .map(|subs| subs.iter().map(|(_, handler)| handler.clone()).collect())
            .unwrap_or_default();

        let pending: Vec<_> = handlers.iter().map(|handler| handler()).collect();
        join_all(pending).map(|_| ()).boxed_local()
    }
}

impl Document for MemoryDocument {
    fn has_region(&self, region_id: &str) -> bool {
        self.regions.borrow().contains_key(region_id)
    }

    fn set_content(&self, region_id: &str, markup: &str) -> bool {
        match self.regions.borrow_mut().get_mut(region_id) {
            Some(writes) => {
                writes.push(markup.to_owned());
                true
            }
            None => false,
        }
    }

    fn subscribe(&self, trigger_id: &str, handler: TriggerHandler) -> Option<Subscription> {
        let mut triggers = self.triggers.borrow_mut();
        let subs = triggers.get_mut(trigger_id)?;
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        subs.push((id, handler));
        Some(Subscription::new(trigger_id, id))
    }

    fn unsubscribe(&self, subscription: &Subscription) -> bool {
        let mut triggers = self.triggers.borrow_mut();
        let Some(subs) = triggers.get_mut(subscription.trigger_id()) else {
            return false;
        };
        let before = subs.len();
        subs.retain(|(id, _)| *id != subscription.id());
        subs.len() != before
    }
}
