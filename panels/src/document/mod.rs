//! Display regions and triggers, addressed by element id.
//!
//! DESIGN
//! ======
//! Panels never look up a global document. A [`Document`] is handed to the
//! controller explicitly, which lets several boards coexist and lets tests
//! drive panels through [`MemoryDocument`] without a browser.
//!
//! Trigger handlers return a future instead of spawning one. The document
//! decides how to run it: the DOM document spawns it on the browser event
//! loop, the memory document hands it back to the caller of `click`.

#[cfg(feature = "hydrate")]
pub mod dom;
pub mod memory;

#[cfg(feature = "hydrate")]
pub use dom::DomDocument;
pub use memory::MemoryDocument;

use std::rc::Rc;

use futures::future::LocalBoxFuture;

/// Callback invoked once per trigger activation.
pub type TriggerHandler = Rc<dyn Fn() -> LocalBoxFuture<'static, ()>>;

/// Handle for one trigger subscription, used to tear it down.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Subscription {
    trigger_id: String,
    id: u64,
}

impl Subscription {
    pub fn new(trigger_id: impl Into<String>, id: u64) -> Self {
        Self { trigger_id: trigger_id.into(), id }
    }

    pub fn trigger_id(&self) -> &str {
        &self.trigger_id
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Host document seen by panels.
///
/// Missing elements are not errors: writes to an absent region return
/// `false`, subscriptions to an absent trigger return `None`.
pub trait Document {
    fn has_region(&self, region_id: &str) -> bool;

    /// Replace a region's content. Returns `false` if the region does not exist.
    fn set_content(&self, region_id: &str, markup: &str) -> bool;

    /// Attach `handler` to the trigger's activation event.
    fn subscribe(&self, trigger_id: &str, handler: TriggerHandler) -> Option<Subscription>;

    /// Detach a subscription. Returns `false` if it was already gone.
    fn unsubscribe(&self, subscription: &Subscription) -> bool;
}
