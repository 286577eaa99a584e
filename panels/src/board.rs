//! Panel board: owns the trigger subscriptions for a set of panels.
//!
//! DESIGN
//! ======
//! Binding is explicit. `init` always tears down what it bound before, so
//! re-initializing a board never stacks duplicate handlers on a trigger.
//! Dropping the board tears its subscriptions down as well.

use std::cell::RefCell;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};

use crate::controller::{PanelOutcome, StatusPanelController};
use crate::document::{Document, Subscription, TriggerHandler};
use crate::fetch::Fetcher;
use crate::panel::{AuditPanel, LeanPanel, Panel, PanelConfig};

#[cfg(test)]
#[path = "board_test.rs"]
mod tests;

type Activation = Rc<dyn Fn() -> Option<LocalBoxFuture<'static, PanelOutcome>>>;

struct RegisteredPanel {
    config: PanelConfig,
    activate: Activation,
}

pub struct PanelBoard<D: Document + 'static, F: Fetcher + 'static> {
    controller: StatusPanelController<D, F>,
    panels: Vec<RegisteredPanel>,
    subscriptions: RefCell<Vec<Subscription>>,
}

impl<D, F> PanelBoard<D, F>
where
    D: Document + 'static,
    F: Fetcher + 'static,
{
    pub fn new(controller: StatusPanelController<D, F>) -> Self {
        Self { controller, panels: Vec::new(), subscriptions: RefCell::new(Vec::new()) }
    }

    /// Board with the audit and Lean check panels at their page identifiers.
    pub fn with_defaults(controller: StatusPanelController<D, F>) -> Self {
        let mut board = Self::new(controller);
        board.register(AuditPanel::default_config(), AuditPanel);
        board.register(LeanPanel::default_config(), LeanPanel);
        board
    }

    /// Add a panel. Takes effect on the next `init`.
    pub fn register<P: Panel>(&mut self, config: PanelConfig, panel: P) -> &mut Self {
        let controller = self.controller.clone();
        let panel = Rc::new(panel);
        let bound_config = config.clone();
        let activate: Activation = Rc::new(move || controller.run_panel(&bound_config, &panel));
        self.panels.push(RegisteredPanel { config, activate });
        self
    }

    /// Subscribe every registered panel to its trigger, replacing any
    /// previous subscriptions. Returns how many triggers were bound;
    /// panels whose trigger is absent are skipped.
    pub fn init(&self) -> usize {
        self.teardown();

        let document = self.controller.document();
        let mut bound = Vec::with_capacity(self.panels.len());
        for panel in &self.panels {
            let activate = Rc::clone(&panel.activate);
            let handler: TriggerHandler = Rc::new(move || match activate() {
                Some(pending) => pending.map(|_outcome| ()).boxed_local(),
                None => future::ready(()).boxed_local(),
            });

            match document.subscribe(&panel.config.trigger_id, handler) {
                Some(subscription) => bound.push(subscription),
                None => log::debug!("trigger `{}` not present; panel not bound", panel.config.trigger_id),
            }
        }

        let count = bound.len();
        *self.subscriptions.borrow_mut() = bound;
        count
    }

    /// Remove every subscription made by `init`. Safe to call repeatedly.
    pub fn teardown(&self) -> usize {
        let subscriptions = std::mem::take(&mut *self.subscriptions.borrow_mut());
        let document = self.controller.document();
        subscriptions
            .iter()
            .filter(|subscription| document.unsubscribe(subscription))
            .count()
    }

    /// Run the panel registered for `trigger_id` directly, bypassing the
    /// document's event dispatch.
    pub fn activate(&self, trigger_id: &str) -> Option<LocalBoxFuture<'static, PanelOutcome>> {
        self.panels
            .iter()
            .find(|panel| panel.config.trigger_id == trigger_id)
            .and_then(|panel| (panel.activate)())
    }

    pub fn bound_triggers(&self) -> Vec<String> {
        self.subscriptions
            .borrow()
            .iter()
            .map(|subscription| subscription.trigger_id().to_owned())
            .collect()
    }
}

impl<D, F> Drop for PanelBoard<D, F>
where
    D: Document + 'static,
    F: Fetcher + 'static,
{
    fn drop(&mut self) {
        self.teardown();
    }
}
