//! Live DOM document backed by `web-sys`.
//!
//! Click listeners are `Closure`s owned by this document until
//! unsubscribed; dropping the document drops them with it.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use wasm_bindgen::{JsCast, closure::Closure};

use super::{Document, Subscription, TriggerHandler};

const TRIGGER_EVENT: &str = "click";

struct Listener {
    target: web_sys::Element,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

pub struct DomDocument {
    document: web_sys::Document,
    listeners: RefCell<HashMap<u64, Listener>>,
    next_id: Cell<u64>,
}

impl DomDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document, listeners: RefCell::new(HashMap::new()), next_id: Cell::new(0) }
    }

    /// The current window's document, if running in a browser page.
    pub fn from_window() -> Option<Self> {
        web_sys::window().and_then(|w| w.document()).map(Self::new)
    }
}

impl Document for DomDocument {
    fn has_region(&self, region_id: &str) -> bool {
        self.document.get_element_by_id(region_id).is_some()
    }

    fn set_content(&self, region_id: &str, markup: &str) -> bool {
        match self.document.get_element_by_id(region_id) {
            Some(el) => {
                el.set_inner_html(markup);
                true
            }
            None => false,
        }
    }

    fn subscribe(&self, trigger_id: &str, handler: TriggerHandler) -> Option<Subscription> {
        let target = self.document.get_element_by_id(trigger_id)?;
        let callback = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            wasm_bindgen_futures::spawn_local(handler());
        }) as Box<dyn FnMut(web_sys::Event)>);

        target
            .add_event_listener_with_callback(TRIGGER_EVENT, callback.as_ref().unchecked_ref())
            .ok()?;

        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().insert(id, Listener { target, callback });
        Some(Subscription::new(trigger_id, id))
    }

    fn unsubscribe(&self, subscription: &Subscription) -> bool {
        let Some(listener) = self.listeners.borrow_mut().remove(&subscription.id()) else {
            return false;
        };
        if let Err(err) = listener
            .target
            .remove_event_listener_with_callback(TRIGGER_EVENT, listener.callback.as_ref().unchecked_ref())
        {
            log::debug!("removing listener on `{}` failed: {err:?}", subscription.trigger_id());
        }
        true
    }
}
