//! WASM entry point for the orchestrator page.
//!
//! The page calls `mount_panels()` once the module has loaded. Calling it
//! again tears the previous board down before binding a new one.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::board::PanelBoard;
use crate::controller::StatusPanelController;
use crate::document::DomDocument;
use crate::fetch::BrowserFetcher;

thread_local! {
    static BOARD: RefCell<Option<PanelBoard<DomDocument, BrowserFetcher>>> = const { RefCell::new(None) };
}

/// Bind the audit and Lean check panels to the current document.
///
/// Returns the number of triggers bound.
#[wasm_bindgen]
pub fn mount_panels() -> usize {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    BOARD.with(|slot| drop(slot.borrow_mut().take()));

    let Some(document) = DomDocument::from_window() else {
        log::warn!("no document available; panels not mounted");
        return 0;
    };

    let controller = StatusPanelController::new(Rc::new(document), Rc::new(BrowserFetcher));
    let board = PanelBoard::with_defaults(controller);
    let bound = board.init();
    log::info!("mounted {bound} panel trigger(s)");

    BOARD.with(|slot| *slot.borrow_mut() = Some(board));
    bound
}
