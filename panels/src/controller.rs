//! Status panel controller: placeholder, one fetch, one render.
//!
//! LIFECYCLE
//! =========
//! idle -> in-progress -> settled (rendered | failed)
//!
//! The placeholder is written synchronously, before the returned future is
//! polled, so a trigger always shows progress even if the executor is slow
//! to pick the task up. The settled state always overwrites it. There is no
//! retry, timeout, or cancellation: a request that never settles leaves the
//! placeholder in place.

use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use serde::de::DeserializeOwned;

use crate::document::Document;
use crate::fetch::{FetchError, Fetcher};
use crate::panel::{Panel, PanelConfig};

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;

/// How a single activation settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelOutcome {
    /// The success formatter ran and its markup was written.
    Rendered,
    /// The error formatter ran; carries the error it was given.
    Failed(FetchError),
}

/// Runs request/response cycles against one document with one fetcher.
pub struct StatusPanelController<D, F> {
    document: Rc<D>,
    fetcher: Rc<F>,
}

impl<D, F> Clone for StatusPanelController<D, F> {
    fn clone(&self) -> Self {
        Self { document: Rc::clone(&self.document), fetcher: Rc::clone(&self.fetcher) }
    }
}

impl<D, F> StatusPanelController<D, F>
where
    D: Document + 'static,
    F: Fetcher + 'static,
{
    pub fn new(document: Rc<D>, fetcher: Rc<F>) -> Self {
        Self { document, fetcher }
    }

    pub fn document(&self) -> &Rc<D> {
        &self.document
    }

    /// Start one triggered fetch.
    ///
    /// Returns `None` without touching anything when `region_id` is not in
    /// the document. Otherwise the placeholder is already visible when this
    /// returns, and the future writes exactly one of the two formatted
    /// results before resolving.
    pub fn run_triggered_fetch<T, S, E>(
        &self,
        endpoint: &str,
        region_id: &str,
        placeholder: &str,
        format_success: S,
        format_error: E,
    ) -> Option<LocalBoxFuture<'static, PanelOutcome>>
    where
        T: DeserializeOwned + 'static,
        S: FnOnce(&T) -> String + 'static,
        E: FnOnce(&FetchError) -> String + 'static,
    {
        if !self.document.has_region(region_id) {
            return None;
        }
        self.document.set_content(region_id, placeholder);

        let document = Rc::clone(&self.document);
        let fetcher = Rc::clone(&self.fetcher);
        let endpoint = endpoint.to_owned();
        let region_id = region_id.to_owned();

        let settle = async move {
            let parsed = fetcher.get_json(&endpoint).await.and_then(|body| {
                serde_json::from_value::<T>(body).map_err(|e| FetchError::Format(e.to_string()))
            });

            match parsed {
                Ok(data) => {
                    document.set_content(&region_id, &format_success(&data));
                    PanelOutcome::Rendered
                }
                Err(err) => {
                    log::error!("panel `{region_id}`: GET {endpoint} failed: {err}");
                    document.set_content(&region_id, &format_error(&err));
                    PanelOutcome::Failed(err)
                }
            }
        };
        Some(settle.boxed_local())
    }

    /// Run `panel` against the identifiers in `config`.
    pub fn run_panel<P: Panel>(
        &self,
        config: &PanelConfig,
        panel: &Rc<P>,
    ) -> Option<LocalBoxFuture<'static, PanelOutcome>> {
        let on_success = Rc::clone(panel);
        let on_error = Rc::clone(panel);
        self.run_triggered_fetch(
            &config.endpoint,
            &config.region_id,
            &panel.placeholder(),
            move |data: &P::Response| on_success.format_success(data),
            move |err: &FetchError| on_error.format_error(err),
        )
    }
}
