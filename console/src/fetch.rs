//! The generic request wrapper every handler goes through.
//!
//! # Design
//! `Fetcher` ties the IO-free `ApiClient` to a `Transport` and a
//! `DisplaySink`. Failures never escape it: a status, transport or JSON error
//! is rendered on the panel, logged, and reported to the caller as `None`.
//!
//! Each request takes a sequence number when issued. Under
//! `DisplayPolicy::DropStale` a response is only rendered if its number is
//! still the newest; under `LastResolved` every response is rendered.
//! Issuing and rendering both happen under `render`, so no request can be
//! issued between a response's freshness check and its render.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use escola_core::{ApiClient, ApiError, HttpRequest};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::config::DisplayPolicy;
use crate::display::{DisplaySink, Payload};
use crate::transport::Transport;

pub const LOADING_MESSAGE: &str = "Carregando...";

pub struct Fetcher {
    client: ApiClient,
    transport: Arc<dyn Transport>,
    sink: Arc<dyn DisplaySink>,
    policy: DisplayPolicy,
    issued: AtomicU64,
    render: Mutex<()>,
}

impl Fetcher {
    pub fn new(
        client: ApiClient,
        transport: Arc<dyn Transport>,
        sink: Arc<dyn DisplaySink>,
        policy: DisplayPolicy,
    ) -> Self {
        Self {
            client,
            transport,
            sink,
            policy,
            issued: AtomicU64::new(0),
            render: Mutex::new(()),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    pub fn sink(&self) -> &dyn DisplaySink {
        self.sink.as_ref()
    }

    /// Run one request and render its outcome.
    ///
    /// Returns the parsed JSON on success. Every failure is rendered and
    /// logged here, so callers only see `None`.
    pub fn request(&self, request: HttpRequest) -> Option<Value> {
        let seq = {
            let _render = self.render_lock();
            self.sink.show_loading(LOADING_MESSAGE);
            self.issued.fetch_add(1, Ordering::SeqCst) + 1
        };
        debug!(seq, method = request.method.as_str(), url = %request.url, "sending request");

        let outcome = self
            .transport
            .execute(&request)
            .and_then(|response| self.client.parse_json(response));

        match outcome {
            Ok(value) => {
                self.render_if_current(seq, &Payload::Json(value.clone()), false);
                Some(value)
            }
            Err(err) => {
                error!(seq, url = %request.url, error = %err, "request failed");
                self.render_if_current(seq, &error_payload(&err), true);
                None
            }
        }
    }

    /// Render an error raised before any request was issued.
    pub fn report(&self, err: &ApiError) {
        match err {
            ApiError::Validation(_) => warn!(error = %err, "input rejected"),
            _ => error!(error = %err, "request not sent"),
        }
        self.sink.show_result(&error_payload(err), true);
    }

    fn render_lock(&self) -> MutexGuard<'_, ()> {
        self.render.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn render_if_current(&self, seq: u64, payload: &Payload, is_error: bool) {
        let _render = self.render_lock();
        if self.is_current(seq) {
            self.sink.show_result(payload, is_error);
        }
    }

    fn is_current(&self, seq: u64) -> bool {
        match self.policy {
            DisplayPolicy::LastResolved => true,
            DisplayPolicy::DropStale => {
                let newest = self.issued.load(Ordering::SeqCst);
                if seq != newest {
                    debug!(seq, newest, "dropping stale response");
                }
                seq == newest
            }
        }
    }
}

/// Validation messages are shown verbatim; everything else gets `Erro: `.
fn error_payload(err: &ApiError) -> Payload {
    match err {
        ApiError::Validation(message) => Payload::Text(message.clone()),
        other => Payload::Text(format!("Erro: {other}")),
    }
}
