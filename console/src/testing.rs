//! Scripted transport for unit tests.

use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

use escola_core::{ApiError, HttpRequest, HttpResponse};

use crate::display::{Panel, PanelView};
use crate::transport::Transport;

struct Route {
    reply: Result<HttpResponse, ApiError>,
    gate: Option<(Sender<()>, Receiver<()>)>,
}

/// Test-side handle for a gated route.
pub(crate) struct Gate {
    entered: Receiver<()>,
    release: Sender<()>,
}

impl Gate {
    /// Block until the request reached the transport.
    pub(crate) fn wait_entered(&self) {
        self.entered.recv().unwrap();
    }

    /// Let the held request resolve.
    pub(crate) fn release(&self) {
        self.release.send(()).unwrap();
    }
}

/// Answers by exact URL; unknown URLs get a 404. Records every request.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    routes: Mutex<HashMap<String, Route>>,
    calls: Mutex<Vec<HttpRequest>>,
}

fn response(status: u16, body: &str) -> HttpResponse {
    let status_text = ureq::http::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or_default();
    HttpResponse {
        status,
        status_text: status_text.to_string(),
        headers: Vec::new(),
        body: body.to_string(),
    }
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn route(self, url: &str, route: Route) -> Self {
        self.routes.lock().unwrap().insert(url.to_string(), route);
        self
    }

    pub(crate) fn reply(self, url: &str, status: u16, body: &str) -> Self {
        self.route(
            url,
            Route {
                reply: Ok(response(status, body)),
                gate: None,
            },
        )
    }

    pub(crate) fn fail(self, url: &str, message: &str) -> Self {
        self.route(
            url,
            Route {
                reply: Err(ApiError::Transport(message.to_string())),
                gate: None,
            },
        )
    }

    /// Like `reply`, but the request is held until the gate is released.
    pub(crate) fn gated(self, url: &str, status: u16, body: &str) -> (Self, Gate) {
        let (entered_tx, entered_rx) = channel();
        let (release_tx, release_rx) = channel();
        let transport = self.route(
            url,
            Route {
                reply: Ok(response(status, body)),
                gate: Some((entered_tx, release_rx)),
            },
        );
        (
            transport,
            Gate {
                entered: entered_rx,
                release: release_tx,
            },
        )
    }

    pub(crate) fn calls(&self) -> Vec<HttpRequest> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.calls.lock().unwrap().push(request.clone());
        let (reply, gate) = {
            let mut routes = self.routes.lock().unwrap();
            match routes.get_mut(&request.url) {
                Some(route) => (route.reply.clone(), route.gate.take()),
                None => (Ok(response(404, "")), None),
            }
        };
        if let Some((entered, release)) = gate {
            entered.send(()).unwrap();
            release.recv().unwrap();
        }
        reply
    }
}

/// Answers `200 []` and records what the panel showed while each request was
/// in flight.
pub(crate) struct ObservingTransport {
    panel: Arc<Panel>,
    seen: Mutex<Vec<PanelView>>,
}

impl ObservingTransport {
    pub(crate) fn new(panel: Arc<Panel>) -> Self {
        Self {
            panel,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn seen(&self) -> Vec<PanelView> {
        self.seen.lock().unwrap().clone()
    }
}

impl Transport for ObservingTransport {
    fn execute(&self, _request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.seen.lock().unwrap().push(self.panel.view());
        Ok(response(200, "[]"))
    }
}
