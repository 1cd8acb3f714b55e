//! The results panel: one region showing the outcome of the latest call.
//!
//! # Design
//! Handlers never own the panel; they receive a `DisplaySink`. Each call
//! replaces whatever the panel showed before. Nothing is queued or merged, so
//! concurrent callers race and the last write wins.

use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value;

pub const PLACEHOLDER: &str = "Os resultados das operações aparecerão aqui...";

/// What a call wants rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    /// Objects, arrays and `null` render as 2-space indented JSON; strings
    /// render bare; other scalars use their JSON spelling.
    pub fn render(&self) -> String {
        match self {
            Payload::Text(text) => text.clone(),
            Payload::Json(Value::String(text)) => text.clone(),
            Payload::Json(value @ (Value::Object(_) | Value::Array(_) | Value::Null)) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Payload::Json(value) => value.to_string(),
        }
    }
}

/// Visual class applied to the panel content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelClass {
    Placeholder,
    Loading,
    Success,
    Error,
}

impl PanelClass {
    pub fn as_str(self) -> &'static str {
        match self {
            PanelClass::Placeholder => "placeholder",
            PanelClass::Loading => "loading",
            PanelClass::Success => "success",
            PanelClass::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub class: PanelClass,
    pub text: String,
}

impl PanelView {
    pub fn placeholder() -> Self {
        Self {
            class: PanelClass::Placeholder,
            text: PLACEHOLDER.to_string(),
        }
    }

    fn result(payload: &Payload, is_error: bool) -> Self {
        Self {
            class: if is_error {
                PanelClass::Error
            } else {
                PanelClass::Success
            },
            text: payload.render(),
        }
    }

    fn loading(message: &str) -> Self {
        Self {
            class: PanelClass::Loading,
            text: message.to_string(),
        }
    }
}

/// Where handlers send what the user should see.
pub trait DisplaySink: Send + Sync {
    /// Render a result and bring the panel into view.
    fn show_result(&self, payload: &Payload, is_error: bool);
    fn show_loading(&self, message: &str);
    /// Reset to the static placeholder.
    fn clear(&self);
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug)]
struct PanelState {
    view: PanelView,
    scrolls: usize,
}

/// In-memory panel for embedding hosts and tests.
#[derive(Debug)]
pub struct Panel {
    state: Mutex<PanelState>,
}

impl Panel {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PanelState {
                view: PanelView::placeholder(),
                scrolls: 0,
            }),
        }
    }

    pub fn view(&self) -> PanelView {
        lock(&self.state).view.clone()
    }

    /// How many times a result scrolled the panel into view.
    pub fn scroll_count(&self) -> usize {
        lock(&self.state).scrolls
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for Panel {
    fn show_result(&self, payload: &Payload, is_error: bool) {
        let mut state = lock(&self.state);
        state.view = PanelView::result(payload, is_error);
        state.scrolls += 1;
    }

    fn show_loading(&self, message: &str) {
        lock(&self.state).view = PanelView::loading(message);
    }

    fn clear(&self) {
        lock(&self.state).view = PanelView::placeholder();
    }
}

/// Panel that prints every view to a writer, typically stdout.
///
/// Results are framed by a header naming the class; the header is the
/// terminal's version of scrolling the panel into view.
pub struct TerminalPanel<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> TerminalPanel<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_view(&self, view: &PanelView, framed: bool) {
        let mut out = lock(&self.out);
        let written = if framed {
            writeln!(out, "==== [{}] ====", view.class.as_str())
                .and_then(|_| writeln!(out, "{}", view.text))
        } else {
            writeln!(out, "[{}] {}", view.class.as_str(), view.text)
        };
        if let Err(e) = written.and_then(|_| out.flush()) {
            tracing::warn!(error = %e, "could not write to the terminal panel");
        }
    }
}

impl<W: Write + Send> DisplaySink for TerminalPanel<W> {
    fn show_result(&self, payload: &Payload, is_error: bool) {
        self.write_view(&PanelView::result(payload, is_error), true);
    }

    fn show_loading(&self, message: &str) {
        self.write_view(&PanelView::loading(message), false);
    }

    fn clear(&self) {
        self.write_view(&PanelView::placeholder(), false);
    }
}
