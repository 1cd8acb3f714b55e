//! Form console for the school-management API.
//!
//! # Overview
//! Drives the create forms, lookup triggers and startup probe against the
//! backend, rendering every outcome on a single result panel. Requests are
//! built by `escola-core`; this crate owns the IO around them.
//!
//! # Design
//! - `Transport` executes requests and `DisplaySink` renders results; both are
//!   injected so tests run without a network or a terminal.
//! - `Console::init` builds the console and its binding table. Hosts forward
//!   element events to `Console::dispatch`.
//! - Handlers never fail outward: errors end up on the panel and in the log.

pub mod config;
pub mod display;
pub mod fetch;
pub mod forms;
pub mod host;
pub mod probe;
pub mod queries;
pub mod transport;
pub mod wiring;

#[cfg(test)]
mod testing;

pub use config::{DisplayPolicy, Settings};
pub use display::{DisplaySink, Panel, PanelClass, PanelView, Payload, TerminalPanel};
pub use fetch::Fetcher;
pub use forms::Fields;
pub use host::{run_command, Command, USAGE};
pub use probe::ProbeOutcome;
pub use queries::Query;
pub use transport::{Transport, UreqTransport};
pub use wiring::{bindings, Action, Binding, Console, Event, Outcome, CLEAR_RESULTS, WINDOW};
