//! Explicit initialization and the element/event binding table.
//!
//! # Design
//! Nothing is registered as a side effect of loading the crate. A host calls
//! `Console::init` once, then forwards element events to `dispatch`, which
//! looks the pair up in a declarative table of `Binding`s.

use std::sync::Arc;

use escola_core::{email_field_state, format_cpf, ApiClient, FieldState};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{DisplayPolicy, Settings};
use crate::display::DisplaySink;
use crate::fetch::Fetcher;
use crate::forms::{self, Fields, PROFESSOR_FORM, USER_FORM};
use crate::probe::{self, ProbeOutcome};
use crate::queries::{self, Query};
use crate::transport::Transport;

/// Element the load event is bound to.
pub const WINDOW: &str = "window";
pub const CLEAR_RESULTS: &str = "clearResults";

/// Fields masked as CPF on every input event.
pub const CPF_FIELDS: [&str; 2] = ["profCpf", "searchProfCpf"];
/// Fields checked as email when they lose focus.
pub const EMAIL_FIELDS: [&str; 4] = [
    "userEmail",
    "profEmail",
    "searchUserEmail",
    "searchProfEmail",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Submit,
    Input,
    Blur,
    Click,
    Load,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SubmitUser,
    SubmitProfessor,
    Query(Query),
    ClearResults,
    MaskCpf,
    CheckEmail,
    Probe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub element: &'static str,
    pub event: Event,
    pub action: Action,
}

/// What a dispatched event did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// No binding for this element and event.
    Unbound,
    /// A request ran (or was rejected); `None` means it failed.
    Fetched(Option<Value>),
    /// The field now holds this masked value.
    Masked(String),
    Checked(FieldState),
    Probed(ProbeOutcome),
    Cleared,
}

/// The full element → handler table.
pub fn bindings() -> Vec<Binding> {
    let mut table = vec![
        Binding {
            element: WINDOW,
            event: Event::Load,
            action: Action::Probe,
        },
        Binding {
            element: USER_FORM.id,
            event: Event::Submit,
            action: Action::SubmitUser,
        },
        Binding {
            element: PROFESSOR_FORM.id,
            event: Event::Submit,
            action: Action::SubmitProfessor,
        },
        Binding {
            element: CLEAR_RESULTS,
            event: Event::Click,
            action: Action::ClearResults,
        },
    ];
    table.extend(Query::ALL.into_iter().map(|query| Binding {
        element: query.trigger(),
        event: Event::Click,
        action: Action::Query(query),
    }));
    table.extend(CPF_FIELDS.into_iter().map(|element| Binding {
        element,
        event: Event::Input,
        action: Action::MaskCpf,
    }));
    table.extend(EMAIL_FIELDS.into_iter().map(|element| Binding {
        element,
        event: Event::Blur,
        action: Action::CheckEmail,
    }));
    table
}

pub struct Console {
    fetcher: Fetcher,
    fields: Fields,
    bindings: Vec<Binding>,
}

impl Console {
    pub fn new(
        client: ApiClient,
        transport: Arc<dyn Transport>,
        sink: Arc<dyn DisplaySink>,
        policy: DisplayPolicy,
    ) -> Self {
        Self {
            fetcher: Fetcher::new(client, transport, sink, policy),
            fields: Fields::new(),
            bindings: bindings(),
        }
    }

    /// Build a console from settings. Call once per host.
    pub fn init(
        settings: &Settings,
        transport: Arc<dyn Transport>,
        sink: Arc<dyn DisplaySink>,
    ) -> Self {
        let client = ApiClient::new(&settings.api.base_url);
        info!(
            base_url = client.base_url(),
            policy = ?settings.display.policy,
            "console initialized"
        );
        Self::new(client, transport, sink, settings.display.policy)
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn binding(&self, element: &str, event: Event) -> Option<Binding> {
        self.bindings
            .iter()
            .find(|b| b.element == element && b.event == event)
            .copied()
    }

    pub fn dispatch(&self, element: &str, event: Event) -> Outcome {
        let Some(binding) = self.binding(element, event) else {
            debug!(element, ?event, "no binding");
            return Outcome::Unbound;
        };
        self.run(binding)
    }

    fn run(&self, binding: Binding) -> Outcome {
        match binding.action {
            Action::SubmitUser => {
                Outcome::Fetched(forms::submit_user(&self.fetcher, &self.fields))
            }
            Action::SubmitProfessor => {
                Outcome::Fetched(forms::submit_professor(&self.fetcher, &self.fields))
            }
            Action::Query(query) => {
                Outcome::Fetched(queries::run(&self.fetcher, &self.fields, query))
            }
            Action::ClearResults => {
                self.fetcher.sink().clear();
                Outcome::Cleared
            }
            Action::MaskCpf => {
                let masked = format_cpf(&self.fields.get(binding.element));
                self.fields.set(binding.element, masked.clone());
                Outcome::Masked(masked)
            }
            Action::CheckEmail => {
                let state = email_field_state(&self.fields.get(binding.element));
                self.fields.set_state(binding.element, state);
                Outcome::Checked(state)
            }
            Action::Probe => {
                let outcome = probe::run(
                    self.fetcher.client(),
                    self.fetcher.transport(),
                    self.fetcher.sink(),
                );
                match &outcome {
                    ProbeOutcome::Connected => info!("API reachable"),
                    ProbeOutcome::Unreachable(reason) => warn!(%reason, "API unreachable"),
                }
                Outcome::Probed(outcome)
            }
        }
    }
}
