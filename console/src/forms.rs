//! Named input fields and the two create forms.
//!
//! # Design
//! `Fields` stands in for the page's inputs: a thread-safe map from element
//! name to current text, plus the cosmetic blur state of validated fields.
//! Submitting a form reads its fields into a record, posts it, then resets the
//! form whatever the outcome.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use escola_core::{optional_field, FieldState, NewProfessor, NewUser};
use serde_json::Value;

use crate::fetch::Fetcher;

/// A form and the input elements it owns.
#[derive(Debug, Clone, Copy)]
pub struct FormLayout {
    pub id: &'static str,
    pub fields: &'static [&'static str],
}

pub const USER_FORM: FormLayout = FormLayout {
    id: "createUserForm",
    fields: &["userEmail", "userPassword", "userPerfil"],
};

pub const PROFESSOR_FORM: FormLayout = FormLayout {
    id: "createProfessorForm",
    fields: &[
        "profEmail",
        "profPassword",
        "profNome",
        "profCpf",
        "profFormacao",
        "profTelefone",
    ],
};

#[derive(Debug, Default)]
struct FieldsState {
    values: BTreeMap<String, String>,
    states: BTreeMap<String, FieldState>,
}

#[derive(Debug, Default)]
pub struct Fields {
    inner: Mutex<FieldsState>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FieldsState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current value; fields never set read as empty.
    pub fn get(&self, name: &str) -> String {
        self.lock().values.get(name).cloned().unwrap_or_default()
    }

    pub fn set(&self, name: &str, value: impl Into<String>) {
        self.lock().values.insert(name.to_string(), value.into());
    }

    pub fn state(&self, name: &str) -> FieldState {
        self.lock().states.get(name).copied().unwrap_or_default()
    }

    pub fn set_state(&self, name: &str, state: FieldState) {
        self.lock().states.insert(name.to_string(), state);
    }

    /// Empty every listed field and drop its blur state.
    pub fn reset(&self, names: &[&str]) {
        let mut inner = self.lock();
        for name in names {
            inner.values.remove(*name);
            inner.states.remove(*name);
        }
    }
}

pub fn read_user(fields: &Fields) -> NewUser {
    NewUser {
        email: fields.get("userEmail"),
        senha: fields.get("userPassword"),
        perfil: fields.get("userPerfil"),
    }
}

pub fn read_professor(fields: &Fields) -> NewProfessor {
    NewProfessor {
        email: fields.get("profEmail"),
        senha: fields.get("profPassword"),
        nome: fields.get("profNome"),
        cpf: fields.get("profCpf"),
        formacao: optional_field(&fields.get("profFormacao")),
        telefone: optional_field(&fields.get("profTelefone")),
    }
}

pub fn submit_user(fetcher: &Fetcher, fields: &Fields) -> Option<Value> {
    let record = read_user(fields);
    let result = match fetcher.client().build_create_user(&record) {
        Ok(request) => fetcher.request(request),
        Err(err) => {
            fetcher.report(&err);
            None
        }
    };
    fields.reset(USER_FORM.fields);
    result
}

pub fn submit_professor(fetcher: &Fetcher, fields: &Fields) -> Option<Value> {
    let record = read_professor(fields);
    let result = match fetcher.client().build_create_professor(&record) {
        Ok(request) => fetcher.request(request),
        Err(err) => {
            fetcher.report(&err);
            None
        }
    };
    fields.reset(PROFESSOR_FORM.fields);
    result
}
