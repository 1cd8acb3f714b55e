//! Request records for the school API.
//!
//! # Design
//! Field names follow the backend's wire format (`senha`, `perfil`, `nome`,
//! ...). Optional professor fields are always serialized, as `null` when
//! blank, so the server sees an explicit empty value instead of a missing
//! key. Responses are not typed here: the console only pretty-prints them.

use serde::{Deserialize, Serialize};

/// Payload for `POST /usuarios`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub senha: String,
    /// Role name; the accepted values are defined by the server.
    pub perfil: String,
}

/// Payload for `POST /professores`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewProfessor {
    pub email: String,
    pub senha: String,
    pub nome: String,
    pub cpf: String,
    pub formacao: Option<String>,
    pub telefone: Option<String>,
}

/// Map a blank form value to `None`.
pub fn optional_field(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
