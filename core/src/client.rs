//! Stateless HTTP request builder and response parser for the school API.
//!
//! # Design
//! `ApiClient` holds only a `base_url` and carries no mutable state between
//! calls. Each endpoint has a `build_*` method producing an `HttpRequest`;
//! every response goes through the single `parse_json`, since callers treat
//! payloads as opaque JSON. Lookups validate their one required input before
//! a request exists, so an empty field never reaches the network.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{NewProfessor, NewUser};

pub const ID_REQUIRED: &str = "Por favor, insira um ID válido.";
pub const EMAIL_REQUIRED: &str = "Por favor, insira um email válido.";
pub const CPF_REQUIRED: &str = "Por favor, insira um CPF válido.";

/// Characters left untouched by `encodeURIComponent`.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a value for use as a single URL path segment.
pub fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Synchronous, stateless client for the school API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // --- usuarios ---

    pub fn build_create_user(&self, input: &NewUser) -> Result<HttpRequest, ApiError> {
        self.post_json("/usuarios", input)
    }

    pub fn build_list_users(&self) -> HttpRequest {
        self.get("/usuarios")
    }

    pub fn build_get_user(&self, id: &str) -> Result<HttpRequest, ApiError> {
        let id = required(id, ID_REQUIRED)?;
        Ok(self.get(&format!("/usuarios/{id}")))
    }

    pub fn build_get_user_by_email(&self, email: &str) -> Result<HttpRequest, ApiError> {
        let email = required(email, EMAIL_REQUIRED)?;
        Ok(self.get(&format!("/usuarios/email/{}", encode_segment(email))))
    }

    // --- professores ---

    pub fn build_create_professor(&self, input: &NewProfessor) -> Result<HttpRequest, ApiError> {
        self.post_json("/professores", input)
    }

    pub fn build_list_professors(&self) -> HttpRequest {
        self.get("/professores")
    }

    pub fn build_get_professor(&self, id: &str) -> Result<HttpRequest, ApiError> {
        let id = required(id, ID_REQUIRED)?;
        Ok(self.get(&format!("/professores/{id}")))
    }

    pub fn build_get_professor_by_cpf(&self, cpf: &str) -> Result<HttpRequest, ApiError> {
        let cpf = required(cpf, CPF_REQUIRED)?;
        Ok(self.get(&format!("/professores/cpf/{}", encode_segment(cpf))))
    }

    pub fn build_get_professor_by_email(&self, email: &str) -> Result<HttpRequest, ApiError> {
        let email = required(email, EMAIL_REQUIRED)?;
        Ok(self.get(&format!("/professores/email/{}", encode_segment(email))))
    }

    /// Accept any 2xx response and decode its body as JSON.
    pub fn parse_json(&self, response: HttpResponse) -> Result<Value, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    fn get(&self, path: &str) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, format!("{}{path}", self.base_url))
    }

    fn post_json<T: Serialize>(&self, path: &str, input: &T) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest::new(HttpMethod::Post, format!("{}{path}", self.base_url)).with_body(body))
    }
}

fn required<'a>(value: &'a str, message: &str) -> Result<&'a str, ApiError> {
    if value.is_empty() {
        return Err(ApiError::Validation(message.to_string()));
    }
    Ok(value)
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Status {
        status: response.status,
        status_text: response.status_text.clone(),
    })
}
