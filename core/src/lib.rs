//! Synchronous API client core for the school-management backend.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). Hosts execute the HTTP
//! round-trip themselves, which keeps the core deterministic and testable.
//!
//! # Design
//! - `ApiClient` is stateless: it holds only `base_url`.
//! - Lookups validate their single required input in `build_*`, so empty
//!   fields never turn into requests.
//! - `format` carries the pure input helpers (CPF mask, email check) shared by
//!   every host.

pub mod client;
pub mod error;
pub mod format;
pub mod http;
pub mod types;

pub use client::{encode_segment, ApiClient};
pub use error::ApiError;
pub use format::{email_field_state, format_cpf, is_valid_email, FieldState};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{optional_field, NewProfessor, NewUser};
