//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network; the host executes the round-trip through
//! whatever transport it owns.
//!
//! Every request starts with `content-type: application/json`. Headers added
//! with `with_header` replace a default of the same name (compared
//! case-insensitively) and are appended otherwise.

pub const CONTENT_TYPE: &str = "content-type";
pub const APPLICATION_JSON: &str = "application/json";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by `ApiClient::build_*` methods. The host executes it and hands the
/// matching `HttpResponse` back to `ApiClient::parse_json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// A body-less request carrying the default JSON content-type.
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: vec![(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())],
            body: None,
        }
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    /// Merge a caller header over the defaults.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some(slot) => *slot = (name.to_string(), value.to_string()),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// `status_text` is the reason phrase for `status`; transports that cannot
/// see the wire phrase fill in the canonical one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_request_carries_json_content_type() {
        let req = HttpRequest::new(HttpMethod::Get, "http://localhost/api/usuarios");
        assert_eq!(req.header("Content-Type"), Some(APPLICATION_JSON));
        assert!(req.body.is_none());
    }

    #[test]
    fn caller_header_replaces_default_case_insensitively() {
        let req = HttpRequest::new(HttpMethod::Post, "http://x")
            .with_header("Content-Type", "application/json; charset=utf-8");
        assert_eq!(req.headers.len(), 1);
        assert_eq!(
            req.header(CONTENT_TYPE),
            Some("application/json; charset=utf-8")
        );
    }

    #[test]
    fn unrelated_caller_header_is_appended() {
        let req = HttpRequest::new(HttpMethod::Get, "http://x").with_header("accept", "*/*");
        assert_eq!(req.headers.len(), 2);
        assert_eq!(req.header(CONTENT_TYPE), Some(APPLICATION_JSON));
        assert_eq!(req.header("ACCEPT"), Some("*/*"));
    }

    #[test]
    fn success_is_any_2xx() {
        let mut response = HttpResponse {
            status: 204,
            status_text: "No Content".to_string(),
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(response.is_success());
        response.status = 199;
        assert!(!response.is_success());
        response.status = 300;
        assert!(!response.is_success());
    }
}
