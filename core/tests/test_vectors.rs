//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use escola_core::{
    ApiClient, ApiError, HttpMethod, HttpRequest, HttpResponse, NewProfessor, NewUser,
};

const BASE_URL: &str = "http://localhost:8082/api";

fn client() -> ApiClient {
    ApiClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn build_query(c: &ApiClient, operation: &str, input: &str) -> Result<HttpRequest, ApiError> {
    match operation {
        "list_users" => Ok(c.build_list_users()),
        "get_user" => c.build_get_user(input),
        "get_user_by_email" => c.build_get_user_by_email(input),
        "list_professors" => Ok(c.build_list_professors()),
        "get_professor" => c.build_get_professor(input),
        "get_professor_by_cpf" => c.build_get_professor_by_cpf(input),
        "get_professor_by_email" => c.build_get_professor_by_email(input),
        other => panic!("unknown operation: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[test]
fn query_test_vectors() {
    let raw = include_str!("../../test-vectors/queries.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let operation = case["operation"].as_str().unwrap();
        let input = case["input"].as_str().unwrap();
        let result = build_query(&c, operation, input);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            assert_eq!(
                err,
                ApiError::Validation(expected_error.as_str().unwrap().to_string()),
                "{name}: validation error"
            );
            continue;
        }

        let req = result.unwrap();
        let expected_req = &case["expected_request"];
        assert_eq!(
            req.method,
            parse_method(expected_req["method"].as_str().unwrap()),
            "{name}: method"
        );
        assert_eq!(
            req.url,
            format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()),
            "{name}: url"
        );
        assert!(req.body.is_none(), "{name}: body should be None");
        assert_eq!(
            req.header("content-type"),
            Some("application/json"),
            "{name}: content-type"
        );
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let raw = include_str!("../../test-vectors/create.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let req = match case["operation"].as_str().unwrap() {
            "create_user" => {
                let input: NewUser = serde_json::from_value(case["input"].clone()).unwrap();
                c.build_create_user(&input).unwrap()
            }
            "create_professor" => {
                let input: NewProfessor = serde_json::from_value(case["input"].clone()).unwrap();
                c.build_create_professor(&input).unwrap()
            }
            other => panic!("unknown operation: {other}"),
        };
        let expected_req = &case["expected_request"];

        // Verify build
        assert_eq!(
            req.method,
            parse_method(expected_req["method"].as_str().unwrap()),
            "{name}: method"
        );
        assert_eq!(
            req.url,
            format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()),
            "{name}: url"
        );

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        let req_body: serde_json::Value =
            serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(req_body, expected_req["body"], "{name}: body");

        // Verify parse
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            status_text: sim["status_text"].as_str().unwrap().to_string(),
            headers: Vec::new(),
            body: sim["body"].as_str().unwrap().to_string(),
        };
        let result = c.parse_json(response);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            assert_eq!(
                err,
                ApiError::Status {
                    status: expected_error["status"].as_u64().unwrap() as u16,
                    status_text: expected_error["status_text"].as_str().unwrap().to_string(),
                },
                "{name}: status error"
            );
        } else {
            assert_eq!(result.unwrap(), case["expected_result"], "{name}: parsed result");
        }
    }
}
