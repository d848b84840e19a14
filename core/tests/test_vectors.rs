//! Verify request building and response parsing against the JSON vectors in
//! `test-vectors/`.
//!
//! Expected results are compared as decoded values rather than raw strings so
//! field ordering in the vector file does not matter.

use catalog_core::{CatalogClient, ErrorKind, Film, HttpMethod, HttpResponse};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> CatalogClient {
    CatalogClient::new(BASE_URL)
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_kind(s: &str) -> ErrorKind {
    match s {
        "Network" => ErrorKind::Network,
        "Decode" => ErrorKind::Decode,
        "Usage" => ErrorKind::Usage,
        other => panic!("unknown error kind: {other}"),
    }
}

#[test]
fn fetch_catalog_request_vector() {
    let raw = include_str!("../../test-vectors/fetch_catalog.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();
    let expected_req = &vectors["expected_request"];

    let req = client().build_fetch_catalog();
    assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()));
    assert_eq!(req.method.as_str(), expected_req["method"].as_str().unwrap());
    assert_eq!(req.url, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()));

    let expected_headers: Vec<(String, String)> = expected_req["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect();
    assert_eq!(req.headers, expected_headers);
}

#[test]
fn fetch_catalog_response_vectors() {
    let raw = include_str!("../../test-vectors/fetch_catalog.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let sim = &case["simulated_response"];
        let response = HttpResponse::new(
            sim["status"].as_u64().unwrap() as u16,
            sim["body"].as_str().unwrap(),
        );
        let result = c.parse_fetch_catalog(response);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            assert_eq!(err.kind(), parse_kind(expected_error.as_str().unwrap()), "{name}: {err}");
        } else {
            let films = result.unwrap();
            let expected: Vec<Film> = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(films, expected, "{name}: parsed result");

            // Re-encoding reproduces the expected field values.
            let reencoded = serde_json::to_value(&films).unwrap();
            assert_eq!(reencoded, case["expected_result"], "{name}: re-encoded");
        }
    }
}
