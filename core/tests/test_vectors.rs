//! Verify request rendering and response classification against JSON test
//! vectors stored in `test-vectors/`.
//!
//! `requests.json` pins the exact path+query each operation renders.
//! `responses.json` pairs simulated responses with the envelope they must
//! classify into. Payloads and errors are compared as parsed JSON, so key
//! order in the vectors does not matter.

use fbgraph_core::{
    build_login, parse_response, ApiError, GraphApi, GraphConfig, GraphError, GraphResponse,
    HttpResponse, LoginParams, NodeType,
};
use serde_json::Value;

fn limit_of(case: &Value, key: &str) -> Option<u32> {
    case.get(key).and_then(Value::as_u64).map(|l| l as u32)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let api = GraphApi::new(vectors["access_token"].as_str().unwrap());
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["id"].as_str().unwrap_or_default();

        let req = match case["operation"].as_str().unwrap() {
            "user_group" => api.build_user_group(id),
            "user_groups" => api.build_user_groups(),
            "groups_app_installed_for" => api.build_groups_app_installed_for(id),
            "node_feed" => api.build_node_feed(id, NodeType::Group, limit_of(case, "limit")),
            "node_comments" => api.build_node_comments(id, limit_of(case, "limit")),
            "next_page" => api.build_next_page(
                case["url"].as_str().unwrap(),
                limit_of(case, "force_limit"),
            ),
            "login" => {
                let params: LoginParams = serde_json::from_value(case["params"].clone()).unwrap();
                build_login(&GraphConfig::default(), &params)
            }
            other => panic!("{name}: unknown operation {other}"),
        }
        .unwrap_or_else(|e| panic!("{name}: {e}"));

        assert_eq!(req.path, case["expected_path"].as_str().unwrap(), "{name}: path");
        assert_eq!(
            req.headers,
            vec![("accept".to_string(), "application/json".to_string())],
            "{name}: headers"
        );
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers: sim["headers"]
                .as_array()
                .unwrap()
                .iter()
                .map(|h| {
                    let pair = h.as_array().unwrap();
                    (
                        pair[0].as_str().unwrap().to_string(),
                        pair[1].as_str().unwrap().to_string(),
                    )
                })
                .collect(),
            body: sim["body"].as_str().unwrap().to_string(),
        };

        let result = parse_response::<Value>(response);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "Decode" => assert!(matches!(err, GraphError::Decode(_)), "{name}: expected Decode"),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
            continue;
        }

        let expected = &case["expected"];
        match result.unwrap() {
            GraphResponse::Success { limits, payload } => {
                assert_eq!(expected["ok"], true, "{name}: unexpected success");
                assert_eq!(
                    serde_json::to_value(limits).unwrap(),
                    expected["limits"],
                    "{name}: limits"
                );
                assert_eq!(payload, expected["payload"], "{name}: payload");
            }
            GraphResponse::Failure { error } => {
                assert_eq!(expected["ok"], false, "{name}: unexpected failure");
                let expected_error: ApiError =
                    serde_json::from_value(expected["error"].clone()).unwrap();
                assert_eq!(error, expected_error, "{name}: error");
            }
        }
    }
}
