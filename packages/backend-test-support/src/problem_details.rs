//! Problem Details assertions for HTTP tests.
//!
//! Mirrors the backend's error body without depending on backend types.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ProblemDetailsLike {
    #[serde(rename = "type")]
    type_: String,
    title: String,
    status: u16,
    detail: String,
    code: String,
    trace_id: String,
}

/// Assert that a response conforms to the stable error contract:
/// - HTTP status matches
/// - `x-trace-id` header exists and equals the body's `trace_id`
/// - `code` matches and `detail` contains the expected fragment (if given)
pub async fn assert_problem_details(
    resp: ServiceResponse<BoxBody>,
    expected_code: &str,
    expected_status: StatusCode,
    expected_detail_contains: Option<&str>,
) {
    assert_eq!(resp.status(), expected_status);

    let trace_header = resp
        .headers()
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be valid UTF-8")
        .to_string();

    let body = actix_web::test::read_body(resp).await;
    let problem: ProblemDetailsLike =
        serde_json::from_slice(&body).expect("body should be valid ProblemDetails JSON");

    assert_eq!(
        problem.trace_id, trace_header,
        "trace_id in body should match x-trace-id header"
    );
    assert_eq!(problem.code, expected_code);
    assert_eq!(problem.status, expected_status.as_u16());
    assert!(problem.type_.ends_with(expected_code));
    assert!(!problem.title.is_empty());

    if let Some(fragment) = expected_detail_contains {
        assert!(
            problem.detail.contains(fragment),
            "Expected detail to contain '{}', but got '{}'",
            fragment,
            problem.detail
        );
    }
}
