//! End-to-end scenarios exercising the full Dispatcher → Sandbox Client → Verdict Engine →
//! Response Shaper pipeline through the HTTP router, against a mocked external runner.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use httpmock::{Method::POST, MockServer};
use serde_json::{json, Value};
use tower::ServiceExt;

use service::config::AppConfig;
use service::{build_router, AppState};

fn state_for(runner_url: String) -> AppState {
    AppState::new(AppConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        runner_url,
        default_time_limit_ms: 5000,
        default_memory_limit_mb: None,
        max_time_limit_ms: 15000,
        max_memory_limit_mb: None,
    })
}

async fn post_json(router: axum::Router, path: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: Value = serde_json::from_slice(&bytes).unwrap();
    (status, parsed)
}

fn mock_run(server: &MockServer, stdout: &str) {
    server.mock(|when, then| {
        when.method(POST).path("/execute");
        then.status(200)
            .json_body(json!({ "compile": null, "run": { "stdout": stdout, "stderr": "", "code": 0, "signal": null } }));
    });
}

#[tokio::test]
async fn functional_all_pass() {
    let server = MockServer::start();
    mock_run(&server, r#"[{"id":"1","pass":true,"actual":5,"expected":5,"runtime_ms":1,"error":null}]"#);
    let router = build_router(state_for(server.base_url()));

    let (status, body) = post_json(
        router,
        "/judge/functional",
        json!({
            "code": "def add(a, b):\n    return a + b\n",
            "language": "python",
            "function_name": "add",
            "parameter_names": ["a", "b"],
            "test_cases": [{"id": "1", "inputs": {"a": "2", "b": "3"}, "expected_output": "5"}]
        }),
    )
    .await;

    assert_eq!(StatusCode::OK, status);
    assert_eq!("accepted", body["verdict"]);
    assert_eq!(1, body["passed_count"]);
    assert_eq!(1, body["total_count"]);
    assert_eq!(true, body["test_results"][0]["pass"]);
    assert_eq!(5, body["test_results"][0]["actual_output"]);
}

#[tokio::test]
async fn functional_wrong_answer() {
    let server = MockServer::start();
    mock_run(&server, r#"[{"id":"1","pass":false,"actual":-1,"expected":5,"runtime_ms":1,"error":null}]"#);
    let router = build_router(state_for(server.base_url()));

    let (status, body) = post_json(
        router,
        "/judge/functional",
        json!({
            "code": "def add(a, b):\n    return a - b\n",
            "language": "python",
            "function_name": "add",
            "parameter_names": ["a", "b"],
            "test_cases": [{"id": "1", "inputs": {"a": "2", "b": "3"}, "expected_output": "5"}]
        }),
    )
    .await;

    assert_eq!(StatusCode::OK, status);
    assert_eq!("wrong_answer", body["verdict"]);
    assert_eq!(0, body["passed_count"]);
    assert_eq!(-1, body["test_results"][0]["actual_output"]);
}

#[tokio::test]
async fn functional_runtime_error_reports_exception_class() {
    let server = MockServer::start();
    mock_run(
        &server,
        r#"[{"id":"1","pass":false,"actual":null,"expected":null,"runtime_ms":1,"error":"ZeroDivisionError: division by zero"}]"#,
    );
    let router = build_router(state_for(server.base_url()));

    let (status, body) = post_json(
        router,
        "/judge/functional",
        json!({
            "code": "def add(a, b):\n    return a / 0\n",
            "language": "python",
            "function_name": "add",
            "parameter_names": ["a", "b"],
            "test_cases": [{"id": "1", "inputs": {"a": "2", "b": "3"}, "expected_output": "5"}]
        }),
    )
    .await;

    assert_eq!(StatusCode::OK, status);
    assert_eq!("runtime_error", body["verdict"]);
    assert!(body["test_results"][0]["error"].as_str().unwrap().starts_with("ZeroDivisionError:"));
}

#[tokio::test]
async fn functional_submit_mode_hidden_case_failure_is_redacted() {
    let server = MockServer::start();
    mock_run(
        &server,
        r#"[
            {"id":"1","pass":true,"actual":5,"expected":5,"runtime_ms":1,"error":null},
            {"id":"2","pass":false,"actual":1,"expected":9,"runtime_ms":1,"error":null}
        ]"#,
    );
    let router = build_router(state_for(server.base_url()));

    let (status, body) = post_json(
        router,
        "/judge/functional",
        json!({
            "code": "def add(a, b):\n    return a + b\n",
            "language": "python",
            "function_name": "add",
            "parameter_names": ["a", "b"],
            "mode": "submit",
            "test_cases": [
                {"id": "1", "inputs": {"a": "2", "b": "3"}, "expected_output": "5"},
                {"id": "2", "inputs": {"a": "4", "b": "5"}, "expected_output": "9", "is_visible": false}
            ]
        }),
    )
    .await;

    assert_eq!(StatusCode::OK, status);
    assert_eq!("wrong_answer", body["verdict"]);
    assert!(body["test_results"][1]["actual_output"].is_null());
    assert!(body["test_results"][1]["expected_output"].is_null());
}

#[tokio::test]
async fn empty_test_cases_is_bad_request() {
    let server = MockServer::start();
    let router = build_router(state_for(server.base_url()));

    let (status, _) = post_json(
        router,
        "/judge/functional",
        json!({
            "code": "def add(a, b):\n    return a + b\n",
            "language": "python",
            "function_name": "add",
            "parameter_names": ["a", "b"],
            "test_cases": []
        }),
    )
    .await;

    assert_eq!(StatusCode::BAD_REQUEST, status);
}

#[tokio::test]
async fn unsupported_language_is_bad_request() {
    let server = MockServer::start();
    let router = build_router(state_for(server.base_url()));

    let (status, _) = post_json(
        router,
        "/judge/functional",
        json!({
            "code": "return 1",
            "language": "cobol",
            "function_name": "f",
            "parameter_names": [],
            "test_cases": [{"id": "1", "inputs": {}, "expected_output": "1"}]
        }),
    )
    .await;

    assert_eq!(StatusCode::BAD_REQUEST, status);
}

#[tokio::test]
async fn predict_output_matches() {
    let server = MockServer::start();
    mock_run(&server, r#"[{"id":"1","pass":true,"actual":"5","expected":"5","runtime_ms":1,"error":null}]"#);
    let router = build_router(state_for(server.base_url()));

    let (status, body) = post_json(
        router,
        "/judge/predict-output",
        json!({
            "code": "def add(a, b):\n    return a + b\n",
            "language": "python",
            "function_name": "add",
            "parameter_names": ["a", "b"],
            "test_cases": [{"id": "1", "inputs": {"a": "2", "b": "3"}, "expected_output": "5"}]
        }),
    )
    .await;

    assert_eq!(StatusCode::OK, status);
    assert_eq!("accepted", body["verdict"]);
    assert_eq!(1, body["passed_count"]);
}

#[tokio::test]
async fn predict_output_mismatch_is_wrong_answer() {
    let server = MockServer::start();
    mock_run(&server, r#"[{"id":"1","pass":true,"actual":"5","expected":"23","runtime_ms":1,"error":null}]"#);
    let router = build_router(state_for(server.base_url()));

    let (status, body) = post_json(
        router,
        "/judge/predict-output",
        json!({
            "code": "def add(a, b):\n    return str(a) + str(b)\n",
            "language": "python",
            "function_name": "add",
            "parameter_names": ["a", "b"],
            "test_cases": [{"id": "1", "inputs": {"a": "2", "b": "3"}, "expected_output": "23"}]
        }),
    )
    .await;

    assert_eq!(StatusCode::OK, status);
    assert_eq!("wrong_answer", body["verdict"]);
}

#[tokio::test]
async fn fix_error_output_comparison_mismatch_has_diff() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/execute");
        then.status(200)
            .json_body(json!({ "compile": null, "run": { "stdout": "hi\n", "stderr": "", "code": 0, "signal": null } }));
    });
    let router = build_router(state_for(server.base_url()));

    let (status, body) = post_json(
        router,
        "/judge/fix-error",
        json!({
            "code": "print('hi')",
            "language": "python",
            "validation_type": "output_comparison",
            "expected_output": "hello"
        }),
    )
    .await;

    assert_eq!(StatusCode::OK, status);
    assert_eq!("FAIL", body["status"]);
    assert_eq!("WRONG_ANSWER", body["failureType"]);
    let diff = body["diff"].as_array().unwrap();
    assert_eq!("incorrect", diff[0]["kind"]);
    assert_eq!("hello", diff[0]["expected"]);
    assert_eq!("hi", diff[0]["actual"]);
}

#[tokio::test]
async fn fix_error_custom_validator_pass() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/execute").body_contains("__judge_stdout");
        then.status(200)
            .json_body(json!({ "compile": null, "run": { "stdout": r#"{"pass": true, "message": "ok"}"#, "stderr": "", "code": 0, "signal": null } }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/execute");
        then.status(200)
            .json_body(json!({ "compile": null, "run": { "stdout": "4\n", "stderr": "", "code": 0, "signal": null } }));
    });
    let router = build_router(state_for(server.base_url()));

    let (status, body) = post_json(
        router,
        "/judge/fix-error",
        json!({
            "code": "print(2 + 2)",
            "language": "python",
            "validation_type": "custom_function",
            "custom_validator": "print(json.dumps({'pass': __judge_stdout.strip() == '4', 'message': 'ok'}))"
        }),
    )
    .await;

    assert_eq!(StatusCode::OK, status);
    assert_eq!("PASS", body["status"]);
    assert_eq!(1, body["passed_count"]);
    assert_eq!("ok", body["summaryMessage"]);
}
