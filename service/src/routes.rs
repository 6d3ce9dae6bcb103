//! HTTP surface (§6): one Axum handler per judge endpoint, wired into a `Router` with request
//! tracing and permissive CORS so browser-based callers can reach the service directly.
//!

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::dispatcher;
use crate::error::ApiError;
use crate::model::{FixErrorRequest, FixErrorResponse, FunctionalRequest, PredictRequest};
use crate::state::AppState;
use judge_core::JudgeResponse;

async fn functional(State(state): State<AppState>, Json(req): Json<FunctionalRequest>) -> Result<Json<JudgeResponse>, ApiError> {
    dispatcher::functional(&state, req).await.map(Json)
}

async fn predict(State(state): State<AppState>, Json(req): Json<PredictRequest>) -> Result<Json<JudgeResponse>, ApiError> {
    dispatcher::predict(&state, req).await.map(Json)
}

async fn fix_error(State(state): State<AppState>, Json(req): Json<FixErrorRequest>) -> Result<Json<FixErrorResponse>, ApiError> {
    dispatcher::fix_error(&state, req).await.map(Json)
}

/// Build the service's `Router`. Cross-origin preflights are honored and any origin is permitted,
/// since judge clients are expected to be browser-based learning frontends on arbitrary domains.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/judge/functional", post(functional))
        .route("/judge/predict-output", post(predict))
        .route("/judge/fix-error", post(fix_error))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use httpmock::MockServer;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::config::AppConfig;

    fn state_with_runner(runner_url: String) -> AppState {
        let config = AppConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            runner_url,
            default_time_limit_ms: 5000,
            default_memory_limit_mb: None,
            max_time_limit_ms: 15000,
            max_memory_limit_mb: None,
        };
        AppState::new(config)
    }

    #[tokio::test]
    async fn functional_endpoint_returns_accepted() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(httpmock::Method::POST).path("/execute");
            then.status(200).json_body(json!({
                "compile": null,
                "run": { "stdout": r#"[{"id":"1","pass":true,"actual":3,"expected":3,"runtime_ms":1,"error":null}]"#, "stderr": "", "code": 0, "signal": null },
            }));
        });

        let router = build_router(state_with_runner(server.base_url()));
        let body = json!({
            "code": "def add(a, b):\n    return a + b\n",
            "language": "python",
            "function_name": "add",
            "parameter_names": ["a", "b"],
            "test_cases": [{"id": "1", "inputs": {"a": 1, "b": 2}, "expected_output": 3}]
        });

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/judge/functional")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(StatusCode::OK, response.status());
    }

    #[tokio::test]
    async fn malformed_request_is_bad_request() {
        let router = build_router(state_with_runner("http://localhost:1".to_string()));

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/judge/functional")
                    .header("content-type", "application/json")
                    .body(Body::from(json!({"code": "", "language": "python", "function_name": "f", "parameter_names": [], "test_cases": []}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(StatusCode::BAD_REQUEST, response.status());
    }
}
