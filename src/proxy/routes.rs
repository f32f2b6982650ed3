use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{debug, error};

use super::completer::{Completer, CompletionError};
use super::types::{CompletionReply, CompletionRequest, Liveness};

#[derive(Clone)]
struct AppState {
    completer: Arc<dyn Completer>,
}

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error(transparent)]
    Completion(#[from] CompletionError),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        error!(error = %self, "completion request failed");
        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// The proxy endpoints, open to any origin.
pub fn router(completer: Arc<dyn Completer>) -> Router {
    Router::new()
        .route("/", get(liveness).post(complete))
        .layer(CorsLayer::permissive())
        .with_state(AppState { completer })
}

async fn liveness() -> Json<Liveness> {
    Json(Liveness::default())
}

async fn complete(
    State(state): State<AppState>,
    Json(request): Json<CompletionRequest>,
) -> Result<Json<CompletionReply>, ProxyError> {
    debug!(prompt_len = request.prompt.len(), "forwarding prompt");
    let bot = state.completer.complete(&request.prompt).await?;
    Ok(Json(CompletionReply { bot }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::testing::StubCompleter;
    use axum::{body::Body, http::Request};
    use serde_json::Value;
    use tower::ServiceExt;

    fn post(prompt: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(json!({ "prompt": prompt }).to_string()))
            .unwrap()
    }

    fn get_root() -> Request<Body> {
        Request::builder().uri("/").body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_liveness() {
        let response = router(StubCompleter::answering("4"))
            .oneshot(get_root())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "message": "Hello from AI" }));
    }

    #[tokio::test]
    async fn test_completion() {
        let response = router(StubCompleter::answering("4"))
            .oneshot(post("2+2="))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "bot": "4" }));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_500() {
        let app = router(StubCompleter::failing());

        let response = app.clone().oneshot(post("2+2=")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        let error = body["error"].as_str().unwrap();
        assert!(!error.is_empty());
        assert!(error.contains("quota exceeded"));

        // The failure is contained to that request.
        let response = app.oneshot(get_root()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "Hello from AI");
    }

    #[tokio::test]
    async fn test_liveness_after_posts() {
        let app = router(StubCompleter::answering("4"));
        for _ in 0..3 {
            let response = app.clone().oneshot(post("again")).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
        let response = app.oneshot(get_root()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "message": "Hello from AI" }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"question": "2+2="}"#))
            .unwrap();
        let response = router(StubCompleter::answering("4"))
            .oneshot(request)
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let request = Request::builder()
            .uri("/")
            .header("origin", "http://elsewhere.example")
            .body(Body::empty())
            .unwrap();
        let response = router(StubCompleter::answering("4"))
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }
}
