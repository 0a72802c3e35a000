pub mod health;

use anyhow::{Context, Result};
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::chat::handlers::handle_chat;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/chat", post(handle_chat))
        .with_state(state)
}

/// Builds the CORS layer from the configured origin allow-list.
///
/// Only listed origins get an `Access-Control-Allow-Origin`; methods and
/// headers are mirrored back (effectively all allowed for a permitted
/// origin), and credentialed requests are permitted.
pub fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer> {
    let origins = allowed_origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("Invalid origin in ALLOWED_ORIGINS: '{o}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::llm_client::{LlmClient, Provider};

    fn test_state() -> AppState {
        let config = Config {
            drive_file_id: "test-file".to_string(),
            model_name: "test-model".to_string(),
            model_provider: Provider::OpenAI,
            api_key: "sk-test".to_string(),
            allowed_origins: vec!["http://localhost:5500".to_string()],
            port: 8080,
            rust_log: "info".to_string(),
        };
        AppState {
            llm: LlmClient::new(
                config.model_provider,
                config.model_name.clone(),
                config.api_key.clone(),
            ),
            profile_text: Arc::from("B.E. in Computer Science, graduated 2024."),
            config,
        }
    }

    fn test_app() -> Router {
        let state = test_state();
        let cors = cors_layer(&state.config.allowed_origins).unwrap();
        build_router(state).layer(cors)
    }

    #[tokio::test]
    async fn test_health_returns_ok() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_chat_missing_query_field_is_schema_rejection_not_500() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/chat")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"question": "hi"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_chat_non_string_query_is_schema_rejection() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/chat")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"query": 42}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_chat_empty_query_is_validation_error() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/chat")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"query": "   "}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    /// Spawns a local stand-in for the model provider that fails every call,
    /// and returns a router whose LLM client points at it.
    async fn app_with_failing_upstream() -> Router {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let upstream = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    r#"{"error": {"message": "model overloaded"}}"#,
                )
            }),
        );
        tokio::spawn(async move {
            axum::serve(listener, upstream).await.unwrap();
        });

        let mut state = test_state();
        state.llm = LlmClient::new(
            Provider::OpenAI,
            "test-model".to_string(),
            "sk-test".to_string(),
        )
        .with_endpoint(format!("http://{addr}/v1/chat/completions"));

        build_router(state)
    }

    fn chat_request(query: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::json!({ "query": query }).to_string(),
            ))
            .unwrap()
    }

    #[tokio::test]
    async fn test_upstream_failure_maps_to_502_with_error_envelope() {
        let app = app_with_failing_upstream().await;

        let response = app
            .oneshot(chat_request("What did you study?"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "LLM_ERROR");
        let message = json["error"]["message"].as_str().unwrap();
        assert!(!message.is_empty());
        // Provider detail is logged, never echoed to the caller
        assert!(!message.contains("model overloaded"));
    }

    #[tokio::test]
    async fn test_service_stays_alive_after_upstream_failure() {
        let app = app_with_failing_upstream().await;

        let response = app
            .clone()
            .oneshot(chat_request("What did you study?"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_listed_origin() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/chat")
                    .header(header::ORIGIN, "http://localhost:5500")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("http://localhost:5500")
        );
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .and_then(|v| v.to_str().ok()),
            Some("true")
        );
    }

    #[tokio::test]
    async fn test_cors_withholds_header_for_unlisted_origin() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/chat")
                    .header(header::ORIGIN, "https://evil.example")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn test_cors_rejects_invalid_origin_value() {
        assert!(cors_layer(&["not a header value\n".to_string()]).is_err());
    }
}
