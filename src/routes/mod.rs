//! HTTP route handlers.
//!
//! Two endpoints, both returning JSON and marked `Cache-Control: no-store`.
//! Anything else falls through to axum's default 404/405 handling.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod dice;
pub mod health;

use axum::http::header::{HeaderValue, CACHE_CONTROL};
use axum::{middleware, routing::get, Router};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_NO_STORE;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with all routes and cache headers.
pub fn create_router(state: AppState) -> Router {
    // Health check - no caching, always fresh for liveness probes
    let health_routes = Router::new().route("/health", get(health::health));

    // Dice - every response is a fresh roll
    let dice_routes = Router::new().route("/dice", get(dice::roll));

    Router::new()
        .merge(health_routes)
        .merge(dice_routes)
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ))
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::dice::{DiceRoll, Roller};
    use crate::dice_log::{EventSink, SinkError};
    use crate::readiness::Readiness;

    #[derive(Default)]
    struct RecordingSink(Mutex<Vec<String>>);

    impl RecordingSink {
        fn messages(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    impl EventSink for RecordingSink {
        fn record(&self, message: &str) -> Result<(), SinkError> {
            self.0.lock().unwrap().push(message.to_string());
            Ok(())
        }
    }

    struct FailingSink;

    impl EventSink for FailingSink {
        fn record(&self, _message: &str) -> Result<(), SinkError> {
            Err(SinkError::Write {
                target: "test".to_string(),
                source: std::io::Error::other("disk full"),
            })
        }
    }

    struct FixedRoller(u8);

    impl Roller for FixedRoller {
        fn roll(&self) -> DiceRoll {
            DiceRoll::new(self.0).unwrap()
        }
    }

    fn test_router(readiness: Readiness, sink: Arc<dyn EventSink>) -> Router {
        create_router(AppState::new(readiness, sink))
    }

    async fn send(router: Router, method: Method, uri: &str) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        router.oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_ready() {
        let sink = Arc::new(RecordingSink::default());
        let router = test_router(Readiness::new(), sink.clone());
        let response = send(router, Method::GET, "/health").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CACHE_CONTROL], CACHE_CONTROL_NO_STORE);
        assert_eq!(
            json_body(response).await,
            json!({"status": "healthy", "message": "Service is ready"})
        );
        assert!(sink.messages().is_empty());
    }

    #[tokio::test]
    async fn test_health_draining() {
        let readiness = Readiness::new();
        readiness.mark_draining();
        let response = send(
            test_router(readiness, Arc::new(RecordingSink::default())),
            Method::GET,
            "/health",
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            json!({"status": "unhealthy", "message": "Service is not ready"})
        );
    }

    #[tokio::test]
    async fn test_dice_records_the_returned_roll() {
        let sink = Arc::new(RecordingSink::default());
        let state = AppState::with_roller(Readiness::new(), Arc::new(FixedRoller(4)), sink.clone());

        let response = send(create_router(state), Method::GET, "/dice").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CACHE_CONTROL], CACHE_CONTROL_NO_STORE);
        assert_eq!(json_body(response).await, json!({"dice_roll": 4}));
        assert_eq!(sink.messages(), vec!["Dice roll: 4".to_string()]);
    }

    #[tokio::test]
    async fn test_dice_roll_in_range_and_logged_once_per_request() {
        let sink = Arc::new(RecordingSink::default());
        let router = test_router(Readiness::new(), sink.clone());

        for _ in 0..50 {
            let body = json_body(send(router.clone(), Method::GET, "/dice").await).await;
            let roll = body["dice_roll"].as_u64().unwrap();
            assert!((1..=6).contains(&roll), "rolled {}", roll);
            assert_eq!(sink.messages().last().unwrap(), &format!("Dice roll: {}", roll));
        }
        assert_eq!(sink.messages().len(), 50);
    }

    #[tokio::test]
    async fn test_dice_survives_log_failure() {
        let router = test_router(Readiness::new(), Arc::new(FailingSink));
        let response = send(router, Method::GET, "/dice").await;

        assert_eq!(response.status(), StatusCode::OK);
        let roll = json_body(response).await["dice_roll"].as_u64().unwrap();
        assert!((1..=6).contains(&roll));
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let sink = Arc::new(RecordingSink::default());
        let router = test_router(Readiness::new(), sink.clone());
        let response = send(router, Method::GET, "/nonexistent").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(sink.messages().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_method_is_not_allowed() {
        let sink = Arc::new(RecordingSink::default());
        let router = test_router(Readiness::new(), sink.clone());

        let response = send(router.clone(), Method::POST, "/dice").await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let response = send(router, Method::DELETE, "/health").await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        assert!(sink.messages().is_empty());
    }
}
