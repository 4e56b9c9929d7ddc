#[cfg(test)]
mod tests {
    use crate::routes::routes_with_repository;
    use crate::test_support::{movement, FakeRepository, ORIGIN};
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    async fn get(uri: &str, repo: FakeRepository) -> (StatusCode, Value) {
        let app = routes_with_repository(repo);
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_found_shipment() {
        let repo = FakeRepository::with_shipment_123(vec![movement(ORIGIN, "V", "2025-03-01 10:30")]);
        let (status, body) = get("/tracking?q=123", repo).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["q"], "123");
        assert_eq!(body["msg"], "");
        assert_eq!(body["current_step"]["key"], "EN_CAMINO");
        assert_eq!(body["timeline"][1]["key"], "INICIO");
        assert_eq!(body["progress_steps"][1]["done"], true);
        assert_eq!(body["branches"]["destination"]["name"], "Rosario");
        assert!(body.get("outcome").is_none());
    }

    #[tokio::test]
    async fn test_non_numeric_is_bad_request() {
        let (status, body) = get("/tracking?q=abc", FakeRepository::default()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "El número de envío debe ser numérico.");
    }

    #[tokio::test]
    async fn test_not_found_is_ok_with_message() {
        let (status, body) = get("/tracking?q=42", FakeRepository::default()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["msg"], "No se encontró el envío #42.");
        assert!(body["shipment"].is_null());
    }

    #[tokio::test]
    async fn test_missing_query_returns_empty_view() {
        let (status, body) = get("/tracking", FakeRepository::default()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["q"], "");
        assert_eq!(body["timeline"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_store_failure_is_internal_error() {
        let repo = FakeRepository {
            fail: true,
            ..Default::default()
        };
        let (status, body) = get("/tracking?q=1", repo).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"]["message"].is_string());
    }
}
