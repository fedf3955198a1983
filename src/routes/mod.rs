use axum::http::{header, HeaderValue};
use axum::routing::{get, put};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::create_cors_layer;
use crate::handlers::events::{create_event, delete_event, list_events, update_event};
use crate::handlers::health_check;
use crate::handlers::ticket_designs::{create_ticket_design, list_ticket_designs};
use crate::registry::AppRegistry;

pub fn create_routes(registry: AppRegistry) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/events", get(list_events).post(create_event))
        .route("/api/events/:id", put(update_event).delete(delete_event))
        .route(
            "/api/ticket-designs",
            get(list_ticket_designs).post(create_ticket_design),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
        .with_state(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SystemConfig;
    use crate::design::DesignState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        create_routes(AppRegistry::in_memory(SystemConfig::default()))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["status"], json!("ok"));
    }

    #[tokio::test]
    async fn events_can_be_created_and_listed() {
        let app = app();

        let response = app
            .clone()
            .oneshot(post(
                "/api/events",
                json!({
                    "name": "Conferencia Tech 2024",
                    "date": "2024-11-20",
                    "time": "09:00:00",
                    "location": "Centro de Convenciones",
                    "capacity": 300,
                    "price": "45.00",
                    "status": "selling",
                    "category": "Tecnología"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["data"]["name"], json!("Conferencia Tech 2024"));

        let response = app
            .oneshot(Request::get("/api/events").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_capacity_is_rejected() {
        let response = app()
            .oneshot(post(
                "/api/events",
                json!({
                    "name": "Broken",
                    "date": "2024-11-20",
                    "time": "09:00:00",
                    "location": "Sala 1",
                    "capacity": 0,
                    "price": "10.00"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));
    }

    #[tokio::test]
    async fn deleting_a_missing_event_is_not_found() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/events/999")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], json!("NOT_FOUND"));
    }

    #[tokio::test]
    async fn a_full_design_payload_round_trips() {
        let app = app();
        let payload = DesignState::default().to_payload(None);

        let response = app
            .clone()
            .oneshot(post(
                "/api/ticket-designs",
                serde_json::to_value(&payload).unwrap(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["data"]["templateId"], json!("classic"));
        assert_eq!(body["data"]["fontSize"], json!(14));

        let response = app
            .oneshot(
                Request::get("/api/ticket-designs")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["eventName"], json!("Sample Event"));
    }

    #[tokio::test]
    async fn out_of_range_font_size_is_rejected() {
        let mut payload = serde_json::to_value(DesignState::default().to_payload(None)).unwrap();
        payload["fontSize"] = json!(64);

        let response = app()
            .oneshot(post("/api/ticket-designs", payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));
    }
}
