// Plugin router
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    create_dashboard, delete_dashboard, get_schema, health_check, import_dashboard,
    plan_dashboard, read_dashboard, update_dashboard, validate_dashboard,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/schema", get(get_schema))
        .route("/resources/dashboard/validate", post(validate_dashboard))
        .route("/resources/dashboard/plan", post(plan_dashboard))
        .route("/resources/dashboard/create", post(create_dashboard))
        .route("/resources/dashboard/read", post(read_dashboard))
        .route("/resources/dashboard/update", post(update_dashboard))
        .route("/resources/dashboard/delete", post(delete_dashboard))
        .route("/resources/dashboard/import", post(import_dashboard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_resource::tests::{markdown_config, InMemoryRepository};
    use crate::application::dashboard_resource::DashboardResource;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> (Arc<InMemoryRepository>, Router) {
        let repository = Arc::new(InMemoryRepository::default());
        let state = Arc::new(AppState {
            dashboard_resource: DashboardResource::new(repository.clone()),
        });
        (repository, build_router(state))
    }

    async fn call(router: &Router, path: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn markdown_json(source: &str) -> Value {
        serde_json::to_value(markdown_config(source)).unwrap()
    }

    #[tokio::test]
    async fn test_health_and_schema() {
        let (_, router) = app();

        let response = router
            .clone()
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(Request::builder().uri("/schema").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let schema: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(schema["type_name"], "newrelic_dashboard");
    }

    #[tokio::test]
    async fn test_resource_lifecycle() {
        let (repository, router) = app();

        let (status, created) = call(
            &router,
            "/resources/dashboard/create",
            json!({ "config": markdown_json("#h1 heading") }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["id"], "1");
        assert_eq!(created["state"]["widget"][0]["data"][0]["source"], "#h1 heading");

        let (status, planned) = call(
            &router,
            "/resources/dashboard/plan",
            json!({ "prior_state": created["state"], "config": markdown_json("#h2 heading") }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(planned["action"], "update");
        assert_eq!(planned["requires_update"], true);

        let (status, updated) = call(
            &router,
            "/resources/dashboard/update",
            json!({ "id": "1", "config": markdown_json("#h2 heading") }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["state"]["widget"][0]["data"][0]["source"], "#h2 heading");

        let (status, _) = call(&router, "/resources/dashboard/delete", json!({ "id": "1" })).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(repository.stored(1).is_none());

        let (status, read) = call(&router, "/resources/dashboard/read", json!({ "id": "1" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(read, json!({ "id": null, "state": null }));

        let (status, body) =
            call(&router, "/resources/dashboard/import", json!({ "id": "1" })).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "cannot import non-existent dashboard 1");
    }

    #[tokio::test]
    async fn test_validation_errors() {
        let (_, router) = app();
        let mut config = markdown_json("x");
        config["widget"][0]["visualization"] = json!("billboard");
        config["icon"] = json!("smiley");

        let (status, body) = call(
            &router,
            "/resources/dashboard/validate",
            json!({ "config": config.clone() }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let diagnostics = body["diagnostics"].as_array().unwrap();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0]["path"], "icon");
        assert_eq!(diagnostics[1]["message"], "nrql is required for billboard visualization");

        let (status, body) =
            call(&router, "/resources/dashboard/create", json!({ "config": config })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().contains("billboard visualization"));
    }

    #[tokio::test]
    async fn test_bad_requests() {
        let (repository, router) = app();

        let (status, body) = call(
            &router,
            "/resources/dashboard/create",
            json!({ "config": { "icon": "fire" } }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("invalid config"));

        let (status, _) =
            call(&router, "/resources/dashboard/read", json!({ "id": "not-a-number" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        *repository.fail_with_status.lock().unwrap() = Some(503);
        let (status, body) = call(&router, "/resources/dashboard/read", json!({ "id": "9" })).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "API error: 503 - Internal Server Error");
    }
}
