use std::sync::Arc;

use axum::{handler::HandlerWithoutStateExt, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::EmployeeStore;

use crate::errors::JsonApiError;

pub mod employees;

/// Shared handler state: the directory behind its trait.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EmployeeStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Last handler in the chain: anything no route or static file claimed.
pub async fn not_found() -> JsonApiError {
    JsonApiError::not_found()
}

fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/employees", get(employees::list_employees))
        .route(
            "/employees/:id",
            get(employees::get_employee).put(employees::put_employee),
        )
}

/// Build the full application router: health, employee API (optionally under `api_prefix`),
/// then static assets from `frontend_dir`, then the JSON 404.
pub fn build_router(state: AppState, api_prefix: &str, frontend_dir: &str, cors: CorsLayer) -> Router {
    let static_dir = ServeDir::new(frontend_dir).not_found_service(not_found.into_service());

    let public = Router::new().route("/health", get(health));

    let app = if api_prefix.is_empty() {
        public.merge(employee_routes())
    } else {
        public.nest(api_prefix, employee_routes())
    };

    app.fallback_service(static_dir)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use service::EmployeeDirectory;
    use tower::ServiceExt;

    const SEED: &str = r#"{"employees":{"100":{"employeeId":100,"firstName":"Jane","lastName":"Doe"}}}"#;

    fn app_with_prefix(prefix: &str) -> Router {
        let store = EmployeeDirectory::from_document(serde_json::from_str(SEED).unwrap());
        build_router(AppState::new(store), prefix, "no-such-frontend-dir", CorsLayer::very_permissive())
    }

    fn app() -> Router {
        app_with_prefix("")
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                req = req.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let res = app.oneshot(req.body(body).unwrap()).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (status, body) = send(app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn list_returns_seed_records() {
        let (status, body) = send(app(), Method::GET, "/employees", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{"employeeId": 100, "firstName": "Jane", "lastName": "Doe"}]));
    }

    #[tokio::test]
    async fn get_known_and_unknown_ids() {
        let (status, body) = send(app(), Method::GET, "/employees/100", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"employeeId": 100, "firstName": "Jane", "lastName": "Doe"}));

        let (status, body) = send(app(), Method::GET, "/employees/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Not Found"}));
    }

    #[tokio::test]
    async fn unknown_id_matches_router_fallback() {
        let (missing_status, missing_body) = send(app(), Method::GET, "/employees/999", None).await;
        let (fallback_status, fallback_body) = send(app(), Method::GET, "/nowhere", None).await;
        assert_eq!(missing_status, fallback_status);
        assert_eq!(missing_body, fallback_body);
    }

    #[tokio::test]
    async fn put_echoes_and_replaces() {
        let app = app();
        let janet = json!({"employeeId": 100, "firstName": "Janet", "lastName": "Doe"});
        let (status, body) = send(app.clone(), Method::PUT, "/employees/100", Some(janet.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, janet);

        let (_, body) = send(app.clone(), Method::GET, "/employees/100", None).await;
        assert_eq!(body, janet);
        let (_, body) = send(app, Method::GET, "/employees", None).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn put_new_id_creates_it() {
        let app = app();
        let ann = json!({"employeeId": 7, "firstName": "Ann", "lastName": "Lee", "title": "CTO"});
        let (status, body) = send(app.clone(), Method::PUT, "/employees/7", Some(ann.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, ann);

        let (_, body) = send(app, Method::GET, "/employees", None).await;
        let list = body.as_array().cloned().unwrap_or_default();
        assert_eq!(list.len(), 2);
        assert_eq!(list.iter().filter(|r| r["employeeId"] == json!(7)).count(), 1);
    }

    #[tokio::test]
    async fn put_with_different_body_id_is_stored_as_sent() {
        let app = app();
        let body = json!({"employeeId": 101, "firstName": "Jane", "lastName": "Doe"});
        let (status, echo) = send(app.clone(), Method::PUT, "/employees/100", Some(body.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(echo, body);

        let (status, stored) = send(app.clone(), Method::GET, "/employees/100", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stored, body);
        let (status, _) = send(app, Method::GET, "/employees/101", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn put_partial_record_is_stored_as_sent() {
        let app = app();
        let body = json!({"firstName": "X"});
        let (status, echo) = send(app.clone(), Method::PUT, "/employees/100", Some(body.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(echo, body);

        let (_, stored) = send(app, Method::GET, "/employees/100", None).await;
        assert_eq!(stored, body);
    }

    #[tokio::test]
    async fn put_malformed_json_is_client_error() {
        let req = Request::builder()
            .method(Method::PUT)
            .uri("/employees/100")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"employeeId\": 100,"))
            .unwrap();
        let res = app().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_is_not_offered() {
        let (status, _) = send(app(), Method::DELETE, "/employees/100", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn prefix_moves_employee_routes() {
        let (status, _) = send(app_with_prefix("/rest"), Method::GET, "/rest/employees/100", None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(app_with_prefix("/rest"), Method::GET, "/employees/100", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(app_with_prefix("/rest"), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
