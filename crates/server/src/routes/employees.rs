use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use models::EmployeeRecord;
use tracing::debug;

use super::{not_found, AppState};
use crate::errors::JsonApiError;

/// List every employee in the directory.
pub async fn list_employees(State(state): State<AppState>) -> Json<Vec<EmployeeRecord>> {
    Json(state.store.list().await)
}

/// Fetch one employee; unknown ids get the same response as an unrouted path.
pub async fn get_employee(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store.get(&id).await {
        Some(rec) => Json(rec).into_response(),
        None => {
            debug!(%id, "employee not found");
            not_found().await.into_response()
        }
    }
}

/// Create or replace the employee at `id` with the body as sent and echo what was stored.
pub async fn put_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(record): Json<EmployeeRecord>,
) -> Result<Json<EmployeeRecord>, JsonApiError> {
    let stored = state.store.put(id, record).await?;
    Ok(Json(stored))
}
