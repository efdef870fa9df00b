use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{error::Result, AppState};

#[axum::debug_handler]
pub async fn health() -> impl IntoResponse {
    let body = json!({
        "status": "ok",
    });
    (StatusCode::OK, Json(body))
}

/// Binds to the directory with the service account.
#[axum::debug_handler]
pub async fn directory_health(State(state): State<AppState>) -> Result<impl IntoResponse> {
    state.ad_service.check_connection().await?;
    let body = json!({
        "status": "ok",
        "base_dn": state.ad_service.base_dn(),
    });
    Ok((StatusCode::OK, Json(body)))
}
