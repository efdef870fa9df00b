pub mod accounts;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    middleware::{
        auth::require_admin,
        cors::admin_cors,
        rate_limit::{new_rps_state, rps_middleware},
    },
    AppState,
};

/// Full application router. Account mutations are rate limited to `admin_rps`.
pub fn build_router(state: AppState, admin_rps: u32) -> Router {
    let base_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/directory", get(health::directory_health));

    let account_actions = Router::new()
        .route(
            "/api/users/:sam_account_name/unlock",
            post(accounts::unlock_user),
        )
        .route("/api/users/:sam_account_name/lock", post(accounts::lock_user))
        .layer(axum::middleware::from_fn_with_state(
            new_rps_state(admin_rps),
            rps_middleware,
        ));

    let admin_api = Router::new()
        .route("/api/users", get(accounts::list_users))
        .route("/api/users/locked", get(accounts::list_locked_users))
        .merge(account_actions)
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ));

    base_routes
        .merge(admin_api)
        .with_state(state)
        .layer(admin_cors())
        .layer(TraceLayer::new_for_http())
}
