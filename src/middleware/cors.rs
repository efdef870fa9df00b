use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// Any origin may call the API, but only with the methods and headers it uses.
pub fn admin_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_origin(Any)
}
