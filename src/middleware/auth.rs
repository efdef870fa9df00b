use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::AppState;

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub role: Option<String>,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role
            .as_deref()
            .is_some_and(|role| role.eq_ignore_ascii_case(ADMIN_ROLE))
    }
}

fn reject(status: StatusCode, code: &str) -> Response {
    (status, Json(json!({ "error": code }))).into_response()
}

fn bearer_token(req: &Request) -> Result<&str, Response> {
    let header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "missing_authorization"))?;
    let value = header
        .to_str()
        .map_err(|_| reject(StatusCode::UNAUTHORIZED, "bad_authorization"))?;
    value
        .strip_prefix("Bearer ")
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "unsupported_scheme"))
}

pub fn decode_claims(token: &str, secret: &str) -> Option<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .ok()
    .map(|data| data.claims)
}

/// Requires an HS256 bearer token whose `role` claim is `admin`.
/// The decoded [`Claims`] are stored in the request extensions.
pub async fn require_admin(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let claims = match bearer_token(&req) {
        Ok(token) => decode_claims(token, &state.jwt_secret),
        Err(response) => return response,
    };

    let Some(claims) = claims else {
        return reject(StatusCode::UNAUTHORIZED, "invalid_token");
    };
    if !claims.is_admin() {
        tracing::warn!(sub = %claims.sub, "Non-admin token rejected");
        return reject(StatusCode::FORBIDDEN, "forbidden");
    }

    req.extensions_mut().insert(claims);
    next.run(req).await
}
