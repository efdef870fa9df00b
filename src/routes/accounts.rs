use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
    Extension,
};

use crate::{
    dto::account_dto::{AccountActionResponse, AccountPath, UserListResponse},
    error::{Error, Result},
    middleware::auth::Claims,
    models::account_action::AccountAction,
    utils::validation::validate,
    AppState,
};

#[axum::debug_handler]
pub async fn list_locked_users(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users = state.ad_service.get_locked_out_users().await?;
    Ok(Json(UserListResponse::from(users)))
}

#[axum::debug_handler]
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users = state.ad_service.get_all_users().await?;
    Ok(Json(UserListResponse::from(users)))
}

#[axum::debug_handler]
pub async fn unlock_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(sam_account_name): Path<String>,
) -> Result<impl IntoResponse> {
    change_lockout(&state, &claims, sam_account_name, AccountAction::Unlock).await
}

#[axum::debug_handler]
pub async fn lock_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(sam_account_name): Path<String>,
) -> Result<impl IntoResponse> {
    change_lockout(&state, &claims, sam_account_name, AccountAction::Lock).await
}

async fn change_lockout(
    state: &AppState,
    claims: &Claims,
    sam_account_name: String,
    action: AccountAction,
) -> Result<Json<AccountActionResponse>> {
    let path = AccountPath { sam_account_name };
    validate(&path)?;
    let sam_account_name = path.sam_account_name;

    let outcome = match action {
        AccountAction::Unlock => state.ad_service.unlock_user(&sam_account_name).await,
        AccountAction::Lock => state.ad_service.lock_user(&sam_account_name).await,
    };
    state.audit_service.log(
        &claims.sub,
        action,
        &sam_account_name,
        matches!(outcome, Ok(true)),
    );

    if !outcome? {
        return Err(Error::Rejected(format!(
            "Could not {} account '{}': not found or refused by the directory",
            action, sam_account_name
        )));
    }

    Ok(Json(AccountActionResponse {
        message: format!("Account '{}' {}ed", sam_account_name, action),
        sam_account_name,
        action,
        success: true,
    }))
}
