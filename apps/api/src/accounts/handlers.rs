//! Axum route handlers for login, registration and the active session.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::user::UserProfile;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: Option<UserProfile>,
    pub login_required: bool,
}

impl SessionResponse {
    fn active(profile: UserProfile) -> Self {
        Self {
            user: Some(profile),
            login_required: false,
        }
    }
}

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let user = state.session.current().await;
    Json(SessionResponse {
        login_required: user.is_none(),
        user: user.as_ref().map(UserProfile::from),
    })
}

/// POST /api/v1/session/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let account = state
        .accounts
        .find_by_credentials(&req.username, &req.password)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let profile = UserProfile::from(&account);
    state.session.login(account).await?;
    Ok(Json(SessionResponse::active(profile)))
}

/// POST /api/v1/session/register
///
/// Registration logs the new account straight in.
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let account = state
        .accounts
        .register(&req.username, &req.password)
        .await?;

    let profile = UserProfile::from(&account);
    state.session.login(account).await?;
    Ok((StatusCode::CREATED, Json(SessionResponse::active(profile))))
}

/// POST /api/v1/session/logout
pub async fn handle_logout(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.session.logout().await?;
    Ok(StatusCode::NO_CONTENT)
}
