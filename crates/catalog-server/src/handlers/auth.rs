//! Authentication handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use catalog_types::{AuthResponse, LoginRequest, RegisterRequest};
use tracing::{error, info};

use crate::app::AppState;
use crate::services::auth::AuthError;

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), StatusCode> {
    info!("Registration attempt for: {}", req.email);

    if !req.email.contains('@') {
        return Err(StatusCode::BAD_REQUEST);
    }
    if req.password.len() < 6 {
        return Err(StatusCode::BAD_REQUEST);
    }

    match state.auth.register(&req.email, &req.password).await {
        Ok(resp) => Ok((StatusCode::CREATED, Json(resp))),
        Err(AuthError::EmailTaken) => Err(StatusCode::CONFLICT),
        Err(e) => {
            error!("Registration error: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, StatusCode> {
    info!("Login attempt for: {}", req.email);

    match state.auth.login(&req.email, &req.password).await {
        Ok(resp) => Ok(Json(resp)),
        Err(AuthError::InvalidCredentials) => Err(StatusCode::UNAUTHORIZED),
        Err(e) => {
            error!("Login error: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
