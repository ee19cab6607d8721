//! Registration, login and current identity

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::WithRejection;
use garden_auth::Identity;
use garden_common::models::User;
use tracing::{debug, info};

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    models::{LoginRequest, RegisterRequest, TokenResponse},
};

/// Register a new user and sign a token for it
pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<RegisterRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let account = payload.validate()?;

    if state
        .users
        .find_by_username_or_email(&account.username, &account.email)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict);
    }

    let password_hash = state.hasher.hash(&account.password)?;
    let user = state
        .users
        .save(&User::new(account.username, account.email, password_hash))
        .await?;

    let token = state
        .jwt_service
        .generate_token(&Identity::new(user.id, user.role))?;

    info!("Registered user {} ({})", user.username, user.id);

    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

/// Exchange email and password for a token
pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> ApiResult<Json<TokenResponse>> {
    let (email, password) = payload.validate().map_err(|e| {
        debug!("Rejected login payload: {}", e);
        ApiError::InvalidCredentials
    })?;

    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !state.hasher.verify(&password, &user.password_hash)? {
        debug!("Wrong password for user {}", user.id);
        return Err(ApiError::InvalidCredentials);
    }

    let token = state
        .jwt_service
        .generate_token(&Identity::new(user.id, user.role))?;

    info!("User {} logged in", user.id);

    Ok(Json(TokenResponse { token }))
}

/// The caller's own user record
pub async fn me(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<User>> {
    let user = state.loader().load_user(&identity.id.to_string()).await?;
    Ok(Json(user))
}
