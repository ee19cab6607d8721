//! User handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use garden_auth::Identity;
use serde_json::Value;
use garden_common::models::User;
use tracing::info;

use crate::{
    AppState,
    access::{owned_user, require_admin},
    error::{ApiError, ApiResult, Resource},
    models::{MessageResponse, user::UpdateUserRequest},
};

/// List every user; admin only
pub async fn list_users(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<Vec<User>>> {
    require_admin(identity)?;
    Ok(Json(state.users.find_all().await?))
}

pub async fn get_user(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> ApiResult<Json<User>> {
    Ok(Json(owned_user(&state, identity, &id).await?))
}

/// Apply a partial update to a user
///
/// The body is only decoded once the user is loaded and the ownership check
/// passed, so strangers see 403 and unknown ids 404 whatever they send.
pub async fn update_user(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<Value>, ApiError>,
) -> ApiResult<Json<User>> {
    let mut user = owned_user(&state, identity, &id).await?;
    let payload: UpdateUserRequest = serde_json::from_value(body)?;
    let changes = payload.validate()?;

    let password_hash = match &changes.password {
        Some(password) => Some(state.hasher.hash(password)?),
        None => None,
    };
    changes.apply(&mut user, &identity, password_hash);

    let user = state.users.save(&user).await?;
    info!("User {} updated by {}", user.id, identity.id);

    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let user = owned_user(&state, identity, &id).await?;

    if !state.users.delete(user.id).await? {
        return Err(ApiError::NotFound(Resource::User));
    }
    info!("User {} deleted by {}", user.id, identity.id);

    Ok(Json(MessageResponse::new("User deleted successfully")))
}
