//! Guard pipelines applied by the handlers

use garden_auth::{Identity, Pipeline, RequestContext};
use garden_common::models::{Owned, Plant, User};
use tracing::warn;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Admin-only gate, evaluated before any record is touched
pub fn require_admin(identity: Identity) -> ApiResult<()> {
    let ctx: RequestContext<()> = RequestContext::authenticated(identity);
    Pipeline::admin_only().evaluate(&ctx).into_result().map_err(|reason| {
        warn!("Role check denied user {}: {:?}", identity.id, reason);
        ApiError::from(reason)
    })
}

/// Apply the self-or-admin rule to an already loaded record
pub fn authorize_owned<E: Owned + 'static>(identity: Identity, entity: E) -> ApiResult<E> {
    let ctx = RequestContext::authenticated(identity).with_entity(entity);

    Pipeline::owner_or_admin()
        .evaluate(&ctx)
        .into_result()
        .map_err(|reason| {
            warn!("Ownership check denied user {}: {:?}", identity.id, reason);
            ApiError::from(reason)
        })?;

    ctx.into_entity()
        .ok_or_else(|| ApiError::Internal("authorized context lost its record".to_string()))
}

/// Load a user by path id and check the caller may act on it
pub async fn owned_user(state: &AppState, identity: Identity, id: &str) -> ApiResult<User> {
    let user = state.loader().load_user(id).await?;
    authorize_owned(identity, user)
}

/// Load a plant by path id and check the caller may act on it
pub async fn owned_plant(state: &AppState, identity: Identity, id: &str) -> ApiResult<Plant> {
    let plant = state.loader().load_plant(id).await?;
    authorize_owned(identity, plant)
}
