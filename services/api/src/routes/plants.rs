//! Plant handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use garden_auth::Identity;
use serde_json::Value;
use garden_common::models::{Plant, PlantFilter};
use tracing::info;

use crate::{
    AppState,
    access::owned_plant,
    error::{ApiError, ApiResult, Resource},
    models::{
        MessageResponse,
        plant::{CreatePlantRequest, PlantQuery, UpdatePlantRequest},
    },
};

/// List plants; admins see every owner's, others only their own
pub async fn list_plants(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    WithRejection(Query(query), _): WithRejection<Query<PlantQuery>, ApiError>,
) -> ApiResult<Json<Vec<Plant>>> {
    let filter = PlantFilter {
        owner_id: (!identity.is_admin()).then_some(identity.id),
        status: query.status,
    };

    Ok(Json(state.plants.find(&filter).await?))
}

/// Create a plant owned by the caller
pub async fn create_plant(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    WithRejection(Json(payload), _): WithRejection<Json<CreatePlantRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let plant = payload.into_plant(identity.id)?;
    let plant = state.plants.save(&plant).await?;

    info!("Plant {} created by {}", plant.id, identity.id);

    Ok((StatusCode::CREATED, Json(plant)))
}

pub async fn get_plant(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> ApiResult<Json<Plant>> {
    Ok(Json(owned_plant(&state, identity, &id).await?))
}

/// Apply a partial update to a plant
///
/// The body is only decoded once the plant is loaded and the ownership check
/// passed, so strangers see 403 and unknown ids 404 whatever they send.
pub async fn update_plant(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<Value>, ApiError>,
) -> ApiResult<Json<Plant>> {
    let mut plant = owned_plant(&state, identity, &id).await?;
    let payload: UpdatePlantRequest = serde_json::from_value(body)?;
    payload.validate()?.apply(&mut plant);

    let plant = state.plants.save(&plant).await?;
    info!("Plant {} updated by {}", plant.id, identity.id);

    Ok(Json(plant))
}

pub async fn delete_plant(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let plant = owned_plant(&state, identity, &id).await?;

    if !state.plants.delete(plant.id).await? {
        return Err(ApiError::NotFound(Resource::Plant));
    }
    info!("Plant {} deleted by {}", plant.id, identity.id);

    Ok(Json(MessageResponse::new("Plant deleted successfully")))
}
