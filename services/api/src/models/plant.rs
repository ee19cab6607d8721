//! Plant request payloads

use chrono::Utc;
use garden_auth::validation::{self, ValidationError};
use garden_common::models::{Plant, PlantStatus};
use serde::Deserialize;
use std::str::FromStr;
use uuid::Uuid;

use super::{empty_update, present, trimmed};

const NAME_MIN: usize = 3;
const SPECIES_MIN: usize = 3;

/// Request to create a plant
///
/// Owner, status and positions are decided by the server; whatever the client
/// sends for them is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlantRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub species: String,
    #[serde(default)]
    pub image_url: String,
}

impl CreatePlantRequest {
    /// Validate and build a new vault plant for `owner_id`
    pub fn into_plant(self, owner_id: Uuid) -> Result<Plant, ValidationError> {
        let name = trimmed(self.name);
        let species = trimmed(self.species);
        let image_url = trimmed(self.image_url);

        validation::validate_min_length("name", &name, NAME_MIN)?;
        validation::validate_min_length("species", &species, SPECIES_MIN)?;
        validation::validate_uri("imageUrl", &image_url)?;

        Ok(Plant::new(owner_id, name, species, image_url))
    }
}

/// Partial update of a plant
///
/// Positions distinguish an absent field (unchanged) from an explicit `null`
/// (cleared).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdatePlantRequest {
    pub name: Option<String>,
    pub species: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub position_x: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub position_y: Option<Option<f64>>,
    pub status: Option<String>,
    pub image_url: Option<String>,
}

/// Validated plant changes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlantChanges {
    pub name: Option<String>,
    pub species: Option<String>,
    pub position_x: Option<Option<f64>>,
    pub position_y: Option<Option<f64>>,
    pub status: Option<PlantStatus>,
    pub image_url: Option<String>,
}

impl UpdatePlantRequest {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.species.is_none()
            && self.position_x.is_none()
            && self.position_y.is_none()
            && self.status.is_none()
            && self.image_url.is_none()
    }

    /// Validate every present field before anything is applied
    pub fn validate(self) -> Result<PlantChanges, ValidationError> {
        if self.is_empty() {
            return Err(empty_update());
        }

        let name = self.name.map(trimmed);
        if let Some(name) = &name {
            validation::validate_min_length("name", name, NAME_MIN)?;
        }

        let species = self.species.map(trimmed);
        if let Some(species) = &species {
            validation::validate_min_length("species", species, SPECIES_MIN)?;
        }

        if let Some(Some(x)) = self.position_x {
            validation::validate_coordinate("positionX", x)?;
        }
        if let Some(Some(y)) = self.position_y {
            validation::validate_coordinate("positionY", y)?;
        }

        let status = self
            .status
            .map(|status| {
                PlantStatus::from_str(status.trim())
                    .map_err(|_| ValidationError::new("\"status\" must be one of [garden, vault]"))
            })
            .transpose()?;

        let image_url = self.image_url.map(trimmed);
        if let Some(url) = &image_url {
            validation::validate_uri("imageUrl", url)?;
        }

        Ok(PlantChanges {
            name,
            species,
            position_x: self.position_x,
            position_y: self.position_y,
            status,
            image_url,
        })
    }
}

impl PlantChanges {
    pub fn apply(self, plant: &mut Plant) {
        if let Some(name) = self.name {
            plant.name = name;
        }
        if let Some(species) = self.species {
            plant.species = species;
        }
        if let Some(x) = self.position_x {
            plant.position_x = x;
        }
        if let Some(y) = self.position_y {
            plant.position_y = y;
        }
        if let Some(status) = self.status {
            plant.status = status;
        }
        if let Some(url) = self.image_url {
            plant.image_url = url;
        }
        plant.updated_at = Utc::now();
    }
}

/// Query string of the plant listing
#[derive(Debug, Default, Deserialize)]
pub struct PlantQuery {
    pub status: Option<PlantStatus>,
}
