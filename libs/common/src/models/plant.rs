//! Plant model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::Owned;

/// Placement state of a plant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantStatus {
    /// Placed in the garden at meaningful coordinates
    Garden,
    /// Stored away, not placed
    #[default]
    Vault,
}

impl PlantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlantStatus::Garden => "garden",
            PlantStatus::Vault => "vault",
        }
    }
}

impl fmt::Display for PlantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlantStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "garden" => Ok(PlantStatus::Garden),
            "vault" => Ok(PlantStatus::Vault),
            other => Err(format!("unknown plant status '{}'", other)),
        }
    }
}

/// Plant entity
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub species: String,
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
    pub status: PlantStatus,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Plant {
    /// Plant a new, unplaced record for `owner_id`
    pub fn new(owner_id: Uuid, name: String, species: String, image_url: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name,
            species,
            position_x: None,
            position_y: None,
            status: PlantStatus::Vault,
            image_url,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Owned for Plant {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
}

/// Query-time filter for plant listings
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlantFilter {
    /// Restrict to plants of this owner
    pub owner_id: Option<Uuid>,
    /// Restrict to plants in this state
    pub status: Option<PlantStatus>,
}

impl PlantFilter {
    pub fn owned_by(owner_id: Uuid) -> Self {
        Self {
            owner_id: Some(owner_id),
            status: None,
        }
    }

    pub fn matches(&self, plant: &Plant) -> bool {
        self.owner_id.is_none_or(|owner| plant.owner_id == owner)
            && self.status.is_none_or(|status| plant.status == status)
    }
}
