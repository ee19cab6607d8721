//! The authenticated caller

use garden_common::models::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Id and role of the caller, rebuilt from a verified token on every request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub role: Role,
}

impl Identity {
    pub fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
