//! Access-control guards
//!
//! A request is authorized by threading a [`RequestContext`] through an
//! ordered [`Pipeline`] of guards. Each guard answers [`Decision::Allow`] or
//! [`Decision::Deny`], and the first denial ends the evaluation.
//!
//! Two rules cover every protected resource:
//!
//! - the ownership rule: the caller is an admin or owns the record
//! - the role rule: the caller's role is in a static allow-list

use garden_common::models::{Owned, Role};
use uuid::Uuid;

use crate::identity::Identity;

/// Why a guard refused the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No verified identity is attached to the request
    Unauthenticated,
    /// The caller's role is not in the allow-list
    Role,
    /// The caller neither owns the record nor is an admin
    Ownership,
}

/// Outcome of a single guard or a whole pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        *self == Decision::Allow
    }

    pub fn into_result(self) -> Result<(), DenyReason> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => Err(reason),
        }
    }
}

/// Allow iff the caller is an admin or is the owner
pub fn authorize_owner_or_admin(identity: &Identity, owner_id: Uuid) -> Decision {
    if identity.is_admin() || identity.id == owner_id {
        Decision::Allow
    } else {
        Decision::Deny(DenyReason::Ownership)
    }
}

/// Allow iff the caller's role is one of `allowed`
pub fn authorize_role(identity: &Identity, allowed: &[Role]) -> Decision {
    if allowed.contains(&identity.role) {
        Decision::Allow
    } else {
        Decision::Deny(DenyReason::Role)
    }
}

/// Per-request state the guards inspect
#[derive(Debug, Clone)]
pub struct RequestContext<E> {
    identity: Option<Identity>,
    entity: Option<E>,
}

impl<E> RequestContext<E> {
    pub fn new(identity: Option<Identity>) -> Self {
        Self {
            identity,
            entity: None,
        }
    }

    pub fn authenticated(identity: Identity) -> Self {
        Self::new(Some(identity))
    }

    /// Attach the record the request targets
    pub fn with_entity(mut self, entity: E) -> Self {
        self.entity = Some(entity);
        self
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn entity(&self) -> Option<&E> {
        self.entity.as_ref()
    }

    pub fn into_entity(self) -> Option<E> {
        self.entity
    }
}

/// A single access-control check
pub trait Guard<E>: Send + Sync {
    fn check(&self, ctx: &RequestContext<E>) -> Decision;
}

impl<E, F> Guard<E> for F
where
    F: Fn(&RequestContext<E>) -> Decision + Send + Sync,
{
    fn check(&self, ctx: &RequestContext<E>) -> Decision {
        self(ctx)
    }
}

/// Requires a verified identity
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityGuard;

impl<E> Guard<E> for IdentityGuard {
    fn check(&self, ctx: &RequestContext<E>) -> Decision {
        match ctx.identity() {
            Some(_) => Decision::Allow,
            None => Decision::Deny(DenyReason::Unauthenticated),
        }
    }
}

/// Static role allow-list, independent of any record
#[derive(Debug, Clone)]
pub struct RoleGuard {
    allowed: Vec<Role>,
}

impl RoleGuard {
    pub fn new(allowed: impl IntoIterator<Item = Role>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }

    pub fn admin() -> Self {
        Self::new([Role::Admin])
    }
}

impl<E> Guard<E> for RoleGuard {
    fn check(&self, ctx: &RequestContext<E>) -> Decision {
        match ctx.identity() {
            Some(identity) => authorize_role(identity, &self.allowed),
            None => Decision::Deny(DenyReason::Unauthenticated),
        }
    }
}

/// Self-or-admin rule over the loaded record
///
/// Runs after the record was loaded, so a denial means the record exists but
/// belongs to someone else. Without a loaded record it denies.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnershipGuard;

impl<E: Owned> Guard<E> for OwnershipGuard {
    fn check(&self, ctx: &RequestContext<E>) -> Decision {
        let Some(identity) = ctx.identity() else {
            return Decision::Deny(DenyReason::Unauthenticated);
        };

        match ctx.entity() {
            Some(entity) => authorize_owner_or_admin(identity, entity.owner_id()),
            None => Decision::Deny(DenyReason::Ownership),
        }
    }
}

/// Ordered guards evaluated until the first denial
pub struct Pipeline<E> {
    guards: Vec<Box<dyn Guard<E>>>,
}

impl<E> Default for Pipeline<E> {
    fn default() -> Self {
        Self { guards: Vec::new() }
    }
}

impl<E: 'static> Pipeline<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pipeline that starts by requiring a verified identity
    pub fn authenticated() -> Self {
        Self::new().then(IdentityGuard)
    }

    /// Append a guard
    pub fn then(mut self, guard: impl Guard<E> + 'static) -> Self {
        self.guards.push(Box::new(guard));
        self
    }

    /// Identity, then the admin role
    pub fn admin_only() -> Self {
        Self::authenticated().then(RoleGuard::admin())
    }

    pub fn evaluate(&self, ctx: &RequestContext<E>) -> Decision {
        self.guards
            .iter()
            .map(|guard| guard.check(ctx))
            .find(|decision| !decision.is_allowed())
            .unwrap_or(Decision::Allow)
    }
}

impl<E: Owned + 'static> Pipeline<E> {
    /// Identity, then the self-or-admin rule
    pub fn owner_or_admin() -> Self {
        Self::authenticated().then(OwnershipGuard)
    }
}
