use crate::database::tables::{Capability, User};
use std::collections::HashSet;
use thiserror::Error;

/// The acting identity for a request: anonymous, an authenticated user, or
/// an authenticated user holding moderation capabilities. Derived per
/// request by the auth extractor, never persisted.
#[derive(Clone, Debug)]
pub struct Viewer {
    user: Option<User>,
    capabilities: HashSet<Capability>,
}

impl Viewer {
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            user: None,
            capabilities: HashSet::new(),
        }
    }

    #[must_use]
    pub fn authenticated(user: User, capabilities: impl IntoIterator<Item = Capability>) -> Self {
        Self {
            user: Some(user),
            capabilities: capabilities.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }

    /// True if the viewer is the user who owns the entity.
    #[must_use]
    pub fn is_owner(&self, owner_id: i64) -> bool {
        self.user_id() == Some(owner_id)
    }

    #[must_use]
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Guard for write operations: the viewer must be authenticated and hold
    /// the operation's capability token. Composed before the operation body
    /// in every service-layer write path.
    pub fn require_capability(&self, capability: Capability) -> Result<&User, CapabilityError> {
        let user = self.user.as_ref().ok_or(CapabilityError::Unauthenticated)?;
        if !self.capabilities.contains(&capability) {
            return Err(CapabilityError::MissingCapability(capability));
        }
        Ok(user)
    }
}

#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("authentication required")]
    Unauthenticated,
    #[error("missing capability {0}")]
    MissingCapability(Capability),
}
