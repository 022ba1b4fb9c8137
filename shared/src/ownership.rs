use crate::types::{EntityId, OwnerId};

/// Whether the local peer publishes an entity's pose or consumes it.
///
/// Never stored: it is resolved again every time it is needed, so an
/// ownership handoff on the host shows up on the next tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReplicationRole {
    Authority,
    Observer,
}

/// Host-side lookup of entity ownership.
///
/// The host owns the entity registry; this crate only ever asks it who owns
/// an entity right now.
pub trait EntityRegistry {
    /// Returns `None` when the entity is unknown or has no owner.
    fn owner_of(&self, entity: EntityId) -> Option<OwnerId>;
}

pub struct OwnershipResolver {
    local: OwnerId,
}

impl OwnershipResolver {
    pub fn new(local: OwnerId) -> Self {
        Self { local }
    }

    pub fn local(&self) -> OwnerId {
        self.local
    }

    /// `Authority` only when `owner` is exactly the local peer. An absent
    /// owner never grants authority.
    pub fn role_of(&self, owner: Option<OwnerId>) -> ReplicationRole {
        match owner {
            Some(owner) if owner == self.local => ReplicationRole::Authority,
            _ => ReplicationRole::Observer,
        }
    }

    pub fn role_of_entity<R: EntityRegistry + ?Sized>(
        &self,
        registry: &R,
        entity: EntityId,
    ) -> ReplicationRole {
        self.role_of(registry.owner_of(entity))
    }
}
