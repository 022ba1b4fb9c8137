use thiserror::Error;

use posesync_shared::EntityId;

use crate::anchor::AnchorKind;

/// Errors that can occur while registering entities with the `SyncLoop`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Entity is already tracked
    #[error("Entity {entity:?} is already tracked by the sync loop")]
    AlreadyTracked { entity: EntityId },

    /// Entity is owned locally but there is no tracking input to publish
    #[error("Entity {entity:?} is owned locally but no tracking source is attached")]
    MissingTracking { entity: EntityId },
}

/// Errors that can occur while reading or writing an anchor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnchorError {
    /// Anchor lock is poisoned (internal consistency error)
    #[error("{anchor:?} anchor lock is poisoned - this indicates a panic occurred while holding the lock")]
    LockPoisoned { anchor: AnchorKind },
}

/// Errors that can occur while bootstrapping an IK rig
///
/// Any of these ends the bootstrap for that entity for good; it is reported
/// once and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RigError {
    /// Anchor pose is unusable for a rig
    #[error("Invalid {anchor:?} anchor: {reason}")]
    InvalidAnchor {
        anchor: AnchorKind,
        reason: &'static str,
    },

    /// Anchor could not be read
    #[error("Anchor error: {0}")]
    Anchor(#[from] AnchorError),

    /// Rig builder refused to build
    #[error("Rig builder rejected the anchors: {reason}")]
    Rejected { reason: String },
}
