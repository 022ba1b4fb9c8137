use log::{error, info};

use posesync_shared::{EntityId, Pose};

use crate::{
    anchor::{AnchorAccessor, AnchorSet},
    error::RigError,
    rig::rig_builder::RigBuilder,
};

/// Result of driving an entity's bootstrap with freshly applied anchors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The rig was built by this call.
    Bootstrapped,
    /// A rig already exists; the anchors were simply updated.
    AlreadyInitialized,
    /// An earlier attempt failed; nothing was tried.
    Abandoned,
    /// This call tried and failed. The entity will not be tried again.
    Failed(RigError),
}

/// One-way bootstrap state of a remote entity's IK rig.
///
/// `Uninitialized` moves to `Initialized` exactly once. A failed attempt
/// leaves the entity `Uninitialized` for the rest of its life, marked so the
/// builder is never called for it again.
pub enum RigBootstrap<R> {
    Uninitialized { failed: bool },
    Initialized(R),
}

impl<R> Default for RigBootstrap<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> RigBootstrap<R> {
    pub fn new() -> Self {
        Self::Uninitialized { failed: false }
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self, Self::Initialized(_))
    }

    pub fn has_failed(&self) -> bool {
        matches!(self, Self::Uninitialized { failed: true })
    }

    pub fn rig(&self) -> Option<&R> {
        match self {
            Self::Initialized(rig) => Some(rig),
            Self::Uninitialized { .. } => None,
        }
    }

    /// Builds the rig if this entity has none yet and has never failed.
    ///
    /// Safe to call on every observed bundle: only the first call against an
    /// uninitialized entity reaches the builder.
    pub(crate) fn observe<B: RigBuilder<Rig = R>>(
        &mut self,
        entity: EntityId,
        anchors: &AnchorSet,
        builder: &mut B,
        orientation_tolerance: f32,
    ) -> BootstrapOutcome {
        match self {
            Self::Initialized(_) => return BootstrapOutcome::AlreadyInitialized,
            Self::Uninitialized { failed: true } => return BootstrapOutcome::Abandoned,
            Self::Uninitialized { failed: false } => {}
        }

        let rig_anchors = anchors.accessors();
        let result = match validate_anchors(rig_anchors.iter(), orientation_tolerance) {
            Ok(()) => builder.bootstrap_rig(entity, rig_anchors),
            Err(rig_error) => Err(rig_error),
        };

        match result {
            Ok(rig) => {
                info!("Bootstrapped IK rig for entity {:?}", entity);
                *self = Self::Initialized(rig);
                BootstrapOutcome::Bootstrapped
            }
            Err(rig_error) => {
                error!(
                    "IK rig bootstrap failed for entity {:?}, giving up: {}",
                    entity, rig_error
                );
                *self = Self::Uninitialized { failed: true };
                BootstrapOutcome::Failed(rig_error)
            }
        }
    }
}

fn validate_anchors<'a>(
    anchors: impl Iterator<Item = &'a AnchorAccessor>,
    orientation_tolerance: f32,
) -> Result<(), RigError> {
    for accessor in anchors {
        let pose: Pose = accessor.try_pose()?;
        if !pose.position.is_finite() {
            return Err(RigError::InvalidAnchor {
                anchor: accessor.kind(),
                reason: "position is not finite",
            });
        }
        if !pose.orientation.is_normalized(orientation_tolerance) {
            return Err(RigError::InvalidAnchor {
                anchor: accessor.kind(),
                reason: "orientation is not a unit quaternion",
            });
        }
    }
    Ok(())
}
