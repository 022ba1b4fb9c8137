use posesync_shared::EntityId;

use crate::{anchor::RigAnchors, error::RigError};

/// Host animation subsystem: builds a full-body IK rig bound to the three
/// tracked anchors of a remote player.
///
/// Called at most once per entity. The rig keeps the `RigAnchors` it was
/// given and follows them as later bundles move the anchors.
pub trait RigBuilder {
    type Rig;

    fn bootstrap_rig(&mut self, entity: EntityId, anchors: RigAnchors) -> Result<Self::Rig, RigError>;
}
