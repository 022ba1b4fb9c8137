use std::sync::{Arc, RwLock};

use posesync_shared::{Pose, PoseBundle};

use crate::error::AnchorError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnchorKind {
    Head,
    LeftHand,
    RightHand,
}

// AnchorChannel
#[derive(Clone)]
struct AnchorChannel {
    kind: AnchorKind,
    pose: Arc<RwLock<Pose>>,
}

impl AnchorChannel {
    fn new_channel(kind: AnchorKind) -> (AnchorMutator, AnchorAccessor) {
        let channel = Self {
            kind,
            pose: Arc::new(RwLock::new(Pose::IDENTITY)),
        };

        let mutator = AnchorMutator {
            channel: channel.clone(),
        };
        let accessor = AnchorAccessor { channel };

        (mutator, accessor)
    }

    fn try_pose(&self) -> Result<Pose, AnchorError> {
        let pose = self
            .pose
            .as_ref()
            .read()
            .map_err(|_| AnchorError::LockPoisoned { anchor: self.kind })?;
        Ok(*pose)
    }

    fn try_set_pose(&self, value: Pose) -> Result<(), AnchorError> {
        let mut pose = self
            .pose
            .as_ref()
            .write()
            .map_err(|_| AnchorError::LockPoisoned { anchor: self.kind })?;
        *pose = value;
        Ok(())
    }
}

// AnchorAccessor
/// Read half of an anchor. The rig keeps one per tracked point and reads it
/// whenever it solves; the sync loop keeps the pose current.
#[derive(Clone)]
pub struct AnchorAccessor {
    channel: AnchorChannel,
}

impl AnchorAccessor {
    pub fn kind(&self) -> AnchorKind {
        self.channel.kind
    }

    /// Get the anchor pose (panicking version)
    ///
    /// # Panics
    ///
    /// Panics if the lock is poisoned.
    /// Consider using `try_pose` for non-panicking error handling.
    pub fn pose(&self) -> Pose {
        self.try_pose()
            .expect("Lock on anchor pose is held by current thread.")
    }

    /// Get the anchor pose (non-panicking version)
    ///
    /// Returns an error if the lock is poisoned.
    pub fn try_pose(&self) -> Result<Pose, AnchorError> {
        self.channel.try_pose()
    }
}

// AnchorMutator
// no Clone necessary
pub(crate) struct AnchorMutator {
    channel: AnchorChannel,
}

impl AnchorMutator {
    pub(crate) fn try_set_pose(&self, pose: Pose) -> Result<(), AnchorError> {
        self.channel.try_set_pose(pose)
    }
}

/// The three anchors a full-body rig is bound to.
#[derive(Clone)]
pub struct RigAnchors {
    pub head: AnchorAccessor,
    pub left_hand: AnchorAccessor,
    pub right_hand: AnchorAccessor,
}

impl RigAnchors {
    pub fn iter(&self) -> impl Iterator<Item = &AnchorAccessor> {
        [&self.head, &self.left_hand, &self.right_hand].into_iter()
    }
}

// AnchorSet
/// Write side of an entity's anchors, owned by the sync loop.
pub(crate) struct AnchorSet {
    head: AnchorMutator,
    left_hand: AnchorMutator,
    right_hand: AnchorMutator,
    accessors: RigAnchors,
}

impl AnchorSet {
    pub(crate) fn new() -> Self {
        let (head, head_accessor) = AnchorChannel::new_channel(AnchorKind::Head);
        let (left_hand, left_hand_accessor) = AnchorChannel::new_channel(AnchorKind::LeftHand);
        let (right_hand, right_hand_accessor) = AnchorChannel::new_channel(AnchorKind::RightHand);

        Self {
            head,
            left_hand,
            right_hand,
            accessors: RigAnchors {
                head: head_accessor,
                left_hand: left_hand_accessor,
                right_hand: right_hand_accessor,
            },
        }
    }

    /// Writes all three poses of `bundle` into the anchors.
    pub(crate) fn apply(&self, bundle: &PoseBundle) -> Result<(), AnchorError> {
        self.head.try_set_pose(*bundle.head())?;
        self.left_hand.try_set_pose(*bundle.left_hand())?;
        self.right_hand.try_set_pose(*bundle.right_hand())?;
        Ok(())
    }

    pub(crate) fn accessors(&self) -> RigAnchors {
        self.accessors.clone()
    }
}
