//! # Posesync Client
//! Runs on every session participant: publishes the local player's head and
//! hand tracking, and turns other players' published poses into anchors for
//! a full-body IK rig that is built exactly once per player.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use posesync_shared::{
    Broadcast, Delivery, EntityId, EntityRegistry, OwnerId, PollTransport, Pose, PoseBundle,
    PoseTransport, PushReceiver, PushTransport, Quat, RecordStore, ReplicationRole, Vec3,
};

mod anchor;
mod error;
mod rig;
mod sync_config;
mod sync_events;
mod sync_loop;
mod tracking;

pub use anchor::{AnchorAccessor, AnchorKind, RigAnchors};
pub use error::{AnchorError, RigError, SyncError};
pub use rig::{
    rig_bootstrap::{BootstrapOutcome, RigBootstrap},
    rig_builder::RigBuilder,
};
pub use sync_config::SyncConfig;
pub use sync_events::{
    AnchorsUpdatedEvent, BootstrapFailedEvent, DecodeFailedEvent, PoseSentEvent,
    RigBootstrappedEvent, SyncEvent, SyncEvents,
};
pub use sync_loop::SyncLoop;
pub use tracking::TrackingSource;
