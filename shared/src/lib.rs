//! # Posesync Shared
//! Pose value types, the bundle wire codec, ownership resolution and the
//! transport strategies used by every posesync peer.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod ownership;
mod pose;
mod transport;
mod types;
mod wire;

pub use ownership::{EntityRegistry, OwnershipResolver, ReplicationRole};
pub use pose::{Pose, PoseBundle, Quat, Vec3};
pub use transport::{
    error::TransportError,
    inbound::{Delivery, PushReceiver},
    poll::PollTransport,
    push::PushTransport,
    Broadcast, PoseTransport, RecordStore,
};
pub use types::{EntityId, OwnerId};
pub use wire::{
    error::DecodeError,
    pose_codec::{decode, encode, POSE_BUNDLE_TOLERANCE, POSE_BUNDLE_WIRE_SIZE},
};

pub use naia_serde::{BitReader, BitWrite, BitWriter, ConstBitLength, Serde, SerdeErr};
