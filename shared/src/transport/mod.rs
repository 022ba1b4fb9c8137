pub mod error;
pub mod inbound;
pub mod poll;
pub mod push;

use crate::{pose::PoseBundle, transport::error::TransportError, types::OwnerId};

/// Moves pose bundles from an entity's authority to its observers.
///
/// The sync loop only ever talks to this trait, so push and poll
/// deployments are interchangeable.
pub trait PoseTransport {
    /// Publishes `bundle` on behalf of `owner`. Fire-and-forget: nothing is
    /// acknowledged and a dropped send is not reported.
    fn send(&mut self, owner: OwnerId, bundle: &PoseBundle);

    /// The most recent bundle seen for `owner`, or `None` if it has never
    /// published one.
    fn latest(&self, owner: OwnerId) -> Result<Option<PoseBundle>, TransportError>;

    /// Starts accepting bundles for `owner`.
    fn watch(&mut self, _owner: OwnerId) -> Result<(), TransportError> {
        Ok(())
    }

    /// Drops whatever is held for `owner` and ignores its future deliveries.
    fn forget(&mut self, _owner: OwnerId) -> Result<(), TransportError> {
        Ok(())
    }
}

/// Host messaging: a best-effort broadcast to every peer in the session.
pub trait Broadcast {
    fn broadcast(&mut self, sender: OwnerId, payload: Vec<u8>);
}

/// Host replicated state: one byte record per owner, visible to every peer,
/// last write wins.
pub trait RecordStore {
    fn write_record(&mut self, owner: OwnerId, payload: Vec<u8>);

    fn read_record(&self, owner: OwnerId) -> Option<Vec<u8>>;
}
