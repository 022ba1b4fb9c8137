use crate::{
    pose::PoseBundle,
    transport::{error::TransportError, PoseTransport, RecordStore},
    types::OwnerId,
    wire::pose_codec::{decode, encode},
};

/// Poll strategy: the authority overwrites its replicated record, observers
/// read whatever is there when they tick.
///
/// A peer that joins late or misses an update still finds the current
/// value, at the cost of the host keeping one durable record per owner.
pub struct PollTransport<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> PollTransport<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

impl<S: RecordStore> PoseTransport for PollTransport<S> {
    fn send(&mut self, owner: OwnerId, bundle: &PoseBundle) {
        self.store.write_record(owner, encode(bundle));
    }

    fn latest(&self, owner: OwnerId) -> Result<Option<PoseBundle>, TransportError> {
        let Some(payload) = self.store.read_record(owner) else {
            return Ok(None);
        };
        let bundle = decode(&payload)?;
        Ok(Some(bundle))
    }
}
