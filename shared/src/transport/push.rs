use crate::{
    pose::PoseBundle,
    transport::{
        error::TransportError,
        inbound::{InboundChannel, PushReceiver},
        Broadcast, PoseTransport,
    },
    types::OwnerId,
    wire::pose_codec::encode,
};

/// Push strategy: every send is broadcast to all peers; inbound broadcasts
/// arrive through a `PushReceiver` and are held until the next tick reads
/// them with `latest`.
///
/// Lowest latency, but a peer only ever sees bundles sent after it started
/// listening.
pub struct PushTransport<B: Broadcast> {
    broadcast: B,
    inbound: InboundChannel,
}

impl<B: Broadcast> PushTransport<B> {
    pub fn new(local: OwnerId, broadcast: B) -> Self {
        Self {
            broadcast,
            inbound: InboundChannel::new(local),
        }
    }

    /// Handle for the host network layer to feed inbound broadcasts into.
    pub fn receiver(&self) -> PushReceiver {
        PushReceiver::new(&self.inbound)
    }

    pub fn broadcast(&self) -> &B {
        &self.broadcast
    }

    pub fn broadcast_mut(&mut self) -> &mut B {
        &mut self.broadcast
    }
}

impl<B: Broadcast> PoseTransport for PushTransport<B> {
    fn send(&mut self, owner: OwnerId, bundle: &PoseBundle) {
        self.broadcast.broadcast(owner, encode(bundle));
    }

    fn latest(&self, owner: OwnerId) -> Result<Option<PoseBundle>, TransportError> {
        self.inbound.try_latest(owner)
    }

    fn watch(&mut self, owner: OwnerId) -> Result<(), TransportError> {
        self.inbound.try_watch(owner)
    }

    fn forget(&mut self, owner: OwnerId) -> Result<(), TransportError> {
        self.inbound.try_forget(owner)
    }
}
