use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, RwLock},
};

use log::{debug, warn};

use crate::{
    pose::PoseBundle,
    transport::error::TransportError,
    types::OwnerId,
    wire::pose_codec::decode,
};

/// What happened to an inbound payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    /// Replaced the sender's slot.
    Stored,
    /// Came from the local peer itself and was dropped.
    Echo,
    /// Sender's entity was removed locally; dropped.
    Forgotten,
}

// InboundChannel
#[derive(Clone)]
pub(crate) struct InboundChannel {
    data: Arc<RwLock<InboundData>>,
}

impl InboundChannel {
    pub(crate) fn new(local: OwnerId) -> Self {
        Self {
            data: Arc::new(RwLock::new(InboundData::new(local))),
        }
    }

    fn try_store(&self, sender: OwnerId, bundle: PoseBundle) -> Result<Delivery, TransportError> {
        let mut data = self
            .data
            .as_ref()
            .write()
            .map_err(|_| TransportError::InboundLockPoisoned)?;
        Ok(data.store(sender, bundle))
    }

    pub(crate) fn try_latest(&self, owner: OwnerId) -> Result<Option<PoseBundle>, TransportError> {
        let data = self
            .data
            .as_ref()
            .read()
            .map_err(|_| TransportError::InboundLockPoisoned)?;
        Ok(data.slots.get(&owner).copied())
    }

    pub(crate) fn try_watch(&self, owner: OwnerId) -> Result<(), TransportError> {
        let mut data = self
            .data
            .as_ref()
            .write()
            .map_err(|_| TransportError::InboundLockPoisoned)?;
        data.forgotten.remove(&owner);
        Ok(())
    }

    pub(crate) fn try_forget(&self, owner: OwnerId) -> Result<(), TransportError> {
        let mut data = self
            .data
            .as_ref()
            .write()
            .map_err(|_| TransportError::InboundLockPoisoned)?;
        data.slots.remove(&owner);
        data.forgotten.insert(owner);
        Ok(())
    }

    fn try_release(&self, owner: OwnerId) -> Result<(), TransportError> {
        let mut data = self
            .data
            .as_ref()
            .write()
            .map_err(|_| TransportError::InboundLockPoisoned)?;
        data.slots.remove(&owner);
        data.forgotten.remove(&owner);
        Ok(())
    }
}

// InboundData
struct InboundData {
    local: OwnerId,
    slots: HashMap<OwnerId, PoseBundle>,
    forgotten: HashSet<OwnerId>,
}

impl InboundData {
    fn new(local: OwnerId) -> Self {
        Self {
            local,
            slots: HashMap::new(),
            forgotten: HashSet::new(),
        }
    }

    fn store(&mut self, sender: OwnerId, bundle: PoseBundle) -> Delivery {
        if sender == self.local {
            return Delivery::Echo;
        }
        if self.forgotten.contains(&sender) {
            debug!("Dropping pose bundle from forgotten owner {:?}", sender);
            return Delivery::Forgotten;
        }

        // no sequence numbers: whichever delivery lands last wins
        self.slots.insert(sender, bundle);
        Delivery::Stored
    }
}

// PushReceiver
/// Inbound half of the push strategy, handed to the host network layer.
///
/// `receive` may be called from any thread at any time relative to the sync
/// loop's tick. It only decodes and replaces the sender's slot; every state
/// transition that follows happens on the next tick.
#[derive(Clone)]
pub struct PushReceiver {
    channel: InboundChannel,
}

impl PushReceiver {
    pub(crate) fn new(channel: &InboundChannel) -> Self {
        Self {
            channel: channel.clone(),
        }
    }

    /// Decodes `payload` and stores it as `sender`'s latest bundle.
    ///
    /// A payload that fails to decode leaves the previous bundle in place.
    pub fn receive(&self, sender: OwnerId, payload: &[u8]) -> Result<Delivery, TransportError> {
        let bundle = decode(payload).map_err(|error| {
            warn!(
                "Discarding malformed pose bundle from owner {:?}: {}",
                sender, error
            );
            TransportError::from(error)
        })?;

        self.channel.try_store(sender, bundle)
    }

    /// Called by the host when `owner` has left the session. Drops the
    /// owner's slot along with any record that it was forgotten.
    pub fn release(&self, owner: OwnerId) -> Result<(), TransportError> {
        debug!("Releasing inbound state for departed owner {:?}", owner);
        self.channel.try_release(owner)
    }
}
