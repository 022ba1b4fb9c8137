use std::vec::IntoIter;

use posesync_shared::{EntityId, TransportError};

use crate::error::RigError;

/// Everything one `SyncLoop::tick` did, grouped by event type.
pub struct SyncEvents {
    sent: Vec<EntityId>,
    anchors_updated: Vec<EntityId>,
    bootstrapped: Vec<EntityId>,
    bootstrap_failed: Vec<(EntityId, RigError)>,
    decode_failed: Vec<(EntityId, TransportError)>,
    empty: bool,
}

impl Default for SyncEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncEvents {
    pub(crate) fn new() -> Self {
        Self {
            sent: Vec::new(),
            anchors_updated: Vec::new(),
            bootstrapped: Vec::new(),
            bootstrap_failed: Vec::new(),
            decode_failed: Vec::new(),
            empty: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn read<V: SyncEvent>(&mut self) -> V::Iter {
        V::iter(self)
    }

    pub fn has<V: SyncEvent>(&self) -> bool {
        V::has(self)
    }

    pub(crate) fn push_sent(&mut self, entity: EntityId) {
        self.sent.push(entity);
        self.empty = false;
    }

    pub(crate) fn push_anchors_updated(&mut self, entity: EntityId) {
        self.anchors_updated.push(entity);
        self.empty = false;
    }

    pub(crate) fn push_bootstrapped(&mut self, entity: EntityId) {
        self.bootstrapped.push(entity);
        self.empty = false;
    }

    pub(crate) fn push_bootstrap_failed(&mut self, entity: EntityId, error: RigError) {
        self.bootstrap_failed.push((entity, error));
        self.empty = false;
    }

    pub(crate) fn push_decode_failed(&mut self, entity: EntityId, error: TransportError) {
        self.decode_failed.push((entity, error));
        self.empty = false;
    }
}

// Event Trait
pub trait SyncEvent {
    type Iter;

    fn iter(events: &mut SyncEvents) -> Self::Iter;

    fn has(events: &SyncEvents) -> bool;
}

// Pose Sent Event
pub struct PoseSentEvent;
impl SyncEvent for PoseSentEvent {
    type Iter = IntoIter<EntityId>;

    fn iter(events: &mut SyncEvents) -> Self::Iter {
        let list = std::mem::take(&mut events.sent);
        IntoIterator::into_iter(list)
    }

    fn has(events: &SyncEvents) -> bool {
        !events.sent.is_empty()
    }
}

// Anchors Updated Event
pub struct AnchorsUpdatedEvent;
impl SyncEvent for AnchorsUpdatedEvent {
    type Iter = IntoIter<EntityId>;

    fn iter(events: &mut SyncEvents) -> Self::Iter {
        let list = std::mem::take(&mut events.anchors_updated);
        IntoIterator::into_iter(list)
    }

    fn has(events: &SyncEvents) -> bool {
        !events.anchors_updated.is_empty()
    }
}

// Rig Bootstrapped Event
pub struct RigBootstrappedEvent;
impl SyncEvent for RigBootstrappedEvent {
    type Iter = IntoIter<EntityId>;

    fn iter(events: &mut SyncEvents) -> Self::Iter {
        let list = std::mem::take(&mut events.bootstrapped);
        IntoIterator::into_iter(list)
    }

    fn has(events: &SyncEvents) -> bool {
        !events.bootstrapped.is_empty()
    }
}

// Bootstrap Failed Event
pub struct BootstrapFailedEvent;
impl SyncEvent for BootstrapFailedEvent {
    type Iter = IntoIter<(EntityId, RigError)>;

    fn iter(events: &mut SyncEvents) -> Self::Iter {
        let list = std::mem::take(&mut events.bootstrap_failed);
        IntoIterator::into_iter(list)
    }

    fn has(events: &SyncEvents) -> bool {
        !events.bootstrap_failed.is_empty()
    }
}

// Decode Failed Event
pub struct DecodeFailedEvent;
impl SyncEvent for DecodeFailedEvent {
    type Iter = IntoIter<(EntityId, TransportError)>;

    fn iter(events: &mut SyncEvents) -> Self::Iter {
        let list = std::mem::take(&mut events.decode_failed);
        IntoIterator::into_iter(list)
    }

    fn has(events: &SyncEvents) -> bool {
        !events.decode_failed.is_empty()
    }
}
