/// In-memory host networking for integration tests
/// Routes broadcasts and replicated records between peers without any I/O,
/// and lets a test decide when (and in what order) in-flight broadcasts land

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use posesync_shared::{Broadcast, Delivery, OwnerId, PushReceiver, RecordStore};

/// Shared broadcast bus for a session of push-transport peers
#[derive(Clone, Default)]
pub struct LocalNetwork {
    state: Arc<Mutex<NetworkState>>,
}

#[derive(Default)]
struct NetworkState {
    peers: Vec<(OwnerId, PushReceiver)>,
    in_flight: VecDeque<(OwnerId, Vec<u8>)>,
    delivered: Vec<(OwnerId, OwnerId, Delivery)>,
}

impl LocalNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a peer's inbound handler; it receives every broadcast
    /// delivered from now on, its own included
    pub fn join(&self, owner: OwnerId, receiver: PushReceiver) {
        self.state.lock().unwrap().peers.push((owner, receiver));
    }

    /// Removes `owner` from the session and tells every remaining peer it
    /// has gone
    pub fn leave(&self, owner: OwnerId) {
        let mut state = self.state.lock().unwrap();
        state.peers.retain(|(peer, _)| *peer != owner);
        for (_, receiver) in state.peers.iter() {
            receiver.release(owner).unwrap();
        }
    }

    /// A `Broadcast` that queues onto this bus
    pub fn broadcaster(&self) -> LocalBroadcast {
        LocalBroadcast {
            network: self.clone(),
        }
    }

    /// Queues a raw payload as if `sender` had broadcast it
    pub fn inject(&self, sender: OwnerId, payload: Vec<u8>) {
        self.state
            .lock()
            .unwrap()
            .in_flight
            .push_back((sender, payload));
    }

    pub fn in_flight(&self) -> usize {
        self.state.lock().unwrap().in_flight.len()
    }

    /// Delivers everything in flight, oldest first. Returns the number of
    /// broadcasts delivered
    pub fn deliver_all(&self) -> usize {
        let messages: Vec<_> = self.state.lock().unwrap().in_flight.drain(..).collect();
        self.deliver(messages)
    }

    /// Delivers everything in flight, newest first
    pub fn deliver_reversed(&self) -> usize {
        let mut messages: Vec<_> = self.state.lock().unwrap().in_flight.drain(..).collect();
        messages.reverse();
        self.deliver(messages)
    }

    /// Loses everything in flight. Returns the number of broadcasts dropped
    pub fn drop_all(&self) -> usize {
        let mut state = self.state.lock().unwrap();
        let count = state.in_flight.len();
        state.in_flight.clear();
        count
    }

    /// Every `(sender, recipient, outcome)` delivered so far
    pub fn delivered(&self) -> Vec<(OwnerId, OwnerId, Delivery)> {
        self.state.lock().unwrap().delivered.clone()
    }

    fn deliver(&self, messages: Vec<(OwnerId, Vec<u8>)>) -> usize {
        let peers = self.state.lock().unwrap().peers.clone();
        let mut outcomes = Vec::new();

        for (sender, payload) in messages.iter() {
            for (recipient, receiver) in peers.iter() {
                // malformed payloads are dropped by the receiver itself
                if let Ok(delivery) = receiver.receive(*sender, payload) {
                    outcomes.push((*sender, *recipient, delivery));
                }
            }
        }

        self.state.lock().unwrap().delivered.extend(outcomes);
        messages.len()
    }
}

/// One peer's handle on the bus
pub struct LocalBroadcast {
    network: LocalNetwork,
}

impl Broadcast for LocalBroadcast {
    fn broadcast(&mut self, sender: OwnerId, payload: Vec<u8>) {
        self.network.inject(sender, payload);
    }
}

/// Replicated record store shared by every peer that holds a clone
#[derive(Clone, Default)]
pub struct LocalRecordStore {
    records: Arc<Mutex<HashMap<OwnerId, Vec<u8>>>>,
    writes: Arc<Mutex<usize>>,
}

impl LocalRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> usize {
        *self.writes.lock().unwrap()
    }

    /// Overwrites a record with arbitrary bytes, bypassing the codec
    pub fn corrupt(&self, owner: OwnerId, payload: Vec<u8>) {
        self.records.lock().unwrap().insert(owner, payload);
    }
}

impl RecordStore for LocalRecordStore {
    fn write_record(&mut self, owner: OwnerId, payload: Vec<u8>) {
        self.records.lock().unwrap().insert(owner, payload);
        *self.writes.lock().unwrap() += 1;
    }

    fn read_record(&self, owner: OwnerId) -> Option<Vec<u8>> {
        self.records.lock().unwrap().get(&owner).cloned()
    }
}
