/// Nothing received, nothing decodable, nobody owning the entity: the
/// observer keeps waiting and never fabricates a pose

use std::time::Duration;

use posesync_client::{DecodeFailedEvent, RigBootstrappedEvent, SyncConfig, SyncLoop};
use posesync_shared::{
    encode, DecodeError, EntityId, OwnerId, PollTransport, Pose, PushTransport, RecordStore,
    TransportError, POSE_BUNDLE_WIRE_SIZE,
};
use posesync_test::{bundle_at, LocalNetwork, LocalRecordStore, RecordingRigBuilder, TestRegistry};

const FRAME: Duration = Duration::from_millis(100);

fn poll_observer(store: &LocalRecordStore) -> SyncLoop<PollTransport<LocalRecordStore>, RecordingRigBuilder> {
    SyncLoop::new(
        SyncConfig::default(),
        OwnerId::from_u64(2),
        PollTransport::new(store.clone()),
        RecordingRigBuilder::new(),
    )
}

#[test]
fn nothing_published_means_nothing_happens() {
    let store = LocalRecordStore::new();
    let mut registry = TestRegistry::new();
    let entity = EntityId::from_u64(3);
    registry.spawn(entity, Some(OwnerId::from_u64(1)));

    let mut observer = poll_observer(&store);
    observer.track(&registry, entity).unwrap();

    for _ in 0..30 {
        assert!(observer.tick(&registry, FRAME).is_empty());
    }

    assert!(!observer.is_bootstrapped(&entity));
    for accessor in observer.anchors(&entity).unwrap().iter() {
        assert_eq!(accessor.pose(), Pose::IDENTITY);
    }
    assert!(observer.builder().attempts().is_empty());
}

#[test]
fn unowned_entity_is_left_alone() {
    let mut store = LocalRecordStore::new();
    let mut registry = TestRegistry::new();
    let entity = EntityId::from_u64(3);
    registry.spawn(entity, None);
    // someone else's record exists, but nobody owns this entity
    store.write_record(OwnerId::from_u64(1), encode(&bundle_at(0.0)));

    let mut observer = poll_observer(&store);
    observer.track(&registry, entity).unwrap();

    for _ in 0..5 {
        assert!(observer.tick(&registry, FRAME).is_empty());
    }
    assert!(!observer.is_bootstrapped(&entity));
}

#[test]
fn corrupt_record_is_reported_and_never_bootstraps() {
    let store = LocalRecordStore::new();
    let owner = OwnerId::from_u64(1);
    let mut registry = TestRegistry::new();
    let entity = EntityId::from_u64(3);
    registry.spawn(entity, Some(owner));

    let mut observer = poll_observer(&store);
    observer.track(&registry, entity).unwrap();

    store.corrupt(owner, vec![0u8; 10]);
    let expected = TransportError::Decode(DecodeError::Truncated {
        expected: POSE_BUNDLE_WIRE_SIZE,
        actual: 10,
    });

    for _ in 0..3 {
        let mut events = observer.tick(&registry, FRAME);
        let failures: Vec<_> = events.read::<DecodeFailedEvent>().collect();
        assert_eq!(failures, vec![(entity, expected.clone())]);
        assert!(!events.has::<RigBootstrappedEvent>());
    }
    assert!(!observer.is_bootstrapped(&entity));
    assert!(!observer.bootstrap_failed(&entity));

    // the owner writes a good record again
    store.corrupt(owner, encode(&bundle_at(4.0)));
    let mut events = observer.tick(&registry, FRAME);
    assert_eq!(events.read::<RigBootstrappedEvent>().count(), 1);
}

#[test]
fn malformed_broadcast_is_dropped_on_arrival() {
    let network = LocalNetwork::new();
    let owner = OwnerId::from_u64(1);
    let local = OwnerId::from_u64(2);
    let mut registry = TestRegistry::new();
    let entity = EntityId::from_u64(3);
    registry.spawn(entity, Some(owner));

    let transport = PushTransport::new(local, network.broadcaster());
    network.join(local, transport.receiver());
    let mut observer = SyncLoop::new(SyncConfig::default(), local, transport, RecordingRigBuilder::new());
    observer.track(&registry, entity).unwrap();

    network.inject(owner, vec![0xAB; POSE_BUNDLE_WIRE_SIZE + 1]);
    network.inject(owner, Vec::new());
    assert_eq!(network.deliver_all(), 2);
    assert!(network.delivered().is_empty());

    assert!(observer.tick(&registry, FRAME).is_empty());
    assert!(!observer.is_bootstrapped(&entity));
}
