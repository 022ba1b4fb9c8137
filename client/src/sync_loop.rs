use std::{collections::HashMap, time::Duration};

use log::{debug, warn};

use posesync_shared::{
    EntityId, EntityRegistry, OwnerId, OwnershipResolver, PoseBundle, PoseTransport,
    ReplicationRole,
};

use crate::{
    anchor::{AnchorSet, RigAnchors},
    error::SyncError,
    rig::{
        rig_bootstrap::{BootstrapOutcome, RigBootstrap},
        rig_builder::RigBuilder,
    },
    sync_config::SyncConfig,
    sync_events::SyncEvents,
    tracking::TrackingSource,
};

// TrackedEntity
struct TrackedEntity<R> {
    anchors: AnchorSet,
    bootstrap: RigBootstrap<R>,
    since_last_send: Duration,
    watched_owner: Option<OwnerId>,
    last_applied: Option<PoseBundle>,
}

impl<R> TrackedEntity<R> {
    fn new(send_interval: Duration, watched_owner: Option<OwnerId>) -> Self {
        Self {
            anchors: AnchorSet::new(),
            bootstrap: RigBootstrap::new(),
            // starts full so a fresh authority publishes on its first tick
            since_last_send: send_interval,
            watched_owner,
            last_applied: None,
        }
    }
}

/// Fixed-interval driver for every tracked player entity on this peer.
///
/// Each `tick` resolves every entity's role from the host registry and then
/// either publishes local tracking (authority) or pulls the owner's latest
/// bundle into the entity's anchors and drives its rig bootstrap
/// (observer). All entity state changes happen inside `tick`, on the
/// caller's thread; the only thing that may run concurrently is a push
/// transport's `PushReceiver` filling its inbound slots.
pub struct SyncLoop<T: PoseTransport, B: RigBuilder> {
    config: SyncConfig,
    resolver: OwnershipResolver,
    transport: T,
    builder: B,
    tracking: Option<Box<dyn TrackingSource>>,
    entities: HashMap<EntityId, TrackedEntity<B::Rig>>,
}

impl<T: PoseTransport, B: RigBuilder> SyncLoop<T, B> {
    pub fn new(config: SyncConfig, local: OwnerId, transport: T, builder: B) -> Self {
        Self {
            config,
            resolver: OwnershipResolver::new(local),
            transport,
            builder,
            tracking: None,
            entities: HashMap::new(),
        }
    }

    /// Attaches the local tracking input. Required before any locally owned
    /// entity can be tracked.
    pub fn attach_tracking<S: TrackingSource + 'static>(&mut self, source: S) {
        self.tracking = Some(Box::new(source));
    }

    pub fn has_tracking(&self) -> bool {
        self.tracking.is_some()
    }

    /// Starts syncing `entity`.
    ///
    /// Fails if the entity is already tracked, or if it is owned locally and
    /// there is no tracking input to publish from.
    pub fn track<R: EntityRegistry + ?Sized>(
        &mut self,
        registry: &R,
        entity: EntityId,
    ) -> Result<(), SyncError> {
        if self.entities.contains_key(&entity) {
            return Err(SyncError::AlreadyTracked { entity });
        }

        let owner = registry.owner_of(entity);
        let mut watched_owner = None;
        match self.resolver.role_of(owner) {
            ReplicationRole::Authority => {
                if self.tracking.is_none() {
                    return Err(SyncError::MissingTracking { entity });
                }
            }
            ReplicationRole::Observer => {
                if let Some(owner) = owner {
                    watched_owner = watch_owner(&mut self.transport, entity, owner);
                }
            }
        }

        debug!("Tracking entity {:?} (owner {:?})", entity, owner);
        self.entities.insert(
            entity,
            TrackedEntity::new(self.config.send_interval, watched_owner),
        );
        Ok(())
    }

    /// Stops syncing `entity` and drops its anchors, bootstrap state and rig.
    /// Later deliveries for its owner are ignored once no other tracked
    /// entity watches that owner.
    ///
    /// Returns `false` if the entity was not tracked.
    pub fn untrack(&mut self, entity: EntityId) -> bool {
        let Some(tracked) = self.entities.remove(&entity) else {
            return false;
        };

        if let Some(owner) = tracked.watched_owner {
            let still_watched = self
                .entities
                .values()
                .any(|other| other.watched_owner == Some(owner));
            if still_watched {
                debug!(
                    "Owner {:?} of removed entity {:?} is still watched by another entity",
                    owner, entity
                );
            } else if let Err(error) = self.transport.forget(owner) {
                warn!(
                    "Could not stop deliveries for owner {:?} of removed entity {:?}: {}",
                    owner, entity, error
                );
            }
        }

        debug!("Stopped tracking entity {:?}", entity);
        true
    }

    /// Advances simulated time by `delta` and runs one pass over every
    /// tracked entity.
    pub fn tick<R: EntityRegistry + ?Sized>(&mut self, registry: &R, delta: Duration) -> SyncEvents {
        let mut events = SyncEvents::new();
        let local = self.resolver.local();

        for (entity, tracked) in self.entities.iter_mut() {
            let entity = *entity;
            let owner = registry.owner_of(entity);

            match self.resolver.role_of(owner) {
                ReplicationRole::Authority => {
                    tracked.since_last_send = tracked.since_last_send.saturating_add(delta);
                    if tracked.since_last_send < self.config.send_interval {
                        continue;
                    }

                    let Some(tracking) = self.tracking.as_mut() else {
                        debug!(
                            "Entity {:?} is owned locally but no tracking source is attached",
                            entity
                        );
                        continue;
                    };

                    let bundle = tracking.capture();
                    self.transport.send(local, &bundle);
                    tracked.since_last_send = Duration::ZERO;
                    events.push_sent(entity);
                }
                ReplicationRole::Observer => {
                    // a handoff to this peer publishes straight away
                    tracked.since_last_send = self.config.send_interval;

                    let Some(owner) = owner else {
                        continue;
                    };

                    if tracked.watched_owner != Some(owner) {
                        tracked.watched_owner = watch_owner(&mut self.transport, entity, owner);
                    }

                    let bundle = match self.transport.latest(owner) {
                        Ok(Some(bundle)) => bundle,
                        Ok(None) => continue,
                        Err(error) => {
                            warn!(
                                "Ignoring pose bundle for entity {:?} from owner {:?}: {}",
                                entity, owner, error
                            );
                            events.push_decode_failed(entity, error);
                            continue;
                        }
                    };

                    if tracked.last_applied == Some(bundle) {
                        continue;
                    }

                    if let Err(error) = tracked.anchors.apply(&bundle) {
                        warn!("Could not update anchors of entity {:?}: {}", entity, error);
                        continue;
                    }
                    tracked.last_applied = Some(bundle);
                    events.push_anchors_updated(entity);

                    match tracked.bootstrap.observe(
                        entity,
                        &tracked.anchors,
                        &mut self.builder,
                        self.config.orientation_tolerance,
                    ) {
                        BootstrapOutcome::Bootstrapped => events.push_bootstrapped(entity),
                        BootstrapOutcome::Failed(error) => {
                            events.push_bootstrap_failed(entity, error)
                        }
                        BootstrapOutcome::AlreadyInitialized | BootstrapOutcome::Abandoned => {}
                    }
                }
            }
        }

        events
    }

    pub fn is_tracked(&self, entity: &EntityId) -> bool {
        self.entities.contains_key(entity)
    }

    pub fn tracked_count(&self) -> usize {
        self.entities.len()
    }

    pub fn is_bootstrapped(&self, entity: &EntityId) -> bool {
        self.entities
            .get(entity)
            .is_some_and(|tracked| tracked.bootstrap.is_initialized())
    }

    pub fn bootstrap_failed(&self, entity: &EntityId) -> bool {
        self.entities
            .get(entity)
            .is_some_and(|tracked| tracked.bootstrap.has_failed())
    }

    pub fn rig(&self, entity: &EntityId) -> Option<&B::Rig> {
        self.entities
            .get(entity)
            .and_then(|tracked| tracked.bootstrap.rig())
    }

    /// Read handles on the entity's three anchors.
    pub fn anchors(&self, entity: &EntityId) -> Option<RigAnchors> {
        self.entities
            .get(entity)
            .map(|tracked| tracked.anchors.accessors())
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn local(&self) -> OwnerId {
        self.resolver.local()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }
}

fn watch_owner<T: PoseTransport>(transport: &mut T, entity: EntityId, owner: OwnerId) -> Option<OwnerId> {
    match transport.watch(owner) {
        Ok(()) => Some(owner),
        Err(error) => {
            // left unwatched, so the next tick tries again
            warn!(
                "Could not watch owner {:?} of entity {:?}: {}",
                owner, entity, error
            );
            None
        }
    }
}
