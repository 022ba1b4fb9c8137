use std::{default::Default, time::Duration};

/// Contains Config properties which will be used by the `SyncLoop`
#[derive(Clone, Debug)]
pub struct SyncConfig {
    /// Minimum simulated time between two sends for an entity this peer
    /// owns. Deliberately coarse: remote IK only needs rough anchors, and a
    /// slow interval keeps broadcast bandwidth and record polling cheap.
    pub send_interval: Duration,
    /// How far an anchor orientation's length may stray from 1.0 before the
    /// anchor set is rejected at rig bootstrap.
    pub orientation_tolerance: f32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            send_interval: Duration::from_secs(1),
            orientation_tolerance: 0.01,
        }
    }
}
