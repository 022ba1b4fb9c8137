use thiserror::Error;

use crate::wire::error::DecodeError;

/// Errors that can occur while moving pose bundles through a transport
///
/// Lost sends are not errors: both strategies are best-effort and the
/// authority simply sends again on its next interval.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Payload could not be decoded into a pose bundle
    #[error("Pose bundle decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// Inbound slot lock is poisoned (a thread panicked while holding it)
    #[error("Inbound slot lock is poisoned - this indicates a panic occurred while holding the lock")]
    InboundLockPoisoned,
}
