//! Connection primer contract
//!
//! The primer abstracts connection lifecycle and reconnection away
//! from the publish logic. It hands out the current live connection
//! (or none) and pushes state-change notifications to registered
//! listeners. Listeners are held weakly: a released listener is
//! skipped, never an error.

use std::sync::Weak;

use crate::broker::BrokerConnection;

/// Observer of connection state transitions.
///
/// `connection_updated` fires on every transition (established, lost,
/// re-established). A listener that needs to inspect the primer keeps
/// its own reference to it.
pub trait PrimerListener: Send + Sync {
    fn connection_updated(&self);
}

/// Supplier of the current live broker connection.
///
/// `connection()` is non-blocking and reflects the most recent known
/// state: after a detected disconnect it returns `None`, never a stale
/// handle. Callers re-fetch on every operation instead of caching.
pub trait ConnectionPrimer: Send + Sync + 'static {
    type Connection: BrokerConnection;

    /// Current live connection, or `None` if disconnected.
    fn connection(&self) -> Option<Self::Connection>;

    /// Register a state-change observer.
    fn add_listener(&self, listener: Weak<dyn PrimerListener>);
}
