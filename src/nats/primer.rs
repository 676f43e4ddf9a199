//! NATS connection primer
//!
//! Owns the client and tracks its liveness through the async-nats
//! event callback. Registered listeners are notified on every
//! connection state transition; after a detected disconnect
//! `connection()` returns `None` until the client reconnects.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};

use async_nats::{ConnectOptions, Event};
use tracing::{debug, info, warn};

use crate::error::TinCanError;
use crate::nats::NatsConnection;
use crate::primer::{ConnectionPrimer, PrimerListener};

/// Connection primer backed by an `async-nats` client.
pub struct NatsConnectionPrimer {
    connection: NatsConnection,
    shared: Arc<PrimerShared>,
}

/// State shared with the client's event callback, which outlives any
/// single primer reference.
struct PrimerShared {
    connected: AtomicBool,
    listeners: RwLock<Vec<Weak<dyn PrimerListener>>>,
}

impl NatsConnectionPrimer {
    /// Connect to the given NATS server(s) and start tracking
    /// connection state.
    ///
    /// Reconnection itself is handled by the client; this primer only
    /// reflects the observed state and fans out notifications.
    pub async fn connect(servers: &str) -> Result<Arc<Self>, TinCanError> {
        let shared = Arc::new(PrimerShared {
            connected: AtomicBool::new(false),
            listeners: RwLock::new(Vec::new()),
        });

        let state = Arc::clone(&shared);
        let options = ConnectOptions::new().event_callback(move |event| {
            let state = Arc::clone(&state);
            async move {
                state.handle_event(event);
            }
        });

        let client = options
            .connect(servers)
            .await
            .map_err(|err| TinCanError::broker("connect", err))?;

        info!(servers, "connected to NATS");
        shared.connected.store(true, Ordering::SeqCst);

        Ok(Arc::new(Self {
            connection: NatsConnection::new(client),
            shared,
        }))
    }
}

impl ConnectionPrimer for NatsConnectionPrimer {
    type Connection = NatsConnection;

    fn connection(&self) -> Option<NatsConnection> {
        if self.shared.connected.load(Ordering::SeqCst) {
            Some(self.connection.clone())
        } else {
            None
        }
    }

    fn add_listener(&self, listener: Weak<dyn PrimerListener>) {
        self.shared
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }
}

impl PrimerShared {
    fn handle_event(&self, event: Event) {
        match event {
            Event::Connected => {
                info!("NATS connection established");
                self.set_connected(true);
            }
            Event::Disconnected => {
                warn!("NATS connection lost");
                self.set_connected(false);
            }
            Event::Closed => {
                warn!("NATS connection closed");
                self.set_connected(false);
            }
            other => {
                debug!(event = %other, "NATS client event");
            }
        }
    }

    fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
        self.notify_listeners();
    }

    /// Invoke every live listener, dropping the dead ones. Listeners
    /// run outside the registry lock so they may call back into the
    /// primer.
    fn notify_listeners(&self) {
        let live: Vec<Arc<dyn PrimerListener>> = {
            let mut listeners = self
                .listeners
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            listeners.retain(|listener| listener.upgrade().is_some());
            listeners.iter().filter_map(Weak::upgrade).collect()
        };

        for listener in live {
            listener.connection_updated();
        }
    }
}
