//! Publish orchestration
//!
//! `TinCanCommunication` composes the subject matcher, the connection
//! primer and the broker stream operations into a validate-then-publish
//! facade. A publish is only attempted once the subject matched the
//! stream's wildcard subjects, a live connection was obtained and the
//! stream was confirmed to exist.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};

use bytes::Bytes;
use tracing::{debug, info, warn};

use crate::broker::{BrokerConnection, PublishReceipt};
use crate::config::{ConsumerDescriptor, StreamDescriptor, TinCanConfig};
use crate::error::TinCanError;
use crate::listener::MessageListener;
use crate::primer::{ConnectionPrimer, PrimerListener};
use crate::subject::do_subjects_match;

/// Publish facade for a single JetStream stream.
///
/// Holds no connection or stream state between calls: the connection
/// is re-fetched from the primer and the stream metadata is looked up
/// fresh on every publish, so concurrent callers never interfere.
pub struct TinCanCommunication<P: ConnectionPrimer> {
    primer: Arc<P>,
    stream: StreamDescriptor,
    consumer: ConsumerDescriptor,
    config: TinCanConfig,
    message_listener: RwLock<Option<Weak<dyn MessageListener>>>,
    messages_published: AtomicU64,
    publish_failures: AtomicU64,
}

impl<P: ConnectionPrimer> TinCanCommunication<P> {
    /// Create a facade with default options (no on-demand stream
    /// creation).
    pub fn new(
        primer: Arc<P>,
        stream: StreamDescriptor,
        consumer: ConsumerDescriptor,
    ) -> Arc<Self> {
        Self::with_config(primer, stream, consumer, TinCanConfig::default())
    }

    /// Create a facade and register it as a connection-state listener
    /// on the primer.
    pub fn with_config(
        primer: Arc<P>,
        stream: StreamDescriptor,
        consumer: ConsumerDescriptor,
        config: TinCanConfig,
    ) -> Arc<Self> {
        let communication = Arc::new(Self {
            primer,
            stream,
            consumer,
            config,
            message_listener: RwLock::new(None),
            messages_published: AtomicU64::new(0),
            publish_failures: AtomicU64::new(0),
        });

        let weak = Arc::downgrade(&communication);
        let listener: Weak<dyn PrimerListener> = weak;
        communication.primer.add_listener(listener);

        communication
    }

    /// Publish a message and await the broker's acknowledgment.
    ///
    /// Fails fast, in order: [`TinCanError::SubjectMismatch`] if the
    /// subject matches none of the stream's wildcard subjects,
    /// [`TinCanError::NoConnection`] if the primer has no live
    /// connection, [`TinCanError::StreamNotFound`] if the stream is
    /// absent and `automatically_create_stream` is off, and
    /// [`TinCanError::Broker`] for any client fault. No retry is
    /// performed here; retrying is the caller's decision.
    pub async fn publish(
        &self,
        subject: &str,
        message: &str,
    ) -> Result<PublishReceipt, TinCanError> {
        let subject_matches = self
            .stream
            .subjects
            .iter()
            .any(|wildcard| do_subjects_match(subject, wildcard));

        if !subject_matches {
            return Err(TinCanError::SubjectMismatch {
                subject: subject.to_string(),
                stream: self.stream.name.clone(),
            });
        }

        // The connection is re-fetched on every call; a handle cached
        // across calls could be stale after a reconnect.
        let connection = self
            .primer
            .connection()
            .ok_or(TinCanError::NoConnection)?;

        // Lookup first, create only after a confirmed "not found", so
        // configuration conflicts stay distinguishable from absence.
        let metadata = match connection.stream_info(&self.stream).await? {
            Some(metadata) => metadata,
            None if self.config.automatically_create_stream => {
                info!(stream = %self.stream.name, "stream missing, creating from descriptor");
                connection.create_stream(&self.stream).await?
            }
            None => {
                return Err(TinCanError::StreamNotFound {
                    stream: self.stream.name.clone(),
                });
            }
        };

        let payload = Bytes::from(message.to_owned());

        match connection.publish(subject.to_owned(), payload).await {
            Ok(receipt) => {
                self.messages_published.fetch_add(1, Ordering::Relaxed);
                debug!(
                    subject,
                    stream = %metadata.name,
                    sequence = receipt.sequence,
                    duplicate = receipt.duplicate,
                    "message acknowledged by broker"
                );
                Ok(receipt)
            }
            Err(err) => {
                self.publish_failures.fetch_add(1, Ordering::Relaxed);
                warn!(subject, error = %err, "publish failed");
                Err(err)
            }
        }
    }

    /// Attach the subscribe-side listener without taking ownership of
    /// its lifecycle.
    pub fn set_message_listener(&self, listener: Weak<dyn MessageListener>) {
        *self
            .message_listener
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(listener);
    }

    /// The attached message listener, if it is still alive. A released
    /// listener reads as absent.
    pub fn message_listener(&self) -> Option<Arc<dyn MessageListener>> {
        self.message_listener
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(Weak::upgrade)
    }

    /// Declared configuration of the target stream.
    pub fn stream_descriptor(&self) -> &StreamDescriptor {
        &self.stream
    }

    /// Consumer configuration carried for the subscribe side.
    pub fn consumer_descriptor(&self) -> &ConsumerDescriptor {
        &self.consumer
    }

    /// Get total messages acknowledged by the broker
    pub fn messages_published(&self) -> u64 {
        self.messages_published.load(Ordering::Relaxed)
    }

    /// Get total broker publish failures
    pub fn publish_failures(&self) -> u64 {
        self.publish_failures.load(Ordering::Relaxed)
    }
}

impl<P: ConnectionPrimer> PrimerListener for TinCanCommunication<P> {
    fn connection_updated(&self) {
        // Hook for reactive behavior. The publish path re-fetches the
        // connection on every call, so there is nothing to invalidate
        // here yet.
        debug!(stream = %self.stream.name, "connection state changed");
    }
}
