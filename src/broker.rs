//! Broker client interface
//!
//! The seam between the publish orchestration and the NATS client.
//! Production code uses [`NatsConnection`](crate::NatsConnection);
//! tests substitute in-memory fakes.

use async_trait::async_trait;
use bytes::Bytes;

use crate::config::StreamDescriptor;
use crate::error::TinCanError;

/// Broker-reported snapshot of a stream.
///
/// Transient: fetched fresh per publish, never cached, since the
/// stream can be deleted or reconfigured out-of-band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamMetadata {
    /// Stream name as reported by the broker
    pub name: String,

    /// Wildcard subjects the stream currently ingests
    pub subjects: Vec<String>,

    /// Number of messages currently stored in the stream
    pub messages: u64,
}

/// Broker acknowledgment for a durably accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    /// Stream that ingested the message
    pub stream: String,

    /// Sequence number assigned by the stream
    pub sequence: u64,

    /// True if the broker deduplicated the message
    pub duplicate: bool,
}

/// Operations the publish path needs from a live broker connection.
///
/// All three calls fail with [`TinCanError::Broker`] on transport or
/// protocol faults. A missing stream is not a fault: `stream_info`
/// reports it as `Ok(None)` so callers can tell "never existed" apart
/// from "request could not be completed".
#[async_trait]
pub trait BrokerConnection: Send + Sync {
    /// Look up the stream's current metadata, `None` if it does not exist.
    async fn stream_info(
        &self,
        stream: &StreamDescriptor,
    ) -> Result<Option<StreamMetadata>, TinCanError>;

    /// Create the stream from its descriptor.
    ///
    /// A conflicting existing configuration is surfaced as an error,
    /// not swallowed.
    async fn create_stream(
        &self,
        stream: &StreamDescriptor,
    ) -> Result<StreamMetadata, TinCanError>;

    /// Publish a message and await the broker's acknowledgment.
    async fn publish(
        &self,
        subject: String,
        payload: Bytes,
    ) -> Result<PublishReceipt, TinCanError>;
}
