//! Domain error types for the publish facade
//!
//! Every variant carries structured context fields so callers can
//! pattern-match on the failure mode without parsing message strings.
//! Broker faults keep the client error as `#[source]`.

use thiserror::Error;

/// Publish facade errors
///
/// The first three variants are local precondition failures and never
/// reach the broker. `Broker` wraps any transport or protocol fault
/// surfaced by the NATS client; it is propagated unchanged, with no
/// retry and no suppression.
#[derive(Error, Debug)]
pub enum TinCanError {
    /// Subject does not satisfy any of the stream's wildcard subjects
    #[error("subject '{subject}' does not match any subject of stream '{stream}'")]
    SubjectMismatch { subject: String, stream: String },

    /// No live connection to the NATS server at call time
    #[error("no connection to the NATS server")]
    NoConnection,

    /// Stream absent and on-demand creation disabled
    #[error(
        "stream '{stream}' could not be found; consider enabling \
         `automatically_create_stream` in `TinCanConfig`"
    )]
    StreamNotFound { stream: String },

    /// Broker request failed (lookup, create, publish or ack)
    #[error("broker request failed during {operation}")]
    Broker {
        operation: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl TinCanError {
    /// Wrap a client error as a broker-communication failure.
    pub(crate) fn broker(
        operation: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Broker {
            operation,
            source: Box::new(source),
        }
    }

    /// Returns a static label string suitable for metrics.
    ///
    /// Lets callers count failures per error kind without allocating.
    pub fn error_type_label(&self) -> &'static str {
        match self {
            Self::SubjectMismatch { .. } => "subject_mismatch",
            Self::NoConnection => "no_connection",
            Self::StreamNotFound { .. } => "stream_not_found",
            Self::Broker { .. } => "broker",
        }
    }
}
