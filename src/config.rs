//! Configuration surface
//!
//! Immutable descriptors supplied by the caller at construction time.
//! The publish path reads these; it never mutates them.

use serde::{Deserialize, Serialize};

/// Declared configuration of the target JetStream stream.
///
/// `subjects` is the ordered set of wildcard subjects the stream
/// accepts; every published subject must match at least one of them.
/// The capacity fields default to `-1` (broker default / unlimited)
/// and are only consulted when the stream is created on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamDescriptor {
    /// Stream name, e.g. `EVENTS`
    pub name: String,

    /// Wildcard subjects the stream ingests, e.g. `events.>`
    pub subjects: Vec<String>,

    /// Optional human-readable description
    pub description: Option<String>,

    /// Maximum number of messages retained (-1 for broker default)
    pub max_messages: i64,

    /// Maximum stream size in bytes (-1 for broker default)
    pub max_bytes: i64,
}

impl StreamDescriptor {
    /// Create a descriptor with broker-default capacity limits.
    pub fn new(name: impl Into<String>, subjects: Vec<String>) -> Self {
        Self {
            name: name.into(),
            subjects,
            description: None,
            max_messages: -1,
            max_bytes: -1,
        }
    }
}

/// Configuration for the subscribe-side consumer.
///
/// Carried through for the consumer side; the publish path does not
/// interpret it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsumerDescriptor {
    /// Durable consumer name, if the consumer should survive restarts
    pub durable_name: Option<String>,

    /// Subject filter applied to deliveries
    pub filter_subject: Option<String>,
}

/// Options controlling [`TinCanCommunication`] behavior.
///
/// [`TinCanCommunication`]: crate::TinCanCommunication
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TinCanConfig {
    /// Create the target stream from its descriptor when the broker
    /// reports it missing, instead of failing with `StreamNotFound`.
    pub automatically_create_stream: bool,
}

impl TinCanConfig {
    /// Create a configuration with every option at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable on-demand stream creation.
    pub fn with_automatically_create_stream(mut self, enabled: bool) -> Self {
        self.automatically_create_stream = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_descriptor_defaults_to_broker_limits() {
        let descriptor = StreamDescriptor::new("EVENTS", vec!["events.>".to_string()]);
        assert_eq!(descriptor.name, "EVENTS");
        assert_eq!(descriptor.subjects, vec!["events.>"]);
        assert_eq!(descriptor.max_messages, -1);
        assert_eq!(descriptor.max_bytes, -1);
        assert!(descriptor.description.is_none());
    }

    #[test]
    fn auto_create_is_off_by_default() {
        assert!(!TinCanConfig::default().automatically_create_stream);
        assert!(
            TinCanConfig::new()
                .with_automatically_create_stream(true)
                .automatically_create_stream
        );
    }

    #[test]
    fn descriptors_round_trip_through_serde() {
        let descriptor = StreamDescriptor::new("EVENTS", vec!["events.>".to_string()]);
        let json = serde_json::to_string(&descriptor).unwrap();
        let back: StreamDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, descriptor.name);
        assert_eq!(back.subjects, descriptor.subjects);
    }
}
