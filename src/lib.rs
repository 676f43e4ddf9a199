//! tincan-nats - Validated publish facade over NATS JetStream
//!
//! This library sits between "caller wants to publish" and "broker
//! acknowledges receipt". Before a message leaves the process it:
//! - Checks the subject against the target stream's wildcard subjects
//! - Obtains a live connection from a [`ConnectionPrimer`]
//! - Confirms the stream exists, creating it on demand if configured
//! - Publishes and awaits the broker's acknowledgment
//!
//! The entry point is [`TinCanCommunication`]. Production deployments
//! use the [`nats`] module ([`NatsConnectionPrimer`]); the
//! [`BrokerConnection`] and [`ConnectionPrimer`] seams allow in-memory
//! fakes for testing.

mod broker;
mod communication;
mod config;
pub mod error;
mod listener;
pub mod nats;
mod primer;
mod subject;

pub use broker::{BrokerConnection, PublishReceipt, StreamMetadata};
pub use communication::TinCanCommunication;
pub use config::{ConsumerDescriptor, StreamDescriptor, TinCanConfig};
pub use error::TinCanError;
pub use listener::MessageListener;
pub use nats::{NatsConnection, NatsConnectionPrimer};
pub use primer::{ConnectionPrimer, PrimerListener};
pub use subject::do_subjects_match;
