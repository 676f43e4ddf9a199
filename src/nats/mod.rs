//! Production NATS JetStream implementation
//!
//! Implements the broker and primer contracts on `async-nats`.

mod connection;
mod primer;

pub use connection::NatsConnection;
pub use primer::NatsConnectionPrimer;
