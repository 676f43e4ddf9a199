//! JetStream-backed broker connection

use async_nats::jetstream::context::GetStreamErrorKind;
use async_nats::jetstream::{self, stream, ErrorCode};
use async_nats::Client;
use async_trait::async_trait;
use bytes::Bytes;

use crate::broker::{BrokerConnection, PublishReceipt, StreamMetadata};
use crate::config::StreamDescriptor;
use crate::error::TinCanError;

/// Live connection to a NATS server with JetStream enabled.
///
/// Cheap to clone; every clone shares the underlying client. Handed
/// out per operation by
/// [`NatsConnectionPrimer`](crate::NatsConnectionPrimer).
#[derive(Clone)]
pub struct NatsConnection {
    client: Client,
    jetstream: jetstream::Context,
}

impl NatsConnection {
    pub fn new(client: Client) -> Self {
        let jetstream = jetstream::new(client.clone());
        Self { client, jetstream }
    }

    /// The underlying core NATS client.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

fn stream_config(descriptor: &StreamDescriptor) -> stream::Config {
    stream::Config {
        name: descriptor.name.clone(),
        subjects: descriptor.subjects.clone(),
        description: descriptor.description.clone(),
        max_messages: descriptor.max_messages,
        max_bytes: descriptor.max_bytes,
        ..Default::default()
    }
}

fn metadata_from_info(info: &stream::Info) -> StreamMetadata {
    StreamMetadata {
        name: info.config.name.clone(),
        subjects: info.config.subjects.clone(),
        messages: info.state.messages,
    }
}

#[async_trait]
impl BrokerConnection for NatsConnection {
    async fn stream_info(
        &self,
        stream: &StreamDescriptor,
    ) -> Result<Option<StreamMetadata>, TinCanError> {
        match self.jetstream.get_stream(&stream.name).await {
            Ok(found) => Ok(Some(metadata_from_info(found.cached_info()))),
            Err(err) => match err.kind() {
                // "Stream not found" is a valid answer, not a fault
                GetStreamErrorKind::JetStream(api)
                    if api.error_code() == ErrorCode::STREAM_NOT_FOUND =>
                {
                    Ok(None)
                }
                _ => Err(TinCanError::broker("stream lookup", err)),
            },
        }
    }

    async fn create_stream(
        &self,
        stream: &StreamDescriptor,
    ) -> Result<StreamMetadata, TinCanError> {
        let created = self
            .jetstream
            .create_stream(stream_config(stream))
            .await
            .map_err(|err| TinCanError::broker("stream creation", err))?;

        Ok(metadata_from_info(created.cached_info()))
    }

    async fn publish(
        &self,
        subject: String,
        payload: Bytes,
    ) -> Result<PublishReceipt, TinCanError> {
        let ack = self
            .jetstream
            .publish(subject, payload)
            .await
            .map_err(|err| TinCanError::broker("publish", err))?
            .await
            .map_err(|err| TinCanError::broker("publish acknowledgment", err))?;

        Ok(PublishReceipt {
            stream: ack.stream,
            sequence: ack.sequence,
            duplicate: ack.duplicate,
        })
    }
}
