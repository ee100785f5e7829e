use std::time::Duration;

use async_trait::async_trait;
use lapin::options::{
    BasicPublishOptions, ConfirmSelectOptions, ExchangeDeclareOptions, QueueDeclareOptions,
};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel, Connection, ConnectionProperties, ExchangeKind};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::modules::dispatch::application::ports::outgoing::job_queue::{JobPayload, JobQueue};
use crate::shared::error::ApiError;

/// Broadcast exchange every worker listens on for revocation commands.
const CONTROL_EXCHANGE: &str = "orchestra.control";

#[derive(Debug, Serialize)]
struct ControlMessage<'a> {
    command: &'a str,
    task_id: &'a str,
    terminate: bool,
}

/// RabbitMQ-backed job queue. Task identifiers are generated client side and
/// travel with the payload, the publication is confirmed by the broker.
pub struct AmqpJobQueue {
    channel: Channel,
    timeout: Duration,
}

impl AmqpJobQueue {
    pub async fn connect(dsn: &str, timeout: Duration) -> Result<Self, ApiError> {
        let connection = tokio::time::timeout(
            timeout,
            Connection::connect(dsn, ConnectionProperties::default()),
        )
        .await
        .map_err(|_| ApiError::transient("Connection to the message bus timed out."))?
        .map_err(|e| ApiError::transient(format!("Cannot reach the message bus: {e}")))?;
        let channel = connection
            .create_channel()
            .await
            .map_err(|e| ApiError::transient(format!("Cannot open a bus channel: {e}")))?;
        channel
            .confirm_select(ConfirmSelectOptions::default())
            .await
            .map_err(|e| ApiError::transient(format!("Cannot enable confirms: {e}")))?;
        channel
            .exchange_declare(
                CONTROL_EXCHANGE,
                ExchangeKind::Fanout,
                ExchangeDeclareOptions {
                    durable: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|e| ApiError::transient(format!("Cannot declare control exchange: {e}")))?;
        info!("Connected to the message bus");
        Ok(Self { channel, timeout })
    }

    async fn publish(&self, exchange: &str, routing_key: &str, body: Vec<u8>, task_id: &str) -> Result<(), ApiError> {
        let properties = BasicProperties::default()
            .with_content_type("application/json".into())
            .with_message_id(task_id.to_string().into())
            .with_delivery_mode(2); // persistent
        let confirm = tokio::time::timeout(
            self.timeout,
            self.channel
                .basic_publish(exchange, routing_key, BasicPublishOptions::default(), &body, properties),
        )
        .await
        .map_err(|_| ApiError::transient("Publishing to the message bus timed out."))?
        .map_err(|e| ApiError::transient(format!("Cannot publish: {e}")))?;
        let confirmation = tokio::time::timeout(self.timeout, confirm)
            .await
            .map_err(|_| ApiError::transient("Broker confirmation timed out."))?
            .map_err(|e| ApiError::transient(format!("Broker refused the message: {e}")))?;
        if let lapin::publisher_confirm::Confirmation::Nack(_) = confirmation {
            return Err(ApiError::transient("Broker nacked the message."));
        }
        Ok(())
    }
}

#[async_trait]
impl JobQueue for AmqpJobQueue {
    async fn submit(&self, queue: &str, payload: &JobPayload) -> Result<String, ApiError> {
        let task_id = Uuid::new_v4().to_string();
        self.channel
            .queue_declare(
                queue,
                QueueDeclareOptions {
                    durable: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|e| ApiError::transient(format!("Cannot declare queue {queue}: {e}")))?;
        let body = serde_json::json!({"task_id": task_id, "job": payload});
        let bytes =
            serde_json::to_vec(&body).map_err(|e| ApiError::internal(e.to_string()))?;
        self.publish("", queue, bytes, &task_id).await?;
        info!(%task_id, queue, "Job submitted");
        Ok(task_id)
    }

    async fn revoke(&self, task_id: &str, terminate: bool) -> Result<(), ApiError> {
        let message = ControlMessage {
            command: "revoke",
            task_id,
            terminate,
        };
        let bytes =
            serde_json::to_vec(&message).map_err(|e| ApiError::internal(e.to_string()))?;
        if let Err(error) = self.publish(CONTROL_EXCHANGE, "", bytes, task_id).await {
            // Revocation is best-effort; the task state machine is authoritative.
            warn!(%task_id, %error, "Revoke broadcast failed");
            return Err(error);
        }
        info!(%task_id, terminate, "Revoke broadcast");
        Ok(())
    }
}
