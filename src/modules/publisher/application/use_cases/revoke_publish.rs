use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::modules::dispatch::application::ports::outgoing::job_queue::{
    CallbackSpec, JobPayload, JobQueue,
};
use crate::modules::publisher::application::domain::entities::{
    PublisherTask, PublisherTaskStatus,
};
use crate::modules::publisher::application::ports::incoming::use_cases::revoke_publish::{
    RevokePublishCommand, RevokePublishUseCase,
};
use crate::modules::publisher::application::ports::outgoing::task_repository::PublisherTaskRepository;
use crate::shared::error::ApiError;

pub struct RevokePublish {
    tasks: Arc<dyn PublisherTaskRepository>,
    queue: Arc<dyn JobQueue>,
    api_url: String,
    node_secret: String,
}

impl RevokePublish {
    pub fn new(
        tasks: Arc<dyn PublisherTaskRepository>,
        queue: Arc<dyn JobQueue>,
        api_url: &str,
        node_secret: &str,
    ) -> Self {
        Self {
            tasks,
            queue,
            api_url: api_url.to_string(),
            node_secret: node_secret.to_string(),
        }
    }
}

#[async_trait]
impl RevokePublishUseCase for RevokePublish {
    async fn execute(&self, command: RevokePublishCommand) -> Result<PublisherTask, ApiError> {
        let task_id = command.task_id.as_str();
        let mut task = self
            .tasks
            .find_by_id(task_id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::not_found(format!("No publication task with id {task_id}.")))?;
        if matches!(
            task.status,
            PublisherTaskStatus::Revoking
                | PublisherTaskStatus::Revoked
                | PublisherTaskStatus::Failure
        ) {
            return Err(ApiError::invalid(format!(
                "Cannot revoke a publication task with status {}.",
                task.status.as_str()
            )));
        }
        task.revoked = true;
        if let Err(error) = self.queue.revoke(&task.id, command.terminate).await {
            warn!(task = %task.id, %error, "Cancellation broadcast failed");
        }
        if task.status == PublisherTaskStatus::Success {
            let hostname = task.publish_hostname().ok_or_else(|| {
                ApiError::invalid(format!(
                    "Unable to determine the publishing worker of task {}.",
                    task.id
                ))
            })?;
            let callback =
                CallbackSpec::node(&self.api_url, &command.callback_path, &self.node_secret);
            let payload = JobPayload::Unpublish {
                publish_uri: task.publish_uri.clone().unwrap_or_default(),
                callback,
            };
            let revoke_id = self.queue.submit(&hostname, &payload).await.map_err(|_| {
                ApiError::transient(format!("Unable to transmit task to queue {hostname}."))
            })?;
            info!(task = %task.id, %revoke_id, queue = %hostname, "New revoke publication task");
            task.revoke_task_id = Some(revoke_id);
            task.transition(PublisherTaskStatus::Revoking);
        } else {
            task.transition(PublisherTaskStatus::Revoked);
        }
        self.tasks.save(&task).await.map_err(ApiError::from)?;
        if command.remove {
            self.tasks.delete(&task.id).await.map_err(ApiError::from)?;
        }
        Ok(task)
    }
}
