use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::modules::auth::application::ports::outgoing::user_repository::UserRepository;
use crate::modules::dispatch::application::ports::outgoing::job_queue::{
    CallbackSpec, JobPayload, JobQueue,
};
use crate::modules::media::application::domain::entities::MediaStatus;
use crate::modules::media::application::services::media_service::MediaService;
use crate::modules::publisher::application::domain::entities::PublisherTask;
use crate::modules::publisher::application::ports::incoming::use_cases::launch_publish::{
    LaunchPublishCommand, LaunchPublishUseCase,
};
use crate::modules::publisher::application::ports::outgoing::task_repository::PublisherTaskRepository;
use crate::shared::clock::datetime_now;
use crate::shared::error::ApiError;

/// Launch a publication. A media may be served by at most one publication at
/// a time: it must be READY, unpublished, and not already targeted by a live
/// publisher task.
pub struct LaunchPublish {
    users: Arc<dyn UserRepository>,
    medias: Arc<MediaService>,
    tasks: Arc<dyn PublisherTaskRepository>,
    queue: Arc<dyn JobQueue>,
    api_url: String,
    node_secret: String,
    queues: Vec<String>,
}

impl LaunchPublish {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: Arc<dyn UserRepository>,
        medias: Arc<MediaService>,
        tasks: Arc<dyn PublisherTaskRepository>,
        queue: Arc<dyn JobQueue>,
        api_url: &str,
        node_secret: &str,
        queues: Vec<String>,
    ) -> Self {
        Self {
            users,
            medias,
            tasks,
            queue,
            api_url: api_url.to_string(),
            node_secret: node_secret.to_string(),
            queues,
        }
    }
}

#[async_trait]
impl LaunchPublishUseCase for LaunchPublish {
    async fn execute(&self, command: LaunchPublishCommand) -> Result<PublisherTask, ApiError> {
        let user = self
            .users
            .find_by_id(command.user_id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::not_found(format!("No user with id {}.", command.user_id)))?;
        let media = self.medias.get_media(command.media_id).await?;
        if !self.queues.iter().any(|name| name == &command.queue) {
            return Err(ApiError::not_found(format!(
                "No publication queue with name {}.",
                command.queue
            )));
        }
        if media.status != MediaStatus::Ready {
            return Err(ApiError::invalid(format!(
                "Cannot launch the task, input media asset's status is {}.",
                media.status.as_str()
            )));
        }
        if !media.public_uris.is_empty() {
            return Err(ApiError::invalid(
                "Cannot launch the task, input media asset is already published.",
            ));
        }
        let live = json!({
            "media_id": media.id.to_string(),
            "status": {"$in": ["PENDING", "PROGRESS", "REVOKING"]},
        });
        if let Some(other) = self.tasks.find_one(live).await.map_err(ApiError::from)? {
            return Err(ApiError::invalid(format!(
                "Cannot launch the task, input media asset will be published by another task with id {}.",
                other.id
            )));
        }

        let callback = CallbackSpec::node(&self.api_url, &command.callback_path, &self.node_secret);
        let payload = JobPayload::Publish {
            media: media.clone(),
            callback,
        };
        let task_id = self.queue.submit(&command.queue, &payload).await.map_err(|_| {
            ApiError::transient(format!(
                "Unable to transmit task to workers of queue {}.",
                command.queue
            ))
        })?;
        info!(%task_id, queue = %command.queue, "New publication task");

        let mut task = PublisherTask::new(&task_id, user.id, media.id, command.send_email);
        task.add_statistic("add_date", json!(datetime_now()), true);
        self.tasks.save(&task).await.map_err(ApiError::from)?;
        Ok(task)
    }
}
