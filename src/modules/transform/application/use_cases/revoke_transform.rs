use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::modules::dispatch::application::ports::outgoing::job_queue::JobQueue;
use crate::modules::media::application::services::media_service::MediaService;
use crate::modules::transform::application::domain::entities::{
    TransformTask, TransformTaskStatus,
};
use crate::modules::transform::application::ports::incoming::use_cases::revoke_transform::{
    RevokeTransformCommand, RevokeTransformUseCase,
};
use crate::modules::transform::application::ports::outgoing::task_repository::TransformTaskRepository;
use crate::shared::error::ApiError;

pub struct RevokeTransform {
    medias: Arc<MediaService>,
    tasks: Arc<dyn TransformTaskRepository>,
    queue: Arc<dyn JobQueue>,
}

impl RevokeTransform {
    pub fn new(
        medias: Arc<MediaService>,
        tasks: Arc<dyn TransformTaskRepository>,
        queue: Arc<dyn JobQueue>,
    ) -> Self {
        Self {
            medias,
            tasks,
            queue,
        }
    }
}

#[async_trait]
impl RevokeTransformUseCase for RevokeTransform {
    async fn execute(&self, command: RevokeTransformCommand) -> Result<TransformTask, ApiError> {
        let task_id = command.task_id.as_str();
        let mut task = self
            .tasks
            .find_by_id(task_id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| {
                ApiError::not_found(format!("No transformation task with id {task_id}."))
            })?;
        if task.status == TransformTaskStatus::Revoked {
            return Err(ApiError::invalid(format!(
                "Transformation task {} is already revoked !",
                task.id
            )));
        }
        if task.status.is_terminal() {
            return Err(ApiError::invalid(format!(
                "Cannot revoke a transformation task with status {}.",
                task.status.as_str()
            )));
        }
        task.revoked = true;
        task.transition(TransformTaskStatus::Revoked);
        if let Err(error) = self.queue.revoke(&task.id, command.terminate).await {
            warn!(task = %task.id, %error, "Cancellation broadcast failed");
        }
        self.tasks.save(&task).await.map_err(ApiError::from)?;
        if command.delete_media {
            match self.medias.get_media(task.media_out_id).await {
                Ok(media_out) => {
                    self.medias.delete_media(media_out).await?;
                }
                Err(ApiError::NotFound(_)) => {}
                Err(other) => return Err(other),
            }
        }
        if command.remove {
            self.tasks.delete(&task.id).await.map_err(ApiError::from)?;
        }
        Ok(task)
    }
}
