use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::modules::auth::application::ports::outgoing::user_repository::UserRepository;
use crate::modules::email::application::services::task_notifier::{TaskKind, TaskNotifier};
use crate::modules::media::application::domain::entities::MediaStatus;
use crate::modules::media::application::services::media_service::MediaService;
use crate::modules::transform::application::domain::entities::{
    escape_error_details, TransformTaskStatus,
};
use crate::modules::transform::application::ports::incoming::use_cases::transform_callback::{
    TransformCallbackCommand, TransformCallbackUseCase,
};
use crate::modules::transform::application::ports::outgoing::task_repository::TransformTaskRepository;
use crate::shared::clock::datetime_now;
use crate::shared::error::ApiError;

/// Apply a worker callback. Transitions are guarded by the task state
/// machine, so duplicate or late callbacks are acknowledged without a second
/// state change.
pub struct TransformCallback {
    users: Arc<dyn UserRepository>,
    medias: Arc<MediaService>,
    tasks: Arc<dyn TransformTaskRepository>,
    notifier: Arc<TaskNotifier>,
}

impl TransformCallback {
    pub fn new(
        users: Arc<dyn UserRepository>,
        medias: Arc<MediaService>,
        tasks: Arc<dyn TransformTaskRepository>,
        notifier: Arc<TaskNotifier>,
    ) -> Self {
        Self {
            users,
            medias,
            tasks,
            notifier,
        }
    }

    async fn send_task_mail(
        &self,
        task: &crate::modules::transform::application::domain::entities::TransformTask,
        status: &str,
    ) {
        if !task.send_email {
            return;
        }
        match self.users.find_by_id(task.user_id).await {
            Ok(Some(user)) => {
                self.notifier
                    .notify(&user.mail, TaskKind::Transformation, &task.id, status)
                    .await;
            }
            _ => warn!(task = %task.id, "Cannot resolve task owner for notification"),
        }
    }
}

#[async_trait]
impl TransformCallbackUseCase for TransformCallback {
    async fn execute(&self, command: TransformCallbackCommand) -> Result<(), ApiError> {
        let task_id = command.task_id.as_str();
        let mut task = self
            .tasks
            .find_by_id(task_id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| {
                ApiError::not_found(format!("No transformation task with id {task_id}."))
            })?;
        match command.status.as_str() {
            "PROGRESS" => {
                if task.status == TransformTaskStatus::Pending {
                    task.transition(TransformTaskStatus::Progress);
                    task.add_statistic("start_date", json!(datetime_now()), false);
                }
                if task.status == TransformTaskStatus::Progress {
                    if let Some(percent) = command.progress.percent {
                        task.add_statistic("percent", percent, true);
                    }
                    if let Some(elapsed) = command.progress.elapsed_time {
                        task.add_statistic("elapsed_time", elapsed, true);
                    }
                    if let Some(eta) = command.progress.eta_time {
                        task.add_statistic("eta_time", eta, true);
                    }
                    self.tasks.save(&task).await.map_err(ApiError::from)?;
                }
                Ok(())
            }
            "SUCCESS" => {
                if !task.transition(TransformTaskStatus::Success) {
                    info!(%task_id, status = task.status.as_str(), "Stale success callback acknowledged");
                    return Ok(());
                }
                let mut media_out = self.medias.get_media(task.media_out_id).await?;
                media_out.status = MediaStatus::Ready;
                self.medias.save_media(&mut media_out).await?;
                info!(%task_id, media = %media_out.filename, "Media is now READY");
                if let Some(size) = media_out.metadata.get("size") {
                    task.add_statistic("media_out_size", size.clone(), true);
                }
                if let Some(duration) = media_out.metadata.get("duration") {
                    task.add_statistic("media_out_duration", duration.clone(), true);
                }
                task.add_statistic("percent", json!(100), true);
                self.tasks.save(&task).await.map_err(ApiError::from)?;
                self.send_task_mail(&task, "SUCCESS").await;
                Ok(())
            }
            error_status => {
                if task.status.is_terminal() {
                    info!(%task_id, "Stale error callback acknowledged");
                    return Ok(());
                }
                task.transition(TransformTaskStatus::Failure);
                task.add_statistic(
                    "error_details",
                    json!(escape_error_details(error_status)),
                    true,
                );
                self.tasks.save(&task).await.map_err(ApiError::from)?;
                info!(%task_id, error = error_status, "Transformation failed");
                let media_out = self.medias.get_media(task.media_out_id).await?;
                self.medias.delete_media(media_out).await?;
                info!(%task_id, "Output media is now deleted");
                self.send_task_mail(&task, "ERROR").await;
                Ok(())
            }
        }
    }
}
