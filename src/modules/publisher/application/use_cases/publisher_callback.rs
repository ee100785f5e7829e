use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::modules::auth::application::ports::outgoing::user_repository::UserRepository;
use crate::modules::email::application::services::task_notifier::{TaskKind, TaskNotifier};
use crate::modules::media::application::services::media_service::MediaService;
use crate::modules::publisher::application::domain::entities::{
    PublisherTask, PublisherTaskStatus,
};
use crate::modules::publisher::application::ports::incoming::use_cases::publisher_callback::{
    PublisherCallbackCommand, PublisherCallbackUseCase,
};
use crate::modules::publisher::application::ports::outgoing::task_repository::PublisherTaskRepository;
use crate::modules::transform::application::domain::entities::escape_error_details;
use crate::shared::clock::datetime_now;
use crate::shared::error::ApiError;

/// Publication finished. On success the published URL is installed on both
/// the task and the media; the installation is re-checked so two racing
/// publications cannot both claim the same media.
pub struct PublisherCallback {
    users: Arc<dyn UserRepository>,
    medias: Arc<MediaService>,
    tasks: Arc<dyn PublisherTaskRepository>,
    notifier: Arc<TaskNotifier>,
}

impl PublisherCallback {
    pub fn new(
        users: Arc<dyn UserRepository>,
        medias: Arc<MediaService>,
        tasks: Arc<dyn PublisherTaskRepository>,
        notifier: Arc<TaskNotifier>,
    ) -> Self {
        Self {
            users,
            medias,
            tasks,
            notifier,
        }
    }

    async fn send_task_mail(&self, task: &PublisherTask, status: &str) {
        if !task.send_email {
            return;
        }
        match self.users.find_by_id(task.user_id).await {
            Ok(Some(user)) => {
                self.notifier
                    .notify(&user.mail, TaskKind::Publication, &task.id, status)
                    .await;
            }
            _ => warn!(task = %task.id, "Cannot resolve task owner for notification"),
        }
    }
}

#[async_trait]
impl PublisherCallbackUseCase for PublisherCallback {
    async fn execute(&self, command: PublisherCallbackCommand) -> Result<(), ApiError> {
        let task_id = command.task_id.as_str();
        let mut task = self
            .tasks
            .find_by_id(task_id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::not_found(format!("No publication task with id {task_id}.")))?;
        match command.status.as_str() {
            "PROGRESS" => {
                if task.status == PublisherTaskStatus::Pending {
                    task.transition(PublisherTaskStatus::Progress);
                    task.add_statistic("start_date", json!(datetime_now()), false);
                }
                if task.status == PublisherTaskStatus::Progress {
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
                let uri = command.publish_uri.as_deref().ok_or_else(|| {
                    ApiError::invalid("A successful publication callback requires publish_uri.")
                })?;
                if !task.transition(PublisherTaskStatus::Success) {
                    info!(%task_id, status = task.status.as_str(), "Stale success callback acknowledged");
                    return Ok(());
                }
                let mut media = self.medias.get_media(task.media_id).await?;
                let published_elsewhere = media
                    .public_uris
                    .keys()
                    .any(|other_id| other_id != &task.id);
                if published_elsewhere {
                    task.status = PublisherTaskStatus::Failure;
                    task.add_statistic(
                        "error_details",
                        json!("Media asset is already published by another task."),
                        true,
                    );
                    self.tasks.save(&task).await.map_err(ApiError::from)?;
                    warn!(%task_id, media = %media.id, "Refused concurrent publication");
                    return Ok(());
                }
                task.publish_uri = Some(uri.to_string());
                media.public_uris.insert(task.id.clone(), uri.to_string());
                self.medias.save_media(&mut media).await?;
                self.tasks.save(&task).await.map_err(ApiError::from)?;
                info!(%task_id, media = %media.filename, uri, "Media is now published");
                self.send_task_mail(&task, "SUCCESS").await;
                Ok(())
            }
            error_status => {
                if !matches!(
                    task.status,
                    PublisherTaskStatus::Pending | PublisherTaskStatus::Progress
                ) {
                    info!(%task_id, "Stale error callback acknowledged");
                    return Ok(());
                }
                task.transition(PublisherTaskStatus::Failure);
                task.add_statistic(
                    "error_details",
                    json!(escape_error_details(error_status)),
                    true,
                );
                self.tasks.save(&task).await.map_err(ApiError::from)?;
                info!(%task_id, error = error_status, "Publication failed, media unchanged");
                self.send_task_mail(&task, "ERROR").await;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::media::application::domain::entities::MediaStatus;
    use crate::modules::transform::application::ports::incoming::use_cases::transform_callback::ProgressUpdate;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::fixtures::PublishFixture;

    async fn callback(
        builder: &TestAppStateBuilder,
        task_id: &str,
        publish_uri: Option<&str>,
        status: &str,
    ) {
        builder
            .publisher
            .callback
            .execute(PublisherCallbackCommand {
                task_id: task_id.to_string(),
                publish_uri: publish_uri.map(str::to_string),
                status: status.to_string(),
                progress: ProgressUpdate::default(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn success_installs_the_public_uri() {
        let builder = TestAppStateBuilder::default();
        let fixture = PublishFixture::seed(&builder).await;
        let task = fixture.launch(&builder).await;

        callback(&builder, &task.id, Some("http://worker-1/m.mp4"), "SUCCESS").await;

        let task = builder.publisher_tasks.find_by_id(&task.id).await.unwrap().unwrap();
        assert_eq!(task.status, PublisherTaskStatus::Success);
        assert_eq!(task.publish_uri.as_deref(), Some("http://worker-1/m.mp4"));
        let media = builder.media_store().get_media(fixture.media.id).await.unwrap();
        assert_eq!(
            media.public_uris.get(&task.id).map(String::as_str),
            Some("http://worker-1/m.mp4")
        );
    }

    #[tokio::test]
    async fn error_callback_leaves_the_media_unchanged() {
        let builder = TestAppStateBuilder::default();
        let fixture = PublishFixture::seed(&builder).await;
        let task = fixture.launch(&builder).await;

        callback(&builder, &task.id, None, "ERROR\nno space").await;

        let task = builder.publisher_tasks.find_by_id(&task.id).await.unwrap().unwrap();
        assert_eq!(task.status, PublisherTaskStatus::Failure);
        assert_eq!(task.statistic["error_details"], json!("ERROR\\nno space"));
        let media = builder.media_store().get_media(fixture.media.id).await.unwrap();
        assert!(media.public_uris.is_empty());
        assert_eq!(media.status, MediaStatus::Ready);
    }

    #[tokio::test]
    async fn duplicate_success_callbacks_install_once() {
        let builder = TestAppStateBuilder::default();
        let fixture = PublishFixture::seed(&builder).await;
        let task = fixture.launch(&builder).await;

        for _ in 0..2 {
            callback(&builder, &task.id, Some("http://worker-1/m.mp4"), "SUCCESS").await;
        }
        let media = builder.media_store().get_media(fixture.media.id).await.unwrap();
        assert_eq!(media.public_uris.len(), 1);
    }
}
