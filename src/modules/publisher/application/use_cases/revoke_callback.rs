use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::modules::media::application::services::media_service::MediaService;
use crate::modules::publisher::application::domain::entities::PublisherTaskStatus;
use crate::modules::publisher::application::ports::incoming::use_cases::revoke_callback::RevokeCallbackUseCase;
use crate::modules::publisher::application::ports::outgoing::task_repository::PublisherTaskRepository;
use crate::modules::transform::application::domain::entities::escape_error_details;
use crate::shared::error::ApiError;

/// Drop the media's public URL and close the task once the worker confirms
/// the unpublish.
pub struct RevokeCallback {
    medias: Arc<MediaService>,
    tasks: Arc<dyn PublisherTaskRepository>,
}

impl RevokeCallback {
    pub fn new(medias: Arc<MediaService>, tasks: Arc<dyn PublisherTaskRepository>) -> Self {
        Self { medias, tasks }
    }
}

#[async_trait]
impl RevokeCallbackUseCase for RevokeCallback {
    async fn execute(&self, revoke_task_id: &str, status: &str) -> Result<(), ApiError> {
        let mut task = self
            .tasks
            .find_one(json!({"revoke_task_id": revoke_task_id}))
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| {
                ApiError::not_found(format!(
                    "No publication task with revoke_task_id {revoke_task_id}."
                ))
            })?;
        if status == "SUCCESS" {
            if !task.transition(PublisherTaskStatus::Revoked) {
                info!(task = %task.id, "Stale revoke callback acknowledged");
                return Ok(());
            }
            let mut media = self.medias.get_media(task.media_id).await?;
            // Missing entry is not an error.
            media.public_uris.remove(&task.id);
            self.medias.save_media(&mut media).await?;
            self.tasks.save(&task).await.map_err(ApiError::from)?;
            info!(task = %task.id, media = %media.filename, "Media is now unpublished");
        } else {
            task.add_statistic(
                "revoke_error_details",
                json!(escape_error_details(status)),
                true,
            );
            self.tasks.save(&task).await.map_err(ApiError::from)?;
            info!(task = %task.id, error = status, "Unpublish failed, media unchanged");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::publisher::application::ports::incoming::use_cases::publisher_callback::{
        PublisherCallbackCommand, PublisherCallbackUseCase,
    };
    use crate::modules::publisher::application::ports::incoming::use_cases::revoke_publish::{
        RevokePublishCommand, RevokePublishUseCase,
    };
    use crate::modules::transform::application::ports::incoming::use_cases::transform_callback::ProgressUpdate;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::fixtures::PublishFixture;

    #[tokio::test]
    async fn revoking_a_success_goes_through_the_unpublish_worker() {
        let builder = TestAppStateBuilder::default();
        let fixture = PublishFixture::seed(&builder).await;
        let task = fixture.launch(&builder).await;
        builder
            .publisher
            .callback
            .execute(PublisherCallbackCommand {
                task_id: task.id.clone(),
                publish_uri: Some("http://worker-7/m.mp4".to_string()),
                status: "SUCCESS".to_string(),
                progress: ProgressUpdate::default(),
            })
            .await
            .unwrap();

        let revoking = builder
            .publisher
            .revoke
            .execute(RevokePublishCommand {
                task_id: task.id.clone(),
                callback_path: "/publisher/revoke/callback".to_string(),
                terminate: true,
                remove: false,
            })
            .await
            .unwrap();
        assert_eq!(revoking.status, PublisherTaskStatus::Revoking);
        let revoke_id = revoking.revoke_task_id.clone().unwrap();

        // The unpublish job went to the queue named after the worker host.
        let submissions = builder.queue.submissions();
        assert_eq!(submissions.last().unwrap().1, "worker-7");

        builder
            .publisher
            .revoke_callback
            .execute(&revoke_id, "SUCCESS")
            .await
            .unwrap();

        let task = builder.publisher_tasks.find_by_id(&task.id).await.unwrap().unwrap();
        assert_eq!(task.status, PublisherTaskStatus::Revoked);
        let media = builder.media_store().get_media(fixture.media.id).await.unwrap();
        assert!(media.public_uris.is_empty());
    }

    #[tokio::test]
    async fn unknown_revoke_ids_are_not_found() {
        let builder = TestAppStateBuilder::default();
        let err = builder
            .publisher
            .revoke_callback
            .execute("missing", "SUCCESS")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
