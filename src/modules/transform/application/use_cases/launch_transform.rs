use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::modules::auth::application::ports::outgoing::user_repository::UserRepository;
use crate::modules::dispatch::application::ports::outgoing::job_queue::{
    CallbackSpec, JobPayload, JobQueue,
};
use crate::modules::media::application::domain::entities::{Media, MediaStatus};
use crate::modules::media::application::services::media_service::MediaService;
use crate::modules::transform::application::domain::entities::TransformTask;
use crate::modules::transform::application::ports::incoming::use_cases::launch_transform::{
    LaunchTransformCommand, LaunchTransformUseCase,
};
use crate::modules::transform::application::ports::outgoing::{
    profile_repository::TransformProfileRepository, task_repository::TransformTaskRepository,
};
use crate::shared::clock::datetime_now;
use crate::shared::error::ApiError;

/// Launch a transformation. The PENDING output media is persisted before the
/// job is enqueued so a URI conflict aborts without ghost work; if the bus
/// refuses the job the PENDING media stays behind for the janitor.
pub struct LaunchTransform {
    users: Arc<dyn UserRepository>,
    medias: Arc<MediaService>,
    profiles: Arc<dyn TransformProfileRepository>,
    tasks: Arc<dyn TransformTaskRepository>,
    queue: Arc<dyn JobQueue>,
    api_url: String,
    node_secret: String,
    queues: Vec<String>,
}

impl LaunchTransform {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: Arc<dyn UserRepository>,
        medias: Arc<MediaService>,
        profiles: Arc<dyn TransformProfileRepository>,
        tasks: Arc<dyn TransformTaskRepository>,
        queue: Arc<dyn JobQueue>,
        api_url: &str,
        node_secret: &str,
        queues: Vec<String>,
    ) -> Self {
        Self {
            users,
            medias,
            profiles,
            tasks,
            queue,
            api_url: api_url.to_string(),
            node_secret: node_secret.to_string(),
            queues,
        }
    }
}

#[async_trait]
impl LaunchTransformUseCase for LaunchTransform {
    async fn execute(&self, command: LaunchTransformCommand) -> Result<TransformTask, ApiError> {
        let user = self
            .users
            .find_by_id(command.user_id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::not_found(format!("No user with id {}.", command.user_id)))?;
        let media_in = self.medias.get_media(command.media_in_id).await?;
        let profile = self
            .profiles
            .find_by_id(command.profile_id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| {
                ApiError::not_found(format!(
                    "No transformation profile with id {}.",
                    command.profile_id
                ))
            })?;
        if !self.queues.iter().any(|name| name == &command.queue) {
            return Err(ApiError::not_found(format!(
                "No transformation queue with name {}.",
                command.queue
            )));
        }
        if media_in.status != MediaStatus::Ready {
            return Err(ApiError::invalid(format!(
                "Cannot launch the task, input media asset's status is {}.",
                media_in.status.as_str()
            )));
        }

        let mut media_out = Media::new(
            user.id,
            Some(media_in.id),
            "",
            &command.filename,
            command.metadata,
            MediaStatus::Pending,
        );
        media_out.uri = self.medias.layout().media_uri(&media_out);
        self.medias.save_media(&mut media_out).await?;

        let callback = CallbackSpec::node(&self.api_url, &command.callback_path, &self.node_secret);
        let payload = JobPayload::Transform {
            media_in: media_in.clone(),
            media_out: media_out.clone(),
            profile: profile.clone(),
            callback,
        };
        let task_id = self.queue.submit(&command.queue, &payload).await.map_err(|_| {
            ApiError::transient(format!(
                "Unable to transmit task to workers of queue {}.",
                command.queue
            ))
        })?;
        info!(%task_id, queue = %command.queue, "New transformation task");

        let mut task = TransformTask::new(
            &task_id,
            user.id,
            media_in.id,
            media_out.id,
            profile.id,
            command.send_email,
        );
        task.add_statistic("add_date", json!(datetime_now()), true);
        if let Some(size) = media_in.metadata.get("size") {
            task.add_statistic("media_in_size", size.clone(), true);
        }
        if let Some(duration) = media_in.metadata.get("duration") {
            task.add_statistic("media_in_duration", duration.clone(), true);
        }
        self.tasks.save(&task).await.map_err(ApiError::from)?;
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value};
    use uuid::Uuid;

    use crate::modules::transform::application::domain::entities::TransformTaskStatus;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::fixtures::TransformFixture;

    fn out_metadata() -> Map<String, Value> {
        let mut metadata = Map::new();
        metadata.insert("title".to_string(), json!("Output"));
        metadata
    }

    fn command(fixture: &TransformFixture, queue: &str) -> LaunchTransformCommand {
        LaunchTransformCommand {
            user_id: fixture.user.id,
            media_in_id: fixture.media_in.id,
            profile_id: fixture.profile.id,
            filename: "out.mp4".to_string(),
            metadata: out_metadata(),
            send_email: false,
            queue: queue.to_string(),
            callback_path: "/transform/callback".to_string(),
        }
    }

    #[tokio::test]
    async fn launch_creates_pending_media_and_task() {
        let builder = TestAppStateBuilder::default();
        let fixture = TransformFixture::seed(&builder).await;

        let task = builder
            .transform
            .launch
            .execute(command(&fixture, "transform"))
            .await
            .unwrap();
        assert_eq!(task.status, TransformTaskStatus::Pending);
        assert!(task.statistic.contains_key("add_date"));

        let media_out = builder.media_store().get_media(task.media_out_id).await.unwrap();
        assert_eq!(media_out.status, MediaStatus::Pending);
        assert_eq!(media_out.parent_id, Some(fixture.media_in.id));
        assert!(media_out.uri.contains("medias_volume/medias/"));

        let submissions = builder.queue.submissions();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].0, task.id);
        assert_eq!(submissions[0].1, "transform");
    }

    #[tokio::test]
    async fn launch_requires_a_known_queue() {
        let builder = TestAppStateBuilder::default();
        let fixture = TransformFixture::seed(&builder).await;

        let err = builder
            .transform
            .launch
            .execute(command(&fixture, "nope"))
            .await
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("No transformation queue with name nope."));
    }

    #[tokio::test]
    async fn launch_refuses_non_ready_inputs() {
        let builder = TestAppStateBuilder::default();
        let fixture = TransformFixture::seed(&builder).await;

        let mut command = command(&fixture, "transform");
        command.media_in_id = Uuid::new_v4();
        let err = builder.transform.launch.execute(command).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn failed_submission_leaves_the_pending_media_for_the_janitor() {
        let builder = TestAppStateBuilder::default();
        let fixture = TransformFixture::seed(&builder).await;
        builder.queue.fail_submissions(true);

        let err = builder
            .transform
            .launch
            .execute(command(&fixture, "transform"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Unable to transmit task"));

        let pending = builder
            .media_store()
            .count_medias(Some(json!({"status": "PENDING"})))
            .await
            .unwrap();
        assert_eq!(pending, 1);
        assert_eq!(
            builder.transform.count_tasks.execute(None).await.unwrap(),
            0
        );
    }
}
