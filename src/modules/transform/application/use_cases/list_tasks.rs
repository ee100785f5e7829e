use std::sync::Arc;

use async_trait::async_trait;

use crate::modules::auth::application::ports::outgoing::user_repository::UserRepository;
use crate::modules::media::application::services::media_service::MediaService;
use crate::modules::transform::application::ports::incoming::use_cases::fetch_task::TransformTaskView;
use crate::modules::transform::application::ports::incoming::use_cases::list_tasks::ListTransformTasksUseCase;
use crate::modules::transform::application::ports::outgoing::{
    profile_repository::TransformProfileRepository, task_repository::TransformTaskRepository,
};
use crate::modules::transform::application::use_cases::fetch_task::assemble_view;
use crate::shared::api::listing::{ListQuery, SortOrder};
use crate::shared::error::ApiError;

pub const TASK_SORT: [(&str, SortOrder); 1] = [("statistic.add_date", SortOrder::Descending)];

pub struct ListTransformTasks {
    users: Arc<dyn UserRepository>,
    medias: Arc<MediaService>,
    profiles: Arc<dyn TransformProfileRepository>,
    tasks: Arc<dyn TransformTaskRepository>,
}

impl ListTransformTasks {
    pub fn new(
        users: Arc<dyn UserRepository>,
        medias: Arc<MediaService>,
        profiles: Arc<dyn TransformProfileRepository>,
        tasks: Arc<dyn TransformTaskRepository>,
    ) -> Self {
        Self {
            users,
            medias,
            profiles,
            tasks,
        }
    }
}

#[async_trait]
impl ListTransformTasksUseCase for ListTransformTasks {
    async fn execute(
        &self,
        query: ListQuery,
        load_fields: bool,
    ) -> Result<Vec<TransformTaskView>, ApiError> {
        let params = query.into_params(&TASK_SORT)?;
        let tasks = self.tasks.list(params).await.map_err(ApiError::from)?;
        let mut views = Vec::with_capacity(tasks.len());
        for task in tasks {
            views.push(
                assemble_view(&self.users, &self.medias, &self.profiles, task, load_fields)
                    .await?,
            );
        }
        Ok(views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::media::application::domain::entities::MediaStatus;
    use crate::modules::transform::application::domain::entities::TransformTaskStatus;
    use crate::modules::transform::application::ports::incoming::use_cases::transform_callback::{
        ProgressUpdate, TransformCallbackCommand,
    };
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::fixtures::TransformFixture;

    #[tokio::test]
    async fn ready_transform_output_has_a_success_task() {
        // Every READY media produced by a transform pairs with a SUCCESS task.
        let builder = TestAppStateBuilder::default();
        let fixture = TransformFixture::seed(&builder).await;
        let task = fixture.launch(&builder).await;
        builder
            .transform
            .callback
            .execute(TransformCallbackCommand {
                task_id: task.id.clone(),
                status: "SUCCESS".to_string(),
                progress: ProgressUpdate::default(),
            })
            .await
            .unwrap();

        let views = builder
            .transform
            .list_tasks
            .execute(ListQuery::default(), false)
            .await
            .unwrap();
        let media_out = builder.media_store().get_media(task.media_out_id).await.unwrap();
        assert_eq!(media_out.status, MediaStatus::Ready);
        let matching: Vec<_> = views
            .iter()
            .filter(|view| {
                view.task.media_out_id == media_out.id
                    && view.task.status == TransformTaskStatus::Success
            })
            .collect();
        assert_eq!(matching.len(), 1);
    }
}
