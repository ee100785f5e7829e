use std::sync::Arc;

use async_trait::async_trait;

use crate::modules::auth::application::ports::outgoing::user_repository::UserRepository;
use crate::modules::media::application::services::media_service::MediaService;
use crate::modules::transform::application::domain::entities::TransformTask;
use crate::modules::transform::application::ports::incoming::use_cases::fetch_task::{
    FetchTransformTaskUseCase, TransformTaskView,
};
use crate::modules::transform::application::ports::outgoing::{
    profile_repository::TransformProfileRepository, task_repository::TransformTaskRepository,
};
use crate::shared::error::ApiError;

/// Resolve a task's `*_id` references into embedded payloads (one level).
pub(crate) async fn assemble_view(
    users: &Arc<dyn UserRepository>,
    medias: &Arc<MediaService>,
    profiles: &Arc<dyn TransformProfileRepository>,
    task: TransformTask,
    load_fields: bool,
) -> Result<TransformTaskView, ApiError> {
    if !load_fields {
        return Ok(TransformTaskView {
            task,
            user: None,
            media_in: None,
            media_out: None,
            profile: None,
        });
    }
    let user = users
        .find_by_id(task.user_id)
        .await
        .map_err(ApiError::from)?
        .map(|user| user.to_view());
    let media_in = medias.get_media(task.media_in_id).await.ok();
    let media_out = medias.get_media(task.media_out_id).await.ok();
    let profile = profiles
        .find_by_id(task.profile_id)
        .await
        .map_err(ApiError::from)?;
    Ok(TransformTaskView {
        task,
        user,
        media_in,
        media_out,
        profile,
    })
}

pub struct FetchTransformTask {
    users: Arc<dyn UserRepository>,
    medias: Arc<MediaService>,
    profiles: Arc<dyn TransformProfileRepository>,
    tasks: Arc<dyn TransformTaskRepository>,
}

impl FetchTransformTask {
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
impl FetchTransformTaskUseCase for FetchTransformTask {
    async fn execute(&self, id: &str, load_fields: bool) -> Result<TransformTaskView, ApiError> {
        let task = self
            .tasks
            .find_by_id(id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::not_found(format!("No transformation task with id {id}.")))?;
        assemble_view(&self.users, &self.medias, &self.profiles, task, load_fields).await
    }
}
