use std::sync::Arc;

use async_trait::async_trait;

use crate::modules::auth::application::ports::outgoing::user_repository::UserRepository;
use crate::modules::media::application::services::media_service::MediaService;
use crate::modules::publisher::application::domain::entities::PublisherTask;
use crate::modules::publisher::application::ports::incoming::use_cases::fetch_task::{
    FetchPublisherTaskUseCase, PublisherTaskView,
};
use crate::modules::publisher::application::ports::outgoing::task_repository::PublisherTaskRepository;
use crate::shared::error::ApiError;

pub(crate) async fn assemble_view(
    users: &Arc<dyn UserRepository>,
    medias: &Arc<MediaService>,
    task: PublisherTask,
    load_fields: bool,
) -> Result<PublisherTaskView, ApiError> {
    if !load_fields {
        return Ok(PublisherTaskView {
            task,
            user: None,
            media: None,
        });
    }
    let user = users
        .find_by_id(task.user_id)
        .await
        .map_err(ApiError::from)?
        .map(|user| user.to_view());
    let media = medias.get_media(task.media_id).await.ok();
    Ok(PublisherTaskView { task, user, media })
}

pub struct FetchPublisherTask {
    users: Arc<dyn UserRepository>,
    medias: Arc<MediaService>,
    tasks: Arc<dyn PublisherTaskRepository>,
}

impl FetchPublisherTask {
    pub fn new(
        users: Arc<dyn UserRepository>,
        medias: Arc<MediaService>,
        tasks: Arc<dyn PublisherTaskRepository>,
    ) -> Self {
        Self {
            users,
            medias,
            tasks,
        }
    }
}

#[async_trait]
impl FetchPublisherTaskUseCase for FetchPublisherTask {
    async fn execute(&self, id: &str, load_fields: bool) -> Result<PublisherTaskView, ApiError> {
        let task = self
            .tasks
            .find_by_id(id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::not_found(format!("No publication task with id {id}.")))?;
        assemble_view(&self.users, &self.medias, task, load_fields).await
    }
}
