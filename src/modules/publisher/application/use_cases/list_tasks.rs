use std::sync::Arc;

use async_trait::async_trait;

use crate::modules::auth::application::ports::outgoing::user_repository::UserRepository;
use crate::modules::media::application::services::media_service::MediaService;
use crate::modules::publisher::application::ports::incoming::use_cases::fetch_task::PublisherTaskView;
use crate::modules::publisher::application::ports::incoming::use_cases::list_tasks::ListPublisherTasksUseCase;
use crate::modules::publisher::application::ports::outgoing::task_repository::PublisherTaskRepository;
use crate::modules::publisher::application::use_cases::fetch_task::assemble_view;
use crate::shared::api::listing::{ListQuery, SortOrder};
use crate::shared::error::ApiError;

pub const TASK_SORT: [(&str, SortOrder); 1] = [("statistic.add_date", SortOrder::Descending)];

pub struct ListPublisherTasks {
    users: Arc<dyn UserRepository>,
    medias: Arc<MediaService>,
    tasks: Arc<dyn PublisherTaskRepository>,
}

impl ListPublisherTasks {
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
impl ListPublisherTasksUseCase for ListPublisherTasks {
    async fn execute(
        &self,
        query: ListQuery,
        load_fields: bool,
    ) -> Result<Vec<PublisherTaskView>, ApiError> {
        let params = query.into_params(&TASK_SORT)?;
        let tasks = self.tasks.list(params).await.map_err(ApiError::from)?;
        let mut views = Vec::with_capacity(tasks.len());
        for task in tasks {
            views.push(assemble_view(&self.users, &self.medias, task, load_fields).await?);
        }
        Ok(views)
    }
}
