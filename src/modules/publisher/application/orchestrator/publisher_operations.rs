use std::sync::Arc;

use crate::modules::auth::application::ports::outgoing::user_repository::UserRepository;
use crate::modules::dispatch::application::ports::outgoing::job_queue::JobQueue;
use crate::modules::email::application::services::task_notifier::TaskNotifier;
use crate::modules::media::application::services::media_service::MediaService;
use crate::modules::publisher::application::ports::incoming::use_cases::{
    count_tasks::CountPublisherTasksUseCase, fetch_task::FetchPublisherTaskUseCase,
    launch_publish::LaunchPublishUseCase, list_tasks::ListPublisherTasksUseCase,
    publisher_callback::PublisherCallbackUseCase, revoke_callback::RevokeCallbackUseCase,
    revoke_publish::RevokePublishUseCase,
};
use crate::modules::publisher::application::ports::outgoing::task_repository::PublisherTaskRepository;
use crate::modules::publisher::application::use_cases::{
    count_tasks::CountPublisherTasks, fetch_task::FetchPublisherTask,
    launch_publish::LaunchPublish, list_tasks::ListPublisherTasks,
    publisher_callback::PublisherCallback, revoke_callback::RevokeCallback,
    revoke_publish::RevokePublish,
};

/// The publication use cases plus the static queue catalogue.
#[derive(Clone)]
pub struct PublisherOperations {
    pub launch: Arc<dyn LaunchPublishUseCase>,
    pub callback: Arc<dyn PublisherCallbackUseCase>,
    pub revoke_callback: Arc<dyn RevokeCallbackUseCase>,
    pub revoke: Arc<dyn RevokePublishUseCase>,
    pub fetch_task: Arc<dyn FetchPublisherTaskUseCase>,
    pub list_tasks: Arc<dyn ListPublisherTasksUseCase>,
    pub count_tasks: Arc<dyn CountPublisherTasksUseCase>,
    queues: Vec<String>,
}

impl PublisherOperations {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: Arc<dyn UserRepository>,
        medias: Arc<MediaService>,
        tasks: Arc<dyn PublisherTaskRepository>,
        queue: Arc<dyn JobQueue>,
        notifier: Arc<TaskNotifier>,
        api_url: &str,
        node_secret: &str,
        queues: Vec<String>,
    ) -> Self {
        Self {
            launch: Arc::new(LaunchPublish::new(
                users.clone(),
                medias.clone(),
                tasks.clone(),
                queue.clone(),
                api_url,
                node_secret,
                queues.clone(),
            )),
            callback: Arc::new(PublisherCallback::new(
                users.clone(),
                medias.clone(),
                tasks.clone(),
                notifier,
            )),
            revoke_callback: Arc::new(RevokeCallback::new(medias.clone(), tasks.clone())),
            revoke: Arc::new(RevokePublish::new(
                tasks.clone(),
                queue,
                api_url,
                node_secret,
            )),
            fetch_task: Arc::new(FetchPublisherTask::new(
                users.clone(),
                medias.clone(),
                tasks.clone(),
            )),
            list_tasks: Arc::new(ListPublisherTasks::new(users, medias, tasks.clone())),
            count_tasks: Arc::new(CountPublisherTasks::new(tasks)),
            queues,
        }
    }

    pub fn queues(&self) -> &[String] {
        &self.queues
    }
}
