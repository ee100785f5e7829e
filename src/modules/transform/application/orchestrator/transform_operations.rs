use std::sync::Arc;

use crate::modules::auth::application::ports::outgoing::user_repository::UserRepository;
use crate::modules::dispatch::application::ports::outgoing::job_queue::JobQueue;
use crate::modules::email::application::services::task_notifier::TaskNotifier;
use crate::modules::media::application::services::media_service::MediaService;
use crate::modules::transform::application::domain::entities::ENCODERS;
use crate::modules::transform::application::ports::incoming::use_cases::{
    count_profiles::CountProfilesUseCase, count_tasks::CountTransformTasksUseCase,
    create_profile::CreateProfileUseCase, delete_profile::DeleteProfileUseCase,
    fetch_profile::FetchProfileUseCase, fetch_task::FetchTransformTaskUseCase,
    launch_transform::LaunchTransformUseCase, list_profiles::ListProfilesUseCase,
    list_tasks::ListTransformTasksUseCase, revoke_transform::RevokeTransformUseCase,
    transform_callback::TransformCallbackUseCase,
};
use crate::modules::transform::application::ports::outgoing::{
    profile_repository::TransformProfileRepository, task_repository::TransformTaskRepository,
};
use crate::modules::transform::application::use_cases::{
    count_profiles::CountProfiles, count_tasks::CountTransformTasks,
    create_profile::CreateProfile, delete_profile::DeleteProfile, fetch_profile::FetchProfile,
    fetch_task::FetchTransformTask, launch_transform::LaunchTransform,
    list_profiles::ListProfiles, list_tasks::ListTransformTasks,
    revoke_transform::RevokeTransform, transform_callback::TransformCallback,
};

/// The transformation use cases plus the static queue/encoder catalogues.
#[derive(Clone)]
pub struct TransformOperations {
    pub launch: Arc<dyn LaunchTransformUseCase>,
    pub callback: Arc<dyn TransformCallbackUseCase>,
    pub revoke: Arc<dyn RevokeTransformUseCase>,
    pub fetch_task: Arc<dyn FetchTransformTaskUseCase>,
    pub list_tasks: Arc<dyn ListTransformTasksUseCase>,
    pub count_tasks: Arc<dyn CountTransformTasksUseCase>,
    pub create_profile: Arc<dyn CreateProfileUseCase>,
    pub fetch_profile: Arc<dyn FetchProfileUseCase>,
    pub delete_profile: Arc<dyn DeleteProfileUseCase>,
    pub list_profiles: Arc<dyn ListProfilesUseCase>,
    pub count_profiles: Arc<dyn CountProfilesUseCase>,
    queues: Vec<String>,
}

impl TransformOperations {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: Arc<dyn UserRepository>,
        medias: Arc<MediaService>,
        profiles: Arc<dyn TransformProfileRepository>,
        tasks: Arc<dyn TransformTaskRepository>,
        queue: Arc<dyn JobQueue>,
        notifier: Arc<TaskNotifier>,
        api_url: &str,
        node_secret: &str,
        queues: Vec<String>,
    ) -> Self {
        Self {
            launch: Arc::new(LaunchTransform::new(
                users.clone(),
                medias.clone(),
                profiles.clone(),
                tasks.clone(),
                queue.clone(),
                api_url,
                node_secret,
                queues.clone(),
            )),
            callback: Arc::new(TransformCallback::new(
                users.clone(),
                medias.clone(),
                tasks.clone(),
                notifier,
            )),
            revoke: Arc::new(RevokeTransform::new(
                medias.clone(),
                tasks.clone(),
                queue,
            )),
            fetch_task: Arc::new(FetchTransformTask::new(
                users.clone(),
                medias.clone(),
                profiles.clone(),
                tasks.clone(),
            )),
            list_tasks: Arc::new(ListTransformTasks::new(
                users,
                medias,
                profiles.clone(),
                tasks.clone(),
            )),
            count_tasks: Arc::new(CountTransformTasks::new(tasks.clone())),
            create_profile: Arc::new(CreateProfile::new(profiles.clone())),
            fetch_profile: Arc::new(FetchProfile::new(profiles.clone())),
            delete_profile: Arc::new(DeleteProfile::new(profiles.clone(), tasks)),
            list_profiles: Arc::new(ListProfiles::new(profiles.clone())),
            count_profiles: Arc::new(CountProfiles::new(profiles)),
            queues,
        }
    }

    pub fn queues(&self) -> &[String] {
        &self.queues
    }

    pub fn encoders(&self) -> &'static [&'static str] {
        &ENCODERS
    }
}
