use std::sync::Arc;

use actix_web::web;

use crate::health::FlushDatabase;
use crate::modules::auth::adapter::outgoing::user_repository_memory::InMemoryUserRepository;
use crate::modules::auth::application::domain::entities::User;
use crate::modules::auth::application::orchestrator::user_operations::UserOperations;
use crate::modules::auth::application::ports::incoming::use_cases::{
    create_user::CreateUserUseCase, delete_user::DeleteUserUseCase, fetch_user::FetchUserUseCase,
    list_users::ListUsersUseCase, update_user::UpdateUserUseCase,
};
use crate::modules::auth::application::ports::outgoing::secret_hasher::SecretHasher;
use crate::modules::auth::application::ports::outgoing::user_repository::UserRepository;
use crate::modules::auth::application::services::argon2_hasher::Argon2SecretHasher;
use crate::modules::auth::application::services::authenticator::Authenticator;
use crate::modules::dispatch::adapter::outgoing::job_queue_mock::MockJobQueue;
use crate::modules::email::application::services::task_notifier::TaskNotifier;
use crate::modules::media::adapter::outgoing::blob_store_memory::InMemoryBlobStore;
use crate::modules::media::adapter::outgoing::media_repository_memory::InMemoryMediaRepository;
use crate::modules::media::application::domain::storage_layout::StorageLayout;
use crate::modules::media::application::orchestrator::media_operations::MediaOperations;
use crate::modules::media::application::ports::incoming::use_cases::{
    delete_media::DeleteMediaUseCase, register_media::RegisterMediaUseCase,
};
use crate::modules::media::application::services::media_service::MediaService;
use crate::modules::publisher::adapter::outgoing::task_repository_memory::InMemoryPublisherTaskRepository;
use crate::modules::publisher::application::orchestrator::publisher_operations::PublisherOperations;
use crate::modules::publisher::application::ports::incoming::use_cases::launch_publish::LaunchPublishUseCase;
use crate::modules::scaling::adapter::outgoing::simulated_cluster::SimulatedCluster;
use crate::modules::scaling::application::orchestrator::scaling_operations::ScalingOperations;
use crate::modules::scaling::application::services::scaling_service::ScalingService;
use crate::modules::transform::adapter::outgoing::profile_repository_memory::InMemoryTransformProfileRepository;
use crate::modules::transform::adapter::outgoing::task_repository_memory::InMemoryTransformTaskRepository;
use crate::modules::transform::application::orchestrator::transform_operations::TransformOperations;
use crate::modules::transform::application::ports::incoming::use_cases::{
    create_profile::CreateProfileUseCase, delete_profile::DeleteProfileUseCase,
    launch_transform::LaunchTransformUseCase, transform_callback::TransformCallbackUseCase,
};
use crate::AppState;

pub const TEST_ROOT_SECRET: &str = "test_root";
pub const TEST_NODE_SECRET: &str = "test_node";
pub const TEST_API_URL: &str = "http://127.0.0.1:5000";

/// Builds a fully wired `AppState` over in-memory adapters (the same mock
/// set the orchestrator uses without a store DSN). Every orchestrated use
/// case defaults to its real implementation and can be substituted with a
/// per-scenario mock through the `with_*` methods, so route tests exercise
/// a handler against arbitrary use-case behaviour.
pub struct TestAppStateBuilder {
    pub users_repo: Arc<InMemoryUserRepository>,
    pub media_repo: Arc<InMemoryMediaRepository>,
    pub profile_repo: Arc<InMemoryTransformProfileRepository>,
    pub transform_tasks: Arc<InMemoryTransformTaskRepository>,
    pub publisher_tasks: Arc<InMemoryPublisherTaskRepository>,
    pub queue: Arc<MockJobQueue>,
    pub blobs: Arc<InMemoryBlobStore>,
    pub cluster: Arc<SimulatedCluster>,
    pub users: UserOperations,
    pub medias: MediaOperations,
    pub transform: TransformOperations,
    pub publisher: PublisherOperations,
    pub scaling: ScalingOperations,
    hasher: Arc<Argon2SecretHasher>,
    media_store: Arc<MediaService>,
    authenticator: Arc<Authenticator>,
    flush: Arc<FlushDatabase>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        let users_repo = Arc::new(InMemoryUserRepository::new());
        let media_repo = Arc::new(InMemoryMediaRepository::new());
        let profile_repo = Arc::new(InMemoryTransformProfileRepository::new());
        let transform_tasks = Arc::new(InMemoryTransformTaskRepository::new());
        let publisher_tasks = Arc::new(InMemoryPublisherTaskRepository::new());
        let queue = Arc::new(MockJobQueue::new());
        let blobs = Arc::new(InMemoryBlobStore::new());
        let cluster = Arc::new(SimulatedCluster::new("default"));
        let hasher = Arc::new(Argon2SecretHasher::new());
        let notifier = Arc::new(TaskNotifier::disabled());

        let media_store = Arc::new(MediaService::new(
            media_repo.clone(),
            users_repo.clone(),
            blobs.clone(),
            transform_tasks.clone(),
            publisher_tasks.clone(),
            StorageLayout::new("10.0.0.9", "medias_volume", "/mnt/storage"),
        ));
        let authenticator = Arc::new(Authenticator::new(
            users_repo.clone(),
            hasher.clone(),
            TEST_ROOT_SECRET,
            TEST_NODE_SECRET,
        ));
        let users = UserOperations::new(users_repo.clone(), hasher.clone());
        let medias = MediaOperations::new(media_store.clone());
        let transform = TransformOperations::new(
            users_repo.clone(),
            media_store.clone(),
            profile_repo.clone(),
            transform_tasks.clone(),
            queue.clone(),
            notifier.clone(),
            TEST_API_URL,
            TEST_NODE_SECRET,
            vec!["transform".to_string()],
        );
        let publisher = PublisherOperations::new(
            users_repo.clone(),
            media_store.clone(),
            publisher_tasks.clone(),
            queue.clone(),
            notifier,
            TEST_API_URL,
            TEST_NODE_SECRET,
            vec!["publisher".to_string()],
        );
        let scaling = ScalingOperations::new(Arc::new(ScalingService::new(
            cluster.clone(),
            "oscied-transform",
            "oscied-publisher",
        )));
        let flush = Arc::new(FlushDatabase::new(
            users_repo.clone(),
            media_repo.clone(),
            profile_repo.clone(),
            transform_tasks.clone(),
            publisher_tasks.clone(),
        ));

        Self {
            users_repo,
            media_repo,
            profile_repo,
            transform_tasks,
            publisher_tasks,
            queue,
            blobs,
            cluster,
            users,
            medias,
            transform,
            publisher,
            scaling,
            hasher,
            media_store,
            authenticator,
            flush,
        }
    }
}

impl TestAppStateBuilder {
    /// Store a user with a properly hashed secret, bypassing the API.
    pub async fn seed_user(&self, mail: &str, secret: &str, admin_platform: bool) -> User {
        let mut user = User::new("Test", "User", mail, "placeholder", admin_platform);
        user.secret = self.hasher.hash(secret).expect("hashing works");
        self.users_repo.save(&user).await.expect("seed user");
        user
    }

    /// The shared media store, for fixtures and direct assertions.
    pub fn media_store(&self) -> Arc<MediaService> {
        self.media_store.clone()
    }

    // Per-scenario use-case substitution ---------------------------------

    pub fn with_create_user(mut self, uc: impl CreateUserUseCase + 'static) -> Self {
        self.users.create = Arc::new(uc);
        self
    }

    pub fn with_fetch_user(mut self, uc: impl FetchUserUseCase + 'static) -> Self {
        self.users.fetch = Arc::new(uc);
        self
    }

    pub fn with_update_user(mut self, uc: impl UpdateUserUseCase + 'static) -> Self {
        self.users.update = Arc::new(uc);
        self
    }

    pub fn with_delete_user(mut self, uc: impl DeleteUserUseCase + 'static) -> Self {
        self.users.delete = Arc::new(uc);
        self
    }

    pub fn with_list_users(mut self, uc: impl ListUsersUseCase + 'static) -> Self {
        self.users.list = Arc::new(uc);
        self
    }

    pub fn with_register_media(mut self, uc: impl RegisterMediaUseCase + 'static) -> Self {
        self.medias.register = Arc::new(uc);
        self
    }

    pub fn with_delete_media(mut self, uc: impl DeleteMediaUseCase + 'static) -> Self {
        self.medias.delete = Arc::new(uc);
        self
    }

    pub fn with_launch_transform(mut self, uc: impl LaunchTransformUseCase + 'static) -> Self {
        self.transform.launch = Arc::new(uc);
        self
    }

    pub fn with_transform_callback(mut self, uc: impl TransformCallbackUseCase + 'static) -> Self {
        self.transform.callback = Arc::new(uc);
        self
    }

    pub fn with_create_profile(mut self, uc: impl CreateProfileUseCase + 'static) -> Self {
        self.transform.create_profile = Arc::new(uc);
        self
    }

    pub fn with_delete_profile(mut self, uc: impl DeleteProfileUseCase + 'static) -> Self {
        self.transform.delete_profile = Arc::new(uc);
        self
    }

    pub fn with_launch_publish(mut self, uc: impl LaunchPublishUseCase + 'static) -> Self {
        self.publisher.launch = Arc::new(uc);
        self
    }

    pub fn build(&self) -> web::Data<AppState> {
        web::Data::new(AppState {
            authenticator: self.authenticator.clone(),
            users: self.users.clone(),
            medias: self.medias.clone(),
            transform: self.transform.clone(),
            publisher: self.publisher.clone(),
            scaling: self.scaling.clone(),
            flush: self.flush.clone(),
        })
    }
}
