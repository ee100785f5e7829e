pub mod config;
pub mod health;
pub mod modules;
pub mod shared;

use std::path::PathBuf;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::OrchestraConfig;
use crate::health::FlushDatabase;
use crate::modules::auth::adapter::outgoing::user_repository_memory::InMemoryUserRepository;
use crate::modules::auth::adapter::outgoing::user_repository_mongo::MongoUserRepository;
use crate::modules::auth::application::orchestrator::user_operations::UserOperations;
use crate::modules::auth::application::ports::outgoing::user_repository::UserRepository;
use crate::modules::auth::application::services::argon2_hasher::Argon2SecretHasher;
use crate::modules::auth::application::services::authenticator::Authenticator;
use crate::modules::dispatch::adapter::outgoing::job_queue_amqp::AmqpJobQueue;
use crate::modules::dispatch::adapter::outgoing::job_queue_mock::MockJobQueue;
use crate::modules::dispatch::application::ports::outgoing::job_queue::JobQueue;
use crate::modules::email::adapter::outgoing::smtp_sender::SmtpEmailSender;
use crate::modules::email::application::ports::outgoing::email_sender::EmailSender;
use crate::modules::email::application::services::task_notifier::TaskNotifier;
use crate::modules::media::adapter::outgoing::blob_store_fs::FsBlobStore;
use crate::modules::media::adapter::outgoing::blob_store_memory::InMemoryBlobStore;
use crate::modules::media::adapter::outgoing::media_repository_memory::InMemoryMediaRepository;
use crate::modules::media::adapter::outgoing::media_repository_mongo::MongoMediaRepository;
use crate::modules::media::application::domain::storage_layout::StorageLayout;
use crate::modules::media::application::orchestrator::media_operations::MediaOperations;
use crate::modules::media::application::ports::outgoing::blob_store::BlobStore;
use crate::modules::media::application::ports::outgoing::media_repository::MediaRepository;
use crate::modules::media::application::services::media_service::MediaService;
use crate::modules::publisher::adapter::outgoing::task_repository_memory::InMemoryPublisherTaskRepository;
use crate::modules::publisher::adapter::outgoing::task_repository_mongo::MongoPublisherTaskRepository;
use crate::modules::publisher::application::orchestrator::publisher_operations::PublisherOperations;
use crate::modules::publisher::application::ports::outgoing::task_repository::PublisherTaskRepository;
use crate::modules::scaling::adapter::outgoing::juju_cluster::JujuClusterAdapter;
use crate::modules::scaling::adapter::outgoing::simulated_cluster::SimulatedCluster;
use crate::modules::scaling::application::domain::events_table::EventsTable;
use crate::modules::scaling::application::loops::{spawn_environment_loops, EnvironmentLoops};
use crate::modules::scaling::application::orchestrator::scaling_operations::ScalingOperations;
use crate::modules::scaling::application::ports::outgoing::cluster_adapter::ClusterAdapter;
use crate::modules::scaling::application::services::scaling_service::ScalingService;
use crate::modules::transform::adapter::outgoing::profile_repository_memory::InMemoryTransformProfileRepository;
use crate::modules::transform::adapter::outgoing::profile_repository_mongo::MongoTransformProfileRepository;
use crate::modules::transform::adapter::outgoing::task_repository_memory::InMemoryTransformTaskRepository;
use crate::modules::transform::adapter::outgoing::task_repository_mongo::MongoTransformTaskRepository;
use crate::modules::transform::application::orchestrator::transform_operations::TransformOperations;
use crate::modules::transform::application::ports::outgoing::profile_repository::TransformProfileRepository;
use crate::modules::transform::application::ports::outgoing::task_repository::TransformTaskRepository;
use crate::shared::clock::SimulatedClock;

#[cfg(test)]
mod tests;

/// Shared state of every HTTP handler: the authenticator plus the composed
/// use cases of each domain module.
#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<Authenticator>,
    pub users: UserOperations,
    pub medias: MediaOperations,
    pub transform: TransformOperations,
    pub publisher: PublisherOperations,
    pub scaling: ScalingOperations,
    pub flush: Arc<FlushDatabase>,
}

struct Repositories {
    users: Arc<dyn UserRepository>,
    medias: Arc<dyn MediaRepository>,
    profiles: Arc<dyn TransformProfileRepository>,
    transform_tasks: Arc<dyn TransformTaskRepository>,
    publisher_tasks: Arc<dyn PublisherTaskRepository>,
}

async fn connect_repositories(config: &OrchestraConfig) -> anyhow::Result<Repositories> {
    if config.is_mock() {
        warn!("MongoDB is not set in configuration ... mocking");
        return Ok(Repositories {
            users: Arc::new(InMemoryUserRepository::new()),
            medias: Arc::new(InMemoryMediaRepository::new()),
            profiles: Arc::new(InMemoryTransformProfileRepository::new()),
            transform_tasks: Arc::new(InMemoryTransformTaskRepository::new()),
            publisher_tasks: Arc::new(InMemoryPublisherTaskRepository::new()),
        });
    }
    let mut options = mongodb::options::ClientOptions::parse(&config.mongo_admin_connection)
        .await
        .context("Cannot parse the MongoDB connection string")?;
    options.connect_timeout = Some(config.external_timeout());
    options.server_selection_timeout = Some(config.external_timeout());
    let client = mongodb::Client::with_options(options)?;
    let database = client.database(crate::shared::store::DATABASE);

    let users = MongoUserRepository::new(&database);
    users.ensure_indexes().await?;
    let medias = MongoMediaRepository::new(&database);
    medias.ensure_indexes().await?;
    let profiles = MongoTransformProfileRepository::new(&database);
    profiles.ensure_indexes().await?;
    Ok(Repositories {
        users: Arc::new(users),
        medias: Arc::new(medias),
        profiles: Arc::new(profiles),
        transform_tasks: Arc::new(MongoTransformTaskRepository::new(&database)),
        publisher_tasks: Arc::new(MongoPublisherTaskRepository::new(&database)),
    })
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = OrchestraConfig::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!(bind = %config.bind, mock = config.is_mock(), "Starting Orchestra");

    if config.storage_address.is_empty() && !config.is_mock() {
        anyhow::bail!("Shared storage is not set in configuration ... exiting");
    }

    let repositories = connect_repositories(&config).await?;
    let layout = StorageLayout::new(
        &config.storage_address,
        &config.storage_mountpoint,
        &config.storage_path,
    );

    let blobs: Arc<dyn BlobStore> = if config.is_mock() {
        Arc::new(InMemoryBlobStore::new())
    } else {
        Arc::new(FsBlobStore::new(layout.clone(), config.external_timeout()))
    };

    let queue: Arc<dyn JobQueue> = if config.is_mock() {
        Arc::new(MockJobQueue::new())
    } else {
        if config.rabbit_connection.is_empty() {
            anyhow::bail!("RabbitMQ is not set in configuration ... exiting");
        }
        Arc::new(
            AmqpJobQueue::connect(&config.rabbit_connection, config.external_timeout()).await?,
        )
    };

    let cluster: Arc<dyn ClusterAdapter> = if config.is_mock() {
        Arc::new(SimulatedCluster::new("default"))
    } else {
        Arc::new(JujuClusterAdapter::new(
            &config.juju_config_file,
            &config.charms_repository,
            &config.charms_release,
            config.external_timeout(),
        ))
    };

    let notifier = if config.email_server.is_empty() {
        Arc::new(TaskNotifier::disabled())
    } else {
        let sender: Arc<dyn EmailSender> = Arc::new(SmtpEmailSender::new(
            &config.email_server,
            config.email_tls,
            &config.email_username,
            &config.email_password,
            &config.email_address,
        )?);
        Arc::new(TaskNotifier::new(Some(sender)))
    };

    let hasher = Arc::new(Argon2SecretHasher::new());
    let authenticator = Arc::new(Authenticator::new(
        repositories.users.clone(),
        hasher.clone(),
        &config.root_secret,
        &config.node_secret,
    ));
    let media_store = Arc::new(MediaService::new(
        repositories.medias.clone(),
        repositories.users.clone(),
        blobs,
        repositories.transform_tasks.clone(),
        repositories.publisher_tasks.clone(),
        layout,
    ));

    let users = UserOperations::new(repositories.users.clone(), hasher);
    let medias = MediaOperations::new(media_store.clone());
    let transform = TransformOperations::new(
        repositories.users.clone(),
        media_store.clone(),
        repositories.profiles.clone(),
        repositories.transform_tasks.clone(),
        queue.clone(),
        notifier.clone(),
        &config.api_url,
        &config.node_secret,
        config.transform_queues.clone(),
    );
    let publisher = PublisherOperations::new(
        repositories.users.clone(),
        media_store.clone(),
        repositories.publisher_tasks.clone(),
        queue,
        notifier,
        &config.api_url,
        &config.node_secret,
        config.publisher_queues.clone(),
    );
    let scaling_context = Arc::new(ScalingService::new(
        cluster,
        &config.transform_service,
        &config.publisher_service,
    ));
    let scaling = ScalingOperations::new(scaling_context.clone());
    let flush = Arc::new(FlushDatabase::new(
        repositories.users.clone(),
        repositories.medias.clone(),
        repositories.profiles.clone(),
        repositories.transform_tasks.clone(),
        repositories.publisher_tasks.clone(),
    ));

    let state = AppState {
        authenticator,
        users,
        medias,
        transform: transform.clone(),
        publisher,
        scaling,
        flush,
    };

    // One capacity/observer/janitor loop triple per scheduled environment.
    let clock = SimulatedClock::new(config.time_speedup);
    for (environment, raw_events) in config.load_events()? {
        let events = EventsTable::from_raw(&raw_events)?;
        spawn_environment_loops(EnvironmentLoops {
            environment,
            events,
            clock: clock.clone(),
            checks_per_hour: config.checks_per_hour,
            scaling: scaling_context.clone(),
            revoke_transform: transform.revoke.clone(),
            medias: media_store.clone(),
            transform_tasks: repositories.transform_tasks.clone(),
            publisher_tasks: repositories.publisher_tasks.clone(),
            statistics_path: PathBuf::from(&config.statistics_path),
            statistics_maxlen: 30 * config.checks_per_hour as usize,
            task_stall: std::time::Duration::from_secs(config.task_stall_seconds),
            max_output_media_assets: config.max_output_media_assets,
        });
    }

    info!("Start REST API");
    let bind = config.bind.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(crate::shared::api::json_config::custom_json_config())
            .configure(init_routes)
    })
    .bind(bind)?
    .run()
    .await?;
    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    use crate::modules::auth::adapter::incoming::web::routes as users;
    use crate::modules::media::adapter::incoming::web::routes as medias;
    use crate::modules::publisher::adapter::incoming::web::routes as publisher;
    use crate::modules::scaling::adapter::incoming::web::routes::{environments, units};
    use crate::modules::transform::adapter::incoming::web::routes as transform;

    // System
    cfg.service(health::api_root);
    cfg.service(health::api_index);
    cfg.service(health::api_flush);
    // Users
    cfg.service(users::login::user_login);
    cfg.service(users::count_users::user_count);
    cfg.service(users::list_users::user_list);
    cfg.service(users::create_user::user_create);
    cfg.service(users::fetch_user::user_get);
    cfg.service(users::update_user::user_update);
    cfg.service(users::delete_user::user_delete);
    // Medias
    cfg.service(medias::count_medias::media_count);
    cfg.service(medias::list_medias_head::media_head);
    cfg.service(medias::list_medias::media_list);
    cfg.service(medias::register_media::media_create);
    cfg.service(medias::get_media_head::media_get_head);
    cfg.service(medias::get_media::media_get);
    cfg.service(medias::update_media::media_update);
    cfg.service(medias::delete_media::media_delete);
    // Environments
    cfg.service(environments::count_environments::environment_count);
    cfg.service(environments::list_environments_head::environment_head);
    cfg.service(environments::list_environments::environment_list);
    cfg.service(environments::add_environment::environment_create);
    cfg.service(environments::get_environment_head::environment_get_head);
    cfg.service(environments::get_environment::environment_get);
    cfg.service(environments::destroy_environment::environment_delete);
    // Transformation profiles
    cfg.service(transform::profile_encoders::profile_encoders);
    cfg.service(transform::count_profiles::profile_count);
    cfg.service(transform::list_profiles::profile_list);
    cfg.service(transform::create_profile::profile_create);
    cfg.service(transform::get_profile::profile_get);
    cfg.service(transform::delete_profile::profile_delete);
    // Transformation units
    cfg.service(units::transform_unit_count::transform_unit_count);
    cfg.service(units::transform_unit_list::transform_unit_list);
    cfg.service(units::transform_unit_ensure::transform_unit_ensure);
    cfg.service(units::transform_unit_remove_service::transform_unit_remove_service);
    cfg.service(units::transform_unit_get::transform_unit_get);
    cfg.service(units::transform_unit_destroy::transform_unit_destroy);
    // Transformation tasks
    cfg.service(transform::queues::transform_queues);
    cfg.service(transform::count_tasks::task_count);
    cfg.service(transform::list_tasks_head::task_head);
    cfg.service(transform::list_tasks::task_list);
    cfg.service(transform::launch_task::task_launch);
    cfg.service(transform::get_task_head::task_get_head);
    cfg.service(transform::get_task::task_get);
    cfg.service(transform::revoke_task::task_revoke);
    cfg.service(transform::transform_callback::transform_callback);
    // Publication units
    cfg.service(units::publisher_unit_count::publisher_unit_count);
    cfg.service(units::publisher_unit_list::publisher_unit_list);
    cfg.service(units::publisher_unit_ensure::publisher_unit_ensure);
    cfg.service(units::publisher_unit_remove_service::publisher_unit_remove_service);
    cfg.service(units::publisher_unit_get::publisher_unit_get);
    cfg.service(units::publisher_unit_destroy::publisher_unit_destroy);
    // Publication tasks
    cfg.service(publisher::queues::publisher_queues);
    cfg.service(publisher::count_tasks::task_count);
    cfg.service(publisher::list_tasks_head::task_head);
    cfg.service(publisher::list_tasks::task_list);
    cfg.service(publisher::launch_task::task_launch);
    cfg.service(publisher::get_task_head::task_get_head);
    cfg.service(publisher::get_task::task_get);
    cfg.service(publisher::revoke_task::task_revoke);
    cfg.service(publisher::publisher_callback::publisher_callback);
    cfg.service(publisher::revoke_callback::publisher_revoke_callback);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(error) = start() {
        eprintln!("Error starting Orchestra: {error}");
        std::process::exit(1);
    }
}
