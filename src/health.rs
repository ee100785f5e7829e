use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};

use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::auth::application::ports::outgoing::user_repository::UserRepository;
use crate::modules::auth::application::services::authenticator::AccessRule;
use crate::modules::media::application::ports::outgoing::media_repository::MediaRepository;
use crate::modules::publisher::application::ports::outgoing::task_repository::PublisherTaskRepository;
use crate::modules::transform::application::ports::outgoing::{
    profile_repository::TransformProfileRepository, task_repository::TransformTaskRepository,
};
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

/// Returned by the index routes; deployment hooks poll it as a liveness probe.
pub const ABOUT: &str = "Orchestra : OSCIED cluster orchestrator, Rust edition\n";

/// Wipes every collection, the testing/development reset behind POST /flush.
pub struct FlushDatabase {
    users: Arc<dyn UserRepository>,
    medias: Arc<dyn MediaRepository>,
    profiles: Arc<dyn TransformProfileRepository>,
    transform_tasks: Arc<dyn TransformTaskRepository>,
    publisher_tasks: Arc<dyn PublisherTaskRepository>,
}

impl FlushDatabase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        medias: Arc<dyn MediaRepository>,
        profiles: Arc<dyn TransformProfileRepository>,
        transform_tasks: Arc<dyn TransformTaskRepository>,
        publisher_tasks: Arc<dyn PublisherTaskRepository>,
    ) -> Self {
        Self {
            users,
            medias,
            profiles,
            transform_tasks,
            publisher_tasks,
        }
    }

    pub async fn flush_all(&self) -> Result<(), ApiError> {
        self.users.flush().await.map_err(ApiError::from)?;
        self.medias.flush().await.map_err(ApiError::from)?;
        self.profiles.flush().await.map_err(ApiError::from)?;
        self.transform_tasks.flush().await.map_err(ApiError::from)?;
        self.publisher_tasks.flush().await.map_err(ApiError::from)?;
        Ok(())
    }
}

#[get("/")]
pub async fn api_root() -> HttpResponse {
    ApiResponse::ok(ABOUT)
}

#[get("/index")]
pub async fn api_index() -> HttpResponse {
    ApiResponse::ok(ABOUT)
}

/// Wipe every collection; root only, meant for testing deployments.
#[post("/flush")]
pub async fn api_flush(
    credentials: BasicCredentials,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    data.authenticator
        .require(&credentials.0, &[AccessRule::AllowRoot])
        .await?;
    data.flush.flush_all().await?;
    tracing::info!("Orchestra database's collections dropped");
    Ok(ApiResponse::ok("Orchestra database flushed !"))
}
