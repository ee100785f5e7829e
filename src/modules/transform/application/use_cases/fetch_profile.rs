use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::transform::application::domain::entities::TransformProfile;
use crate::modules::transform::application::ports::incoming::use_cases::fetch_profile::FetchProfileUseCase;
use crate::modules::transform::application::ports::outgoing::profile_repository::TransformProfileRepository;
use crate::shared::error::ApiError;

pub struct FetchProfile {
    profiles: Arc<dyn TransformProfileRepository>,
}

impl FetchProfile {
    pub fn new(profiles: Arc<dyn TransformProfileRepository>) -> Self {
        Self { profiles }
    }
}

#[async_trait]
impl FetchProfileUseCase for FetchProfile {
    async fn execute(&self, id: Uuid) -> Result<TransformProfile, ApiError> {
        self.profiles
            .find_by_id(id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::not_found(format!("No transformation profile with id {id}.")))
    }
}
