use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::modules::transform::application::ports::incoming::use_cases::count_profiles::CountProfilesUseCase;
use crate::modules::transform::application::ports::outgoing::profile_repository::TransformProfileRepository;
use crate::shared::error::ApiError;

pub struct CountProfiles {
    profiles: Arc<dyn TransformProfileRepository>,
}

impl CountProfiles {
    pub fn new(profiles: Arc<dyn TransformProfileRepository>) -> Self {
        Self { profiles }
    }
}

#[async_trait]
impl CountProfilesUseCase for CountProfiles {
    async fn execute(&self, filter: Option<Value>) -> Result<u64, ApiError> {
        self.profiles.count(filter).await.map_err(ApiError::from)
    }
}
