use std::sync::Arc;

use async_trait::async_trait;

use crate::modules::transform::application::domain::entities::TransformProfile;
use crate::modules::transform::application::ports::incoming::use_cases::create_profile::{
    CreateProfileCommand, CreateProfileUseCase,
};
use crate::modules::transform::application::ports::outgoing::profile_repository::TransformProfileRepository;
use crate::shared::error::{ApiError, StoreError};

pub struct CreateProfile {
    profiles: Arc<dyn TransformProfileRepository>,
}

impl CreateProfile {
    pub fn new(profiles: Arc<dyn TransformProfileRepository>) -> Self {
        Self { profiles }
    }
}

#[async_trait]
impl CreateProfileUseCase for CreateProfile {
    async fn execute(&self, command: CreateProfileCommand) -> Result<TransformProfile, ApiError> {
        let profile = TransformProfile::new(
            &command.title,
            &command.description,
            &command.encoder_name,
            &command.encoder_string,
        );
        profile.is_valid()?;
        match self.profiles.save(&profile).await {
            Ok(()) => Ok(profile),
            Err(StoreError::Duplicate { .. }) => Err(ApiError::invalid(format!(
                "The title {} is already used by another transformation profile.",
                profile.title
            ))),
            Err(other) => Err(other.into()),
        }
    }
}
