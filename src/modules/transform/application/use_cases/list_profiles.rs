use std::sync::Arc;

use async_trait::async_trait;

use crate::modules::transform::application::domain::entities::TransformProfile;
use crate::modules::transform::application::ports::incoming::use_cases::list_profiles::ListProfilesUseCase;
use crate::modules::transform::application::ports::outgoing::profile_repository::TransformProfileRepository;
use crate::shared::api::listing::{ListQuery, SortOrder};
use crate::shared::error::ApiError;

pub const PROFILE_SORT: [(&str, SortOrder); 2] = [
    ("encoder_name", SortOrder::Ascending),
    ("title", SortOrder::Ascending),
];

pub struct ListProfiles {
    profiles: Arc<dyn TransformProfileRepository>,
}

impl ListProfiles {
    pub fn new(profiles: Arc<dyn TransformProfileRepository>) -> Self {
        Self { profiles }
    }
}

#[async_trait]
impl ListProfilesUseCase for ListProfiles {
    async fn execute(&self, query: ListQuery) -> Result<Vec<TransformProfile>, ApiError> {
        let params = query.into_params(&PROFILE_SORT)?;
        self.profiles.list(params).await.map_err(ApiError::from)
    }
}
