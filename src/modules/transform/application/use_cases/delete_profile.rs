use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::modules::transform::application::domain::entities::TransformProfile;
use crate::modules::transform::application::ports::incoming::use_cases::delete_profile::DeleteProfileUseCase;
use crate::modules::transform::application::ports::outgoing::{
    profile_repository::TransformProfileRepository, task_repository::TransformTaskRepository,
};
use crate::shared::error::ApiError;

pub struct DeleteProfile {
    profiles: Arc<dyn TransformProfileRepository>,
    tasks: Arc<dyn TransformTaskRepository>,
}

impl DeleteProfile {
    pub fn new(
        profiles: Arc<dyn TransformProfileRepository>,
        tasks: Arc<dyn TransformTaskRepository>,
    ) -> Self {
        Self { profiles, tasks }
    }
}

#[async_trait]
impl DeleteProfileUseCase for DeleteProfile {
    async fn execute(&self, id: Uuid) -> Result<TransformProfile, ApiError> {
        let profile = self
            .profiles
            .find_by_id(id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| {
                ApiError::not_found(format!("No transformation profile with id {id}."))
            })?;
        let live = json!({
            "profile_id": id.to_string(),
            "status": {"$in": ["PENDING", "PROGRESS"]},
        });
        if let Some(task) = self.tasks.find_one(live).await.map_err(ApiError::from)? {
            return Err(ApiError::invalid(format!(
                "Cannot delete the profile, it is actually referenced by transformation task with id {} and status {}.",
                task.id,
                task.status.as_str()
            )));
        }
        self.profiles.delete(id).await.map_err(ApiError::from)?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::fixtures::TransformFixture;

    #[tokio::test]
    async fn profiles_with_live_tasks_cannot_be_deleted() {
        let builder = TestAppStateBuilder::default();
        let fixture = TransformFixture::seed(&builder).await;
        fixture.launch(&builder).await;

        let err = builder
            .transform
            .delete_profile
            .execute(fixture.profile.id)
            .await
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("referenced by transformation task"));
    }

    #[tokio::test]
    async fn unreferenced_profiles_delete_cleanly() {
        let builder = TestAppStateBuilder::default();
        let fixture = TransformFixture::seed(&builder).await;
        let deleted = builder
            .transform
            .delete_profile
            .execute(fixture.profile.id)
            .await
            .unwrap();
        assert_eq!(deleted.id, fixture.profile.id);
    }
}
