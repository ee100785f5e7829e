use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::modules::media::application::domain::entities::{Media, MediaStatus};
use crate::modules::media::application::ports::incoming::use_cases::register_media::{
    RegisterMediaCommand, RegisterMediaUseCase,
};
use crate::modules::media::application::services::media_service::MediaService;
use crate::shared::error::ApiError;

pub struct RegisterMedia {
    store: Arc<MediaService>,
}

impl RegisterMedia {
    pub fn new(store: Arc<MediaService>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RegisterMediaUseCase for RegisterMedia {
    async fn execute(&self, command: RegisterMediaCommand) -> Result<Media, ApiError> {
        let mut media = Media::new(
            command.user_id,
            None,
            &command.uri,
            &command.filename,
            command.metadata,
            MediaStatus::Ready,
        );
        self.store.save_media(&mut media).await?;
        info!(media = %media.id, uri = %media.uri, "Media asset registered");
        Ok(media)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};
    use uuid::Uuid;

    use crate::tests::support::app_state_builder::TestAppStateBuilder;

    fn metadata(title: &str) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("title".to_string(), json!(title));
        map
    }

    #[tokio::test]
    async fn registration_probes_and_normalizes() {
        let builder = TestAppStateBuilder::default();
        let use_case = RegisterMedia::new(builder.media_store());
        let media = use_case
            .execute(RegisterMediaCommand {
                user_id: Uuid::new_v4(),
                uri: "uri://one".to_string(),
                filename: "clip one.mp4".to_string(),
                metadata: metadata("Clip One"),
            })
            .await
            .unwrap();
        assert_eq!(media.filename, "clip_one.mp4");
        assert_eq!(media.status, MediaStatus::Ready);
        assert!(media.metadata.contains_key("size"));
    }

    #[tokio::test]
    async fn duplicate_uris_are_refused() {
        let builder = TestAppStateBuilder::default();
        let use_case = RegisterMedia::new(builder.media_store());
        let command = RegisterMediaCommand {
            user_id: Uuid::new_v4(),
            uri: "uri://same".to_string(),
            filename: "a.mp4".to_string(),
            metadata: metadata("A"),
        };
        use_case.execute(command.clone()).await.unwrap();
        let err = use_case.execute(command).await.unwrap_err();
        assert!(err.to_string().contains("uri://same"));
    }
}
