use serde_json::{json, Map, Value};

use crate::modules::auth::application::domain::entities::User;
use crate::modules::media::application::domain::entities::Media;
use crate::modules::media::application::ports::incoming::use_cases::register_media::RegisterMediaCommand;
use crate::modules::publisher::application::domain::entities::PublisherTask;
use crate::modules::publisher::application::ports::incoming::use_cases::launch_publish::LaunchPublishCommand;
use crate::modules::transform::application::domain::entities::{TransformProfile, TransformTask};
use crate::modules::transform::application::ports::incoming::use_cases::create_profile::CreateProfileCommand;
use crate::modules::transform::application::ports::incoming::use_cases::launch_transform::LaunchTransformCommand;
use crate::shared::error::ApiError;
use crate::tests::support::app_state_builder::TestAppStateBuilder;

fn titled(title: &str) -> Map<String, Value> {
    let mut metadata = Map::new();
    metadata.insert("title".to_string(), json!(title));
    metadata
}

/// A user, a READY input media and a profile, the preconditions of every
/// transformation flow.
pub struct TransformFixture {
    pub user: User,
    pub media_in: Media,
    pub profile: TransformProfile,
}

impl TransformFixture {
    pub async fn seed(builder: &TestAppStateBuilder) -> Self {
        let user = builder.seed_user("a@b.com", "s3cret", false).await;
        let media_in = builder
            .medias
            .register
            .execute(RegisterMediaCommand {
                user_id: user.id,
                uri: "uri://input".to_string(),
                filename: "input.mp4".to_string(),
                metadata: titled("Input"),
            })
            .await
            .expect("seed input media");
        let profile = builder
            .transform
            .create_profile
            .execute(CreateProfileCommand {
                title: "To MP4".to_string(),
                description: "Convert to MP4".to_string(),
                encoder_name: "ffmpeg".to_string(),
                encoder_string: "-f mp4".to_string(),
            })
            .await
            .expect("seed profile");
        Self {
            user,
            media_in,
            profile,
        }
    }

    pub async fn launch(&self, builder: &TestAppStateBuilder) -> TransformTask {
        builder
            .transform
            .launch
            .execute(LaunchTransformCommand {
                user_id: self.user.id,
                media_in_id: self.media_in.id,
                profile_id: self.profile.id,
                filename: "out.mp4".to_string(),
                metadata: titled("Output"),
                send_email: false,
                queue: "transform".to_string(),
                callback_path: "/transform/callback".to_string(),
            })
            .await
            .expect("launch transform")
    }
}

/// A user and a READY media, the preconditions of every publication flow.
pub struct PublishFixture {
    pub user: User,
    pub media: Media,
}

impl PublishFixture {
    pub async fn seed(builder: &TestAppStateBuilder) -> Self {
        let user = builder.seed_user("a@b.com", "s3cret", false).await;
        let media = builder
            .medias
            .register
            .execute(RegisterMediaCommand {
                user_id: user.id,
                uri: "uri://asset".to_string(),
                filename: "asset.mp4".to_string(),
                metadata: titled("Asset"),
            })
            .await
            .expect("seed media");
        Self { user, media }
    }

    pub async fn try_launch(
        &self,
        builder: &TestAppStateBuilder,
    ) -> Result<PublisherTask, ApiError> {
        builder
            .publisher
            .launch
            .execute(LaunchPublishCommand {
                user_id: self.user.id,
                media_id: self.media.id,
                send_email: false,
                queue: "publisher".to_string(),
                callback_path: "/publisher/callback".to_string(),
            })
            .await
    }

    pub async fn launch(&self, builder: &TestAppStateBuilder) -> PublisherTask {
        self.try_launch(builder).await.expect("launch publish")
    }
}
