use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::auth::application::services::authenticator::AccessRule;
use crate::modules::media::application::ports::incoming::use_cases::register_media::RegisterMediaCommand;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterMediaRequest {
    pub uri: String,
    pub filename: String,
    pub metadata: Map<String, Value>,
}

/// Register a media asset already uploaded to the shared storage.
#[post("/media")]
pub async fn media_create(
    credentials: BasicCredentials,
    body: web::Json<RegisterMediaRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let principal = data
        .authenticator
        .require(&credentials.0, &[AccessRule::AllowAny])
        .await?;
    let request = body.into_inner();
    let media = data
        .medias
        .register
        .execute(RegisterMediaCommand {
            user_id: principal.user_id(),
            uri: request.uri,
            filename: request.filename,
            metadata: request.metadata,
        })
        .await?;
    let view = data.medias.fetch.execute(media.id, false).await?;
    Ok(ApiResponse::ok(view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use serde_json::json;

    use crate::modules::media::application::domain::entities::Media;
    use crate::modules::media::application::ports::incoming::use_cases::register_media::RegisterMediaUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::basic_auth;

    struct MockRegisterMediaMissingTitle;

    #[async_trait]
    impl RegisterMediaUseCase for MockRegisterMediaMissingTitle {
        async fn execute(&self, _: RegisterMediaCommand) -> Result<Media, ApiError> {
            Err(ApiError::invalid(
                "Title key is required in media asset's metadata.",
            ))
        }
    }

    #[actix_web::test]
    async fn registration_returns_the_probed_view() {
        let builder = TestAppStateBuilder::default();
        builder.seed_user("m@b.com", "s3cret", false).await;
        let app =
            test::init_service(App::new().app_data(builder.build()).service(media_create)).await;

        let req = test::TestRequest::post()
            .uri("/media")
            .insert_header(basic_auth("m@b.com", "s3cret"))
            .set_json(json!({
                "uri": "uri://one",
                "filename": "clip one.mp4",
                "metadata": {"title": "Clip One"},
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], 200);
        assert_eq!(body["value"]["filename"], "clip_one.mp4");
        assert_eq!(body["value"]["status"], "READY");
        assert!(body["value"]["metadata"]["size"].is_number());
    }

    #[actix_web::test]
    async fn use_case_rejections_surface_as_400() {
        let builder =
            TestAppStateBuilder::default().with_register_media(MockRegisterMediaMissingTitle);
        builder.seed_user("m@b.com", "s3cret", false).await;
        let app =
            test::init_service(App::new().app_data(builder.build()).service(media_create)).await;

        let req = test::TestRequest::post()
            .uri("/media")
            .insert_header(basic_auth("m@b.com", "s3cret"))
            .set_json(json!({"uri": "u", "filename": "f", "metadata": {}}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["value"].as_str().unwrap().contains("Title key"));
    }
}
