use actix_web::{delete, web, HttpResponse};

use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::auth::application::services::authenticator::AccessRule;
use crate::modules::media::application::ports::incoming::use_cases::delete_media::DeleteMediaCommand;
use crate::shared::api::listing::check_id;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[delete("/media/id/{id}")]
pub async fn media_delete(
    credentials: BasicCredentials,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let id = check_id(&path)?;
    let principal = data
        .authenticator
        .require(&credentials.0, &[AccessRule::AllowAny])
        .await?;
    let media = data
        .medias
        .delete
        .execute(DeleteMediaCommand {
            id,
            caller_id: Some(principal.user_id()),
        })
        .await?;
    Ok(ApiResponse::ok(format!(
        "The media asset \"{}\" has been deleted.",
        media.title().unwrap_or(&media.filename)
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use uuid::Uuid;

    use crate::modules::media::application::domain::entities::Media;
    use crate::modules::media::application::ports::incoming::use_cases::delete_media::DeleteMediaUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::basic_auth;

    struct MockDeleteMediaForbidden;

    #[async_trait]
    impl DeleteMediaUseCase for MockDeleteMediaForbidden {
        async fn execute(&self, command: DeleteMediaCommand) -> Result<Media, ApiError> {
            Err(ApiError::forbidden(format!(
                "You are not allowed to delete media asset with id {}.",
                command.id
            )))
        }
    }

    struct MockDeleteMediaInUse;

    #[async_trait]
    impl DeleteMediaUseCase for MockDeleteMediaInUse {
        async fn execute(&self, _: DeleteMediaCommand) -> Result<Media, ApiError> {
            Err(ApiError::invalid(
                "Cannot delete the media asset, it is actually in use by transformation task with id x and status PROGRESS.",
            ))
        }
    }

    #[actix_web::test]
    async fn forbidden_deletions_map_to_403() {
        let builder = TestAppStateBuilder::default().with_delete_media(MockDeleteMediaForbidden);
        builder.seed_user("m@b.com", "s3cret", false).await;
        let app =
            test::init_service(App::new().app_data(builder.build()).service(media_delete)).await;

        let req = test::TestRequest::delete()
            .uri(&format!("/media/id/{}", Uuid::new_v4()))
            .insert_header(basic_auth("m@b.com", "s3cret"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 403);
    }

    #[actix_web::test]
    async fn in_use_medias_cannot_be_deleted() {
        let builder = TestAppStateBuilder::default().with_delete_media(MockDeleteMediaInUse);
        builder.seed_user("m@b.com", "s3cret", false).await;
        let app =
            test::init_service(App::new().app_data(builder.build()).service(media_delete)).await;

        let req = test::TestRequest::delete()
            .uri(&format!("/media/id/{}", Uuid::new_v4()))
            .insert_header(basic_auth("m@b.com", "s3cret"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }
}
