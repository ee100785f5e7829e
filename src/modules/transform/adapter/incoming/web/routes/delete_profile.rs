use actix_web::{delete, web, HttpResponse};

use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::auth::application::services::authenticator::AccessRule;
use crate::shared::api::listing::check_id;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[delete("/transform/profile/id/{id}")]
pub async fn profile_delete(
    credentials: BasicCredentials,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let id = check_id(&path)?;
    data.authenticator
        .require(&credentials.0, &[AccessRule::AllowAny])
        .await?;
    let profile = data.transform.delete_profile.execute(id).await?;
    Ok(ApiResponse::ok(format!(
        "The transformation profile \"{}\" has been deleted.",
        profile.title
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use uuid::Uuid;

    use crate::modules::transform::application::domain::entities::TransformProfile;
    use crate::modules::transform::application::ports::incoming::use_cases::delete_profile::DeleteProfileUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::basic_auth;

    struct MockDeleteProfileInUse;

    #[async_trait]
    impl DeleteProfileUseCase for MockDeleteProfileInUse {
        async fn execute(&self, _: Uuid) -> Result<TransformProfile, ApiError> {
            Err(ApiError::invalid(
                "Cannot delete the profile, it is actually referenced by transformation task with id x and status PENDING.",
            ))
        }
    }

    #[actix_web::test]
    async fn referenced_profiles_cannot_be_deleted() {
        let builder = TestAppStateBuilder::default().with_delete_profile(MockDeleteProfileInUse);
        builder.seed_user("u@b.com", "s3cret", false).await;
        let app =
            test::init_service(App::new().app_data(builder.build()).service(profile_delete)).await;

        let req = test::TestRequest::delete()
            .uri(&format!("/transform/profile/id/{}", Uuid::new_v4()))
            .insert_header(basic_auth("u@b.com", "s3cret"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }
}
