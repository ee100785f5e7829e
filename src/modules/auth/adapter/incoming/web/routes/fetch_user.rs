use actix_web::{get, web, HttpResponse};

use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::auth::application::services::authenticator::AccessRule;
use crate::shared::api::listing::check_id;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[get("/user/id/{id}")]
pub async fn user_get(
    credentials: BasicCredentials,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let id = check_id(&path)?;
    data.authenticator
        .require(
            &credentials.0,
            &[AccessRule::AllowRoot, AccessRule::AllowAny],
        )
        .await?;
    let user = data.users.fetch.execute(id).await?;
    Ok(ApiResponse::ok(user.to_view()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use uuid::Uuid;

    use crate::modules::auth::application::domain::entities::User;
    use crate::modules::auth::application::ports::incoming::use_cases::fetch_user::FetchUserUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::basic_auth;

    struct MockFetchUserNotFound;

    #[async_trait]
    impl FetchUserUseCase for MockFetchUserNotFound {
        async fn execute(&self, id: Uuid) -> Result<User, ApiError> {
            Err(ApiError::not_found(format!("No user with id {id}.")))
        }
    }

    #[actix_web::test]
    async fn unknown_users_are_not_found() {
        let builder = TestAppStateBuilder::default().with_fetch_user(MockFetchUserNotFound);
        let app = test::init_service(App::new().app_data(builder.build()).service(user_get)).await;

        let req = test::TestRequest::get()
            .uri(&format!("/user/id/{}", Uuid::new_v4()))
            .insert_header(basic_auth("root", "test_root"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn malformed_ids_are_rejected_with_415() {
        let builder = TestAppStateBuilder::default();
        let app = test::init_service(App::new().app_data(builder.build()).service(user_get)).await;

        let req = test::TestRequest::get()
            .uri("/user/id/zzz")
            .insert_header(basic_auth("root", "test_root"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 415);
    }
}
