use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use tracing::info;

use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::auth::application::ports::incoming::use_cases::create_user::CreateUserCommand;
use crate::modules::auth::application::services::authenticator::AccessRule;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub mail: String,
    pub secret: String,
    pub admin_platform: bool,
}

#[post("/user")]
pub async fn user_create(
    credentials: BasicCredentials,
    body: web::Json<CreateUserRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    data.authenticator
        .require(
            &credentials.0,
            &[AccessRule::AllowRoot, AccessRule::Role("admin_platform")],
        )
        .await?;
    let request = body.into_inner();
    info!(mail = %request.mail, "User registration attempt");
    let user = data
        .users
        .create
        .execute(CreateUserCommand {
            first_name: request.first_name,
            last_name: request.last_name,
            mail: request.mail,
            secret: request.secret,
            admin_platform: request.admin_platform,
        })
        .await?;
    Ok(ApiResponse::ok(user.to_view()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    use crate::modules::auth::application::domain::entities::User;
    use crate::modules::auth::application::ports::incoming::use_cases::create_user::CreateUserUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::basic_auth;

    // ========================================================================
    // Mock use cases for the different outcomes
    // ========================================================================

    struct MockCreateUserSuccess;

    #[async_trait]
    impl CreateUserUseCase for MockCreateUserSuccess {
        async fn execute(&self, command: CreateUserCommand) -> Result<User, ApiError> {
            Ok(User::new(
                &command.first_name,
                &command.last_name,
                &command.mail,
                "hashed",
                command.admin_platform,
            ))
        }
    }

    struct MockCreateUserDuplicateMail;

    #[async_trait]
    impl CreateUserUseCase for MockCreateUserDuplicateMail {
        async fn execute(&self, command: CreateUserCommand) -> Result<User, ApiError> {
            Err(ApiError::invalid(format!(
                "The email address {} is already used by another user.",
                command.mail
            )))
        }
    }

    struct MockCreateUserInternalError;

    #[async_trait]
    impl CreateUserUseCase for MockCreateUserInternalError {
        async fn execute(&self, _: CreateUserCommand) -> Result<User, ApiError> {
            Err(ApiError::internal("store down"))
        }
    }

    fn request_body() -> Value {
        json!({
            "first_name": "A", "last_name": "B", "mail": "a@b.com",
            "secret": "s3cret", "admin_platform": false
        })
    }

    #[actix_web::test]
    async fn creation_returns_the_view_without_the_secret() {
        let builder = TestAppStateBuilder::default().with_create_user(MockCreateUserSuccess);
        let app = test::init_service(App::new().app_data(builder.build()).service(user_create)).await;

        let req = test::TestRequest::post()
            .uri("/user")
            .insert_header(basic_auth("root", "test_root"))
            .set_json(request_body())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], 200);
        assert_eq!(body["value"]["mail"], "a@b.com");
        assert_eq!(body["value"]["name"], "A B");
        assert!(body["value"].get("secret").is_none());
    }

    #[actix_web::test]
    async fn duplicate_mail_is_a_bad_request_naming_the_field() {
        let builder = TestAppStateBuilder::default().with_create_user(MockCreateUserDuplicateMail);
        let app = test::init_service(App::new().app_data(builder.build()).service(user_create)).await;

        let req = test::TestRequest::post()
            .uri("/user")
            .insert_header(basic_auth("root", "test_root"))
            .set_json(request_body())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["value"].as_str().unwrap().contains("a@b.com"));
    }

    #[actix_web::test]
    async fn internal_errors_map_to_500() {
        let builder = TestAppStateBuilder::default().with_create_user(MockCreateUserInternalError);
        let app = test::init_service(App::new().app_data(builder.build()).service(user_create)).await;

        let req = test::TestRequest::post()
            .uri("/user")
            .insert_header(basic_auth("root", "test_root"))
            .set_json(request_body())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 500);
    }

    #[actix_web::test]
    async fn regular_users_cannot_create_accounts() {
        let builder = TestAppStateBuilder::default().with_create_user(MockCreateUserSuccess);
        builder.seed_user("plain@b.com", "s3cret", false).await;
        let app = test::init_service(App::new().app_data(builder.build()).service(user_create)).await;

        let req = test::TestRequest::post()
            .uri("/user")
            .insert_header(basic_auth("plain@b.com", "s3cret"))
            .set_json(request_body())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 403);
    }
}
