use actix_web::{get, web, HttpResponse};

use super::ADMIN_RULES;
use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[get("/environment")]
pub async fn environment_list(
    credentials: BasicCredentials,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    data.authenticator.require(&credentials.0, &ADMIN_RULES).await?;
    let environments = data.scaling.list_environments.execute(true).await?;
    Ok(ApiResponse::ok(environments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::basic_auth;

    #[actix_web::test]
    async fn environments_are_admin_only() {
        let builder = TestAppStateBuilder::default();
        builder.seed_user("plain@b.com", "s3cret", false).await;
        let app =
            test::init_service(App::new().app_data(builder.build()).service(environment_list))
                .await;

        let req = test::TestRequest::get()
            .uri("/environment")
            .insert_header(basic_auth("plain@b.com", "s3cret"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 403);

        let req = test::TestRequest::get()
            .uri("/environment")
            .insert_header(basic_auth("root", "test_root"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
    }
}
