use actix_web::{post, web, HttpResponse};

use super::ADMIN_RULES;
use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::scaling::application::domain::entities::EnvironmentSpec;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[post("/environment")]
pub async fn environment_create(
    credentials: BasicCredentials,
    body: web::Json<EnvironmentSpec>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    data.authenticator.require(&credentials.0, &ADMIN_RULES).await?;
    let spec = body.into_inner();
    data.scaling.add_environment.execute(&spec).await?;
    Ok(ApiResponse::ok(format!(
        "The environment \"{}\" has been added.",
        spec.name
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    use crate::modules::scaling::adapter::incoming::web::routes::environments::count_environments::environment_count;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::basic_auth;

    #[actix_web::test]
    async fn adding_an_environment_grows_the_count() {
        let builder = TestAppStateBuilder::default();
        let app = test::init_service(
            App::new()
                .app_data(builder.build())
                .service(environment_create)
                .service(environment_count),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/environment")
            .insert_header(basic_auth("root", "test_root"))
            .set_json(json!({
                "name": "amazon",
                "type": "ec2",
                "region": "eu-west-1",
                "access_key": "AK",
                "secret_key": "SK",
                "control_bucket": "bucket",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let req = test::TestRequest::get()
            .uri("/environment/count")
            .insert_header(basic_auth("root", "test_root"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["value"], 2);
    }
}
