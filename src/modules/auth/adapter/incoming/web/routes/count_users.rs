use actix_web::{get, web, HttpResponse};

use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::auth::application::services::authenticator::AccessRule;
use crate::shared::api::listing::CountQuery;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[get("/user/count")]
pub async fn user_count(
    credentials: BasicCredentials,
    query: web::Query<CountQuery>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    data.authenticator
        .require(
            &credentials.0,
            &[AccessRule::AllowRoot, AccessRule::AllowAny],
        )
        .await?;
    let count = data
        .users
        .count
        .execute(query.into_inner().into_filter()?)
        .await?;
    Ok(ApiResponse::ok(count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::Value;

    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::basic_auth;

    #[actix_web::test]
    async fn any_authenticated_user_may_count() {
        let builder = TestAppStateBuilder::default();
        builder.seed_user("u@b.com", "s3cret", false).await;
        let app =
            test::init_service(App::new().app_data(builder.build()).service(user_count)).await;

        let req = test::TestRequest::get()
            .uri("/user/count")
            .insert_header(basic_auth("u@b.com", "s3cret"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], 200);
        assert_eq!(body["value"], 1);
    }
}
