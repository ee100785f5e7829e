use actix_web::{get, web, HttpResponse};

use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::auth::application::services::authenticator::AccessRule;
use crate::shared::api::listing::check_id;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[get("/media/id/{id}")]
pub async fn media_get(
    credentials: BasicCredentials,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let id = check_id(&path)?;
    data.authenticator
        .require(&credentials.0, &[AccessRule::AllowAny])
        .await?;
    let view = data.medias.fetch.execute(id, true).await?;
    Ok(ApiResponse::ok(view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    use crate::modules::media::adapter::incoming::web::routes::get_media_head::media_get_head;
    use crate::modules::media::adapter::incoming::web::routes::register_media::media_create;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::basic_auth;

    #[actix_web::test]
    async fn full_get_embeds_the_owner_and_head_does_not() {
        let builder = TestAppStateBuilder::default();
        builder.seed_user("m@b.com", "s3cret", false).await;
        let app = test::init_service(
            App::new()
                .app_data(builder.build())
                .service(media_create)
                .service(media_get)
                .service(media_get_head),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/media")
            .insert_header(basic_auth("m@b.com", "s3cret"))
            .set_json(json!({
                "uri": "uri://two",
                "filename": "two.mp4",
                "metadata": {"title": "Two"},
            }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["value"]["_id"].as_str().unwrap();

        let req = test::TestRequest::get()
            .uri(&format!("/media/id/{id}"))
            .insert_header(basic_auth("m@b.com", "s3cret"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["value"]["user"]["mail"], "m@b.com");

        let req = test::TestRequest::get()
            .uri(&format!("/media/id/{id}/HEAD"))
            .insert_header(basic_auth("m@b.com", "s3cret"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["value"].get("user").is_none());
    }
}
