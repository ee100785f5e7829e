use actix_web::{delete, web, HttpResponse};

use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::auth::application::services::authenticator::AccessRule;
use crate::shared::api::listing::check_id;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[delete("/user/id/{id}")]
pub async fn user_delete(
    credentials: BasicCredentials,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let id = check_id(&path)?;
    data.authenticator
        .require(
            &credentials.0,
            &[
                AccessRule::AllowRoot,
                AccessRule::Role("admin_platform"),
                AccessRule::Id(id),
            ],
        )
        .await?;
    let user = data.users.delete.execute(id).await?;
    Ok(ApiResponse::ok(format!(
        "The user \"{}\" has been deleted.",
        user.name()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::basic_auth;

    #[actix_web::test]
    async fn a_user_may_delete_itself() {
        let builder = TestAppStateBuilder::default();
        let user = builder.seed_user("gone@b.com", "s3cret", false).await;
        let app =
            test::init_service(App::new().app_data(builder.build()).service(user_delete)).await;

        let req = test::TestRequest::delete()
            .uri(&format!("/user/id/{}", user.id))
            .insert_header(basic_auth("gone@b.com", "s3cret"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
    }

    #[actix_web::test]
    async fn strangers_cannot_delete_someone_else() {
        let builder = TestAppStateBuilder::default();
        let target = builder.seed_user("target@b.com", "s3cret", false).await;
        builder.seed_user("other@b.com", "s3cret", false).await;
        let app =
            test::init_service(App::new().app_data(builder.build()).service(user_delete)).await;

        let req = test::TestRequest::delete()
            .uri(&format!("/user/id/{}", target.id))
            .insert_header(basic_auth("other@b.com", "s3cret"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 403);
    }
}
