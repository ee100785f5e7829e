use actix_web::{get, web, HttpResponse};

use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::auth::application::services::authenticator::AccessRule;
use crate::shared::api::listing::ListQuery;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[get("/user")]
pub async fn user_list(
    credentials: BasicCredentials,
    query: web::Query<ListQuery>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    data.authenticator
        .require(
            &credentials.0,
            &[AccessRule::AllowRoot, AccessRule::Role("admin_platform")],
        )
        .await?;
    let users = data.users.list.execute(query.into_inner()).await?;
    let views: Vec<_> = users.iter().map(|user| user.to_view()).collect();
    Ok(ApiResponse::ok(views))
}
