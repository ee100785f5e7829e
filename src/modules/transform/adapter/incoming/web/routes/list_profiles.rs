use actix_web::{get, web, HttpResponse};

use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::auth::application::services::authenticator::AccessRule;
use crate::shared::api::listing::ListQuery;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[get("/transform/profile")]
pub async fn profile_list(
    credentials: BasicCredentials,
    query: web::Query<ListQuery>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    data.authenticator
        .require(&credentials.0, &[AccessRule::AllowAny])
        .await?;
    let profiles = data
        .transform
        .list_profiles
        .execute(query.into_inner())
        .await?;
    Ok(ApiResponse::ok(profiles))
}
