use actix_web::{get, web, HttpResponse};

use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::auth::application::services::authenticator::AccessRule;
use crate::shared::api::listing::CountQuery;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[get("/transform/profile/count")]
pub async fn profile_count(
    credentials: BasicCredentials,
    query: web::Query<CountQuery>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    data.authenticator
        .require(&credentials.0, &[AccessRule::AllowAny])
        .await?;
    let count = data
        .transform
        .count_profiles
        .execute(query.into_inner().into_filter()?)
        .await?;
    Ok(ApiResponse::ok(count))
}
