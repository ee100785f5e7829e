use actix_web::{get, web, HttpResponse};

use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::auth::application::services::authenticator::AccessRule;
use crate::shared::api::listing::ListQuery;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

/// Raw listing: `*_id` fields stay references.
#[get("/media/HEAD")]
pub async fn media_head(
    credentials: BasicCredentials,
    query: web::Query<ListQuery>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    data.authenticator
        .require(&credentials.0, &[AccessRule::AllowAny])
        .await?;
    let medias = data.medias.list.execute(query.into_inner(), false).await?;
    Ok(ApiResponse::ok(medias))
}
