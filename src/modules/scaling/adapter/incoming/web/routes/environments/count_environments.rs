use actix_web::{get, web, HttpResponse};

use super::ADMIN_RULES;
use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[get("/environment/count")]
pub async fn environment_count(
    credentials: BasicCredentials,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    data.authenticator.require(&credentials.0, &ADMIN_RULES).await?;
    let count = data.scaling.list_environments.count().await?;
    Ok(ApiResponse::ok(count))
}
