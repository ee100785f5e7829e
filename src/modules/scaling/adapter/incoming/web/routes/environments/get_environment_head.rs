use actix_web::{get, web, HttpResponse};

use super::ADMIN_RULES;
use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[get("/environment/name/{name}/HEAD")]
pub async fn environment_get_head(
    credentials: BasicCredentials,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    data.authenticator.require(&credentials.0, &ADMIN_RULES).await?;
    // Presence check only; the full status is the plain GET.
    let status = data.scaling.fetch_environment.execute(&path).await?;
    Ok(ApiResponse::ok(status.get("name").cloned().unwrap_or(status)))
}
