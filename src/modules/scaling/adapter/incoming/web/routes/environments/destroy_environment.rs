use actix_web::{delete, web, HttpResponse};

use super::ADMIN_RULES;
use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[delete("/environment/name/{name}")]
pub async fn environment_delete(
    credentials: BasicCredentials,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    data.authenticator.require(&credentials.0, &ADMIN_RULES).await?;
    data.scaling.destroy_environment.execute(&path).await?;
    Ok(ApiResponse::ok(format!(
        "The environment \"{}\" has been removed.",
        path.into_inner()
    )))
}
