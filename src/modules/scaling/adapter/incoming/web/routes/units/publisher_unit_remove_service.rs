use actix_web::{delete, web, HttpResponse};

use super::ADMIN_RULES;
use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::scaling::application::domain::entities::ServiceKind;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[delete("/publisher/unit/environment/{environment}")]
pub async fn publisher_unit_remove_service(
    credentials: BasicCredentials,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    data.authenticator.require(&credentials.0, &ADMIN_RULES).await?;
    data.scaling
        .ensure_units
        .execute(ServiceKind::Publisher, &path, 0)
        .await?;
    Ok(ApiResponse::ok(format!(
        "Removed publication service from environment \"{}\"",
        path.into_inner()
    )))
}
