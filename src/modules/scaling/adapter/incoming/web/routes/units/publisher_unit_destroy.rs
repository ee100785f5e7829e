use actix_web::{delete, web, HttpResponse};

use super::ADMIN_RULES;
use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::scaling::application::domain::entities::ServiceKind;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[delete("/publisher/unit/environment/{environment}/number/{number}")]
pub async fn publisher_unit_destroy(
    credentials: BasicCredentials,
    path: web::Path<(String, u32)>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    data.authenticator.require(&credentials.0, &ADMIN_RULES).await?;
    let (environment, number) = path.into_inner();
    data.scaling
        .destroy_unit
        .execute(ServiceKind::Publisher, &environment, number)
        .await?;
    Ok(ApiResponse::ok(format!(
        "The publication unit {number} has been removed from environment {environment}."
    )))
}
