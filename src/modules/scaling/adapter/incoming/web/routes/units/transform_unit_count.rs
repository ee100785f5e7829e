use actix_web::{get, web, HttpResponse};

use super::READ_RULES;
use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::scaling::application::domain::entities::ServiceKind;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[get("/transform/unit/environment/{environment}/count")]
pub async fn transform_unit_count(
    credentials: BasicCredentials,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    data.authenticator.require(&credentials.0, &READ_RULES).await?;
    let units = data
        .scaling
        .list_units
        .execute(ServiceKind::Transform, &path)
        .await?;
    Ok(ApiResponse::ok(units.len()))
}
