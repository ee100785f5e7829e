use actix_web::{post, web, HttpResponse};

use super::{EnsureUnitsRequest, ADMIN_RULES};
use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::scaling::application::domain::entities::ServiceKind;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[post("/transform/unit/environment/{environment}")]
pub async fn transform_unit_ensure(
    credentials: BasicCredentials,
    path: web::Path<String>,
    body: web::Json<EnsureUnitsRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    data.authenticator.require(&credentials.0, &ADMIN_RULES).await?;
    data.scaling
        .ensure_units
        .execute(ServiceKind::Transform, &path, body.num_units)
        .await?;
    Ok(ApiResponse::ok(format!(
        "Ensured {} transformation units into environment \"{}\"",
        body.num_units,
        path.into_inner()
    )))
}
