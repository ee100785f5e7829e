use actix_web::{get, web, HttpResponse};

use super::READ_RULES;
use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::scaling::application::domain::entities::ServiceKind;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[get("/publisher/unit/environment/{environment}")]
pub async fn publisher_unit_list(
    credentials: BasicCredentials,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    data.authenticator.require(&credentials.0, &READ_RULES).await?;
    let units = data
        .scaling
        .list_units
        .execute(ServiceKind::Publisher, &path)
        .await?;
    Ok(ApiResponse::ok(units))
}
