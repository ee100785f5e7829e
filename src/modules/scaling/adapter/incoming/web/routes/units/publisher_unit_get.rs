use actix_web::{get, web, HttpResponse};

use super::READ_RULES;
use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::scaling::application::domain::entities::ServiceKind;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[get("/publisher/unit/environment/{environment}/number/{number}")]
pub async fn publisher_unit_get(
    credentials: BasicCredentials,
    path: web::Path<(String, u32)>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    data.authenticator.require(&credentials.0, &READ_RULES).await?;
    let (environment, number) = path.into_inner();
    let unit = data
        .scaling
        .fetch_unit
        .execute(ServiceKind::Publisher, &environment, number)
        .await?;
    Ok(ApiResponse::ok(unit))
}
