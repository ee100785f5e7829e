use actix_web::{get, web, HttpResponse};

use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::auth::application::services::authenticator::AccessRule;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[get("/transform/profile/encoder")]
pub async fn profile_encoders(
    credentials: BasicCredentials,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    data.authenticator
        .require(&credentials.0, &[AccessRule::AllowAny])
        .await?;
    Ok(ApiResponse::ok(data.transform.encoders()))
}
