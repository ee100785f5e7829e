use actix_web::{get, web, HttpResponse};

use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::auth::application::services::authenticator::AccessRule;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

/// Return the authenticated user, the stateful-login shim used by the WebUI.
#[get("/user/login")]
pub async fn user_login(
    credentials: BasicCredentials,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let principal = data
        .authenticator
        .require(&credentials.0, &[AccessRule::AllowAny])
        .await?;
    let user = principal
        .as_user()
        .ok_or_else(|| ApiError::forbidden("Only regular users can login."))?;
    Ok(ApiResponse::ok(user.to_view()))
}
