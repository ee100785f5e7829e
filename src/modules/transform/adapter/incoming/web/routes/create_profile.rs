use actix_web::{post, web, HttpResponse};
use serde::Deserialize;

use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::auth::application::services::authenticator::AccessRule;
use crate::modules::transform::application::ports::incoming::use_cases::create_profile::CreateProfileCommand;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateProfileRequest {
    pub title: String,
    pub description: String,
    pub encoder_name: String,
    pub encoder_string: String,
}

#[post("/transform/profile")]
pub async fn profile_create(
    credentials: BasicCredentials,
    body: web::Json<CreateProfileRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    data.authenticator
        .require(&credentials.0, &[AccessRule::AllowAny])
        .await?;
    let request = body.into_inner();
    let profile = data
        .transform
        .create_profile
        .execute(CreateProfileCommand {
            title: request.title,
            description: request.description,
            encoder_name: request.encoder_name,
            encoder_string: request.encoder_string,
        })
        .await?;
    Ok(ApiResponse::ok(profile))
}
