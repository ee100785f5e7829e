use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::auth::application::services::authenticator::AccessRule;
use crate::modules::publisher::application::ports::incoming::use_cases::launch_publish::LaunchPublishCommand;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LaunchPublishRequest {
    pub media_id: Uuid,
    pub send_email: bool,
    pub queue: String,
}

#[post("/publisher/task")]
pub async fn task_launch(
    credentials: BasicCredentials,
    body: web::Json<LaunchPublishRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let principal = data
        .authenticator
        .require(&credentials.0, &[AccessRule::AllowAny])
        .await?;
    let request = body.into_inner();
    let task = data
        .publisher
        .launch
        .execute(LaunchPublishCommand {
            user_id: principal.user_id(),
            media_id: request.media_id,
            send_email: request.send_email,
            queue: request.queue,
            callback_path: "/publisher/callback".to_string(),
        })
        .await?;
    Ok(ApiResponse::ok(task))
}
