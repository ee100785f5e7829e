use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::auth::application::services::authenticator::AccessRule;
use crate::modules::transform::application::ports::incoming::use_cases::launch_transform::LaunchTransformCommand;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LaunchTransformRequest {
    pub media_in_id: Uuid,
    pub profile_id: Uuid,
    pub filename: String,
    pub metadata: Map<String, Value>,
    pub send_email: bool,
    pub queue: String,
}

/// Launch a transformation task; the response value is the created task.
#[post("/transform/task")]
pub async fn task_launch(
    credentials: BasicCredentials,
    body: web::Json<LaunchTransformRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let principal = data
        .authenticator
        .require(&credentials.0, &[AccessRule::AllowAny])
        .await?;
    let request = body.into_inner();
    let task = data
        .transform
        .launch
        .execute(LaunchTransformCommand {
            user_id: principal.user_id(),
            media_in_id: request.media_in_id,
            profile_id: request.profile_id,
            filename: request.filename,
            metadata: request.metadata,
            send_email: request.send_email,
            queue: request.queue,
            callback_path: "/transform/callback".to_string(),
        })
        .await?;
    Ok(ApiResponse::ok(task))
}
