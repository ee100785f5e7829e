use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::auth::application::services::authenticator::AccessRule;
use crate::modules::transform::application::ports::incoming::use_cases::transform_callback::{
    ProgressUpdate, TransformCallbackCommand,
};
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

pub const CALLBACK_ACK: &str = "Your work is much appreciated, thanks !";

#[derive(Debug, Deserialize)]
pub struct TransformCallbackBody {
    pub task_id: String,
    pub status: String,
    #[serde(default)]
    pub percent: Option<Value>,
    #[serde(default)]
    pub elapsed_time: Option<Value>,
    #[serde(default)]
    pub eta_time: Option<Value>,
}

/// Called by transformation workers when they finish (or progress through)
/// their work. Only the node principal may post here.
#[post("/transform/callback")]
pub async fn transform_callback(
    credentials: BasicCredentials,
    body: web::Json<TransformCallbackBody>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    data.authenticator
        .require(&credentials.0, &[AccessRule::AllowNode])
        .await?;
    let body = body.into_inner();
    debug!(task_id = %body.task_id, status = %body.status, "Transform callback");
    data.transform
        .callback
        .execute(TransformCallbackCommand {
            task_id: body.task_id,
            status: body.status,
            progress: ProgressUpdate {
                percent: body.percent,
                elapsed_time: body.elapsed_time,
                eta_time: body.eta_time,
            },
        })
        .await?;
    Ok(ApiResponse::ok(CALLBACK_ACK))
}
