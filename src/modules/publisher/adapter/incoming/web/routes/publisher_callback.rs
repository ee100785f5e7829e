use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::auth::application::services::authenticator::AccessRule;
use crate::modules::publisher::application::ports::incoming::use_cases::publisher_callback::PublisherCallbackCommand;
use crate::modules::transform::adapter::incoming::web::routes::transform_callback::CALLBACK_ACK;
use crate::modules::transform::application::ports::incoming::use_cases::transform_callback::ProgressUpdate;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PublisherCallbackBody {
    pub task_id: String,
    #[serde(default)]
    pub publish_uri: Option<String>,
    pub status: String,
    #[serde(default)]
    pub percent: Option<Value>,
    #[serde(default)]
    pub elapsed_time: Option<Value>,
    #[serde(default)]
    pub eta_time: Option<Value>,
}

/// Called by publication workers when their job finishes.
#[post("/publisher/callback")]
pub async fn publisher_callback(
    credentials: BasicCredentials,
    body: web::Json<PublisherCallbackBody>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    data.authenticator
        .require(&credentials.0, &[AccessRule::AllowNode])
        .await?;
    let body = body.into_inner();
    debug!(task_id = %body.task_id, status = %body.status, "Publisher callback");
    data.publisher
        .callback
        .execute(PublisherCallbackCommand {
            task_id: body.task_id,
            publish_uri: body.publish_uri,
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
