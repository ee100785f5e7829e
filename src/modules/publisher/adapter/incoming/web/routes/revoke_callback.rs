use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use tracing::debug;

use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::auth::application::services::authenticator::AccessRule;
use crate::modules::transform::adapter::incoming::web::routes::transform_callback::CALLBACK_ACK;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RevokeCallbackBody {
    pub task_id: String,
    pub status: String,
}

/// Called by publication workers once an unpublish job finishes.
#[post("/publisher/revoke/callback")]
pub async fn publisher_revoke_callback(
    credentials: BasicCredentials,
    body: web::Json<RevokeCallbackBody>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    data.authenticator
        .require(&credentials.0, &[AccessRule::AllowNode])
        .await?;
    let body = body.into_inner();
    debug!(task_id = %body.task_id, status = %body.status, "Publisher revoke callback");
    data.publisher
        .revoke_callback
        .execute(&body.task_id, &body.status)
        .await?;
    Ok(ApiResponse::ok(CALLBACK_ACK))
}
