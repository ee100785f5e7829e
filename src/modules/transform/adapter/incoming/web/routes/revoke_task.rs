use actix_web::{delete, web, HttpResponse};

use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::auth::application::services::authenticator::AccessRule;
use crate::modules::transform::application::ports::incoming::use_cases::revoke_transform::RevokeTransformCommand;
use crate::shared::api::listing::check_id;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

/// Revoke a task (author only). The output media asset is deleted.
#[delete("/transform/task/id/{id}")]
pub async fn task_revoke(
    credentials: BasicCredentials,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let id = check_id(&path)?;
    let principal = data
        .authenticator
        .require(&credentials.0, &[AccessRule::AllowAny])
        .await?;
    let view = data
        .transform
        .fetch_task
        .execute(&id.to_string(), false)
        .await?;
    if principal.user_id() != view.task.user_id {
        return Err(ApiError::forbidden(format!(
            "You are not allowed to revoke transformation task with id {id}."
        )));
    }
    let task = data
        .transform
        .revoke
        .execute(RevokeTransformCommand {
            task_id: view.task.id,
            terminate: true,
            remove: false,
            delete_media: true,
        })
        .await?;
    Ok(ApiResponse::ok(format!(
        "The transformation task \"{}\" has been revoked. Corresponding output media asset will be deleted.",
        task.id
    )))
}
