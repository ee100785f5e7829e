use actix_web::{delete, web, HttpResponse};

use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::auth::application::services::authenticator::AccessRule;
use crate::modules::publisher::application::ports::incoming::use_cases::revoke_publish::RevokePublishCommand;
use crate::shared::api::listing::check_id;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

/// Revoke a publication (author only); the media asset gets unpublished.
#[delete("/publisher/task/id/{id}")]
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
        .publisher
        .fetch_task
        .execute(&id.to_string(), false)
        .await?;
    if principal.user_id() != view.task.user_id {
        return Err(ApiError::forbidden(format!(
            "You are not allowed to revoke publication task with id {id}."
        )));
    }
    let task = data
        .publisher
        .revoke
        .execute(RevokePublishCommand {
            task_id: view.task.id,
            callback_path: "/publisher/revoke/callback".to_string(),
            terminate: true,
            remove: false,
        })
        .await?;
    Ok(ApiResponse::ok(format!(
        "The publication task \"{}\" has been revoked. Corresponding media asset will be unpublished from here.",
        task.id
    )))
}
