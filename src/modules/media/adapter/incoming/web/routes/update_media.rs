use actix_web::{route, web, HttpResponse};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::auth::application::services::authenticator::AccessRule;
use crate::modules::media::application::ports::incoming::use_cases::update_media::UpdateMediaCommand;
use crate::shared::api::listing::check_id;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct UpdateMediaRequest {
    pub filename: Option<String>,
    pub metadata: Option<Map<String, Value>>,
}

/// Only the owner may touch an asset, and only metadata/filename can change.
#[route("/media/id/{id}", method = "PATCH", method = "PUT")]
pub async fn media_update(
    credentials: BasicCredentials,
    path: web::Path<String>,
    body: web::Json<UpdateMediaRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let id = check_id(&path)?;
    let principal = data
        .authenticator
        .require(&credentials.0, &[AccessRule::AllowAny])
        .await?;
    let request = body.into_inner();
    let media = data
        .medias
        .update
        .execute(UpdateMediaCommand {
            id,
            caller_id: principal.user_id(),
            filename: request.filename,
            metadata: request.metadata,
        })
        .await?;
    Ok(ApiResponse::ok(format!(
        "The media asset \"{}\" has been updated.",
        media.filename
    )))
}
