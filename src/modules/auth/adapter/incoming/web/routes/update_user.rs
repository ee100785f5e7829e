use actix_web::{route, web, HttpResponse};
use serde::Deserialize;

use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::auth::application::ports::incoming::use_cases::update_user::UpdateUserCommand;
use crate::modules::auth::application::services::authenticator::AccessRule;
use crate::shared::api::listing::check_id;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub mail: Option<String>,
    pub secret: Option<String>,
    pub admin_platform: Option<bool>,
}

/// Update a user. `admin_platform` can only be modified by root or a
/// platform administrator; the value is ignored for other callers.
#[route("/user/id/{id}", method = "PATCH", method = "PUT")]
pub async fn user_update(
    credentials: BasicCredentials,
    path: web::Path<String>,
    body: web::Json<UpdateUserRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let id = check_id(&path)?;
    let principal = data
        .authenticator
        .require(
            &credentials.0,
            &[
                AccessRule::AllowRoot,
                AccessRule::Role("admin_platform"),
                AccessRule::Id(id),
            ],
        )
        .await?;
    let request = body.into_inner();
    let user = data
        .users
        .update
        .execute(UpdateUserCommand {
            id,
            first_name: request.first_name,
            last_name: request.last_name,
            mail: request.mail,
            secret: request.secret,
            admin_platform: request.admin_platform,
            caller_is_admin: principal.is_platform_admin(),
        })
        .await?;
    Ok(ApiResponse::ok(format!(
        "The user \"{}\" has been updated.",
        user.name()
    )))
}
