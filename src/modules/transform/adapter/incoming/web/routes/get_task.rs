use actix_web::{get, web, HttpResponse};

use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::auth::application::services::authenticator::AccessRule;
use crate::shared::api::listing::check_id;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

#[get("/transform/task/id/{id}")]
pub async fn task_get(
    credentials: BasicCredentials,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let id = check_id(&path)?;
    data.authenticator
        .require(&credentials.0, &[AccessRule::AllowAny])
        .await?;
    let view = data
        .transform
        .fetch_task
        .execute(&id.to_string(), true)
        .await?;
    Ok(ApiResponse::ok(view))
}
