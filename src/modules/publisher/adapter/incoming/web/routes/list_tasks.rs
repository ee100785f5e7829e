use actix_web::{get, web, HttpResponse};

use crate::modules::auth::adapter::incoming::web::extractors::basic::BasicCredentials;
use crate::modules::auth::application::services::authenticator::AccessRule;
use crate::shared::api::listing::ListQuery;
use crate::shared::api::ApiResponse;
use crate::shared::error::ApiError;
use crate::AppState;

/// Full listing: `*_id` fields are resolved to embedded payloads.
#[get("/publisher/task")]
pub async fn task_list(
    credentials: BasicCredentials,
    query: web::Query<ListQuery>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    data.authenticator
        .require(&credentials.0, &[AccessRule::AllowAny])
        .await?;
    let tasks = data
        .publisher
        .list_tasks
        .execute(query.into_inner(), true)
        .await?;
    Ok(ApiResponse::ok(tasks))
}
