// src/shared/api/json_config.rs
use actix_web::web::JsonConfig;

use crate::shared::api::ApiResponse;

/// A body that is not valid JSON is a content-type problem for this API, not
/// a validation one: workers and clients always speak `application/json`.
pub fn custom_json_config() -> JsonConfig {
    JsonConfig::default().error_handler(|err, _req| {
        let message = format!("Requires (valid) json content-type: {err}.");
        actix_web::error::InternalError::from_response(
            err,
            ApiResponse::error(actix_web::http::StatusCode::UNSUPPORTED_MEDIA_TYPE, &message),
        )
        .into()
    })
}
