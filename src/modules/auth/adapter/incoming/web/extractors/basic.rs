use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpRequest};
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::modules::auth::application::services::authenticator::Credentials;
use crate::shared::error::ApiError;

/// Extracts the HTTP-Basic credentials every protected route requires.
/// Missing or unreadable headers are rejected before any handler code runs.
pub struct BasicCredentials(pub Credentials);

impl FromRequest for BasicCredentials {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(parse_authorization(req).map(BasicCredentials))
    }
}

fn parse_authorization(req: &HttpRequest) -> Result<Credentials, ApiError> {
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Basic "))
        .ok_or_else(|| ApiError::unauthorized("Authenticate."))?;
    let decoded = STANDARD
        .decode(header.trim())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or_else(|| ApiError::unauthorized("Authenticate."))?;
    let (username, password) = decoded
        .split_once(':')
        .ok_or_else(|| ApiError::unauthorized("Authenticate."))?;
    Ok(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}
