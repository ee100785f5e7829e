// src/shared/api/response.rs
use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;

/// Uniform response envelope of the whole API: `{"status": code, "value": payload}`.
/// The HTTP status line always matches the embedded `status`.
#[derive(Serialize)]
pub struct Envelope<T: Serialize> {
    pub status: u16,
    pub value: T,
}

pub struct ApiResponse;

impl ApiResponse {
    pub fn ok<T: Serialize>(value: T) -> HttpResponse {
        HttpResponse::Ok().json(Envelope { status: 200, value })
    }

    pub fn error(status: StatusCode, message: &str) -> HttpResponse {
        HttpResponse::build(status).json(Envelope {
            status: status.as_u16(),
            value: message,
        })
    }
}
