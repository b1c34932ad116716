use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::error::AppError;

/// Success half of the `{ success, data | error }` envelope. Failures are
/// rendered by `AppError`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

pub fn ok<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        success: true,
        data,
    })
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<Envelope<T>>) {
    (StatusCode::CREATED, ok(data))
}

/// JSON body extractor whose rejections (malformed JSON, unknown
/// `airdropStatus`, wrong field types) become validation errors.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
