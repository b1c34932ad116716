use axum::extract::rejection::JsonRejection;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    MethodNotAllowed(Method),
    Storage(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation Error: {msg}"),
            AppError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            AppError::MethodNotAllowed(method) => write!(f, "Method {method} Not Allowed"),
            AppError::Storage(msg) => write!(f, "Storage Error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn project_not_found() -> Self {
        AppError::NotFound("Project not found".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            // Store faults are reported to the caller verbatim.
            AppError::Storage(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// The message placed in the `error` field of the response envelope.
    pub fn message(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::NotFound(msg) | AppError::Storage(msg) => {
                msg.clone()
            }
            AppError::MethodNotAllowed(method) => format!("Method {method} Not Allowed"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Storage(msg) => tracing::error!("Storage error: {msg}"),
            AppError::Validation(msg) => tracing::debug!("Rejected payload: {msg}"),
            _ => {}
        }

        let body = json!({ "success": false, "error": self.message() });
        (self.status(), axum::Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}
