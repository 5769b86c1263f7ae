use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::images::ImageError;

/// Problems with a submission that stop it before any model call is made.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Please enter your OpenAI API key.")]
    MissingApiKey,
    #[error("Please upload at least one product image.")]
    NoImages,
    #[error("Please provide a product description.")]
    EmptyDescription,
    #[error("Product name is required.")]
    EmptyProductName,
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error("Malformed form submission: {0}")]
    Multipart(#[from] MultipartError),
    #[error("Could not store uploaded video: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("❌ {}", self);
        } else {
            tracing::info!("⚠️ Rejected submission: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
