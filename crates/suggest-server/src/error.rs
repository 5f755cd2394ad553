use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use suggest_common::api::ErrorResponse;
use suggest_common::error::CommonError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Common(#[from] CommonError),

    #[error("config error: {0}")]
    Config(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Common(CommonError::ModelUnavailable) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::Common(CommonError::ModelUnavailable) => "Model not loaded".to_string(),
            other => other.to_string(),
        };
        (self.status_code(), Json(ErrorResponse::new(message))).into_response()
    }
}
