use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use service::errors::ServiceError;
use thiserror::Error;
use tracing::debug;

/// Request-level failure, rendered as a plain-text body.
#[derive(Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("Invalid request body")]
    InvalidBody,
    #[error("Product not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => ApiError::NotFound,
            ServiceError::Validation(msg) => ApiError::Validation(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        debug!(%status, error = %self, "request rejected");
        (status, self.to_string()).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("cannot bind `{addr}`: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}
