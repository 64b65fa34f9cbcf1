use axum::http::StatusCode;
use axum::http::header::{InvalidHeaderName, InvalidHeaderValue};
use axum::http::method::InvalidMethod;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    #[error("Invalid header name: {0}")]
    InvalidHeaderName(#[from] InvalidHeaderName),
    #[error("Invalid header value: {0}")]
    Header(#[from] InvalidHeaderValue),
    #[error("Invalid method: {0}")]
    Method(#[from] InvalidMethod),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No authenticated principal")]
    Unauthenticated,
    #[error("Malformed token identifier: {0}")]
    MalformedIdentifier(#[from] uuid::Error),
    #[error("Invalid or expired token")]
    InvalidOrExpiredToken,
    #[error("Token identifier collision")]
    IdentifierCollision,
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Error::Unauthenticated => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            Error::MalformedIdentifier(_) => (StatusCode::BAD_REQUEST, "Malformed identifier"),
            // same response as Unauthenticated, token existence must not leak
            Error::InvalidOrExpiredToken => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            Error::IdentifierCollision => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            Error::Serialize(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Serialization error"),
        };

        if status.is_server_error() {
            tracing::error!("{:?}", self);
        } else {
            tracing::debug!("{:?}", self);
        }

        (status, message).into_response()
    }
}
