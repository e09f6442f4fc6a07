use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hopper_core::ShortenerError;
use tracing::error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    Shortener(ShortenerError),
    /// A stored URL that cannot be sent back as a `Location` header.
    InvalidLocation(String),
}

impl From<ShortenerError> for AppError {
    fn from(err: ShortenerError) -> Self {
        AppError::Shortener(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Shortener(ShortenerError::Validation(message)) => {
                (StatusCode::BAD_REQUEST, message).into_response()
            }
            AppError::Shortener(ShortenerError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "short code not found").into_response()
            }
            AppError::Shortener(err @ ShortenerError::DurableWrite { .. }) => {
                error!(error = %err, "failed to store mapping");
                (StatusCode::INTERNAL_SERVER_ERROR, "failed to store mapping").into_response()
            }
            AppError::Shortener(err @ ShortenerError::CodeSpaceExhausted { .. }) => {
                error!(error = %err, "failed to allocate short code");
                (StatusCode::INTERNAL_SERVER_ERROR, "failed to allocate short code")
                    .into_response()
            }
            AppError::InvalidLocation(url) => {
                error!(url = %url, "stored url is not a valid redirect target");
                (StatusCode::INTERNAL_SERVER_ERROR, "invalid redirect target").into_response()
            }
        }
    }
}
