use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::store::StoreError;

/// Everything that can go wrong while shortening or retrieving a link.
///
/// All variants except `StoreUnavailable` are client errors; a rejection
/// never leaves partial state behind in the store.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    MalformedInput(String),

    #[error("could not retrieve the stored state for \"{0}\"")]
    ReferenceNotFound(String),

    /// Deliberately does not reveal whether a password exists or merely
    /// mismatches.
    #[error(
        "a password is required to overwrite the link with filename \"{filename}\"; \
         the provided password is missing or incorrect"
    )]
    AuthorizationFailed { filename: String },

    #[error(
        "this link was last saved more than {window_days} days ago and cannot be resaved; \
         please create a new link instead; note that links saved with a password \
         can be edited indefinitely"
    )]
    EditWindowExpired { window_days: i64 },

    #[error("storage unavailable: {0}")]
    StoreUnavailable(String),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            ServiceError::ReferenceNotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::AuthorizationFailed { .. } => StatusCode::FORBIDDEN,
            ServiceError::EditWindowExpired { .. } => StatusCode::FORBIDDEN,
            ServiceError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::StoreUnavailable(err.to_string())
    }
}
