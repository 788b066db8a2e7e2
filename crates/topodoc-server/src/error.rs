//! Error types for the HTTP server.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use topodoc_page::ComposeError;
use topodoc_storage::StorageErrorKind;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Page composition failed.
    #[error(transparent)]
    Compose(#[from] ComposeError),
}

impl ServerError {
    /// HTTP status for this error.
    pub(crate) fn status(&self) -> StatusCode {
        match self {
            Self::Compose(ComposeError::ContentNotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Compose(ComposeError::Storage(err))
                if matches!(
                    err.kind,
                    StorageErrorKind::NotFound | StorageErrorKind::InvalidPath
                ) =>
            {
                StatusCode::NOT_FOUND
            }
            Self::Compose(ComposeError::Config(_) | ComposeError::Storage(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Page composition failed");
        }

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}
