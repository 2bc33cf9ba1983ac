use crate::i18n::Lang;
use axum::{
    extract::Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pdfweb::{ComposeError, MergeError, OfficeError};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Standard error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Localized message describing what went wrong
    pub error: String,
    /// Per-file notes, present when some inputs were skipped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

/// Application-specific error types for the API
#[derive(Debug)]
pub enum AppError {
    /// Image batch failures
    Compose(ComposeError),
    /// PDF merge failures
    Merge(MergeError),
    /// Office document conversion failures
    Office(OfficeError),
    /// Malformed multipart request
    Multipart(String),
    /// Request body over the configured limit
    PayloadTooLarge,
    /// Blocking worker panicked or was cancelled
    Task(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        let client = match self {
            AppError::PayloadTooLarge => return StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Compose(e) => e.is_client_error(),
            AppError::Merge(e) => e.is_client_error(),
            AppError::Office(e) => e.is_client_error(),
            AppError::Multipart(_) => true,
            AppError::Task(_) => false,
        };
        if client {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    /// Attach the language the message should be rendered in
    pub fn localized(self, lang: Lang) -> LocalizedError {
        LocalizedError { error: self, lang }
    }
}

impl From<ComposeError> for AppError {
    fn from(err: ComposeError) -> Self {
        AppError::Compose(err)
    }
}

impl From<MergeError> for AppError {
    fn from(err: MergeError) -> Self {
        AppError::Merge(err)
    }
}

impl From<OfficeError> for AppError {
    fn from(err: OfficeError) -> Self {
        AppError::Office(err)
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::Multipart(err.body_text())
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Task(err.to_string())
    }
}

/// An [`AppError`] paired with the client's language
#[derive(Debug)]
pub struct LocalizedError {
    pub error: AppError,
    pub lang: Lang,
}

impl LocalizedError {
    pub fn to_response_body(&self) -> ErrorResponse {
        let details = match &self.error {
            AppError::Merge(MergeError::NoValidPages { skipped }) => Some(
                skipped
                    .iter()
                    .map(|file| self.lang.skipped(file))
                    .collect(),
            ),
            _ => None,
        };

        ErrorResponse {
            error: self.lang.message(&self.error),
            details,
        }
    }
}

impl From<AppError> for LocalizedError {
    fn from(error: AppError) -> Self {
        error.localized(Lang::default())
    }
}

impl IntoResponse for LocalizedError {
    fn into_response(self) -> Response {
        let status = self.error.status();
        if status.is_server_error() {
            error!(error = ?self.error, "Request failed");
        } else {
            warn!(error = ?self.error, lang = self.lang.code(), "Request rejected");
        }

        (status, Json(self.to_response_body())).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        LocalizedError::from(self).into_response()
    }
}
