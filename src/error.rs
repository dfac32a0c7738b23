use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::providers::EncodeError;
use crate::engine::RenderError;
use crate::keygen::KeyGenError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Error surfaced by the application services.
///
/// `Validation` covers anything the caller can fix by changing the request;
/// everything else is `Internal`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn details(&self) -> &Value {
        match self {
            AppError::Validation { details, .. } | AppError::Internal { details, .. } => details,
        }
    }

    /// `{"error": {"code", "message", "details"}}` payload for API callers.
    pub fn to_json(&self) -> Value {
        let (message, details) = match self {
            AppError::Validation { message, details } | AppError::Internal { message, details } => {
                (message.clone(), details.clone())
            }
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code: self.code(),
                message,
                details,
            },
        };

        serde_json::to_value(body).unwrap_or_else(|_| json!({ "error": { "code": self.code() } }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Invalid QR configuration", details)
    }
}

impl From<EncodeError> for AppError {
    fn from(e: EncodeError) -> Self {
        match e {
            EncodeError::DataTooLong => AppError::bad_request(
                "Data too long for a QR code at error correction level H",
                json!({}),
            ),
            EncodeError::UnsupportedCharacterSet(charset) => AppError::bad_request(
                "Unsupported character set",
                json!({ "character_set": charset }),
            ),
            EncodeError::Encoder(reason) => {
                AppError::internal("QR encoding failed", json!({ "reason": reason }))
            }
        }
    }
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::InvalidDimensions { matrix_size, size } => AppError::bad_request(
                "Requested size is too small for the QR symbol",
                json!({ "matrix_size": matrix_size, "size": size }),
            ),
            RenderError::Allocation { width, height } => AppError::internal(
                "Failed to allocate image buffer",
                json!({ "width": width, "height": height }),
            ),
        }
    }
}

impl From<KeyGenError> for AppError {
    fn from(e: KeyGenError) -> Self {
        let details = match &e {
            KeyGenError::ClockRollback { last, observed } => {
                json!({ "last_timestamp": last, "observed_timestamp": observed })
            }
            _ => json!({}),
        };
        AppError::internal(e.to_string(), details)
    }
}
