use actix_web::http::StatusCode;
use actix_web::ResponseError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecureHeadersError {
    #[error("Secure headers configuration is missing")]
    ConfigurationMissing,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration conflict: {0}")]
    ConfigurationConflict(String),

    #[error("Content-Security-Policy-Report-Only requires a report-uri")]
    MissingReportUri,

    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SecureHeadersError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Errors raised while handling a request rather than while building.
    pub fn is_request_fatal(&self) -> bool {
        matches!(
            self,
            Self::ConfigurationMissing | Self::ConfigurationConflict(_)
        )
    }
}

impl From<serde_json::Error> for SecureHeadersError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl ResponseError for SecureHeadersError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ConfigurationMissing
            | Self::ConfigurationConflict(_)
            | Self::InvalidArgument(_)
            | Self::MissingReportUri
            | Self::InvalidHeaderValue(_)
            | Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
