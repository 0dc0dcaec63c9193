//! Errors the screen layer can observe.
//!
//! - [`ClientError`] comes back from the backend (transport or non-success
//!   response).
//! - [`DashboardError`] is raised while reading injected dashboard data.
//!
//! Validation problems are not errors: they are reported per field by
//! [`crate::form::ValidationResult`].
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a usable response (connection refused,
    /// timeout, undecodable body).
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered with a non-success status.
    #[error("{status}: {}", message.as_deref().unwrap_or("server error"))]
    Server {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("invalid base_url: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Server-provided message, when the response carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_display_uses_message() {
        let err = ClientError::Server {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: Some("monto invalido".to_string()),
        };
        assert_eq!(err.to_string(), "422 Unprocessable Entity: monto invalido");
        assert_eq!(err.server_message(), Some("monto invalido"));
    }

    #[test]
    fn server_error_without_message() {
        let err = ClientError::Server {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        };
        assert_eq!(err.to_string(), "500 Internal Server Error: server error");
        assert_eq!(err.server_message(), None);
    }
}
