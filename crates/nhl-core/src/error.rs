//! Error types for the NHL API client
//!
//! Extraction of records never fails; only transport problems and invalid
//! caller input surface as errors.

use thiserror::Error;

/// Error type for NHL API operations
#[derive(Error, Debug)]
pub enum NhlError {
    /// Network failure, timeout, or unreadable response body
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Server answered with a 4xx or 5xx status code
    #[error("{method} method returns HTTP status code {status} on {url}")]
    RequestFailed {
        method: reqwest::Method,
        status: u16,
        url: String,
    },

    /// Caller passed options that cannot be combined
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Game id is not a 10-digit number
    #[error("Invalid game ID: {0}")]
    InvalidGameId(String),
}

impl NhlError {
    /// HTTP status code carried by the error, if the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            NhlError::RequestFailed { status, .. } => Some(*status),
            NhlError::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for NHL API operations
pub type Result<T> = std::result::Result<T, NhlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nhl_error_display_request_failed() {
        let error = NhlError::RequestFailed {
            method: reqwest::Method::GET,
            status: 404,
            url: "https://statsapi.web.nhl.com/api/v1/teams".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "GET method returns HTTP status code 404 on https://statsapi.web.nhl.com/api/v1/teams"
        );
    }

    #[test]
    fn test_nhl_error_display_invalid_argument() {
        let error = NhlError::InvalidArgument("pick one".to_string());
        assert_eq!(error.to_string(), "Invalid argument: pick one");
    }

    #[test]
    fn test_nhl_error_display_invalid_game_id() {
        let error = NhlError::InvalidGameId("123".to_string());
        assert_eq!(error.to_string(), "Invalid game ID: 123");
    }

    #[test]
    fn test_status_for_request_failed() {
        let error = NhlError::RequestFailed {
            method: reqwest::Method::GET,
            status: 500,
            url: String::new(),
        };
        assert_eq!(error.status(), Some(500));
    }

    #[test]
    fn test_status_for_validation_errors() {
        assert_eq!(NhlError::InvalidArgument(String::new()).status(), None);
        assert_eq!(NhlError::InvalidGameId(String::new()).status(), None);
    }
}
