//
//  atlassian-client
//  error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/20.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Error Types for Atlassian API Operations
//!
//! This module provides the unified error type returned by every fallible
//! operation in the library, together with the helpers that map HTTP failures
//! onto it.
//!
//! # Overview
//!
//! - [`Error`] - Unified error type for all API operations
//! - [`Result`] - Convenience alias used throughout the crate
//! - [`extract_api_message`] - Pulls the human-readable message out of an
//!   Atlassian error body
//!
//! # Example
//!
//! ```rust
//! use atlassian_client::error::Error;
//!
//! fn handle_result<T>(result: Result<T, Error>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(Error::AuthRequired) => println!("Please authenticate first"),
//!         Err(Error::NotFound(resource)) => println!("Resource not found: {}", resource),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Notes
//!
//! - HTTP-level variants carry the message extracted from the response body
//! - Library-level preconditions (open-state guard, payload type check) have
//!   their own variants so callers can match on them without string parsing

use reqwest::StatusCode;
use thiserror::Error;

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for all Atlassian API operations.
///
/// `Error` covers the HTTP failure classes returned by Atlassian REST APIs,
/// transport and decoding failures, and the preconditions this library checks
/// before issuing a request.
///
/// # Variants
///
/// | Variant | Description | HTTP Status |
/// |---------|-------------|-------------|
/// | `BadRequest` | Invalid request parameters | 400 |
/// | `AuthRequired` | Missing or rejected credentials | 401 |
/// | `Forbidden` | Insufficient permissions | 403 |
/// | `NotFound` | Requested resource does not exist | 404 |
/// | `Conflict` | Update conflicted with server state | 409 |
/// | `RateLimited` | Too many requests, retry later | 429 |
/// | `Server` | Internal server error | 5xx |
/// | `Network` | Network connectivity issues | N/A |
/// | `Json` | Response body was not valid JSON | N/A |
/// | `InvalidUrl` | The configured base URL did not parse | N/A |
/// | `PullRequestNotOpen` | State-changing call on a closed pull request | N/A |
/// | `EmptyMessage` | Blank comment text | N/A |
/// | `UnexpectedPayload` | Payload `type` differs from the expected resource | N/A |
/// | `Unknown` | Unexpected or unclassified errors | N/A |
///
/// # Notes
///
/// - The `Network` variant automatically converts from `reqwest::Error`
/// - The `Conflict` variant is what a stale `version` produces on
///   Bitbucket Server merge/decline calls
#[derive(Error, Debug)]
pub enum Error {
    /// The request was malformed or contained invalid parameters.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Authentication credentials are required or were rejected.
    #[error("Authentication required")]
    AuthRequired,

    /// The authenticated user does not have sufficient permissions.
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// The requested resource was not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The request conflicted with the current state of the resource.
    ///
    /// Bitbucket Server answers with this when the `version` sent along a
    /// merge or decline no longer matches the pull request.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// API rate limit has been exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// An internal server error occurred (HTTP 5xx).
    #[error("Server error: {0}")]
    Server(String),

    /// A network-level error occurred during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A response body could not be decoded as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured base URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A state-changing call was made against a pull request that is not open.
    ///
    /// Carries the pull request's current state so callers can report it.
    #[error("Pull request isn't open (current state: {0})")]
    PullRequestNotOpen(String),

    /// A comment was submitted with no message text.
    #[error("No message set")]
    EmptyMessage,

    /// A payload did not carry the `type` discriminator the resource expects.
    #[error("Expected type of data is [{expected}], got [{got}]")]
    UnexpectedPayload {
        /// The `type` value the resource requires.
        expected: String,
        /// The `type` value found in the payload, or `none`.
        got: String,
    },

    /// An unknown or unexpected error occurred.
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl Error {
    /// Maps an HTTP status code and extracted message onto an [`Error`].
    ///
    /// # Parameters
    ///
    /// * `status` - The HTTP status code of the failed response
    /// * `message` - The message extracted from the error body
    pub(crate) fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST => Self::BadRequest(message),
            StatusCode::UNAUTHORIZED => Self::AuthRequired,
            StatusCode::FORBIDDEN => Self::Forbidden(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::CONFLICT => Self::Conflict(message),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited,
            s if s.is_server_error() => Self::Server(message),
            _ => Self::Unknown(message),
        }
    }
}

/// Extracts a user-friendly message from an Atlassian API error response.
///
/// Atlassian services answer errors in several formats. Bitbucket Cloud:
///
/// ```json
/// {"type": "error", "error": {"message": "Human readable message"}}
/// ```
///
/// Bitbucket Server and Confluence:
///
/// ```json
/// {"errors": [{"message": "Human readable message"}]}
/// ```
///
/// This function attempts each known format in turn. If none matches, it
/// falls back to the status code and the raw body.
///
/// # Parameters
///
/// * `status` - The HTTP status code
/// * `body` - The raw error response body
pub fn extract_api_message(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        // Cloud format: {"type": "error", "error": {"message": "..."}}
        if let Some(message) = json
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return message.to_string();
        }

        // Server format: {"errors": [{"message": "..."}]}
        if let Some(message) = json
            .get("errors")
            .and_then(|e| e.as_array())
            .and_then(|arr| arr.first())
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return message.to_string();
        }

        // Alternative Cloud format: {"error": {"detail": "..."}}
        if let Some(detail) = json
            .get("error")
            .and_then(|e| e.get("detail"))
            .and_then(|m| m.as_str())
        {
            return detail.to_string();
        }

        // Simple message format: {"message": "..."}
        if let Some(message) = json.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }

    // Fallback to raw body if parsing fails
    format!("API error ({}): {}", status, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_cloud_message() {
        let body = r#"{"type": "error", "error": {"message": "Repository not found"}}"#;
        assert_eq!(
            extract_api_message(StatusCode::NOT_FOUND, body),
            "Repository not found"
        );
    }

    #[test]
    fn test_extract_server_message() {
        let body = r#"{"errors": [{"message": "Project does not exist"}]}"#;
        assert_eq!(
            extract_api_message(StatusCode::NOT_FOUND, body),
            "Project does not exist"
        );
    }

    #[test]
    fn test_extract_detail_message() {
        let body = r#"{"error": {"detail": "Field 'title' is required"}}"#;
        assert_eq!(
            extract_api_message(StatusCode::BAD_REQUEST, body),
            "Field 'title' is required"
        );
    }

    #[test]
    fn test_extract_simple_message() {
        let body = r#"{"message": "Too many requests"}"#;
        assert_eq!(
            extract_api_message(StatusCode::TOO_MANY_REQUESTS, body),
            "Too many requests"
        );
    }

    #[test]
    fn test_extract_falls_back_to_raw_body() {
        let message = extract_api_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert!(message.contains("500"));
        assert!(message.contains("<html>oops</html>"));
    }

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            Error::from_status(StatusCode::NOT_FOUND, "x".into()),
            Error::NotFound(_)
        ));
        assert!(matches!(
            Error::from_status(StatusCode::UNAUTHORIZED, "x".into()),
            Error::AuthRequired
        ));
        assert!(matches!(
            Error::from_status(StatusCode::CONFLICT, "x".into()),
            Error::Conflict(_)
        ));
        assert!(matches!(
            Error::from_status(StatusCode::TOO_MANY_REQUESTS, "x".into()),
            Error::RateLimited
        ));
        assert!(matches!(
            Error::from_status(StatusCode::BAD_GATEWAY, "x".into()),
            Error::Server(_)
        ));
        assert!(matches!(
            Error::from_status(StatusCode::IM_A_TEAPOT, "x".into()),
            Error::Unknown(_)
        ));
    }
}
