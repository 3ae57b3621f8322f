//! Error types for the client crate.
//!
//! This module defines [`ClientError`], the error type used throughout
//! the crate, along with a crate-local [`Result`] alias.

use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur while talking to the RuStore backend.
///
/// Every operation performs a single outbound request; there are no
/// retries and no partial-failure handling. A failed call simply fails
/// with one of these variants.
#[derive(Error, Diagnostic, Debug)]
pub enum ClientError {
    /// The response envelope carried a status code other than `"OK"`.
    #[error("Upstream replied {code}: {}", .message.as_deref().unwrap_or("no detail provided"))]
    #[diagnostic(
        code(rustore_client::upstream),
        help("The backend rejected the request; the code comes from the response envelope")
    )]
    Upstream {
        code: String,
        message: Option<String>,
    },

    #[error(transparent)]
    #[diagnostic(
        code(rustore_client::request),
        help("Check your network connection and the configured base URL")
    )]
    Request(#[from] reqwest::Error),

    #[error(transparent)]
    #[diagnostic(code(rustore_client::json))]
    Json(#[from] serde_json::Error),

    #[error("Invalid base URL: {0}")]
    #[diagnostic(
        code(rustore_client::invalid_url),
        help("The base URL must be absolute, with a scheme and a host")
    )]
    InvalidUrl(String),

    /// The envelope status was `"OK"` but no body was attached.
    #[error("Upstream reply carried no body")]
    #[diagnostic(code(rustore_client::missing_body))]
    MissingBody,

    #[error("Unknown ABI token: {0}")]
    #[diagnostic(
        code(rustore_client::unknown_abi),
        help("Expected one of: armeabi-v7a, arm64-v8a, x86, x86_64")
    )]
    UnknownAbi(String),

    /// Download links were requested through a handle whose app ID has
    /// not been resolved by an info lookup yet.
    #[error("App ID for {0} has not been resolved yet")]
    #[diagnostic(
        code(rustore_client::app_id_unresolved),
        help("Call info() on the handle before requesting download links")
    )]
    AppIdUnresolved(String),
}

/// A specialized Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClientError::Upstream {
            code: "NOT_FOUND".to_string(),
            message: Some("app not found".to_string()),
        };
        assert_eq!(err.to_string(), "Upstream replied NOT_FOUND: app not found");

        let err = ClientError::Upstream {
            code: "ERROR".to_string(),
            message: None,
        };
        assert_eq!(err.to_string(), "Upstream replied ERROR: no detail provided");

        let err = ClientError::UnknownAbi("mips".to_string());
        assert_eq!(err.to_string(), "Unknown ABI token: mips");

        let err = ClientError::AppIdUnresolved("ru.zen.android".to_string());
        assert_eq!(
            err.to_string(),
            "App ID for ru.zen.android has not been resolved yet"
        );
    }
}
