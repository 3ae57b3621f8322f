//! The response envelope every backend endpoint wraps its payload in.

use serde::Deserialize;

use crate::error::{ClientError, Result};

/// Wire-level wrapper around every upstream payload.
///
/// The backend replies `{ code, message?, body }` on every endpoint,
/// regardless of the HTTP status line. Any `code` other than `"OK"` is a
/// hard failure; `message` carries the human-readable detail when the
/// backend provides one.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct ApiEnvelope<T> {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub body: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwraps the payload, failing when the envelope status is not `"OK"`.
    pub(crate) fn into_body(self) -> Result<T> {
        if self.code != "OK" {
            return Err(ClientError::Upstream {
                code: self.code,
                message: self.message,
            });
        }
        self.body.ok_or(ClientError::MissingBody)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        value: u32,
    }

    #[test]
    fn test_ok_envelope_unwraps_body() {
        let envelope: ApiEnvelope<Payload> =
            serde_json::from_str(r#"{"code":"OK","body":{"value":7}}"#).unwrap();
        assert_eq!(envelope.into_body().unwrap(), Payload { value: 7 });
    }

    #[test]
    fn test_error_envelope_carries_message() {
        let envelope: ApiEnvelope<Payload> = serde_json::from_str(
            r#"{"code":"NOT_FOUND","message":"no such app","body":null}"#,
        )
        .unwrap();

        match envelope.into_body() {
            Err(ClientError::Upstream { code, message }) => {
                assert_eq!(code, "NOT_FOUND");
                assert_eq!(message.as_deref(), Some("no such app"));
            }
            other => panic!("expected Upstream error, got {other:?}"),
        }
    }

    #[test]
    fn test_error_envelope_without_message_falls_back_to_code() {
        let envelope: ApiEnvelope<Payload> =
            serde_json::from_str(r#"{"code":"FORBIDDEN"}"#).unwrap();

        let err = envelope.into_body().unwrap_err();
        assert_eq!(err.to_string(), "Upstream replied FORBIDDEN: no detail provided");
    }

    #[test]
    fn test_ok_envelope_without_body_is_an_error() {
        let envelope: ApiEnvelope<Payload> = serde_json::from_str(r#"{"code":"OK"}"#).unwrap();
        assert!(matches!(
            envelope.into_body(),
            Err(ClientError::MissingBody)
        ));
    }
}
