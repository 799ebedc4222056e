//! Response envelope shared by every endpoint

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// `{success, statusCode, data, message?}` wrapper around every API response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    /// Whether the server considers the call successful
    pub success: bool,

    /// Status code declared by the server
    pub status_code: u16,

    /// Payload
    pub data: T,

    /// Optional human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiEnvelope<Value> {
    /// Envelope synthesized for responses without a body (204, zero length)
    pub fn empty(status_code: u16) -> Self {
        Self {
            success: true,
            status_code,
            data: Value::Object(Default::default()),
            message: None,
        }
    }

    /// Parse a raw response body, validating the envelope shape.
    ///
    /// `data` may be omitted by the server and is then `null`.
    pub fn parse(body: &[u8]) -> Result<Self, ApiError> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Raw {
            success: bool,
            status_code: u16,
            #[serde(default)]
            data: Value,
            #[serde(default)]
            message: Option<String>,
        }

        let raw: Raw = serde_json::from_slice(body).map_err(|e| {
            ApiError::InvalidResponse(format!("Response is not a valid envelope: {}", e))
        })?;

        Ok(Self {
            success: raw.success,
            status_code: raw.status_code,
            data: raw.data,
            message: raw.message,
        })
    }

    /// Fail with the server's message (or `fallback`) unless `success` is set
    pub fn require_success(self, fallback: &str) -> Result<Self, ApiError> {
        if self.success {
            Ok(self)
        } else {
            Err(ApiError::Rejected(self.message_or(fallback)))
        }
    }

    /// Decode `data` into a typed payload
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        serde_json::from_value(self.data).map_err(|e| {
            ApiError::InvalidResponse(format!("Unexpected response data: {}", e))
        })
    }

    /// Server message, or `fallback` when absent or blank
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }

    /// `data.message` when the payload carries one, else `fallback`
    pub fn data_message_or(&self, fallback: &str) -> String {
        self.data
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_envelope() {
        let env = ApiEnvelope::empty(204);
        assert!(env.success);
        assert_eq!(env.status_code, 204);
        assert_eq!(env.data, json!({}));
        assert!(env.message.is_none());
    }

    #[test]
    fn test_parse_full_envelope() {
        let env = ApiEnvelope::parse(
            br#"{"success":true,"statusCode":200,"data":{"code":"ABC"},"message":"ok"}"#,
        )
        .unwrap();
        assert!(env.success);
        assert_eq!(env.status_code, 200);
        assert_eq!(env.data, json!({"code": "ABC"}));
        assert_eq!(env.message.as_deref(), Some("ok"));
    }

    #[test]
    fn test_parse_without_data() {
        let env = ApiEnvelope::parse(br#"{"success":false,"statusCode":400,"message":"nope"}"#)
            .unwrap();
        assert_eq!(env.data, Value::Null);
    }

    #[test]
    fn test_parse_rejects_contract_drift() {
        let err = ApiEnvelope::parse(br#"{"ok":true}"#).unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));

        let err = ApiEnvelope::parse(b"<html>").unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[test]
    fn test_require_success_prefers_server_message() {
        let env = ApiEnvelope {
            success: false,
            status_code: 200,
            data: Value::Null,
            message: Some("Quota reached".to_string()),
        };
        let err = env.require_success("fallback").unwrap_err();
        assert_eq!(err.to_string(), "Quota reached");
    }

    #[test]
    fn test_require_success_falls_back() {
        let env = ApiEnvelope {
            success: false,
            status_code: 200,
            data: Value::Null,
            message: Some("  ".to_string()),
        };
        let err = env.require_success("Failed to extend expiration").unwrap_err();
        assert_eq!(err.to_string(), "Failed to extend expiration");
    }

    #[test]
    fn test_decode_type_mismatch() {
        let env = ApiEnvelope {
            success: true,
            status_code: 200,
            data: json!({"unexpected": 1}),
            message: None,
        };
        let err = env.decode::<Vec<String>>().unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[test]
    fn test_data_message() {
        let env = ApiEnvelope {
            success: true,
            status_code: 200,
            data: json!({"message": "Extended to 2026-01-01"}),
            message: None,
        };
        assert_eq!(env.data_message_or("default"), "Extended to 2026-01-01");
        assert_eq!(ApiEnvelope::empty(204).data_message_or("default"), "default");
    }
}
