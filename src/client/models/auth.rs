//! Authentication models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Credentials posted to the login endpoint
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Account email, sent as `username`
    pub username: String,

    /// Account password, sent as `passcode`
    pub passcode: String,
}

/// User payload returned by a successful login.
///
/// Unknown fields are kept so the cached record is the full payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Bearer token
    #[serde(default)]
    pub token: String,

    /// Role name
    #[serde(default)]
    pub role: String,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_id"
    )]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserRecord {
    /// Name to show for the signed-in user: full name, else email, else id
    pub fn display_name(&self) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if !full.is_empty() {
            full
        } else if let Some(email) = self.email.as_deref() {
            email.to_string()
        } else {
            self.id.clone().unwrap_or_else(|| "unknown".to_string())
        }
    }
}

/// User ids arrive as strings or as numbers depending on the backend
fn deserialize_optional_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::de::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdOrNumber {
        Id(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<IdOrNumber>::deserialize(deserializer)? {
        Some(IdOrNumber::Id(id)) => Some(id),
        Some(IdOrNumber::Number(n)) => Some(n.to_string()),
        None => None,
    })
}
