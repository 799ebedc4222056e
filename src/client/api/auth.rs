//! Authentication API trait

use async_trait::async_trait;
use serde_json::Value;

use crate::client::models::{ApiEnvelope, LoginRequest};
use crate::error::Result;

/// Authentication operations for the admin API
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a token.
    ///
    /// Sent without a bearer token and without the session-expiry side
    /// effect; the caller decides whether the returned envelope is a login.
    async fn login(&self, credentials: &LoginRequest) -> Result<ApiEnvelope<Value>>;
}
