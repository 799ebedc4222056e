//! Activation code API trait

use async_trait::async_trait;

use crate::client::models::{
    ActivationRecord, ActivationStatus, ExpiryOffset, GenerateActivationRequest,
    GeneratedActivation,
};
use crate::error::Result;

/// Activation code operations
#[async_trait]
pub trait ActivationApi: Send + Sync {
    /// List every activation code
    async fn list_activations(&self) -> Result<Vec<ActivationRecord>>;

    /// Generate a new code, optionally for a plan and lifetime
    async fn generate_activation(
        &self,
        request: &GenerateActivationRequest,
    ) -> Result<GeneratedActivation>;

    /// Set a code's status; returns the server's confirmation message
    async fn update_status(&self, activation_id: &str, status: ActivationStatus)
    -> Result<String>;

    /// Push a code's expiry out; returns the server's confirmation message
    async fn extend_expiration(&self, activation_id: &str, by: ExpiryOffset) -> Result<String>;
}
