//! Mock admin API client for testing
//!
//! Provides a mock implementation of the API traits for unit testing
//! without making real API calls.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::api::{ActivationApi, AuthApi, QrApi};
use super::models::{
    ActivationRecord, ActivationStatus, ApiEnvelope, ExpiryOffset, GenerateActivationRequest,
    GeneratedActivation, LoginRequest, QrCode, QrUpload,
};
use crate::error::{Error, Result};

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockAdminClient::new()
///     .with_activations(vec![record]).await;
///
/// let codes = mock.list_activations().await?;
/// assert_eq!(codes.len(), 1);
/// ```
pub struct MockAdminClient {
    /// Envelope to return from login
    login: Arc<Mutex<Option<ApiEnvelope<Value>>>>,
    /// Records to return from list_activations
    activations: Arc<Mutex<Vec<ActivationRecord>>>,
    /// Stored QR code, if any
    qr: Arc<Mutex<Option<QrCode>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<Error>>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl Default for MockAdminClient {
    fn default() -> Self {
        Self {
            login: Arc::new(Mutex::new(None)),
            activations: Arc::new(Mutex::new(Vec::new())),
            qr: Arc::new(Mutex::new(None)),
            error: Arc::new(Mutex::new(None)),
            captured_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRequest {
    /// The API method called (e.g., "update_status")
    pub method: String,
    /// Request payload as the server would see it
    pub body: Value,
}

impl MockAdminClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the envelope returned from login.
    pub async fn with_login(self, envelope: ApiEnvelope<Value>) -> Self {
        *self.login.lock().await = Some(envelope);
        self
    }

    /// Configure records to return from list_activations.
    pub async fn with_activations(self, records: Vec<ActivationRecord>) -> Self {
        *self.activations.lock().await = records;
        self
    }

    /// Configure the stored QR code.
    pub async fn with_qr(self, qr: QrCode) -> Self {
        *self.qr.lock().await = Some(qr);
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: impl Into<Error>) -> Self {
        *self.error.lock().await = Some(error.into());
        self
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        match self.error.lock().await.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn capture_request(&self, method: &str, body: Value) {
        self.captured_requests.lock().await.push(CapturedRequest {
            method: method.to_string(),
            body,
        });
    }
}

#[async_trait]
impl AuthApi for MockAdminClient {
    async fn login(&self, credentials: &LoginRequest) -> Result<ApiEnvelope<Value>> {
        self.capture_request("login", json!({"username": credentials.username}))
            .await;
        self.check_error().await?;

        let login = self.login.lock().await;
        Ok(login.clone().unwrap_or_else(|| ApiEnvelope {
            success: true,
            status_code: 200,
            data: json!({
                "token": "mock-token",
                "role": "superadmin",
                "email": credentials.username,
            }),
            message: None,
        }))
    }
}

#[async_trait]
impl ActivationApi for MockAdminClient {
    async fn list_activations(&self) -> Result<Vec<ActivationRecord>> {
        self.capture_request("list_activations", Value::Null).await;
        self.check_error().await?;

        Ok(self.activations.lock().await.clone())
    }

    async fn generate_activation(
        &self,
        request: &GenerateActivationRequest,
    ) -> Result<GeneratedActivation> {
        self.capture_request("generate_activation", serde_json::to_value(request)?)
            .await;
        self.check_error().await?;

        Ok(GeneratedActivation {
            code: "MOCK-0001".to_string(),
            qr_code: "data:image/png;base64,iVBORw0KGgo=".to_string(),
            email: "owner@example.com".to_string(),
        })
    }

    async fn update_status(
        &self,
        activation_id: &str,
        status: ActivationStatus,
    ) -> Result<String> {
        self.capture_request(
            "update_status",
            json!({"activationId": activation_id, "status": status}),
        )
        .await;
        self.check_error().await?;

        let mut records = self.activations.lock().await;
        if let Some(record) = records.iter_mut().find(|r| r.id == activation_id) {
            record.status = status;
        }
        Ok("Status updated successfully".to_string())
    }

    async fn extend_expiration(&self, activation_id: &str, by: ExpiryOffset) -> Result<String> {
        self.capture_request(
            "extend_expiration",
            json!({"activationId": activation_id, "offset": by.offset, "unit": by.unit}),
        )
        .await;
        self.check_error().await?;

        Ok("Expiration extended successfully".to_string())
    }
}

#[async_trait]
impl QrApi for MockAdminClient {
    async fn upload_qr(&self, upload: QrUpload) -> Result<()> {
        self.capture_request(
            "upload_qr",
            json!({"fileName": upload.file_name, "size": upload.bytes.len()}),
        )
        .await;
        self.check_error().await?;

        *self.qr.lock().await = Some(QrCode {
            qr_code: format!("https://cdn.example.com/{}", upload.file_name),
        });
        Ok(())
    }

    async fn get_qr(&self) -> Result<Option<QrCode>> {
        self.check_error().await?;
        Ok(self.qr.lock().await.clone())
    }

    async fn delete_qr(&self) -> Result<()> {
        self.capture_request("delete_qr", Value::Null).await;
        self.check_error().await?;

        *self.qr.lock().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, QrError};

    #[tokio::test]
    async fn test_mock_default_login_succeeds() {
        let mock = MockAdminClient::new();
        let envelope = mock
            .login(&LoginRequest {
                username: "ada@example.com".to_string(),
                passcode: "pw".to_string(),
            })
            .await
            .unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data["role"], "superadmin");
    }

    #[tokio::test]
    async fn test_mock_error_is_one_shot() {
        let mock = MockAdminClient::new()
            .with_error(ApiError::SessionExpired)
            .await;

        assert!(mock.list_activations().await.unwrap_err().is_session_expired());
        assert!(mock.list_activations().await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_qr_lifecycle() {
        let mock = MockAdminClient::new();
        assert!(mock.get_qr().await.unwrap().is_none());

        mock.upload_qr(QrUpload::new("qr.png", vec![1, 2, 3]).unwrap())
            .await
            .unwrap();
        assert!(mock.get_qr().await.unwrap().is_some());

        mock.delete_qr().await.unwrap();
        assert!(mock.get_qr().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mock_captures_status_updates() {
        let mock = MockAdminClient::new();
        mock.update_status("act-1", ActivationStatus::Suspended)
            .await
            .unwrap();

        let requests = mock.captured_requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].body,
            json!({"activationId": "act-1", "status": "SUSPENDED"})
        );
    }

    #[tokio::test]
    async fn test_mock_accepts_domain_errors() {
        let mock = MockAdminClient::new().with_error(QrError::Delete).await;
        assert!(matches!(
            mock.delete_qr().await.unwrap_err(),
            Error::Qr(QrError::Delete)
        ));
    }
}
