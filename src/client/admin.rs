//! Admin API client implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, HeaderMap};
use reqwest::multipart::{Form, Part};
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use super::api::{ActivationApi, AuthApi, QrApi};
use super::models::{
    ActivationRecord, ActivationStatus, ApiEnvelope, ExpiryOffset, ExtendExpirationRequest,
    GenerateActivationRequest, GeneratedActivation, LoginRequest, QrCode, QrUpload,
    StatusUpdateRequest,
};
use crate::error::{ApiError, Error, QrError, Result};
use crate::session::Session;

/// Callback fired after a 401/403 has cleared the session
pub type SessionExpiredHook = Arc<dyn Fn() + Send + Sync>;

/// Request payload
pub enum RequestBody {
    /// No body
    Empty,
    /// JSON document
    Json(Value),
    /// Multipart form; the encoder sets the content type and boundary
    Multipart(Form),
}

/// Admin API client
pub struct AdminClient {
    http: HttpClient,
    base_url: String,
    session: Session,
    on_session_expired: Option<SessionExpiredHook>,
}

impl AdminClient {
    /// Create a client for `base_url` that authenticates from `session`
    pub fn new(base_url: impl Into<String>, session: Session, timeout: Duration) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
            on_session_expired: None,
        })
    }

    /// Install the callback run when the server ends the session
    pub fn on_session_expired(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_session_expired = Some(Arc::new(hook));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make an authenticated API request.
    ///
    /// The token is read from the session on every call. A 401 or 403 clears
    /// the session, fires the expiry hook and yields `SessionExpired`.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: RequestBody,
    ) -> Result<ApiEnvelope<Value>> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut builder = self.http.request(method.clone(), &url);

        let token = self.session.token();
        if let Some(token) = &token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        builder = match body {
            RequestBody::Empty => builder.header(CONTENT_TYPE, "application/json"),
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        let response = builder.send().await.map_err(ApiError::from)?;
        let status = response.status();
        debug!("{} {} -> {}", method, endpoint, status);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                self.expire_session(token.as_deref());
                Err(ApiError::SessionExpired.into())
            }
            status if !status.is_success() => Err(call_failed(status).into()),
            status if status == StatusCode::NO_CONTENT || is_zero_length(response.headers()) => {
                Ok(ApiEnvelope::empty(status.as_u16()))
            }
            _ => {
                let body = response.bytes().await.map_err(ApiError::from)?;
                Ok(ApiEnvelope::parse(&body)?)
            }
        }
    }

    /// Download raw bytes from an absolute URL (used for hosted QR images)
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.http.get(url).send().await.map_err(ApiError::from)?;
        let status = response.status();
        debug!("GET {} -> {}", url, status);

        if !status.is_success() {
            return Err(call_failed(status).into());
        }

        let bytes = response.bytes().await.map_err(ApiError::from)?;
        Ok(bytes.to_vec())
    }

    fn expire_session(&self, rejected: Option<&str>) {
        match self.session.expire(rejected) {
            Ok(false) => {
                debug!("Rejected token was already replaced; keeping the newer session");
                return;
            }
            Ok(true) => warn!("Server rejected the session token; signing out locally"),
            Err(e) => warn!("Failed to clear expired session: {}", e),
        }
        if let Some(hook) = &self.on_session_expired {
            hook();
        }
    }

    async fn put_json(&self, endpoint: &str, body: Value) -> Result<ApiEnvelope<Value>> {
        self.request(Method::PUT, endpoint, RequestBody::Json(body))
            .await
    }
}

fn call_failed(status: StatusCode) -> ApiError {
    ApiError::CallFailed {
        status: status.as_u16(),
        reason: status
            .canonical_reason()
            .unwrap_or("Unknown Status")
            .to_string(),
    }
}

fn is_zero_length(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0")
}

#[async_trait]
impl AuthApi for AdminClient {
    async fn login(&self, credentials: &LoginRequest) -> Result<ApiEnvelope<Value>> {
        let url = format!("{}/api/auth/login", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(credentials)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        debug!("POST /api/auth/login -> {}", status);

        if !status.is_success() {
            return Err(call_failed(status).into());
        }

        let body = response.bytes().await.map_err(ApiError::from)?;
        Ok(ApiEnvelope::parse(&body)?)
    }
}

#[async_trait]
impl ActivationApi for AdminClient {
    async fn list_activations(&self) -> Result<Vec<ActivationRecord>> {
        let envelope = self
            .request(Method::GET, "/api/activation/list", RequestBody::Empty)
            .await?;
        Ok(envelope
            .require_success("Failed to load activation codes")?
            .decode()?)
    }

    async fn generate_activation(
        &self,
        request: &GenerateActivationRequest,
    ) -> Result<GeneratedActivation> {
        let body = if request.is_empty() {
            RequestBody::Empty
        } else {
            RequestBody::Json(serde_json::to_value(request)?)
        };

        let envelope = self
            .request(Method::POST, "/api/activation/generate", body)
            .await?;

        if !(envelope.success && envelope.status_code == 200) {
            return Err(ApiError::Rejected(
                envelope.message_or("Failed to generate activation code"),
            )
            .into());
        }
        Ok(envelope.decode()?)
    }

    async fn update_status(
        &self,
        activation_id: &str,
        status: ActivationStatus,
    ) -> Result<String> {
        let body = serde_json::to_value(StatusUpdateRequest {
            activation_id: activation_id.to_string(),
            status,
        })?;

        let envelope = self
            .put_json("/api/activation/status", body)
            .await?
            .require_success("Failed to update status")?;
        Ok(envelope.data_message_or("Status updated successfully"))
    }

    async fn extend_expiration(&self, activation_id: &str, by: ExpiryOffset) -> Result<String> {
        let body = serde_json::to_value(ExtendExpirationRequest {
            activation_id: activation_id.to_string(),
            offset: by.offset,
            unit: by.unit,
        })?;

        let envelope = self
            .put_json("/api/activation/extend-expiration", body)
            .await?
            .require_success("Failed to extend expiration")?;
        Ok(envelope.data_message_or("Expiration extended successfully"))
    }
}

/// Session expiry passes through untouched; everything else becomes `fallback`.
fn wrap_qr_error(err: Error, fallback: QrError) -> Error {
    if err.is_session_expired() {
        return err;
    }
    debug!("QR request failed: {}", err);
    fallback.into()
}

#[async_trait]
impl QrApi for AdminClient {
    async fn upload_qr(&self, upload: QrUpload) -> Result<()> {
        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(upload.mime)
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let form = Form::new().part("file", part);

        match self
            .request(Method::POST, "/api/upload-qr", RequestBody::Multipart(form))
            .await
        {
            Ok(_) => Ok(()),
            Err(err) => match err.api_status() {
                Some(413) => Err(QrError::TooLarge.into()),
                Some(415) => Err(QrError::UnsupportedType.into()),
                _ => Err(wrap_qr_error(err, QrError::Upload)),
            },
        }
    }

    async fn get_qr(&self) -> Result<Option<QrCode>> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct StoredQr {
            #[serde(default)]
            qr_code: Option<String>,
        }

        match self
            .request(Method::GET, "/api/qr", RequestBody::Empty)
            .await
        {
            Ok(envelope) => {
                let stored: StoredQr = envelope
                    .decode()
                    .map_err(|e| wrap_qr_error(e.into(), QrError::Fetch))?;
                Ok(stored
                    .qr_code
                    .filter(|c| !c.is_empty())
                    .map(|qr_code| QrCode { qr_code }))
            }
            Err(err) if err.api_status() == Some(404) => Ok(None),
            Err(err) => Err(wrap_qr_error(err, QrError::Fetch)),
        }
    }

    async fn delete_qr(&self) -> Result<()> {
        self.request(Method::DELETE, "/api/upload-qr", RequestBody::Empty)
            .await
            .map(|_| ())
            .map_err(|err| wrap_qr_error(err, QrError::Delete))
    }
}
