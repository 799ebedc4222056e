//! Error types for the actctl CLI

use thiserror::Error;

/// Result type alias for actctl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Qr(#[from] QrError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

impl Error {
    /// True when the error is the forced logout raised on a 401/403 response.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Error::Api(ApiError::SessionExpired))
    }

    /// HTTP status of a failed API call, if this is one.
    pub fn api_status(&self) -> Option<u16> {
        match self {
            Error::Api(api) => api.status(),
            _ => None,
        }
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered 401 or 403; the local session has been cleared.
    #[error("Session expired. Please login again.")]
    SessionExpired,

    #[error("Not signed in. Run `actctl login` to start a session.")]
    NotSignedIn,

    #[error("API call failed: {reason}")]
    CallFailed { status: u16, reason: String },

    /// The server answered 2xx but declared `success: false`.
    #[error("{0}")]
    Rejected(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// HTTP status carried by a failed call, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::CallFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `actctl init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("API URL not configured. Run `actctl init` or pass --api-url.")]
    MissingApiUrl,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Sign-in outcomes other than success
#[derive(Debug, Error)]
pub enum AuthError {
    /// The server answered but did not grant console access
    #[error("{0}")]
    Rejected(String),

    /// The login request itself failed
    #[error("{0}")]
    Failed(String),

    #[error("{0} not implemented")]
    NotImplemented(&'static str),
}

/// Session storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to write session storage at {path}: {reason}")]
    Write { path: String, reason: String },
}

/// QR asset errors with user-facing messages
#[derive(Debug, Error)]
pub enum QrError {
    #[error("File size is too large. Please upload a smaller file.")]
    TooLarge,

    #[error("Invalid file format. Please upload a PNG, JPG, or JPEG file.")]
    UnsupportedType,

    #[error("Failed to upload QR code. Please try again.")]
    Upload,

    #[error("Failed to fetch QR code. Please try again.")]
    Fetch,

    #[error("Failed to delete QR code. Please try again.")]
    Delete,

    #[error("QR code image could not be decoded: {0}")]
    Decode(String),
}
