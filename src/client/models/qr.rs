//! QR code asset models

use std::path::Path;

use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};

use crate::error::QrError;

/// Largest image the upload endpoint accepts
pub const MAX_QR_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Stored QR code as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    /// Image location: a `data:` URL or a fetchable URL
    pub qr_code: String,
}

impl QrCode {
    /// Decode or locate the image bytes
    pub fn image(&self) -> Result<QrImage, QrError> {
        QrImage::from_source(&self.qr_code)
    }
}

/// Where the bytes of a QR image come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrImage {
    /// Inline image carried in a `data:` URL
    Inline { mime: String, bytes: Vec<u8> },
    /// Image that must be downloaded
    Remote(String),
}

impl QrImage {
    /// Classify an image source, decoding inline base64 data
    pub fn from_source(source: &str) -> Result<Self, QrError> {
        let Some(rest) = source.strip_prefix("data:") else {
            return Ok(QrImage::Remote(source.to_string()));
        };

        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| QrError::Decode("data URL has no payload".to_string()))?;

        let Some(mime) = meta.strip_suffix(";base64") else {
            return Err(QrError::Decode(
                "only base64 data URLs are supported".to_string(),
            ));
        };

        let bytes = general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| QrError::Decode(e.to_string()))?;

        Ok(QrImage::Inline {
            mime: mime.to_string(),
            bytes,
        })
    }
}

/// Image file staged for upload
#[derive(Debug, Clone)]
pub struct QrUpload {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl QrUpload {
    /// Validate name and size before anything is sent
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, QrError> {
        let file_name = file_name.into();
        let extension = Path::new(&file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let mime = match extension.as_deref() {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            _ => return Err(QrError::UnsupportedType),
        };

        if bytes.len() > MAX_QR_UPLOAD_BYTES {
            return Err(QrError::TooLarge);
        }

        Ok(Self {
            file_name,
            mime,
            bytes,
        })
    }

    /// Read and validate an image from disk
    pub fn from_path(path: &Path) -> crate::error::Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        // Check before reading so a huge file is never loaded
        let size = std::fs::metadata(path)?.len();
        if size > MAX_QR_UPLOAD_BYTES as u64 {
            return Err(QrError::TooLarge.into());
        }

        let bytes = std::fs::read(path)?;
        Ok(Self::new(file_name, bytes)?)
    }
}
