//! QR code asset API trait

use async_trait::async_trait;

use crate::client::models::{QrCode, QrUpload};
use crate::error::Result;

/// Operations on the account's single QR image
#[async_trait]
pub trait QrApi: Send + Sync {
    /// Upload an image, replacing any stored one
    async fn upload_qr(&self, upload: QrUpload) -> Result<()>;

    /// Fetch the stored image; `None` when none is configured
    async fn get_qr(&self) -> Result<Option<QrCode>>;

    /// Remove the stored image
    async fn delete_qr(&self) -> Result<()>;
}
