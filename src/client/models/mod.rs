//! Admin API data models
//!
//! Wire types for the admin API, organized by resource.

mod activation;
mod auth;
mod envelope;
mod qr;

#[allow(unused_imports)]
pub use activation::{
    ActivationRecord, ActivationStatus, ActivationUser, ExpiryOffset, ExpiryUnit,
    ExtendExpirationRequest, GenerateActivationRequest, GeneratedActivation, StatusAction,
    StatusUpdateRequest,
};
pub use auth::{LoginRequest, UserRecord};
pub use envelope::ApiEnvelope;
#[allow(unused_imports)]
pub use qr::{MAX_QR_UPLOAD_BYTES, QrCode, QrImage, QrUpload};
