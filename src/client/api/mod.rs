//! API trait definitions split by responsibility
//!
//! - [`AuthApi`] - Credential exchange
//! - [`ActivationApi`] - Activation code operations
//! - [`QrApi`] - Account QR code asset

mod activation;
mod auth;
mod qr;

pub use activation::ActivationApi;
pub use auth::AuthApi;
pub use qr::QrApi;
