//! Admin API client
//!
//! [`AdminClient`] talks HTTP; the traits in [`api`] are the seam the rest
//! of the crate codes against.

pub mod admin;
pub mod api;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use admin::AdminClient;
#[allow(unused_imports)]
pub use api::{ActivationApi, AuthApi, QrApi};
#[cfg(test)]
pub use mock::MockAdminClient;
