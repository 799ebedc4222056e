//! Display model implementations for table and JSON output
//!
//! Display models transform API response types into CLI-friendly formats
//! with appropriate column names and serialization.

mod activation;
mod common;
mod user;

pub use activation::{ActivationDisplay, GeneratedDisplay};
pub use user::{UserDisplay, summarize_users};
