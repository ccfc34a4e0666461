//! Authentication module
//!
//! Supports: Basic (API key and secret), Bearer
//!
//! The Huntress API authenticates every request with HTTP Basic credentials
//! built from the account's API key and secret.

mod authenticator;
mod types;

pub use authenticator::{basic_token, Authenticator, AUTHORIZATION_HEADER};
pub use types::AuthConfig;
