//! Authenticator implementation
//!
//! Renders the `Authorization` header for a request.

use super::types::AuthConfig;
use crate::http::RequestConfig;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Header carrying the credentials
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Authenticator applies credentials to outgoing requests
#[derive(Debug, Clone)]
pub struct Authenticator {
    config: AuthConfig,
    /// Pre-rendered header value
    authorization: Option<String>,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        let authorization = match &config {
            AuthConfig::None => None,
            AuthConfig::Basic { username, password } => Some(format!(
                "Basic {}",
                basic_token(username, password)
            )),
            AuthConfig::Bearer { token } => Some(format!("Bearer {token}")),
        };

        Self {
            config,
            authorization,
        }
    }

    /// Value of the `Authorization` header, if any
    pub fn authorization(&self) -> Option<&str> {
        self.authorization.as_deref()
    }

    /// Add credentials to a request config
    pub fn apply(&self, request: RequestConfig) -> RequestConfig {
        match &self.authorization {
            Some(value) => request.header(AUTHORIZATION_HEADER, value.clone()),
            None => request,
        }
    }

    /// Get the current auth config
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

/// Encode `username:password` with standard, padded base64
pub fn basic_token(username: &str, password: &str) -> String {
    STANDARD.encode(format!("{username}:{password}"))
}
