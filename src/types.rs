//! Common types used throughout the client
//!
//! Shared type aliases and small enums used by more than one module.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type (insertion ordered)
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Query parameters sent with a request
pub type QueryParams = HashMap<String, String>;

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

// ============================================================================
// Termination Rule
// ============================================================================

/// How a pager decides that a traversal is over once the server has sent
/// pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Any `pagination` object means another page follows, even when its
    /// `next_page_token` is null.
    #[default]
    MetadataPresent,
    /// Another page follows only when `next_page_token` is a non-empty value.
    TokenPresent,
}

// ============================================================================
// Utilities
// ============================================================================

/// Render a JSON scalar as a query-string value
///
/// Strings are taken verbatim and numbers are formatted. Anything else,
/// booleans included, is not a usable token.
pub fn scalar_to_string(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
