//! Pagination types and helpers
//!
//! Defines the paginator abstraction the client drives, and the pure helpers
//! that pull the payload and the pagination metadata out of a response body.

use crate::types::{JsonObject, JsonValue, QueryParams};

/// Query parameter carrying the page size
pub const LIMIT_PARAM: &str = "limit";

/// Query parameter carrying the cursor token
pub const PAGE_TOKEN_PARAM: &str = "page_token";

/// Response key holding the pagination metadata
pub const PAGINATION_KEY: &str = "pagination";

/// Metadata key holding the cursor for the following page
pub const NEXT_PAGE_TOKEN_KEY: &str = "next_page_token";

/// Core trait for page-by-page traversal
///
/// The caller loops while [`Paginator::has_more_pages`] is true, merges
/// [`Paginator::page_params`] into the request, and feeds the decoded body
/// back through [`Paginator::advance`].
pub trait Paginator {
    /// Parameters to merge into the next request's query string
    fn page_params(&self) -> QueryParams;

    /// Whether another request should be issued.
    ///
    /// This moves the cursor forward, so it must be called before
    /// [`Paginator::page_params`] for every page.
    fn has_more_pages(&mut self) -> bool;

    /// Record a processed response body
    fn advance(&mut self, body: &JsonValue);
}

/// Unwrap the primary resource from a response envelope.
///
/// Objects whose first key holds an array or an object yield that value;
/// any other body (arrays, scalars, objects with a scalar first value) comes
/// back unchanged. Key order matters: the primary resource must be first.
pub fn extract_payload(body: &JsonValue) -> &JsonValue {
    match body {
        JsonValue::Object(map) if leads_with_collection(map) => {
            map.values().next().unwrap_or(body)
        }
        _ => body,
    }
}

/// Owned variant of [`extract_payload`]
pub fn into_payload(body: JsonValue) -> JsonValue {
    match body {
        JsonValue::Object(map) if leads_with_collection(&map) => map
            .into_iter()
            .next()
            .map_or(JsonValue::Null, |(_, value)| value),
        other => other,
    }
}

fn leads_with_collection(map: &JsonObject) -> bool {
    map.values()
        .next()
        .is_some_and(|first| first.is_array() || first.is_object())
}

/// Pagination metadata of a response body, if any.
///
/// A `pagination` key holding `null` counts as absent.
pub fn extract_pagination_metadata(body: &JsonValue) -> Option<&JsonValue> {
    body.as_object()?
        .get(PAGINATION_KEY)
        .filter(|value| !value.is_null())
}
