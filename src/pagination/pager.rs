//! Cursor pager for the `limit` / `page_token` protocol

use super::types::{
    extract_pagination_metadata, Paginator, LIMIT_PARAM, NEXT_PAGE_TOKEN_KEY, PAGE_TOKEN_PARAM,
};
use crate::error::{Error, Result};
use crate::types::{scalar_to_string, JsonValue, QueryParams, Termination};
use tracing::{debug, warn};

/// Stateful cursor tracker for one traversal of a collection endpoint.
///
/// ```rust,ignore
/// let mut pager = Pager::new(50)?;
/// while pager.has_more_pages() {
///     let body = transport.get_json(path, pager.page_params()).await?;
///     records.push(extract_payload(&body).clone());
///     pager.advance(&body);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Pager {
    page_size: u32,
    page: u32,
    cursor: Option<String>,
    metadata: Option<JsonValue>,
    termination: Termination,
}

impl Pager {
    /// Create a pager that keeps going whenever the last response carried
    /// pagination metadata
    pub fn new(page_size: u32) -> Result<Self> {
        Self::with_termination(page_size, Termination::MetadataPresent)
    }

    /// Create a pager with an explicit termination rule
    pub fn with_termination(page_size: u32, termination: Termination) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::invalid_value(
                "page_size",
                "must be a positive integer",
            ));
        }

        Ok(Self {
            page_size,
            page: 1,
            cursor: None,
            metadata: None,
            termination,
        })
    }

    /// Number of records requested per page
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// One-based index of the page about to be fetched
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Cursor sent with the next request
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// Pagination metadata from the most recent response
    pub fn metadata(&self) -> Option<&JsonValue> {
        self.metadata.as_ref()
    }

    /// Termination rule in effect
    pub fn termination(&self) -> Termination {
        self.termination
    }
}

impl Paginator for Pager {
    fn page_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert(LIMIT_PARAM.to_string(), self.page_size.to_string());
        if let Some(cursor) = &self.cursor {
            params.insert(PAGE_TOKEN_PARAM.to_string(), cursor.clone());
        }
        params
    }

    fn has_more_pages(&mut self) -> bool {
        let Some(metadata) = &self.metadata else {
            return self.page == 1;
        };

        self.cursor = metadata.get(NEXT_PAGE_TOKEN_KEY).and_then(scalar_to_string);

        match self.termination {
            Termination::MetadataPresent => {
                if self.cursor.is_none() {
                    warn!(
                        page = self.page,
                        "pagination metadata has no next_page_token, continuing anyway"
                    );
                }
                true
            }
            Termination::TokenPresent => self.cursor.as_deref().is_some_and(|t| !t.is_empty()),
        }
    }

    fn advance(&mut self, body: &JsonValue) {
        self.page = self.page.saturating_add(1);
        self.metadata = extract_pagination_metadata(body).cloned();
        debug!(
            page = self.page,
            has_metadata = self.metadata.is_some(),
            "advanced pager"
        );
    }
}
