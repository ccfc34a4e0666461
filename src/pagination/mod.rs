//! Pagination module
//!
//! Huntress collections are paged with a `limit` query parameter and an
//! opaque `page_token` cursor. Every collection response carries its records
//! under a single leading key and, when more data may follow, a sibling
//! `pagination` object with a `next_page_token`.
//!
//! # Overview
//!
//! [`Pager`] tracks the cursor across requests. The free functions
//! [`extract_payload`] and [`extract_pagination_metadata`] are pure and work
//! on any decoded body.

mod pager;
mod types;

pub use pager::Pager;
pub use types::{
    extract_pagination_metadata, extract_payload, into_payload, Paginator, LIMIT_PARAM,
    NEXT_PAGE_TOKEN_KEY, PAGE_TOKEN_PARAM, PAGINATION_KEY,
};
