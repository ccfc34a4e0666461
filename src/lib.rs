// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Huntress API client
//!
//! A small async client for the Huntress REST API: account lookup, resource
//! listing with cursor pagination, single-record fetches and basic-auth
//! login.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use huntress::{ClientConfig, HuntressClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::builder()
//!         .credentials("hk_...", "hs_...")
//!         .page_size(100)
//!         .build()?;
//!
//!     let mut client = HuntressClient::new(config)?;
//!     let account = client.login().await?;
//!     println!("logged in as {}", account["name"]);
//!
//!     for organization in client.organizations(Default::default()).await? {
//!         println!("{}", organization["name"]);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     HuntressClient                       │
//! │  login()  get()  get_paged()  paged_stream()  list()     │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────┬─────────────┴───────┬─────────────────────┐
//! │    Auth      │     Pagination      │      Transport      │
//! ├──────────────┼─────────────────────┼─────────────────────┤
//! │ Basic        │ Pager (page_token)  │ reqwest             │
//! │ Bearer       │ Envelope unwrapping │ Retry / Backoff     │
//! │              │                     │ Rate limit (60/min) │
//! └──────────────┴─────────────────────┴─────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration
pub mod config;

/// Authentication
pub mod auth;

/// HTTP transport with retry and rate limiting
pub mod http;

/// Cursor pagination
pub mod pagination;

/// Resource table
pub mod resources;

/// API client
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::HuntressClient;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use pagination::{extract_pagination_metadata, extract_payload, Pager, Paginator};
pub use resources::Resource;
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
