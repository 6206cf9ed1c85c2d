//! # legifrance-search
//!
//! Typed search toolkit over the Legifrance legal corpus (statutes, codes,
//! judicial case law) for language-model agents.
//!
//! The crate is the query-construction and result-aggregation engine behind
//! three search tools: it validates tool arguments, builds correctly-shaped
//! requests per search domain, rate-limits and paginates calls against the
//! remote API, and normalizes the heterogeneous result shapes into one
//! uniform record. Protocol transport, credential storage, and prompt
//! rendering are left to the embedding process.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use legifrance_search::{ApiConfig, RateLimiter, ToolDispatcher};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::from_env()?;
//!     let limiter = Arc::new(RateLimiter::new(config.requests_per_second));
//!     let dispatcher = ToolDispatcher::new(&config, limiter)?;
//!
//!     let response = dispatcher
//!         .dispatch(
//!             "rechercher_dans_texte_legal",
//!             json!({"text_id": "78-17", "search": "7", "champ": "NUM_ARTICLE"}),
//!         )
//!         .await?;
//!     println!("{} résultats", response.total_fetched);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod limiter;
pub mod prompts;
pub mod search;
pub mod tools;
pub mod types;

pub use client::{Backoff, HttpClient};
pub use config::{ApiConfig, ConfigError};
pub use error::{ErrorBody, SearchError};
pub use limiter::RateLimiter;
pub use search::{AggregatedResult, NormalizedItem, Page, Paginator, WireRequest};
pub use tools::{SearchResponse, ToolDefinition, ToolDispatcher, tool_definitions};
pub use types::{
    BulletinFlag, CriteriaBuilder, FieldSelector, MatchMode, SearchCriteria, SearchDomain,
    SortOrder,
};
