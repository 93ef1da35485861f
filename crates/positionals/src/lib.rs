//! # positionals
//!
//! Keeps a local, queryable copy of the positional-attack table in sync with
//! a published spreadsheet.
//!
//! This crate provides:
//! - Fetching the remote CSV export with a bounded timeout
//! - A cache file that is only rewritten when the remote content changes
//! - Header-driven CSV parsing into a two-level index (action id, then percent)
//! - [`PositionalManager`], which ties these together and serves queries
//!
//! ## Feature Flags
//!
//! - `http` (default): Enables [`HttpSource`] and [`PositionalManager::new`].
//!   Without it, callers supply their own [`SheetSource`].

pub mod cache;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod fetch;
pub mod index;
pub mod manager;
pub mod model;
pub mod parser;

pub use cache::CacheFile;
pub use config::{CACHE_FILE, ColumnSchema, DEFAULT_SOURCE_URL, ManagerConfig, ManagerConfigBuilder};
pub use diagnostics::{Diagnostic, DiagnosticSink, MemorySink, Severity, TracingSink};
pub use error::{Error, Result};
#[cfg(feature = "http")]
pub use fetch::HttpSource;
pub use fetch::SheetSource;
pub use index::PositionalIndex;
pub use manager::{LoadOutcome, PositionalManager, RefreshReport, SyncOutcome};
pub use model::{ActionPosition, PositionalAction, PositionalParameters, PositionalRecord};
pub use parser::{parse_hit, parse_str, parse_table};
