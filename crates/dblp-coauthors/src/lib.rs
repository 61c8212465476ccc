//! DBLP co-author search
//!
//! Finds the recent collaborators of a set of seed authors in a local DBLP
//! snapshot (three tab-separated files) loaded into an in-memory DuckDB
//! database.
//!
//! # Features
//!
//! - **Search session**: resolve names or identifier URLs, query joint
//!   papers within a year cutoff, and reshape the result without re-querying
//! - **Tool server**: JSON-RPC 2.0 over stdio for a host UI
//! - **Snapshot upkeep**: refresh the RDF dump when stale and convert it into
//!   snapshot files
//!
//! # Example
//!
//! ```no_run
//! use dblp_coauthors::{Config, SearchSession, models::Matcher, session::cutoff_year_from_now};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut session = SearchSession::open(Config::from_env()?)?;
//!     session.search("Turing, Alan", Matcher::StartsWith, cutoff_year_from_now(5, false))?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod formatters;
pub mod models;
pub mod refresh;
pub mod resolver;
pub mod server;
pub mod session;
pub mod shaper;
pub mod store;
pub mod tools;

pub use config::{Config, RefreshConfig};
pub use error::{ConvertError, RefreshError, SessionError, StoreError, ToolError};
pub use session::SearchSession;
pub use store::DblpStore;
