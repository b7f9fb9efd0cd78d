//! Domain rule-set deduplication engine.
//!
//! This crate provides:
//! - JSON rule-set schema with passthrough of unknown keys
//! - A per-run registry enforcing global value uniqueness across
//!   `domain`, `domain_suffix` and `domain_keyword`
//! - The field deduplicator and the redundant-rule pruner
//! - A filesystem store with atomic writes and timestamped backups

pub mod dedup;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod prune;
pub mod registry;
pub mod schema;

pub use error::{DedupError, Result};
pub use pipeline::{process, ProcessSummary};
pub use prune::PrunePolicy;
