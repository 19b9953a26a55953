//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - xfeatures(feature_id, path)
//! - xfeaturevals(feature_id, key, value)

pub mod schema;
pub mod sqlite;

pub use sqlite::{DbStats, XFeatureStore};
