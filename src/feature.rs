//! Feature types
//!
//! A feature is an internal identifier tied 1:1 to a filesystem-like path.
//! Key/value data hangs off the feature, never off the path directly, so that
//! a path can be looked up once and its data queried many times.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use crate::Result;

/// Database-generated identifier of a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureId(pub i64);

impl FeatureId {
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for FeatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl rusqlite::ToSql for FeatureId {
    fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl rusqlite::types::FromSql for FeatureId {
    fn column_result(value: rusqlite::types::ValueRef<'_>) -> rusqlite::types::FromSqlResult<Self> {
        i64::column_result(value).map(FeatureId)
    }
}

/// A feature row: the path and the id it is anchored to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub id: FeatureId,
    pub path: String,
}

impl Feature {
    pub fn new(id: FeatureId, path: impl Into<String>) -> Self {
        Self { id, path: path.into() }
    }
}

/// Key/value pairs of one feature, grouped by key.
///
/// Keys and values are kept sorted so that output is stable.
pub type FeatureDict = BTreeMap<i64, Vec<String>>;

/// Portable form of a feature used by import and export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub path: String,
    #[serde(default)]
    pub values: FeatureDict,
}

/// Load records from a JSON file
pub fn read_records(path: &Path) -> Result<Vec<FeatureRecord>> {
    let contents = std::fs::read_to_string(path)?;
    let records = serde_json::from_str(&contents)?;
    Ok(records)
}

/// Pretty-printed JSON form of records
pub fn records_to_json(records: &[FeatureRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Write records to a JSON file, replacing it
pub fn write_records(path: &Path, records: &[FeatureRecord]) -> Result<()> {
    std::fs::write(path, records_to_json(records)?)?;
    Ok(())
}

/// All paths that a feature on `path` may be inherited from, most specific first.
///
/// Every prefix ending right before or right after a `/` counts, as does the
/// path itself. For `a/b/c` this yields `a/b/c`, `a/b/`, `a/b`, `a/`, `a`.
pub fn ancestor_paths(path: &str) -> Vec<String> {
    let mut paths = vec![path.to_string()];
    for (idx, _) in path.rmatch_indices('/') {
        let with_slash = &path[..=idx];
        if with_slash != path {
            paths.push(with_slash.to_string());
        }
        if idx > 0 {
            paths.push(path[..idx].to_string());
        }
    }
    paths
}
