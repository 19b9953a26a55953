//! # xfeatures - Path-keyed feature store
//!
//! Features are path properties that allow non-nested inheritance patterns.
//! Each path owns at most one feature, and each feature carries a multi-valued
//! map of integer keys to string values.
//!
//! xfeatures provides:
//! - SQLite-backed storage for features and their key/value pairs
//! - Bulk lookup and deletion by path
//! - Ancestor lookup for path-based inheritance
//! - A read/write permission layer built on top of the store

pub mod feature;
pub mod storage;
pub mod permissions;
pub mod ui;
pub mod output;
pub mod config;

// Re-exports for convenient access
pub use feature::{Feature, FeatureDict, FeatureId, FeatureRecord, read_records, records_to_json, write_records};
pub use permissions::{Access, AccessMap, Permissions};
pub use storage::XFeatureStore;

/// Maximum length of a feature path, in bytes
pub const MAX_PATH_LEN: usize = 2048;

/// Maximum length of a feature value, in bytes
pub const MAX_VALUE_LEN: usize = 256;

/// Result type alias for xfeatures operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for xfeatures operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Feature not found: {0}")]
    FeatureNotFound(String),
}

/// Check that a path can be stored as a feature path
pub fn validate_path(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(Error::InvalidPath("path must not be empty".to_string()));
    }
    if path.len() > MAX_PATH_LEN {
        return Err(Error::InvalidPath(format!(
            "path is {} bytes, limit is {}",
            path.len(),
            MAX_PATH_LEN
        )));
    }
    Ok(())
}

/// Check that a value fits the value column
pub fn validate_value(value: &str) -> Result<()> {
    if value.len() > MAX_VALUE_LEN {
        return Err(Error::InvalidValue(format!(
            "value is {} bytes, limit is {}",
            value.len(),
            MAX_VALUE_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("account/container/object").is_ok());
        assert!(matches!(validate_path(""), Err(Error::InvalidPath(_))));
        assert!(validate_path(&"a".repeat(MAX_PATH_LEN)).is_ok());
        assert!(validate_path(&"a".repeat(MAX_PATH_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_value() {
        assert!(validate_value("").is_ok());
        assert!(validate_value(&"v".repeat(MAX_VALUE_LEN)).is_ok());
        assert!(matches!(
            validate_value(&"v".repeat(MAX_VALUE_LEN + 1)),
            Err(Error::InvalidValue(_))
        ));
    }
}
