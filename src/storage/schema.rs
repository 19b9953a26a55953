//! Database schema definitions

/// Pragmas applied to every connection. Cascading deletes depend on
/// foreign key enforcement, which SQLite leaves off by default.
pub const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON;";

/// SQL to create the xfeatures table
pub const CREATE_XFEATURES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS xfeatures (
    feature_id INTEGER PRIMARY KEY,
    path VARCHAR(2048) NOT NULL
)
"#;

/// SQL to create the xfeaturevals table
/// One row per (feature, key, value); several values per key are allowed
pub const CREATE_XFEATUREVALS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS xfeaturevals (
    feature_id INTEGER NOT NULL REFERENCES xfeatures(feature_id) ON DELETE CASCADE,
    key INTEGER NOT NULL,
    value VARCHAR(256) NOT NULL,
    PRIMARY KEY (feature_id, key, value)
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_features_path ON xfeatures(path)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_XFEATURES_TABLE, CREATE_XFEATUREVALS_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
