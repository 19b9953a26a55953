//! SQLite storage implementation

use std::collections::BTreeSet;
use std::path::Path;
use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior, params, params_from_iter};
use crate::{Error, Result, validate_path, validate_value};
use crate::feature::{Feature, FeatureDict, FeatureId, FeatureRecord, ancestor_paths};
use super::schema;

/// Paths bound per `IN (...)` query, kept well under SQLite's variable limit
const BULK_CHUNK: usize = 500;

/// SQLite-backed storage for features and their key/value pairs
pub struct XFeatureStore {
    conn: Connection,
}

impl XFeatureStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        tracing::debug!("Opened feature store at {}", path.display());
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute_batch(schema::CONNECTION_PRAGMAS)?;
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Run `f` atomically.
    ///
    /// Opens an immediate transaction, committing when `f` succeeds and rolling
    /// back when it fails. When a transaction is already open, `f` joins it.
    pub fn with_transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Self) -> Result<T>,
    {
        if !self.conn.is_autocommit() {
            return f(self);
        }

        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)?;
        let value = f(self)?;
        tx.commit()?;
        Ok(value)
    }

    // ========== Feature Operations ==========

    /// Return the feature for path
    pub fn xfeature_get(&self, path: &str) -> Result<Option<FeatureId>> {
        self.conn
            .query_row(
                "SELECT feature_id FROM xfeatures WHERE path = ?1",
                [path],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Return the feature for path, failing if there is none
    pub fn xfeature_require(&self, path: &str) -> Result<FeatureId> {
        self.xfeature_get(path)?
            .ok_or_else(|| Error::FeatureNotFound(path.to_string()))
    }

    /// Return the features for paths, ordered by path.
    ///
    /// Duplicate paths are looked up once.
    pub fn xfeature_get_bulk<S: AsRef<str>>(&self, paths: &[S]) -> Result<Vec<Feature>> {
        let unique: BTreeSet<&str> = paths.iter().map(|p| p.as_ref()).collect();
        let unique: Vec<&str> = unique.into_iter().collect();

        let mut features = Vec::new();
        for chunk in unique.chunks(BULK_CHUNK) {
            let sql = format!(
                "SELECT feature_id, path FROM xfeatures WHERE path IN ({}) ORDER BY path",
                placeholders(chunk.len())
            );
            let mut stmt = self.conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(chunk.iter()), |row| self.row_to_feature(row))?;
            for row in rows {
                features.push(row?);
            }
        }

        features.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(features)
    }

    /// Create and return a feature for path.
    /// If the path has a feature, return it.
    pub fn xfeature_create(&self, path: &str) -> Result<FeatureId> {
        validate_path(path)?;
        if let Some(feature) = self.xfeature_get(path)? {
            return Ok(feature);
        }

        self.conn.execute("INSERT INTO xfeatures (path) VALUES (?1)", [path])?;
        let id = FeatureId(self.conn.last_insert_rowid());
        tracing::debug!("Created feature {} for {}", id, path);
        Ok(id)
    }

    /// Destroy a feature and all its key, value pairs.
    /// Returns whether a feature existed.
    pub fn xfeature_destroy(&self, path: &str) -> Result<bool> {
        validate_path(path)?;
        let deleted = self.conn.execute("DELETE FROM xfeatures WHERE path = ?1", [path])?;
        if deleted > 0 {
            tracing::debug!("Destroyed feature for {}", path);
        }
        Ok(deleted > 0)
    }

    /// Destroy features and all their key, value pairs.
    /// Returns the number of features removed.
    pub fn xfeature_destroy_bulk<S: AsRef<str>>(&self, paths: &[S]) -> Result<usize> {
        if paths.is_empty() {
            return Ok(0);
        }

        self.with_transaction(|store| {
            let mut deleted = 0;
            for chunk in paths.chunks(BULK_CHUNK) {
                let sql = format!(
                    "DELETE FROM xfeatures WHERE path IN ({})",
                    placeholders(chunk.len())
                );
                deleted += store
                    .conn
                    .execute(&sql, params_from_iter(chunk.iter().map(|p| p.as_ref())))?;
            }
            tracing::info!("Destroyed {} features", deleted);
            Ok(deleted)
        })
    }

    /// Return the features attached to path or any of its ancestors,
    /// most specific first.
    pub fn xfeature_inherit(&self, path: &str) -> Result<Vec<Feature>> {
        let candidates = ancestor_paths(path);
        let mut features = self.xfeature_get_bulk(&candidates)?;
        features.sort_by(|a, b| b.path.len().cmp(&a.path.len()));
        Ok(features)
    }

    /// List features, optionally only those whose path starts with prefix
    pub fn xfeature_list(&self, prefix: Option<&str>) -> Result<Vec<Feature>> {
        // LIKE is case-insensitive and treats `_` as a wildcard; compare the prefix instead
        let mut stmt = self.conn.prepare(
            "SELECT feature_id, path FROM xfeatures WHERE substr(path, 1, length(?1)) = ?1 ORDER BY path",
        )?;

        let features = stmt
            .query_map([prefix.unwrap_or("")], |row| self.row_to_feature(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(features)
    }

    /// List features holding at least one value under any of keys,
    /// optionally only those whose path starts with prefix
    pub fn xfeature_list_keyed(&self, prefix: Option<&str>, keys: &[i64]) -> Result<Vec<Feature>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT f.feature_id, f.path FROM xfeatures f \
             WHERE substr(f.path, 1, length(?1)) = ?1 \
             AND EXISTS (SELECT 1 FROM xfeaturevals v WHERE v.feature_id = f.feature_id AND v.key IN ({})) \
             ORDER BY f.path",
            key_placeholders(keys.len())
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let prefix = prefix.unwrap_or("");
        let mut bound: Vec<&dyn rusqlite::ToSql> = Vec::with_capacity(keys.len() + 1);
        bound.push(&prefix);
        for key in keys {
            bound.push(key);
        }

        let features = stmt
            .query_map(bound.as_slice(), |row| self.row_to_feature(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(features)
    }

    /// Count all features
    pub fn count_features(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM xfeatures", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Helper to convert a row to a Feature
    fn row_to_feature(&self, row: &rusqlite::Row) -> rusqlite::Result<Feature> {
        Ok(Feature {
            id: row.get(0)?,
            path: row.get(1)?,
        })
    }

    // ========== Value Operations ==========

    /// Return a dict mapping keys to list of values for feature
    pub fn feature_dict(&self, feature: FeatureId) -> Result<FeatureDict> {
        let mut stmt = self.conn.prepare(
            "SELECT key, value FROM xfeaturevals WHERE feature_id = ?1 ORDER BY key, value",
        )?;

        let mut dict = FeatureDict::new();
        let rows = stmt.query_map([feature], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;
        for row in rows {
            let (key, value) = row?;
            dict.entry(key).or_default().push(value);
        }

        Ok(dict)
    }

    /// Associate a key, value pair with a feature.
    /// Returns whether the pair was new.
    pub fn feature_set(&self, feature: FeatureId, key: i64, value: &str) -> Result<bool> {
        validate_value(value)?;
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO xfeaturevals (feature_id, key, value) VALUES (?1, ?2, ?3)",
            params![feature, key, value],
        )?;
        Ok(inserted > 0)
    }

    /// Associate the given key, and values with a feature.
    /// Returns the number of new pairs.
    pub fn feature_setmany<S: AsRef<str>>(&self, feature: FeatureId, key: i64, values: &[S]) -> Result<usize> {
        self.with_transaction(|store| {
            let mut inserted = 0;
            for value in values {
                if store.feature_set(feature, key, value.as_ref())? {
                    inserted += 1;
                }
            }
            Ok(inserted)
        })
    }

    /// Disassociate a key, value pair from a feature.
    /// Returns whether the pair existed.
    pub fn feature_unset(&self, feature: FeatureId, key: i64, value: &str) -> Result<bool> {
        let deleted = self.conn.execute(
            "DELETE FROM xfeaturevals WHERE feature_id = ?1 AND key = ?2 AND value = ?3",
            params![feature, key, value],
        )?;
        Ok(deleted > 0)
    }

    /// Disassociate the key for the values given, from a feature.
    /// Returns the number of pairs removed.
    pub fn feature_unsetmany<S: AsRef<str>>(&self, feature: FeatureId, key: i64, values: &[S]) -> Result<usize> {
        self.with_transaction(|store| {
            let mut deleted = 0;
            for value in values {
                if store.feature_unset(feature, key, value.as_ref())? {
                    deleted += 1;
                }
            }
            Ok(deleted)
        })
    }

    /// Return the list of values for a key of a feature
    pub fn feature_get(&self, feature: FeatureId, key: i64) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT value FROM xfeaturevals WHERE feature_id = ?1 AND key = ?2 ORDER BY value",
        )?;

        let values = stmt
            .query_map(params![feature, key], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        Ok(values)
    }

    /// Delete all key, value pairs for a key of a feature.
    /// Returns the number of pairs removed.
    pub fn feature_clear(&self, feature: FeatureId, key: i64) -> Result<usize> {
        let deleted = self.conn.execute(
            "DELETE FROM xfeaturevals WHERE feature_id = ?1 AND key = ?2",
            params![feature, key],
        )?;
        Ok(deleted)
    }

    /// Whether the feature holds at least one value under any of keys
    pub fn feature_has_keys(&self, feature: FeatureId, keys: &[i64]) -> Result<bool> {
        if keys.is_empty() {
            return Ok(false);
        }

        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM xfeaturevals WHERE feature_id = ?1 AND key IN ({}))",
            key_placeholders(keys.len())
        );
        let mut bound: Vec<&dyn rusqlite::ToSql> = Vec::with_capacity(keys.len() + 1);
        bound.push(&feature);
        for key in keys {
            bound.push(key);
        }

        let found: bool = self.conn.query_row(&sql, bound.as_slice(), |row| row.get(0))?;
        Ok(found)
    }

    /// Count all key, value pairs
    pub fn count_values(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM xfeaturevals", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ========== Bulk Operations ==========

    /// Dump every feature with its values, ordered by path
    pub fn export_records(&self) -> Result<Vec<FeatureRecord>> {
        let mut records = Vec::new();
        for feature in self.xfeature_list(None)? {
            records.push(FeatureRecord {
                values: self.feature_dict(feature.id)?,
                path: feature.path,
            });
        }
        Ok(records)
    }

    /// Create features and add their values in a single transaction.
    ///
    /// Existing features are extended, not replaced. `on_record` is called
    /// after each record is stored.
    pub fn import_records<F>(&self, records: &[FeatureRecord], mut on_record: F) -> Result<usize>
    where
        F: FnMut(&FeatureRecord),
    {
        self.with_transaction(|store| {
            let mut inserted = 0;
            for record in records {
                let feature = store.xfeature_create(&record.path)?;
                for (key, values) in &record.values {
                    inserted += store.feature_setmany(feature, *key, values)?;
                }
                on_record(record);
            }
            tracing::info!("Imported {} features ({} new values)", records.len(), inserted);
            Ok(inserted)
        })
    }

    /// Delete all data
    pub fn clear_all(&self) -> Result<()> {
        self.conn.execute("DELETE FROM xfeatures", [])?;
        Ok(())
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            features: self.count_features()?,
            values: self.count_values()?,
        })
    }
}

/// `?1, ?2, ...` for an `IN (...)` list of `n` parameters
fn placeholders(n: usize) -> String {
    (1..=n).map(|i| format!("?{}", i)).collect::<Vec<_>>().join(", ")
}

/// `?2, ?3, ...` for an `IN (...)` list that follows one leading parameter
fn key_placeholders(n: usize) -> String {
    (2..=n + 1).map(|i| format!("?{}", i)).collect::<Vec<_>>().join(", ")
}

/// Database statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct DbStats {
    pub features: usize,
    pub values: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_is_idempotent() {
        let store = XFeatureStore::open_in_memory().unwrap();

        let first = store.xfeature_create("acc/cont/obj").unwrap();
        let second = store.xfeature_create("acc/cont/obj").unwrap();
        assert_eq!(first, second);
        assert_eq!(store.count_features().unwrap(), 1);

        let other = store.xfeature_create("acc/cont/other").unwrap();
        assert_ne!(first, other);
    }

    #[test]
    fn test_create_rejects_empty_path() {
        let store = XFeatureStore::open_in_memory().unwrap();
        assert!(matches!(store.xfeature_create(""), Err(Error::InvalidPath(_))));
    }

    #[test]
    fn test_get_missing() {
        let store = XFeatureStore::open_in_memory().unwrap();
        assert_eq!(store.xfeature_get("nowhere").unwrap(), None);
        assert!(matches!(
            store.xfeature_require("nowhere"),
            Err(Error::FeatureNotFound(p)) if p == "nowhere"
        ));
    }

    #[test]
    fn test_get_bulk_dedups_and_orders() {
        let store = XFeatureStore::open_in_memory().unwrap();
        let b = store.xfeature_create("b").unwrap();
        let a = store.xfeature_create("a").unwrap();

        let features = store.xfeature_get_bulk(&["b", "a", "b", "missing"]).unwrap();
        assert_eq!(features, vec![Feature::new(a, "a"), Feature::new(b, "b")]);

        let empty: &[&str] = &[];
        assert!(store.xfeature_get_bulk(empty).unwrap().is_empty());
    }

    #[test]
    fn test_get_bulk_spans_chunks() {
        let store = XFeatureStore::open_in_memory().unwrap();
        let paths: Vec<String> = (0..BULK_CHUNK + 10).map(|i| format!("p/{:04}", i)).collect();
        for path in &paths {
            store.xfeature_create(path).unwrap();
        }

        let features = store.xfeature_get_bulk(&paths).unwrap();
        assert_eq!(features.len(), paths.len());
        assert_eq!(features[0].path, "p/0000");
    }

    #[test]
    fn test_destroy_cascades_values() {
        let store = XFeatureStore::open_in_memory().unwrap();
        let feature = store.xfeature_create("a/b").unwrap();
        store.feature_setmany(feature, 0, &["alice", "bob"]).unwrap();
        assert_eq!(store.count_values().unwrap(), 2);

        assert!(store.xfeature_destroy("a/b").unwrap());
        assert_eq!(store.xfeature_get("a/b").unwrap(), None);
        assert_eq!(store.count_values().unwrap(), 0);

        assert!(!store.xfeature_destroy("a/b").unwrap());
        assert!(matches!(store.xfeature_destroy(""), Err(Error::InvalidPath(_))));
    }

    #[test]
    fn test_destroy_bulk() {
        let store = XFeatureStore::open_in_memory().unwrap();
        for path in ["x", "y", "z"] {
            let feature = store.xfeature_create(path).unwrap();
            store.feature_set(feature, 1, "carol").unwrap();
        }

        let empty: &[&str] = &[];
        assert_eq!(store.xfeature_destroy_bulk(empty).unwrap(), 0);

        assert_eq!(store.xfeature_destroy_bulk(&["x", "z", "missing"]).unwrap(), 2);
        let remaining = store.xfeature_list(None).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].path, "y");
        assert_eq!(store.count_values().unwrap(), 1);
    }

    #[test]
    fn test_multi_valued_keys() {
        let store = XFeatureStore::open_in_memory().unwrap();
        let feature = store.xfeature_create("a").unwrap();

        assert!(store.feature_set(feature, 0, "bob").unwrap());
        assert!(store.feature_set(feature, 0, "alice").unwrap());
        assert!(!store.feature_set(feature, 0, "alice").unwrap());
        store.feature_set(feature, 1, "alice").unwrap();

        assert_eq!(store.feature_get(feature, 0).unwrap(), vec!["alice", "bob"]);
        assert_eq!(store.feature_get(feature, 1).unwrap(), vec!["alice"]);
        assert!(store.feature_get(feature, 7).unwrap().is_empty());

        let dict = store.feature_dict(feature).unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict[&0], vec!["alice", "bob"]);
        assert_eq!(dict[&1], vec!["alice"]);
    }

    #[test]
    fn test_setmany_counts_new_pairs() {
        let store = XFeatureStore::open_in_memory().unwrap();
        let feature = store.xfeature_create("a").unwrap();

        assert_eq!(store.feature_setmany(feature, 0, &["a", "b"]).unwrap(), 2);
        assert_eq!(store.feature_setmany(feature, 0, &["b", "c"]).unwrap(), 1);
        assert_eq!(store.feature_get(feature, 0).unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_setmany_rolls_back_on_invalid_value() {
        let store = XFeatureStore::open_in_memory().unwrap();
        let feature = store.xfeature_create("a").unwrap();
        let too_long = "v".repeat(crate::MAX_VALUE_LEN + 1);

        let result = store.feature_setmany(feature, 0, &["ok".to_string(), too_long]);
        assert!(matches!(result, Err(Error::InvalidValue(_))));
        assert!(store.feature_get(feature, 0).unwrap().is_empty());
    }

    #[test]
    fn test_unset_and_clear() {
        let store = XFeatureStore::open_in_memory().unwrap();
        let feature = store.xfeature_create("a").unwrap();
        store.feature_setmany(feature, 0, &["a", "b", "c"]).unwrap();
        store.feature_setmany(feature, 1, &["a"]).unwrap();

        assert!(store.feature_unset(feature, 0, "a").unwrap());
        assert!(!store.feature_unset(feature, 0, "a").unwrap());
        assert_eq!(store.feature_unsetmany(feature, 0, &["b", "zzz"]).unwrap(), 1);
        assert_eq!(store.feature_get(feature, 0).unwrap(), vec!["c"]);

        assert_eq!(store.feature_clear(feature, 0).unwrap(), 1);
        assert!(store.feature_get(feature, 0).unwrap().is_empty());
        assert_eq!(store.feature_get(feature, 1).unwrap(), vec!["a"]);
    }

    #[test]
    fn test_inherit_most_specific_first() {
        let store = XFeatureStore::open_in_memory().unwrap();
        store.xfeature_create("acc").unwrap();
        store.xfeature_create("acc/cont/").unwrap();
        store.xfeature_create("acc/cont/dir/obj").unwrap();
        store.xfeature_create("acc/container").unwrap();

        let paths: Vec<String> = store
            .xfeature_inherit("acc/cont/dir/obj")
            .unwrap()
            .into_iter()
            .map(|f| f.path)
            .collect();
        assert_eq!(paths, vec!["acc/cont/dir/obj", "acc/cont/", "acc"]);

        assert!(store.xfeature_inherit("other/obj").unwrap().is_empty());
    }

    #[test]
    fn test_list_with_prefix_is_literal() {
        let store = XFeatureStore::open_in_memory().unwrap();
        store.xfeature_create("a_b/x").unwrap();
        store.xfeature_create("A_B/z").unwrap();
        store.xfeature_create("axb/y").unwrap();
        store.xfeature_create("c").unwrap();

        let listed = store.xfeature_list(Some("a_b")).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].path, "a_b/x");
        assert_eq!(store.xfeature_list(None).unwrap().len(), 4);
        assert_eq!(store.xfeature_list(Some("")).unwrap().len(), 4);
    }

    #[test]
    fn test_import_export() {
        let store = XFeatureStore::open_in_memory().unwrap();
        let mut values = FeatureDict::new();
        values.insert(0, vec!["alice".to_string(), "bob".to_string()]);
        values.insert(1, vec!["alice".to_string()]);
        let records = vec![
            FeatureRecord { path: "a/x".to_string(), values },
            FeatureRecord { path: "a/y".to_string(), values: FeatureDict::new() },
        ];

        let mut seen = 0;
        let inserted = store.import_records(&records, |_| seen += 1).unwrap();
        assert_eq!(inserted, 3);
        assert_eq!(seen, 2);
        assert_eq!(store.export_records().unwrap(), records);
    }

    #[test]
    fn test_import_is_atomic() {
        let store = XFeatureStore::open_in_memory().unwrap();
        let records = vec![
            FeatureRecord { path: "good".to_string(), values: FeatureDict::new() },
            FeatureRecord { path: String::new(), values: FeatureDict::new() },
        ];

        assert!(store.import_records(&records, |_| {}).is_err());
        assert_eq!(store.count_features().unwrap(), 0);
    }

    #[test]
    fn test_file_backed_cascade_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("features.db");

        {
            let store = XFeatureStore::open(&db).unwrap();
            let feature = store.xfeature_create("a").unwrap();
            store.feature_set(feature, 0, "alice").unwrap();
        }

        let store = XFeatureStore::open(&db).unwrap();
        let feature = store.xfeature_get("a").unwrap().unwrap();
        assert_eq!(store.feature_get(feature, 0).unwrap(), vec!["alice"]);

        store.xfeature_destroy("a").unwrap();
        assert_eq!(store.stats().unwrap().values, 0);
    }

    #[test]
    fn test_list_keyed_skips_features_without_those_keys() {
        let store = XFeatureStore::open_in_memory().unwrap();
        let granted = store.xfeature_create("acc/").unwrap();
        store.feature_set(granted, 0, "alice").unwrap();
        let tagged = store.xfeature_create("acc/photos").unwrap();
        store.feature_set(tagged, 7, "tag").unwrap();
        store.xfeature_create("acc/empty").unwrap();
        let writable = store.xfeature_create("other/x").unwrap();
        store.feature_set(writable, 1, "bob").unwrap();

        let paths: Vec<String> = store
            .xfeature_list_keyed(Some("acc/"), &[0, 1])
            .unwrap()
            .into_iter()
            .map(|f| f.path)
            .collect();
        assert_eq!(paths, vec!["acc/"]);

        assert_eq!(store.xfeature_list_keyed(None, &[0, 1]).unwrap().len(), 2);
        assert_eq!(store.xfeature_list_keyed(None, &[7]).unwrap()[0].path, "acc/photos");
        assert!(store.xfeature_list_keyed(None, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_feature_has_keys() {
        let store = XFeatureStore::open_in_memory().unwrap();
        let feature = store.xfeature_create("a").unwrap();
        assert!(!store.feature_has_keys(feature, &[0, 1]).unwrap());

        store.feature_set(feature, 7, "tag").unwrap();
        assert!(!store.feature_has_keys(feature, &[0, 1]).unwrap());
        assert!(store.feature_has_keys(feature, &[7]).unwrap());

        store.feature_set(feature, 1, "bob").unwrap();
        assert!(store.feature_has_keys(feature, &[0, 1]).unwrap());
        assert!(!store.feature_has_keys(feature, &[]).unwrap());
    }

    #[test]
    fn test_clear_all() {
        let store = XFeatureStore::open_in_memory().unwrap();
        let feature = store.xfeature_create("a").unwrap();
        store.feature_set(feature, 0, "v").unwrap();

        store.clear_all().unwrap();
        let stats = store.stats().unwrap();
        assert_eq!(stats.features, 0);
        assert_eq!(stats.values, 0);
    }
}
