//! Read/write permissions stored as features
//!
//! Grants live on the feature of a path under two keys, one per access
//! level. A path without grants of its own is governed by the nearest
//! ancestor that has some.

use serde::{Deserialize, Serialize};
use crate::Result;
use crate::storage::XFeatureStore;

/// Feature key holding the members with read access
pub const READ: i64 = 0;

/// Feature key holding the members with write access
pub const WRITE: i64 = 1;

/// Keys that make a feature a grant holder
const GRANT_KEYS: [i64; 2] = [READ, WRITE];

/// Member name that matches everyone
pub const EVERYONE: &str = "*";

/// Access level being granted or checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Read,
    Write,
}

impl Access {
    /// Feature key the access level is stored under
    pub fn key(&self) -> i64 {
        match self {
            Access::Read => READ,
            Access::Write => WRITE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Access::Read => "read",
            Access::Write => "write",
        }
    }
}

impl std::fmt::Display for Access {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Members granted each access level on a path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessMap {
    #[serde(default)]
    pub read: Vec<String>,
    #[serde(default)]
    pub write: Vec<String>,
}

impl AccessMap {
    pub fn is_empty(&self) -> bool {
        self.read.is_empty() && self.write.is_empty()
    }

    /// Whether `member` holds `access`. Write implies read.
    pub fn allows(&self, access: Access, member: &str) -> bool {
        let matches = |members: &[String]| {
            members.iter().any(|m| m == member || m == EVERYONE)
        };
        match access {
            Access::Read => matches(&self.read) || matches(&self.write),
            Access::Write => matches(&self.write),
        }
    }
}

/// Permission operations over a feature store
pub struct Permissions<'a> {
    store: &'a XFeatureStore,
}

impl<'a> Permissions<'a> {
    pub fn new(store: &'a XFeatureStore) -> Self {
        Self { store }
    }

    /// Replace the grants on path. An empty map removes them.
    ///
    /// Values under other keys of the path's feature are left alone.
    pub fn access_set(&self, path: &str, access: &AccessMap) -> Result<()> {
        self.store.with_transaction(|store| {
            self.clear_grants(path)?;
            if access.is_empty() {
                return Ok(());
            }

            let feature = store.xfeature_create(path)?;
            store.feature_setmany(feature, READ, &access.read)?;
            store.feature_setmany(feature, WRITE, &access.write)?;
            tracing::debug!(
                "Set access on {} (read: {}, write: {})",
                path,
                access.read.len(),
                access.write.len()
            );
            Ok(())
        })
    }

    /// Grants attached directly to path
    pub fn access_get(&self, path: &str) -> Result<AccessMap> {
        let Some(feature) = self.store.xfeature_get(path)? else {
            return Ok(AccessMap::default());
        };

        let mut dict = self.store.feature_dict(feature)?;
        Ok(AccessMap {
            read: dict.remove(&READ).unwrap_or_default(),
            write: dict.remove(&WRITE).unwrap_or_default(),
        })
    }

    /// Remove the grants from path. Returns whether there were any.
    pub fn access_clear(&self, path: &str) -> Result<bool> {
        self.store.with_transaction(|_| self.clear_grants(path))
    }

    /// Drop the read/write values of path, and its feature once nothing is left
    fn clear_grants(&self, path: &str) -> Result<bool> {
        let Some(feature) = self.store.xfeature_get(path)? else {
            return Ok(false);
        };

        let removed = self.store.feature_clear(feature, READ)? + self.store.feature_clear(feature, WRITE)?;
        if self.store.feature_dict(feature)?.is_empty() {
            self.store.xfeature_destroy(path)?;
        }
        Ok(removed > 0)
    }

    /// Path whose grants govern path: itself or its nearest ancestor with grants.
    ///
    /// Features without read or write values are passed over.
    pub fn access_inherit(&self, path: &str) -> Result<Option<String>> {
        for feature in self.store.xfeature_inherit(path)? {
            if self.store.feature_has_keys(feature.id, &GRANT_KEYS)? {
                return Ok(Some(feature.path));
            }
        }
        Ok(None)
    }

    /// Whether member holds access on path, through its own or inherited grants
    pub fn access_check(&self, path: &str, access: Access, member: &str) -> Result<bool> {
        let Some(governing) = self.access_inherit(path)? else {
            return Ok(false);
        };

        let allowed = self.access_get(&governing)?.allows(access, member);
        tracing::debug!(
            "Check {} on {} for {} via {}: {}",
            access,
            path,
            member,
            governing,
            allowed
        );
        Ok(allowed)
    }

    /// Paths under prefix that carry grants
    pub fn access_list_shared(&self, prefix: &str) -> Result<Vec<String>> {
        let features = self.store.xfeature_list_keyed(Some(prefix), &GRANT_KEYS)?;
        Ok(features.into_iter().map(|f| f.path).collect())
    }
}
