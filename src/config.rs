use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct XFeaturesConfig {
    pub database: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("xfeatures.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from(".xfeatures").join("xfeatures.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<XFeaturesConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: XFeaturesConfig = toml::from_str(&contents)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &XFeaturesConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Database to open: the command line wins over the config file, which wins
/// over the default location.
pub fn resolve_database(cli: Option<&Path>, config: Option<&XFeaturesConfig>) -> PathBuf {
    if let Some(path) = cli {
        return path.to_path_buf();
    }
    config
        .and_then(|c| c.database.as_deref())
        .map(PathBuf::from)
        .unwrap_or_else(default_database_path)
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xfeatures.toml");
        let config = XFeaturesConfig { database: Some("perms.db".to_string()) };

        write_config(&path, &config, false).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), Some(config.clone()));

        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &XFeaturesConfig::default(), true).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), Some(XFeaturesConfig::default()));
    }

    #[test]
    fn test_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_config(Some(&dir.path().join("none.toml"))).unwrap(), None);
    }

    #[test]
    fn test_resolve_database_precedence() {
        let config = XFeaturesConfig { database: Some("from-config.db".to_string()) };

        assert_eq!(
            resolve_database(Some(Path::new("cli.db")), Some(&config)),
            PathBuf::from("cli.db")
        );
        assert_eq!(resolve_database(None, Some(&config)), PathBuf::from("from-config.db"));
        assert_eq!(resolve_database(None, None), default_database_path());
    }

    #[test]
    fn test_ensure_db_dir() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("deeper").join("x.db");
        ensure_db_dir(&db).unwrap();
        assert!(db.parent().unwrap().is_dir());
    }
}
