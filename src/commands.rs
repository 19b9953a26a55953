use crate::{OutputMode, emit_success};
use std::path::Path;
use xfeatures::config::{self, XFeaturesConfig};
use xfeatures::output::is_quiet;
use xfeatures::storage::XFeatureStore;
use xfeatures::ui::{self, Icons, banner, section, success, warn};
use xfeatures::{Access, AccessMap, Feature, FeatureDict, Permissions};

pub fn run_version(output_mode: OutputMode) -> anyhow::Result<()> {
    if output_mode.is_human() {
        banner("xfeatures", &format!("Version {}", env!("CARGO_PKG_VERSION")));
    } else {
        let data = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
        });
        emit_success(output_mode, "version", data)?;
    }
    Ok(())
}

pub fn run_init(output_mode: OutputMode, config_path: &Path, database: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let database = database
        .map(Path::to_path_buf)
        .unwrap_or_else(config::default_database_path);
    let config = XFeaturesConfig {
        database: Some(database.display().to_string()),
    };
    config::write_config(config_path, &config, force)?;

    if output_mode.is_human() {
        success(&format!("Wrote {}", config_path.display()));
        ui::info("database", &database.display().to_string());
    } else {
        emit_success(output_mode, "init", serde_json::json!({
            "config": config_path.display().to_string(),
            "database": database.display().to_string(),
        }))?;
    }
    Ok(())
}

pub fn run_create(store: &XFeatureStore, output_mode: OutputMode, paths: &[String]) -> anyhow::Result<()> {
    let mut created = Vec::new();
    for path in paths {
        let existed = store.xfeature_get(path)?.is_some();
        let id = store.xfeature_create(path)?;
        created.push(serde_json::json!({ "path": path, "id": id, "existed": existed }));

        if output_mode.is_human() {
            if existed {
                println!("{} {} {}", Icons::INFO, path, ui::muted(&format!("(exists, #{})", id)));
            } else {
                println!("{} {} {}", Icons::NEW, path, ui::muted(&format!("(#{})", id)));
            }
        }
    }

    emit_success(output_mode, "create", serde_json::Value::Array(created))
}

/// Features of paths together with their values, ordered by path
pub fn feature_rows(store: &XFeatureStore, paths: &[String]) -> xfeatures::Result<Vec<(Feature, FeatureDict)>> {
    let features = store.xfeature_get_bulk(paths)?;
    let mut rows = Vec::with_capacity(features.len());
    for feature in features {
        let dict = store.feature_dict(feature.id)?;
        rows.push((feature, dict));
    }
    Ok(rows)
}

pub fn rows_json(rows: &[(Feature, FeatureDict)]) -> serde_json::Value {
    rows.iter()
        .map(|(feature, dict)| serde_json::json!({ "id": feature.id, "path": feature.path, "values": dict }))
        .collect()
}

pub fn run_get(store: &XFeatureStore, output_mode: OutputMode, paths: &[String]) -> anyhow::Result<()> {
    let rows = feature_rows(store, paths)?;

    if output_mode.is_human() {
        if rows.is_empty() {
            println!("{} No features found.", Icons::EMPTY);
        } else {
            println!("{}", ui::feature_table(&rows));
        }
        return Ok(());
    }

    emit_success(output_mode, "get", rows_json(&rows))
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    let term = console::Term::stderr();
    if !term.is_term() {
        anyhow::bail!("not a terminal; pass --force to destroy without confirmation");
    }
    term.write_str(&format!("{} {} [y/N] ", Icons::WARN, prompt))?;
    let answer = term.read_line()?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// What happened to one path given to `destroy`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyOutcome {
    Destroyed,
    Missing,
    Failed(String),
}

impl DestroyOutcome {
    pub fn to_json(&self, path: &str) -> serde_json::Value {
        match self {
            DestroyOutcome::Destroyed => serde_json::json!({ "path": path, "destroyed": true }),
            DestroyOutcome::Missing => serde_json::json!({ "path": path, "destroyed": false }),
            DestroyOutcome::Failed(e) => serde_json::json!({ "path": path, "error": e }),
        }
    }
}

/// Destroy paths one at a time. A failing path is recorded and the rest still run.
pub fn destroy_paths(store: &XFeatureStore, paths: &[String]) -> Vec<(String, DestroyOutcome)> {
    paths
        .iter()
        .map(|path| {
            let outcome = match store.xfeature_destroy(path) {
                Ok(true) => DestroyOutcome::Destroyed,
                Ok(false) => DestroyOutcome::Missing,
                Err(e) => {
                    tracing::error!("Failed to destroy {}: {}", path, e);
                    DestroyOutcome::Failed(e.to_string())
                }
            };
            (path.clone(), outcome)
        })
        .collect()
}

/// Destroy every feature under prefix once `confirm` accepts the count.
/// Returns `None` when it does not.
pub fn destroy_prefix<F>(store: &XFeatureStore, prefix: &str, confirm: F) -> anyhow::Result<Option<usize>>
where
    F: FnOnce(usize) -> anyhow::Result<bool>,
{
    let doomed: Vec<String> = store
        .xfeature_list(Some(prefix))?
        .into_iter()
        .map(|f| f.path)
        .collect();

    if !confirm(doomed.len())? {
        return Ok(None);
    }
    Ok(Some(store.xfeature_destroy_bulk(&doomed)?))
}

pub fn aborted_data() -> serde_json::Value {
    serde_json::json!({ "aborted": true })
}

fn report_aborted(output_mode: OutputMode) -> anyhow::Result<()> {
    if output_mode.is_human() {
        warn("Aborted");
    }
    emit_success(output_mode, "destroy", aborted_data())
}

pub fn run_destroy(
    store: &XFeatureStore,
    output_mode: OutputMode,
    paths: &[String],
    prefix: Option<&str>,
    force: bool,
) -> anyhow::Result<()> {
    if paths.is_empty() && prefix.is_none() {
        anyhow::bail!("Please provide paths or --prefix");
    }

    if let Some(prefix) = prefix {
        let plural = |n: usize| if n == 1 { "feature" } else { "features" };
        let destroyed = destroy_prefix(store, prefix, |count| {
            Ok(force || confirm(&format!("Destroy {} {} under '{}'?", count, plural(count), prefix))?)
        })?;
        let Some(destroyed) = destroyed else {
            return report_aborted(output_mode);
        };

        if output_mode.is_human() {
            success(&format!("Destroyed {} {} under '{}'.", destroyed, plural(destroyed), prefix));
        }
        return emit_success(output_mode, "destroy", serde_json::json!({ "prefix": prefix, "destroyed": destroyed }));
    }

    let what = if paths.len() > 1 { "features" } else { "feature" };
    if !force && !confirm(&format!("Destroy {} {}: {}?", paths.len(), what, paths.join(", ")))? {
        return report_aborted(output_mode);
    }

    let outcomes = destroy_paths(store, paths);
    if output_mode.is_human() {
        for (path, outcome) in &outcomes {
            match outcome {
                DestroyOutcome::Destroyed => println!("{} Destroyed feature '{}'.", Icons::DEL, path),
                DestroyOutcome::Missing => warn(&format!("No feature for '{}'", path)),
                DestroyOutcome::Failed(e) => ui::error(&format!("Error -- {}", e)),
            }
        }
        return Ok(());
    }

    let results = outcomes.iter().map(|(path, outcome)| outcome.to_json(path)).collect();
    emit_success(output_mode, "destroy", serde_json::Value::Array(results))
}

pub fn run_list(store: &XFeatureStore, output_mode: OutputMode, prefix: Option<&str>) -> anyhow::Result<()> {
    let features = store.xfeature_list(prefix)?;

    if output_mode.is_human() {
        if features.is_empty() {
            println!("{} No features found.", Icons::EMPTY);
        }
        for feature in &features {
            ui::feature_line(&feature.path, feature.id.as_i64());
        }
        return Ok(());
    }

    emit_success(output_mode, "list", serde_json::to_value(&features)?)
}

pub fn run_inherit(store: &XFeatureStore, output_mode: OutputMode, path: &str) -> anyhow::Result<()> {
    let features = store.xfeature_inherit(path)?;

    if output_mode.is_human() {
        if !is_quiet() {
            println!("{} Features inherited by '{}':", Icons::LINK, path);
        }
        if features.is_empty() {
            println!("{} None.", Icons::EMPTY);
        }
        for feature in &features {
            ui::feature_line(&feature.path, feature.id.as_i64());
        }
        return Ok(());
    }

    emit_success(output_mode, "inherit", serde_json::to_value(&features)?)
}

pub fn run_set(store: &XFeatureStore, output_mode: OutputMode, path: &str, key: i64, values: &[String]) -> anyhow::Result<()> {
    let (feature, added) = store.with_transaction(|store| {
        let feature = store.xfeature_create(path)?;
        let added = store.feature_setmany(feature, key, values)?;
        Ok((feature, added))
    })?;

    if output_mode.is_human() {
        success(&format!("Added {} new value(s) to '{}' key {}", added, path, key));
        ui::value_line(key, &store.feature_get(feature, key)?);
        return Ok(());
    }

    emit_success(output_mode, "set", serde_json::json!({ "path": path, "key": key, "added": added }))
}

pub fn run_unset(store: &XFeatureStore, output_mode: OutputMode, path: &str, key: i64, values: &[String]) -> anyhow::Result<()> {
    let feature = store.xfeature_require(path)?;
    let removed = store.feature_unsetmany(feature, key, values)?;

    if output_mode.is_human() {
        success(&format!("Removed {} value(s) from '{}' key {}", removed, path, key));
        ui::value_line(key, &store.feature_get(feature, key)?);
        return Ok(());
    }

    emit_success(output_mode, "unset", serde_json::json!({ "path": path, "key": key, "removed": removed }))
}

pub fn run_values(store: &XFeatureStore, output_mode: OutputMode, path: &str, key: Option<i64>) -> anyhow::Result<()> {
    let feature = store.xfeature_require(path)?;

    match key {
        Some(key) => {
            let values = store.feature_get(feature, key)?;
            if output_mode.is_human() {
                ui::feature_line(path, feature.as_i64());
                ui::value_line(key, &values);
                return Ok(());
            }
            emit_success(output_mode, "values", serde_json::json!({ "path": path, "key": key, "values": values }))
        }
        None => {
            let dict = store.feature_dict(feature)?;
            if output_mode.is_human() {
                ui::feature_line(path, feature.as_i64());
                if dict.is_empty() {
                    println!("  {} no values", Icons::EMPTY);
                }
                for (key, values) in &dict {
                    ui::value_line(*key, values);
                }
                return Ok(());
            }
            emit_success(output_mode, "values", serde_json::json!({ "path": path, "values": dict }))
        }
    }
}

pub fn run_clear(store: &XFeatureStore, output_mode: OutputMode, path: &str, key: i64) -> anyhow::Result<()> {
    let feature = store.xfeature_require(path)?;
    let removed = store.feature_clear(feature, key)?;

    if output_mode.is_human() {
        success(&format!("Cleared {} value(s) from '{}' key {}", removed, path, key));
        return Ok(());
    }

    emit_success(output_mode, "clear", serde_json::json!({ "path": path, "key": key, "removed": removed }))
}

pub fn run_grant(
    store: &XFeatureStore,
    output_mode: OutputMode,
    path: &str,
    read: Vec<String>,
    write: Vec<String>,
) -> anyhow::Result<()> {
    let access = AccessMap { read, write };
    Permissions::new(store).access_set(path, &access)?;

    if output_mode.is_human() {
        if access.is_empty() {
            warn(&format!("No members given; grants on '{}' removed", path));
        } else {
            success(&format!("Updated grants on '{}'", path));
            ui::summary_row("read:", &access.read.join(", "));
            ui::summary_row("write:", &access.write.join(", "));
        }
        return Ok(());
    }

    emit_success(output_mode, "grant", serde_json::json!({ "path": path, "access": access }))
}

pub fn run_revoke(store: &XFeatureStore, output_mode: OutputMode, path: &str) -> anyhow::Result<()> {
    let removed = Permissions::new(store).access_clear(path)?;

    if output_mode.is_human() {
        if removed {
            success(&format!("Revoked grants on '{}'", path));
        } else {
            warn(&format!("No grants on '{}'", path));
        }
        return Ok(());
    }

    emit_success(output_mode, "revoke", serde_json::json!({ "path": path, "revoked": removed }))
}

pub fn run_access(store: &XFeatureStore, output_mode: OutputMode, path: &str) -> anyhow::Result<()> {
    let perms = Permissions::new(store);
    let governing = perms.access_inherit(path)?;
    let access = match &governing {
        Some(governing) => perms.access_get(governing)?,
        None => AccessMap::default(),
    };

    if output_mode.is_human() {
        match &governing {
            Some(governing) if governing == path => ui::info("grants", "set on this path"),
            Some(governing) => ui::info("grants inherited from", governing),
            None => {
                println!("{} No grants apply to '{}'", Icons::EMPTY, path);
                return Ok(());
            }
        }
        ui::summary_row("read:", &access.read.join(", "));
        ui::summary_row("write:", &access.write.join(", "));
        return Ok(());
    }

    emit_success(output_mode, "access", serde_json::json!({
        "path": path,
        "inherited_from": governing,
        "access": access,
    }))
}

pub fn run_check(store: &XFeatureStore, output_mode: OutputMode, path: &str, member: &str, write: bool) -> anyhow::Result<()> {
    let access = if write { Access::Write } else { Access::Read };
    let allowed = Permissions::new(store).access_check(path, access, member)?;

    if output_mode.is_human() {
        let label = format!("{} {} access to '{}'", member, access, path);
        if allowed {
            ui::granted(&format!("{}: allowed", label));
        } else {
            ui::denied(&format!("{}: denied", label));
        }
        return Ok(());
    }

    emit_success(output_mode, "check", serde_json::json!({
        "path": path,
        "member": member,
        "access": access,
        "allowed": allowed,
    }))
}

pub fn run_shared(store: &XFeatureStore, output_mode: OutputMode, prefix: &str) -> anyhow::Result<()> {
    let paths = Permissions::new(store).access_list_shared(prefix)?;

    if output_mode.is_human() {
        if paths.is_empty() {
            println!("{} Nothing shared under '{}'.", Icons::EMPTY, prefix);
        }
        for path in &paths {
            println!("{} {}", Icons::UNLOCK, path);
        }
        return Ok(());
    }

    emit_success(output_mode, "shared", serde_json::json!(paths))
}

pub fn run_import(store: &XFeatureStore, output_mode: OutputMode, file: &Path) -> anyhow::Result<()> {
    let records = xfeatures::read_records(file)?;

    if output_mode.is_human() && !is_quiet() {
        ui::header(&format!("Importing {} features from {}", records.len(), file.display()));
    }

    let progress = ui::ImportProgress::new(records.len());
    let inserted = store.import_records(&records, |record| progress.record(&record.path))?;
    let elapsed = progress.finish();

    if output_mode.is_human() {
        success(&format!("Imported {} features ({} new values)", records.len(), inserted));
        ui::summary_row("took", &elapsed);
        return Ok(());
    }

    emit_success(output_mode, "import", serde_json::json!({
        "features": records.len(),
        "values_added": inserted,
    }))
}

pub fn run_export(store: &XFeatureStore, output_mode: OutputMode, output: Option<&Path>) -> anyhow::Result<()> {
    let records = store.export_records()?;

    match output {
        Some(path) => {
            xfeatures::write_records(path, &records)?;
            if output_mode.is_human() {
                success(&format!("Exported {} features to {}", records.len(), path.display()));
                return Ok(());
            }
            emit_success(output_mode, "export", serde_json::json!({
                "features": records.len(),
                "file": path.display().to_string(),
            }))
        }
        None => {
            if output_mode.is_human() {
                println!("{}", xfeatures::records_to_json(&records)?);
                return Ok(());
            }
            emit_success(output_mode, "export", serde_json::to_value(&records)?)
        }
    }
}

pub fn run_info(store: &XFeatureStore, output_mode: OutputMode, database: &Path) -> anyhow::Result<()> {
    let stats = store.stats()?;

    if output_mode.is_human() {
        if !is_quiet() {
            section(&format!("{} Store ({})", Icons::STATS, database.display()));
        }
        let features = stats.features.to_string();
        let values = stats.values.to_string();
        println!("{}", ui::stats_table(&[("Features", &features), ("Values", &values)]));
        return Ok(());
    }

    emit_success(output_mode, "info", serde_json::json!({
        "database": database.display().to_string(),
        "stats": stats,
    }))
}
