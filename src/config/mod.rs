//! Configuration management for `docket`.
//!
//! Configuration sources and precedence (highest wins):
//! 1. CLI overrides
//! 2. Environment variables
//! 3. Project config (.docket/config.yaml)
//! 4. User config (~/.config/docket/config.yaml)
//! 5. DB config table
//! 6. Defaults

use crate::error::{DocketError, Result};
use crate::model::Status;
use crate::storage::SqliteStorage;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default database filename used when metadata is missing.
const DEFAULT_DB_FILENAME: &str = "docket.db";

/// Startup metadata describing the database path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Metadata {
    pub database: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            database: DEFAULT_DB_FILENAME.to_string(),
        }
    }
}

impl Metadata {
    /// Load metadata.json from the docket directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(docket_dir: &Path) -> Result<Self> {
        let path = docket_dir.join("metadata.json");
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path)?;
        let mut metadata: Self = serde_json::from_str(&contents)?;

        if metadata.database.trim().is_empty() {
            metadata.database = DEFAULT_DB_FILENAME.to_string();
        }

        Ok(metadata)
    }
}

/// Resolved paths for this workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    pub docket_dir: PathBuf,
    pub db_path: PathBuf,
    pub metadata: Metadata,
}

impl ConfigPaths {
    /// Resolve the database path using metadata and overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if metadata cannot be read.
    pub fn resolve(docket_dir: &Path, db_override: Option<&PathBuf>) -> Result<Self> {
        let metadata = Metadata::load(docket_dir)?;
        let db_path = resolve_db_path(docket_dir, &metadata, db_override);

        Ok(Self {
            docket_dir: docket_dir.to_path_buf(),
            db_path,
            metadata,
        })
    }
}

/// Discover the active `.docket` directory.
///
/// Honors `DOCKET_DIR` when set, otherwise walks up from `start` (or CWD).
///
/// # Errors
///
/// Returns an error if no docket directory is found or the CWD cannot be read.
pub fn discover_docket_dir(start: Option<&Path>) -> Result<PathBuf> {
    discover_docket_dir_with_env(start, None)
}

fn discover_docket_dir_with_env(
    start: Option<&Path>,
    env_override: Option<&Path>,
) -> Result<PathBuf> {
    if let Some(path) = env_override {
        if path.is_dir() {
            return Ok(path.to_path_buf());
        }
    } else if let Ok(value) = env::var("DOCKET_DIR") {
        if !value.trim().is_empty() {
            let path = PathBuf::from(value);
            if path.is_dir() {
                return Ok(path);
            }
        }
    }

    let mut current = match start {
        Some(path) => path.to_path_buf(),
        None => env::current_dir()?,
    };

    loop {
        let candidate = current.join(".docket");
        if candidate.is_dir() {
            return Ok(candidate);
        }

        if !current.pop() {
            break;
        }
    }

    Err(DocketError::NotInitialized)
}

/// Open storage using resolved config paths, returning the storage and paths used.
///
/// # Errors
///
/// Returns an error if metadata cannot be read, the database file is absent,
/// or the database cannot be opened.
pub fn open_storage(
    docket_dir: &Path,
    db_override: Option<&PathBuf>,
    lock_timeout: Option<u64>,
) -> Result<(SqliteStorage, ConfigPaths)> {
    let startup_layer = load_startup_config(docket_dir)?;
    let resolved_db_override = db_override
        .cloned()
        .or_else(|| db_override_from_layer(&startup_layer));
    let resolved_lock_timeout = lock_timeout
        .or_else(|| lock_timeout_from_layer(&startup_layer))
        .or(Some(30000));
    let paths = ConfigPaths::resolve(docket_dir, resolved_db_override.as_ref())?;

    if !paths.db_path.exists() {
        return Err(DocketError::DatabaseNotFound {
            path: paths.db_path,
        });
    }

    let storage = SqliteStorage::open_with_timeout(&paths.db_path, resolved_lock_timeout)?;
    Ok((storage, paths))
}

fn resolve_db_path(
    docket_dir: &Path,
    metadata: &Metadata,
    db_override: Option<&PathBuf>,
) -> PathBuf {
    if let Some(override_path) = db_override {
        return override_path.clone();
    }

    let candidate = PathBuf::from(&metadata.database);
    if candidate.is_absolute() {
        candidate
    } else {
        docket_dir.join(candidate)
    }
}

/// A configuration layer split into startup-only and runtime (DB) keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLayer {
    pub startup: HashMap<String, String>,
    pub runtime: HashMap<String, String>,
}

impl ConfigLayer {
    /// Merge another layer on top of this one (higher precedence wins).
    pub fn merge_from(&mut self, other: &Self) {
        for (key, value) in &other.startup {
            self.startup.insert(key.clone(), value.clone());
        }
        for (key, value) in &other.runtime {
            self.runtime.insert(key.clone(), value.clone());
        }
    }

    /// Merge multiple layers in precedence order (lowest to highest).
    #[must_use]
    pub fn merge_layers(layers: &[Self]) -> Self {
        let mut merged = Self::default();
        for layer in layers {
            merged.merge_from(layer);
        }
        merged
    }

    /// Build a layer from a YAML file path. Missing files return empty config.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn from_yaml(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let value: serde_yaml::Value = serde_yaml::from_str(&contents)?;
        Ok(layer_from_yaml_value(&value))
    }

    /// Build a layer from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let mut layer = Self::default();

        for (key, value) in env::vars() {
            if let Some(stripped) = key.strip_prefix("DK_") {
                let normalized = stripped.to_lowercase();
                for variant in env_key_variants(&normalized) {
                    insert_key_value(&mut layer, &variant, value.clone());
                }
            }
        }

        layer
    }

    /// Build a layer from DB config table values.
    ///
    /// # Errors
    ///
    /// Returns an error if config table lookup fails.
    pub fn from_db(storage: &SqliteStorage) -> Result<Self> {
        let mut layer = Self::default();
        let map = storage.get_all_config()?;
        for (key, value) in map {
            if is_startup_key(&key) {
                continue;
            }
            layer.runtime.insert(key, value);
        }
        Ok(layer)
    }
}

/// CLI overrides for config loading (optional).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub db: Option<PathBuf>,
    pub json: Option<bool>,
    pub lock_timeout: Option<u64>,
}

impl CliOverrides {
    #[must_use]
    pub fn as_layer(&self) -> ConfigLayer {
        let mut layer = ConfigLayer::default();

        if let Some(path) = &self.db {
            insert_key_value(&mut layer, "db", path.to_string_lossy().to_string());
        }
        if let Some(json) = self.json {
            insert_key_value(&mut layer, "json", json.to_string());
        }
        if let Some(lock_timeout) = self.lock_timeout {
            insert_key_value(&mut layer, "lock-timeout", lock_timeout.to_string());
        }

        layer
    }
}

/// Load project config (.docket/config.yaml).
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_project_config(docket_dir: &Path) -> Result<ConfigLayer> {
    ConfigLayer::from_yaml(&docket_dir.join("config.yaml"))
}

/// Load user config (~/.config/docket/config.yaml).
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<ConfigLayer> {
    let Ok(home) = env::var("HOME") else {
        return Ok(ConfigLayer::default());
    };
    let path = Path::new(&home)
        .join(".config")
        .join("docket")
        .join("config.yaml");
    ConfigLayer::from_yaml(&path)
}

/// Load startup-only configuration layers (YAML + env, no DB).
///
/// # Errors
///
/// Returns an error if any config file cannot be read or parsed.
pub fn load_startup_config(docket_dir: &Path) -> Result<ConfigLayer> {
    let user = load_user_config()?;
    let project = load_project_config(docket_dir)?;
    let env_layer = ConfigLayer::from_env();

    Ok(ConfigLayer::merge_layers(&[user, project, env_layer]))
}

/// Default config layer (lowest precedence).
#[must_use]
pub fn default_config_layer() -> ConfigLayer {
    let mut layer = ConfigLayer::default();
    layer
        .runtime
        .insert("default_status".to_string(), "open".to_string());
    layer
}

/// Load configuration with full precedence order.
///
/// # Errors
///
/// Returns an error if any config file cannot be read or parsed, or DB access fails.
pub fn load_config(
    docket_dir: &Path,
    storage: Option<&SqliteStorage>,
    cli: &CliOverrides,
) -> Result<ConfigLayer> {
    let defaults = default_config_layer();
    let db_layer = match storage {
        Some(storage) => ConfigLayer::from_db(storage)?,
        None => ConfigLayer::default(),
    };
    let user = load_user_config()?;
    let project = load_project_config(docket_dir)?;
    let env_layer = ConfigLayer::from_env();
    let cli_layer = cli.as_layer();

    Ok(ConfigLayer::merge_layers(&[
        defaults, db_layer, user, project, env_layer, cli_layer,
    ]))
}

/// Resolve the default status for new issues from config.
#[must_use]
pub fn default_status_from_layer(layer: &ConfigLayer) -> Status {
    get_value(layer, &["default_status", "default-status"])
        .and_then(|value| value.parse().ok())
        .unwrap_or_default()
}

/// Determine if a key is startup-only.
///
/// Startup-only keys can only be set in YAML config files or flags, not in
/// the database.
#[must_use]
pub fn is_startup_key(key: &str) -> bool {
    let normalized = normalize_key(key);

    matches!(
        normalized.as_str(),
        "db" | "database" | "json" | "lock-timeout" | "no-color" | "log-file"
    )
}

fn insert_key_value(layer: &mut ConfigLayer, key: &str, value: String) {
    if is_startup_key(key) {
        layer.startup.insert(key.to_string(), value);
    } else {
        layer.runtime.insert(key.to_string(), value);
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace('_', "-")
}

fn env_key_variants(raw: &str) -> Vec<String> {
    let raw_lower = raw.to_lowercase();
    vec![raw_lower.clone(), raw_lower.replace('_', "-")]
}

fn get_startup_value<'a>(layer: &'a ConfigLayer, keys: &[&str]) -> Option<&'a String> {
    let normalized_keys: Vec<String> = keys.iter().map(|key| normalize_key(key)).collect();
    for (key, value) in &layer.startup {
        let normalized = normalize_key(key);
        if normalized_keys
            .iter()
            .any(|candidate| candidate == &normalized)
        {
            return Some(value);
        }
    }
    None
}

fn get_value<'a>(layer: &'a ConfigLayer, keys: &[&str]) -> Option<&'a String> {
    for key in keys {
        if let Some(value) = layer.runtime.get(*key) {
            return Some(value);
        }
    }
    None
}

fn db_override_from_layer(layer: &ConfigLayer) -> Option<PathBuf> {
    get_startup_value(layer, &["db", "database"]).and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(PathBuf::from(trimmed))
        }
    })
}

fn lock_timeout_from_layer(layer: &ConfigLayer) -> Option<u64> {
    get_startup_value(layer, &["lock-timeout", "lock_timeout"])
        .and_then(|value| value.trim().parse::<u64>().ok())
}

fn layer_from_yaml_value(value: &serde_yaml::Value) -> ConfigLayer {
    let mut layer = ConfigLayer::default();
    let mut flat = HashMap::new();
    flatten_yaml(value, "", &mut flat);

    for (key, value) in flat {
        insert_key_value(&mut layer, &key, value);
    }

    layer
}

fn flatten_yaml(value: &serde_yaml::Value, prefix: &str, out: &mut HashMap<String, String>) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (key, value) in map {
                let Some(key_str) = key.as_str() else {
                    continue;
                };
                let next_prefix = if prefix.is_empty() {
                    key_str.to_string()
                } else {
                    format!("{prefix}.{key_str}")
                };
                flatten_yaml(value, &next_prefix, out);
            }
        }
        serde_yaml::Value::Sequence(values) => {
            let joined = values
                .iter()
                .filter_map(yaml_scalar_to_string)
                .collect::<Vec<_>>()
                .join(",");
            out.insert(prefix.to_string(), joined);
        }
        _ => {
            if let Some(value) = yaml_scalar_to_string(value) {
                out.insert(prefix.to_string(), value);
            }
        }
    }
}

fn yaml_scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Bool(v) => Some(v.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Null
        | serde_yaml::Value::Sequence(_)
        | serde_yaml::Value::Mapping(_) => None,
        serde_yaml::Value::Tagged(tagged) => yaml_scalar_to_string(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStorage;
    use tempfile::TempDir;

    #[test]
    fn metadata_defaults_when_missing() {
        let temp = TempDir::new().expect("tempdir");
        let docket_dir = temp.path().join(".docket");
        fs::create_dir_all(&docket_dir).expect("create docket dir");

        let metadata = Metadata::load(&docket_dir).expect("metadata");
        assert_eq!(metadata.database, DEFAULT_DB_FILENAME);
    }

    #[test]
    fn metadata_override_paths() {
        let temp = TempDir::new().expect("tempdir");
        let docket_dir = temp.path().join(".docket");
        fs::create_dir_all(&docket_dir).expect("create docket dir");

        let metadata_path = docket_dir.join("metadata.json");
        fs::write(metadata_path, r#"{"database": "custom.db"}"#).expect("write metadata");

        let paths = ConfigPaths::resolve(&docket_dir, None).expect("paths");
        assert_eq!(paths.db_path, docket_dir.join("custom.db"));
    }

    #[test]
    fn metadata_handles_empty_strings() {
        let temp = TempDir::new().expect("tempdir");
        let docket_dir = temp.path().join(".docket");
        fs::create_dir_all(&docket_dir).expect("create docket dir");

        let metadata_path = docket_dir.join("metadata.json");
        fs::write(metadata_path, r#"{"database": "  "}"#).expect("write metadata");

        let loaded = Metadata::load(&docket_dir).expect("metadata");
        assert_eq!(loaded.database, DEFAULT_DB_FILENAME);
    }

    #[test]
    fn metadata_handles_extra_fields() {
        let temp = TempDir::new().expect("tempdir");
        let docket_dir = temp.path().join(".docket");
        fs::create_dir_all(&docket_dir).expect("create docket dir");

        let metadata_path = docket_dir.join("metadata.json");
        fs::write(
            metadata_path,
            r#"{"database": "test.db", "unknown_field": true}"#,
        )
        .expect("write metadata");

        let loaded = Metadata::load(&docket_dir).expect("metadata");
        assert_eq!(loaded.database, "test.db");
    }

    #[test]
    fn merge_precedence_order() {
        let defaults = default_config_layer();

        let mut db = ConfigLayer::default();
        db.runtime
            .insert("default_status".to_string(), "db".to_string());

        let mut yaml = ConfigLayer::default();
        yaml.runtime
            .insert("default_status".to_string(), "yaml".to_string());

        let mut env_layer = ConfigLayer::default();
        env_layer
            .runtime
            .insert("default_status".to_string(), "env".to_string());

        let mut cli = ConfigLayer::default();
        cli.runtime
            .insert("default_status".to_string(), "cli".to_string());

        let merged = ConfigLayer::merge_layers(&[defaults, db, yaml, env_layer, cli]);
        assert_eq!(merged.runtime.get("default_status").unwrap(), "cli");
    }

    #[test]
    fn merge_preserves_non_conflicting_keys() {
        let mut base = ConfigLayer::default();
        base.runtime
            .insert("base_only".to_string(), "base_value".to_string());

        let mut override_layer = ConfigLayer::default();
        override_layer
            .runtime
            .insert("override_only".to_string(), "override_value".to_string());

        base.merge_from(&override_layer);

        assert_eq!(base.runtime.get("base_only").unwrap(), "base_value");
        assert_eq!(
            base.runtime.get("override_only").unwrap(),
            "override_value"
        );
    }

    #[test]
    fn yaml_startup_keys_are_separated() {
        let yaml = r"
db: custom.db
default_status: triage
";
        let value: serde_yaml::Value = serde_yaml::from_str(yaml).expect("parse yaml");
        let layer = layer_from_yaml_value(&value);
        assert_eq!(layer.startup.get("db").unwrap(), "custom.db");
        assert_eq!(layer.runtime.get("default_status").unwrap(), "triage");
    }

    #[test]
    fn yaml_sequence_flattens_to_csv() {
        let yaml = r"
labels:
  - backend
  - api
";
        let value: serde_yaml::Value = serde_yaml::from_str(yaml).expect("parse yaml");
        let layer = layer_from_yaml_value(&value);
        assert_eq!(layer.runtime.get("labels").unwrap(), "backend,api");
    }

    #[test]
    fn yaml_nested_keys_flatten_with_dots() {
        let yaml = r"
display:
  width: 120
";
        let value: serde_yaml::Value = serde_yaml::from_str(yaml).expect("parse yaml");
        let layer = layer_from_yaml_value(&value);
        assert_eq!(layer.runtime.get("display.width").unwrap(), "120");
    }

    #[test]
    fn db_layer_skips_startup_keys() {
        let mut storage = SqliteStorage::open_memory().expect("storage");
        storage.set_config("json", "true").expect("set json");
        storage
            .set_config("default_status", "triage")
            .expect("set default_status");

        let layer = ConfigLayer::from_db(&storage).expect("db layer");
        assert!(!layer.startup.contains_key("json"));
        assert_eq!(layer.runtime.get("default_status").unwrap(), "triage");
    }

    #[test]
    fn discover_docket_dir_uses_env_override() {
        let temp = TempDir::new().expect("tempdir");
        let docket_dir = temp.path().join(".docket");
        fs::create_dir_all(&docket_dir).expect("create docket dir");

        let discovered = discover_docket_dir_with_env(None, Some(&docket_dir)).expect("discover");
        assert_eq!(discovered, docket_dir);
    }

    #[test]
    fn discover_docket_dir_walks_up() {
        let temp = TempDir::new().expect("tempdir");
        let docket_dir = temp.path().join(".docket");
        fs::create_dir_all(&docket_dir).expect("create docket dir");
        let nested = temp.path().join("a").join("b");
        fs::create_dir_all(&nested).expect("create nested");

        let discovered = discover_docket_dir(Some(&nested)).expect("discover");
        assert_eq!(discovered, docket_dir);
    }

    #[test]
    fn discover_docket_dir_finds_at_root() {
        let temp = TempDir::new().expect("tempdir");
        let docket_dir = temp.path().join(".docket");
        fs::create_dir_all(&docket_dir).expect("create docket dir");

        let discovered = discover_docket_dir(Some(temp.path())).expect("discover");
        assert_eq!(discovered, docket_dir);
    }

    #[test]
    fn discover_docket_dir_returns_error_when_not_found() {
        let temp = TempDir::new().expect("tempdir");

        let result = discover_docket_dir(Some(temp.path()));
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), DocketError::NotInitialized));
    }

    #[test]
    fn open_storage_uses_yaml_db_over_metadata() {
        let temp = TempDir::new().expect("tempdir");
        let docket_dir = temp.path().join(".docket");
        fs::create_dir_all(&docket_dir).expect("create docket dir");

        let custom_db = temp.path().join("custom.db");
        drop(SqliteStorage::open(&custom_db).expect("create custom db"));

        fs::write(
            docket_dir.join("config.yaml"),
            format!("db: {}\n", custom_db.display()),
        )
        .expect("write config");
        fs::write(
            docket_dir.join("metadata.json"),
            r#"{"database": "docket.db"}"#,
        )
        .expect("write metadata");

        let (_storage, paths) = open_storage(&docket_dir, None, None).expect("open storage");
        assert_eq!(paths.db_path, custom_db);
    }

    #[test]
    fn open_storage_reports_missing_database() {
        let temp = TempDir::new().expect("tempdir");
        let docket_dir = temp.path().join(".docket");
        fs::create_dir_all(&docket_dir).expect("create docket dir");

        let result = open_storage(&docket_dir, None, None);
        assert!(matches!(
            result.unwrap_err(),
            DocketError::DatabaseNotFound { .. }
        ));
    }

    #[test]
    fn startup_layer_reads_db_override() {
        let mut layer = ConfigLayer::default();
        layer
            .startup
            .insert("db".to_string(), "/tmp/docket.db".to_string());

        let override_path = db_override_from_layer(&layer).expect("db override");
        assert_eq!(override_path, PathBuf::from("/tmp/docket.db"));
    }

    #[test]
    fn startup_layer_reads_lock_timeout() {
        let mut layer = ConfigLayer::default();
        layer
            .startup
            .insert("lock_timeout".to_string(), "2500".to_string());

        let timeout = lock_timeout_from_layer(&layer).expect("lock timeout");
        assert_eq!(timeout, 2500);
    }

    #[test]
    fn normalize_key_handles_various_formats() {
        assert_eq!(normalize_key("LOCK_TIMEOUT"), "lock-timeout");
        assert_eq!(normalize_key("lock-timeout"), "lock-timeout");
        assert_eq!(normalize_key("  lock_timeout  "), "lock-timeout");
    }

    #[test]
    fn env_key_variants_generates_all_forms() {
        let variants = env_key_variants("lock_timeout");
        assert!(variants.contains(&"lock_timeout".to_string()));
        assert!(variants.contains(&"lock-timeout".to_string()));
    }

    #[test]
    fn is_startup_key_identifies_startup_keys() {
        assert!(is_startup_key("db"));
        assert!(is_startup_key("database"));
        assert!(is_startup_key("json"));
        assert!(is_startup_key("lock-timeout"));
        assert!(is_startup_key("lock_timeout"));
        assert!(is_startup_key("no-color"));
    }

    #[test]
    fn is_startup_key_identifies_runtime_keys() {
        assert!(!is_startup_key("default_status"));
        assert!(!is_startup_key("default-status"));
        assert!(!is_startup_key("labels"));
    }

    #[test]
    fn resolve_db_path_absolute_in_metadata() {
        let temp = TempDir::new().expect("tempdir");
        let docket_dir = temp.path().join(".docket");
        fs::create_dir_all(&docket_dir).expect("create docket dir");

        let absolute_path = "/absolute/path/to/docket.db";
        let metadata = Metadata {
            database: absolute_path.to_string(),
        };

        let resolved = resolve_db_path(&docket_dir, &metadata, None);
        assert_eq!(resolved, PathBuf::from(absolute_path));
    }

    #[test]
    fn resolve_db_path_relative_in_metadata() {
        let temp = TempDir::new().expect("tempdir");
        let docket_dir = temp.path().join(".docket");
        fs::create_dir_all(&docket_dir).expect("create docket dir");

        let metadata = Metadata {
            database: "relative.db".to_string(),
        };

        let resolved = resolve_db_path(&docket_dir, &metadata, None);
        assert_eq!(resolved, docket_dir.join("relative.db"));
    }

    #[test]
    fn resolve_db_path_override_wins() {
        let temp = TempDir::new().expect("tempdir");
        let docket_dir = temp.path().join(".docket");
        fs::create_dir_all(&docket_dir).expect("create docket dir");

        let metadata = Metadata::default();
        let override_path = PathBuf::from("/override/path.db");

        let resolved = resolve_db_path(&docket_dir, &metadata, Some(&override_path));
        assert_eq!(resolved, override_path);
    }

    #[test]
    fn cli_overrides_as_layer_sets_startup_keys() {
        let cli = CliOverrides {
            db: Some(PathBuf::from("/cli/path.db")),
            json: Some(true),
            lock_timeout: Some(5000),
        };

        let layer = cli.as_layer();

        assert_eq!(layer.startup.get("db").unwrap(), "/cli/path.db");
        assert_eq!(layer.startup.get("json").unwrap(), "true");
        assert_eq!(layer.startup.get("lock-timeout").unwrap(), "5000");
    }

    #[test]
    fn cli_overrides_empty_produces_empty_layer() {
        let cli = CliOverrides::default();
        let layer = cli.as_layer();

        assert!(layer.startup.is_empty());
        assert!(layer.runtime.is_empty());
    }

    #[test]
    fn config_paths_resolve_with_default_metadata() {
        let temp = TempDir::new().expect("tempdir");
        let docket_dir = temp.path().join(".docket");
        fs::create_dir_all(&docket_dir).expect("create docket dir");

        let paths = ConfigPaths::resolve(&docket_dir, None).expect("paths");

        assert_eq!(paths.docket_dir, docket_dir);
        assert_eq!(paths.db_path, docket_dir.join(DEFAULT_DB_FILENAME));
        assert_eq!(paths.metadata, Metadata::default());
    }

    #[test]
    fn load_project_config_returns_empty_when_missing() {
        let temp = TempDir::new().expect("tempdir");
        let docket_dir = temp.path().join(".docket");
        fs::create_dir_all(&docket_dir).expect("create docket dir");

        let layer = load_project_config(&docket_dir).expect("project config");
        assert!(layer.startup.is_empty());
        assert!(layer.runtime.is_empty());
    }

    #[test]
    fn default_status_from_layer_uses_config_value() {
        let mut layer = ConfigLayer::default();
        layer
            .runtime
            .insert("default_status".to_string(), "in_progress".to_string());

        assert_eq!(default_status_from_layer(&layer), Status::InProgress);
    }

    #[test]
    fn default_status_from_layer_preserves_custom_values() {
        let mut layer = ConfigLayer::default();
        layer
            .runtime
            .insert("default_status".to_string(), "triage".to_string());

        assert_eq!(
            default_status_from_layer(&layer),
            Status::Custom("triage".to_string())
        );
    }

    #[test]
    fn default_status_from_layer_falls_back_to_open() {
        assert_eq!(default_status_from_layer(&ConfigLayer::default()), Status::Open);
    }
}
