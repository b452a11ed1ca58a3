//! Configuration management command.
//!
//! Provides CLI access to the layered configuration system:
//! - Get individual values from the merged view
//! - Set runtime values in the database
//! - List all values with the layer each one came from

use crate::cli::ConfigCommands;
use crate::config::{
    self, CliOverrides, ConfigLayer, default_config_layer, discover_docket_dir,
    load_project_config, load_user_config,
};
use crate::error::{DocketError, Result};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
enum ConfigSource {
    Default,
    Db,
    User,
    Project,
    Environment,
    Cli,
}

impl ConfigSource {
    fn label(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Db => "db",
            Self::User => "user config",
            Self::Project => ".docket/config",
            Self::Environment => "environment",
            Self::Cli => "cli",
        }
    }
}

struct LayerWithSource {
    source: ConfigSource,
    layer: ConfigLayer,
}

#[derive(Serialize)]
struct ConfigEntry {
    key: String,
    value: String,
    source: ConfigSource,
}

/// Execute the config command.
///
/// # Errors
///
/// Returns an error if config cannot be loaded or operations fail.
pub fn execute(command: &ConfigCommands, json_mode: bool, overrides: &CliOverrides) -> Result<()> {
    match command {
        ConfigCommands::Get { key } => {
            let docket_dir = discover_docket_dir(Some(Path::new("."))).ok();
            get_config_value(key, docket_dir.as_ref(), overrides, json_mode)
        }
        ConfigCommands::Set { key, value } => set_config_value(key, value, overrides, json_mode),
        ConfigCommands::List => {
            let docket_dir = discover_docket_dir(Some(Path::new("."))).ok();
            list_config(docket_dir.as_ref(), overrides, json_mode)
        }
    }
}

fn build_layers(
    docket_dir: Option<&PathBuf>,
    overrides: &CliOverrides,
) -> Result<Vec<LayerWithSource>> {
    let defaults = default_config_layer();

    let db_layer = docket_dir
        .and_then(|dir| {
            config::open_storage(dir, overrides.db.as_ref(), overrides.lock_timeout).ok()
        })
        .map_or_else(
            || Ok(ConfigLayer::default()),
            |(storage, _paths)| ConfigLayer::from_db(&storage),
        )?;

    let user = load_user_config()?;
    let project = match docket_dir {
        Some(dir) => load_project_config(dir)?,
        None => ConfigLayer::default(),
    };
    let env_layer = ConfigLayer::from_env();
    let cli_layer = overrides.as_layer();

    Ok(vec![
        LayerWithSource {
            source: ConfigSource::Default,
            layer: defaults,
        },
        LayerWithSource {
            source: ConfigSource::Db,
            layer: db_layer,
        },
        LayerWithSource {
            source: ConfigSource::User,
            layer: user,
        },
        LayerWithSource {
            source: ConfigSource::Project,
            layer: project,
        },
        LayerWithSource {
            source: ConfigSource::Environment,
            layer: env_layer,
        },
        LayerWithSource {
            source: ConfigSource::Cli,
            layer: cli_layer,
        },
    ])
}

fn merge_layers(layers: &[LayerWithSource]) -> ConfigLayer {
    let mut merged = ConfigLayer::default();
    for layer in layers {
        merged.merge_from(&layer.layer);
    }
    merged
}

fn resolve_source(key: &str, layers: &[LayerWithSource]) -> ConfigSource {
    for layer in layers.iter().rev() {
        if layer.layer.runtime.contains_key(key) || layer.layer.startup.contains_key(key) {
            return layer.source;
        }
    }
    ConfigSource::Default
}

fn get_config_value(
    key: &str,
    docket_dir: Option<&PathBuf>,
    overrides: &CliOverrides,
    json_mode: bool,
) -> Result<()> {
    debug!(key, "Reading config key");
    let layers = build_layers(docket_dir, overrides)?;
    let layer = merge_layers(&layers);

    let value = layer
        .runtime
        .get(key)
        .or_else(|| layer.startup.get(key))
        .cloned();

    match value {
        Some(value) => {
            if json_mode {
                let source = resolve_source(key, &layers);
                let output = json!({
                    "key": key,
                    "value": value,
                    "source": source.label(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{value}");
            }
            Ok(())
        }
        None => Err(DocketError::Config(format!("key not found: {key}"))),
    }
}

fn set_config_value(
    key: &str,
    value: &str,
    overrides: &CliOverrides,
    json_mode: bool,
) -> Result<()> {
    if config::is_startup_key(key) {
        return Err(DocketError::validation(
            "config",
            format!("'{key}' is startup-only; set it in config.yaml or pass it as a flag"),
        ));
    }

    let docket_dir = discover_docket_dir(Some(Path::new(".")))?;
    let (mut storage, _paths) =
        config::open_storage(&docket_dir, overrides.db.as_ref(), overrides.lock_timeout)?;

    storage.set_config(key, value)?;

    info!(key, value, "Config updated");

    if json_mode {
        let output = json!({
            "key": key,
            "value": value,
            "scope": "db",
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Set {key}={value}");
    }

    Ok(())
}

fn list_config(
    docket_dir: Option<&PathBuf>,
    overrides: &CliOverrides,
    json_mode: bool,
) -> Result<()> {
    let layers = build_layers(docket_dir, overrides)?;
    let layer = merge_layers(&layers);

    let mut keys: Vec<&String> = layer.runtime.keys().chain(layer.startup.keys()).collect();
    keys.sort();
    keys.dedup();

    let entries: Vec<ConfigEntry> = keys
        .into_iter()
        .filter_map(|key| {
            let value = layer
                .runtime
                .get(key)
                .or_else(|| layer.startup.get(key))
                .cloned()?;
            Some(ConfigEntry {
                key: key.clone(),
                value,
                source: resolve_source(key, &layers),
            })
        })
        .collect();

    if json_mode {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if entries.is_empty() {
        println!("No configuration values found.");
    } else {
        println!("Current configuration (merged):");
        println!();
        for entry in &entries {
            println!("  {}: {} ({})", entry.key, entry.value, entry.source.label());
        }
    }

    Ok(())
}
