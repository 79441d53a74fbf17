//! Configuration loading.
//!
//! The default configuration is embedded at compile time. An override
//! file only needs the keys it changes; its tables are merged over the
//! defaults key by key.

use std::path::Path;

use housing_map_dashboard_models::config::DashboardConfig;

use crate::DashboardError;

/// Environment variable naming an override configuration file.
pub const CONFIG_ENV_VAR: &str = "HOUSING_MAP_CONFIG";

/// Default configuration embedded at compile time.
const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

/// Returns the embedded default configuration.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed (this is a compile-time
/// guarantee since the config is embedded).
#[must_use]
pub fn default_config() -> DashboardConfig {
    toml::from_str(DEFAULT_CONFIG_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse embedded default.toml: {e}"))
}

/// Loads the configuration, merging the file at `path` (if any) over the
/// embedded defaults.
///
/// # Errors
///
/// Returns [`DashboardError`] if the override file cannot be read or the
/// merged configuration does not deserialize.
pub fn load_config(path: Option<&Path>) -> Result<DashboardConfig, DashboardError> {
    let Some(path) = path else {
        return Ok(default_config());
    };

    log::info!("Loading configuration overrides from {}", path.display());
    let overrides = std::fs::read_to_string(path)?;
    merge_config(&overrides)
}

/// Merges the TOML document `overrides` over the embedded defaults.
///
/// # Errors
///
/// Returns [`DashboardError::Config`] if either document is malformed or
/// the result does not deserialize into a [`DashboardConfig`].
pub fn merge_config(overrides: &str) -> Result<DashboardConfig, DashboardError> {
    let mut base: toml::Table = toml::from_str(DEFAULT_CONFIG_TOML)?;
    let overrides: toml::Table = toml::from_str(overrides)?;
    merge_tables(&mut base, overrides);
    Ok(toml::Value::Table(base).try_into()?)
}

fn merge_tables(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        let nested = matches!(base.get(&key), Some(toml::Value::Table(_)))
            && matches!(&value, toml::Value::Table(incoming) if !incoming.contains_key("type"));

        if nested {
            if let (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) =
                (base.get_mut(&key), value)
            {
                merge_tables(existing, incoming);
            }
        } else {
            base.insert(key, value);
        }
    }
}
