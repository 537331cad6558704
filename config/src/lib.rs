//! Load configuration from XDG `config.toml` and a project `.env`, then apply it to the
//! process environment with priority: **existing env > .env > XDG**.
//!
//! Call [`load_and_apply`] once at startup, before parsing CLI flags, so flags with
//! `env` fallbacks (e.g. `WEFT_MODEL`, `OPENAI_API_KEY`) see the merged values.

mod dotenv;
mod xdg_toml;

use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;

pub use xdg_toml::config_path;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
}

/// Where an applied value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    DotEnv,
    Xdg,
}

/// Variables set by [`load_and_apply`], with their source. Values are not kept so
/// the result can be logged safely.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AppliedConfig {
    pub applied: BTreeMap<String, ConfigSource>,
}

impl AppliedConfig {
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    pub fn source_of(&self, key: &str) -> Option<ConfigSource> {
        self.applied.get(key).copied()
    }
}

/// Loads `$XDG_CONFIG_HOME/<app_name>/config.toml` and the project `.env`, then sets
/// every variable that is **not** already present in the environment.
///
/// * `app_name`: e.g. `"weft"`; selects the config directory and the `[agent]` prefix.
/// * `override_dir`: look for `.env` here instead of the current directory.
pub fn load_and_apply(
    app_name: &str,
    override_dir: Option<&Path>,
) -> Result<AppliedConfig, LoadError> {
    let xdg_map = xdg_toml::load_env_map(app_name)?;
    let dotenv_map = dotenv::load_env_map(override_dir).map_err(LoadError::DotenvRead)?;

    let mut result = AppliedConfig::default();
    let candidates = dotenv_map
        .iter()
        .map(|(k, v)| (k, v, ConfigSource::DotEnv))
        .chain(
            xdg_map
                .iter()
                .filter(|(k, _)| !dotenv_map.contains_key(*k))
                .map(|(k, v)| (k, v, ConfigSource::Xdg)),
        );
    for (key, value, source) in candidates {
        if std::env::var_os(key).is_some() {
            continue;
        }
        std::env::set_var(key, value);
        result.applied.insert(key.clone(), source);
    }
    Ok(result)
}
