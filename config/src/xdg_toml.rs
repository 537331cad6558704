//! Read `$XDG_CONFIG_HOME/<app>/config.toml`.
//!
//! ```toml
//! [env]
//! OPENAI_API_KEY = "sk-..."
//!
//! [agent]
//! model = "gpt-4o-mini"
//! working_folder = "~/drafts"
//! ```
//!
//! `[env]` entries are applied as-is. `[agent]` entries become `<APP>_<KEY>` variables
//! (`model` → `WEFT_MODEL`), the same names the CLI flags fall back to.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::LoadError;

/// `$XDG_CONFIG_HOME`, or `~/.config` when unset, on every platform.
fn config_home() -> Result<PathBuf, LoadError> {
    match std::env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => dirs::home_dir()
            .map(|home| home.join(".config"))
            .ok_or_else(|| LoadError::XdgPath("cannot determine home directory".to_string())),
    }
}

/// Path of the app's config file, whether or not it exists.
pub fn config_path(app_name: &str) -> Result<PathBuf, LoadError> {
    Ok(config_home()?.join(app_name).join("config.toml"))
}

#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    env: HashMap<String, String>,
    #[serde(default)]
    agent: HashMap<String, toml::Value>,
}

/// Environment variable name for an `[agent]` key.
fn agent_var(app_name: &str, key: &str) -> String {
    let normalize = |s: &str| s.to_uppercase().replace('-', "_");
    format!("{}_{}", normalize(app_name), normalize(key))
}

fn scalar_to_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Key-value pairs to apply from the config file. Missing file returns an empty map.
///
/// `[env]` wins over an `[agent]` entry that maps to the same variable. Non-scalar
/// `[agent]` values are ignored.
pub fn load_env_map(app_name: &str) -> Result<HashMap<String, String>, LoadError> {
    let path = config_path(app_name)?;
    if !path.is_file() {
        return Ok(HashMap::new());
    }
    let content = std::fs::read_to_string(&path).map_err(LoadError::XdgRead)?;
    let config: ConfigFile = toml::from_str(&content)?;

    let mut out: HashMap<String, String> = config
        .agent
        .iter()
        .filter_map(|(k, v)| scalar_to_string(v).map(|s| (agent_var(app_name, k), s)))
        .collect();
    out.extend(config.env);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_env::with_xdg_home;

    fn write_config(root: &std::path::Path, app: &str, body: &str) {
        let app_dir = root.join(app);
        std::fs::create_dir_all(&app_dir).unwrap();
        std::fs::write(app_dir.join("config.toml"), body).unwrap();
    }

    #[test]
    fn missing_config_returns_empty_map() {
        let dir = tempfile::tempdir().unwrap();
        let map = with_xdg_home(dir.path(), || load_env_map("weft")).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn load_env_map_reads_env_table() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "weft",
            r#"
[env]
OPENAI_API_KEY = "from_toml"
OPENAI_BASE_URL = "http://localhost:8080/v1"
"#,
        );
        let map = with_xdg_home(dir.path(), || load_env_map("weft")).unwrap();
        assert_eq!(map.get("OPENAI_API_KEY").map(String::as_str), Some("from_toml"));
        assert_eq!(map.len(), 2);
    }

    /// **Scenario**: `[agent]` keys become `WEFT_*` variables; scalars are stringified.
    #[test]
    fn agent_table_maps_to_prefixed_vars() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "weft",
            r#"
[agent]
model = "gpt-4o-mini"
working-folder = "/tmp/drafts"
temperature = 0.5
ignored = ["not", "scalar"]
"#,
        );
        let map = with_xdg_home(dir.path(), || load_env_map("weft")).unwrap();
        assert_eq!(map.get("WEFT_MODEL").map(String::as_str), Some("gpt-4o-mini"));
        assert_eq!(
            map.get("WEFT_WORKING_FOLDER").map(String::as_str),
            Some("/tmp/drafts")
        );
        assert_eq!(map.get("WEFT_TEMPERATURE").map(String::as_str), Some("0.5"));
        assert!(!map.contains_key("WEFT_IGNORED"));
    }

    #[test]
    fn env_table_wins_over_agent_table() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "weft",
            "[env]\nWEFT_MODEL = \"from_env_table\"\n[agent]\nmodel = \"from_agent\"\n",
        );
        let map = with_xdg_home(dir.path(), || load_env_map("weft")).unwrap();
        assert_eq!(map.get("WEFT_MODEL").map(String::as_str), Some("from_env_table"));
    }

    #[test]
    fn invalid_toml_returns_xdg_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "weft", "not valid toml [[[\n");
        let result = with_xdg_home(dir.path(), || load_env_map("weft"));
        assert!(matches!(result, Err(LoadError::XdgParse(_))));
    }

    #[test]
    fn config_path_uses_xdg_home() {
        let dir = tempfile::tempdir().unwrap();
        let path = with_xdg_home(dir.path(), || config_path("weft")).unwrap();
        assert_eq!(path, dir.path().join("weft").join("config.toml"));
    }
}
