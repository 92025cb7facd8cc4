use crate::error::{GraderError, Result};
use crate::export::auth::ServiceAccountKey;
use crate::types::config::GraderConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "grader.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".grader/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/grader/config.toml";

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_CREDENTIALS: &str = "GOOGLE_CREDENTIALS";
pub const ENV_ACTOR: &str = "GITHUB_ACTOR";
pub const ENV_REPOSITORY: &str = "GITHUB_REPOSITORY";
pub const ENV_COMPLETION_ENDPOINT: &str = "GRADER_COMPLETION_ENDPOINT";
pub const ENV_SHEETS_API_BASE: &str = "GRADER_SHEETS_API_BASE";

/// Loads the layered file config for `root`, then applies endpoint overrides
/// from the environment. Missing files fall back to built-in defaults.
pub fn load_config(root: &Path) -> Result<GraderConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    let mut cfg = load_config_with_global(root, global.as_deref())?;
    apply_env_overrides(&mut cfg, |name| std::env::var(name).ok());
    cfg.validate()?;
    Ok(cfg)
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<GraderConfig> {
    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_CONFIG_FILE))?;
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    merged
        .try_into()
        .map_err(|e: toml::de::Error| GraderError::ConfigParse(e.to_string()))
}

pub(crate) fn apply_env_overrides(
    cfg: &mut GraderConfig,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(endpoint) = non_empty(lookup(ENV_COMPLETION_ENDPOINT)) {
        cfg.completion.endpoint = endpoint;
    }
    if let Some(api_base) = non_empty(lookup(ENV_SHEETS_API_BASE)) {
        cfg.sheets.api_base = api_base;
    }
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| GraderError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

/// Identity and secrets read once from the CI environment.
#[derive(Clone, Default)]
pub struct RunEnv {
    pub api_key: Option<String>,
    pub credentials: Option<String>,
    pub actor: String,
    pub repository: String,
}

impl std::fmt::Debug for RunEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunEnv")
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .field("credentials", &self.credentials.as_ref().map(|_| "<set>"))
            .field("actor", &self.actor)
            .field("repository", &self.repository)
            .finish()
    }
}

impl RunEnv {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_key: non_empty(lookup(ENV_API_KEY)),
            credentials: non_empty(lookup(ENV_CREDENTIALS)),
            actor: lookup(ENV_ACTOR).unwrap_or_default(),
            repository: lookup(ENV_REPOSITORY).unwrap_or_default(),
        }
    }

    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or(GraderError::MissingEnv(ENV_API_KEY))
    }

    pub fn service_account(&self) -> Result<ServiceAccountKey> {
        let raw = self
            .credentials
            .as_deref()
            .ok_or(GraderError::MissingEnv(ENV_CREDENTIALS))?;
        ServiceAccountKey::from_json(raw)
    }
}
