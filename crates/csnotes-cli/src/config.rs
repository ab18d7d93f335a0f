//! Client configuration resolution for the CLI.
//!
//! Base URL precedence: `--api-url`, then `CSNOTES_API_URL`, then
//! `config.json`, then the built-in default.

use std::env;
use std::path::PathBuf;

use csnotes_core::ClientConfig;

use crate::error::CliError;

pub const API_URL_ENV: &str = "CSNOTES_API_URL";
const CONFIG_FILE_NAME: &str = "config.json";

/// `<config dir>/csnotes`, shared by `config.json` and the session token file.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("csnotes"))
}

pub fn default_config_path() -> Result<PathBuf, CliError> {
    config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .ok_or_else(|| CliError::Config("Failed to resolve CLI config directory".to_string()))
}

pub fn resolve_config(
    flag_url: Option<String>,
    env_url: Option<String>,
    file_config: ClientConfig,
) -> ClientConfig {
    file_config
        .with_base_url_override(env_url)
        .with_base_url_override(flag_url)
}

pub fn load_client_config(flag_url: Option<String>) -> Result<ClientConfig, CliError> {
    let path = default_config_path()?;
    let file_config = ClientConfig::load_from_path(&path)?;
    let config = resolve_config(flag_url, env::var(API_URL_ENV).ok(), file_config);
    tracing::debug!(
        "Using notes server {}",
        config.api_base_url.as_deref().unwrap_or("(default)")
    );
    Ok(config)
}
