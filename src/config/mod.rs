mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_PATHS: [&str; 4] = [
    "./config.toml",
    "./introgate.toml",
    "~/.config/introgate/config.toml",
    "/etc/introgate/config.toml",
];

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    for warning in config_warnings(&config) {
        tracing::warn!("{}", warning);
    }

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    match find_config(&DEFAULT_CONFIG_PATHS) {
        Some(path) => {
            tracing::debug!("Using config file {:?}", path);
            load_config(&path)
        }
        None => Ok(Config::default()),
    }
}

/// First of `candidates` that exists, after `~` expansion
fn find_config(candidates: &[&str]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|candidate| PathBuf::from(shellexpand::tilde(candidate).as_ref()))
        .find(|path| path.exists())
}

/// Non-fatal problems with a configuration.
pub fn config_warnings(config: &Config) -> Vec<String> {
    let mut warnings = Vec::new();
    let targets = config.intros.target_libraries();

    for name in targets.duplicates() {
        warnings.push(format!("Library '{}' is listed more than once", name));
    }

    if targets.is_empty() && !config.intros.included_libraries.trim().is_empty() {
        warnings.push(
            "included_libraries has no names after parsing; intros are allowed for all movies"
                .to_string(),
        );
    }

    warnings
}
