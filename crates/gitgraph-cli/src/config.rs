use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use gitgraph_core::Config;
use serde::Deserialize;

use crate::error::{CliError, Result};

const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    gitgraph: Config,
}

/// Resolves, reads, and parses the on-disk TOML config, falling back to
/// [`Config::default`] when no file exists yet. CLI flags layered on top of
/// this are the caller's responsibility, matching the teacher's
/// flag-overrides-file precedence in `gitgraph-cli`.
pub fn load() -> Result<Config> {
    let path = default_path()?;
    if !path.exists() {
        return Ok(Config::default());
    }
    let raw = fs::read_to_string(&path).map_err(|source| CliError::io("reading config file", source))?;
    let parsed: ConfigFile = toml::from_str(&raw)
        .map_err(|e| CliError::Config(format!("invalid config at {}: {e}", path.display())))?;
    Ok(parsed.gitgraph)
}

pub fn default_path() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("dev", "GitGraph", "gitgraph")
        .ok_or_else(|| CliError::Config("cannot resolve project directories".to_string()))?;
    Ok(project_dirs.config_dir().join(CONFIG_FILENAME))
}
