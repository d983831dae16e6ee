use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

pub const CONFIG_FILE: &str = "titlemetrics.toml";
pub const DATA_ENV_VAR: &str = "TITLEMETRICS_DATA";

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct InputConfig {
    pub path: Option<PathBuf>,
}

/// Resolve the catalog path: `--input` flag, then the environment, then
/// the config file next to the working directory.
pub fn resolve_input(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }

    if let Ok(value) = std::env::var(DATA_ENV_VAR) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }

    if let Some(path) = read_config_file(Path::new(CONFIG_FILE))? {
        return Ok(path);
    }

    bail!(
        "no catalog path configured: pass --input, set {DATA_ENV_VAR}, \
         or add [input] path to {CONFIG_FILE}"
    )
}

fn read_config_file(path: &Path) -> Result<Option<PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    Ok(config.input.path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_carries_input_path() {
        let config: ConfigFile =
            toml::from_str("[input]\npath = \"data/catalog.csv\"\n").expect("parse failed");
        assert_eq!(
            config.input.path,
            Some(PathBuf::from("data/catalog.csv"))
        );
    }

    #[test]
    fn empty_config_is_valid() {
        let config: ConfigFile = toml::from_str("").expect("parse failed");
        assert_eq!(config.input.path, None);
    }

    #[test]
    fn flag_wins_over_everything() {
        let resolved = resolve_input(Some(PathBuf::from("explicit.csv"))).expect("resolve failed");
        assert_eq!(resolved, PathBuf::from("explicit.csv"));
    }
}
