/// Config file loading and creation for the charsort CLI.
///
/// Config lives at ~/.config/charsort/config.toml.
/// All fields are optional — CLI args override config values.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CharsortConfig {
    pub tier_count: Option<usize>,
    pub dir: Option<String>,
    pub json: Option<bool>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# charsort configuration
# All values here can be overridden by CLI flags.

# Number of score tiers. Only items in the same or adjacent tiers are compared,
# so more tiers means fewer questions (and a rougher ranking).
# tier_count = 5

# Directory of character images (.jpg / .png) to rank when no items are given.
# dir = \"./images\"

# Print results as JSON instead of a table
# json = false
";

/// Returns the default config path: ~/.config/charsort/config.toml
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home).join(".config").join("charsort").join("config.toml")
}

pub fn parse_config(content: &str) -> Result<CharsortConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> CharsortConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content)
            .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => CharsortConfig::default(),
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

/// Write the default config file to `path`. Errors if it already exists.
pub fn write_default_config(path: &Path) -> std::io::Result<()> {
    if path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("Config file already exists at {}", path.display()),
        ));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(path, DEFAULT_CONFIG_TEMPLATE)
}

/// Create the default config file at the default location.
pub fn create_default_config() -> PathBuf {
    let path = config_path();
    write_default_config(&path)
        .unwrap_or_else(|e| bail(format!("Failed to create config at {}: {e}", path.display())));
    path
}
