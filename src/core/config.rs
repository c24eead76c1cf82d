use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::substitution::SubstitutionSet;
use crate::utils::{io, validation};

/// Root directory scanned when nothing else is configured.
pub const DEFAULT_ROOT: &str = "app/src/main/java/com/example/shots";

/// Extension of the files the pass rewrites.
pub const DEFAULT_EXTENSION: &str = "kt";

/// Root configuration structure for a `--config` JSON file.
///
/// Every field is optional; missing fields take the built-in defaults, so an
/// empty object reproduces the no-argument behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepackageConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,

    #[serde(default = "default_extension")]
    pub extension: String,

    #[serde(default)]
    pub substitutions: SubstitutionSet,

    #[serde(default)]
    pub skip_dirs: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub atomic_writes: bool,
}

impl Default for RepackageConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            extension: default_extension(),
            substitutions: SubstitutionSet::default(),
            skip_dirs: Vec::new(),
            exclude: Vec::new(),
            atomic_writes: false,
        }
    }
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    BuiltIn,
    File(PathBuf),
}

impl ConfigSource {
    pub fn describe(&self) -> String {
        match self {
            ConfigSource::BuiltIn => "built-in defaults".to_string(),
            ConfigSource::File(path) => path.display().to_string(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_root() -> PathBuf {
    PathBuf::from(DEFAULT_ROOT)
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

// =============================================================================
// Loading functions
// =============================================================================

/// Resolve the active configuration.
///
/// Only a file named explicitly is read, and it must exist and parse. Without
/// one the built-in defaults apply, whatever the working directory contains.
pub fn load_config(explicit: Option<&Path>) -> Result<(RepackageConfig, ConfigSource)> {
    let Some(path) = explicit else {
        return Ok((RepackageConfig::default(), ConfigSource::BuiltIn));
    };

    if !path.is_file() {
        return Err(Error::config_not_found(path.display().to_string()));
    }
    let config = load_config_from_file(path)?;
    Ok((config, ConfigSource::File(path.to_path_buf())))
}

/// Parse and validate a config file.
pub fn load_config_from_file(path: &Path) -> Result<RepackageConfig> {
    let content = io::read_file(path, &format!("read {}", path.display()))?;

    let mut config: RepackageConfig = serde_json::from_str(&content)
        .map_err(|e| Error::config_invalid_json(path.display().to_string(), e))?;

    config.extension = validation::normalize_extension(&config.extension).map_err(|_| {
        Error::config_invalid_value(
            "extension",
            Some(config.extension.clone()),
            "must be a bare file extension such as \"kt\"",
        )
    })?;

    if config.substitutions.is_empty() {
        return Err(Error::config_invalid_value(
            "substitutions",
            None,
            "must contain at least one {\"from\", \"to\"} pair",
        ));
    }

    Ok(config)
}

/// Built-in config serialized as pretty JSON, for seeding a `--config` file.
pub fn builtin_config_json() -> Result<String> {
    serde_json::to_string_pretty(&RepackageConfig::default())
        .map_err(|e| Error::internal_json(e.to_string(), Some("serialize config".to_string())))
}
