use anyhow::{bail, Context, Result};
use domset_rules::PrunePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration loaded from a TOML file. Every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DedupConfig {
    /// Input rule-set path
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Output path when not writing in place
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Back up the input before writing
    #[serde(default = "default_backup")]
    pub backup: bool,

    /// Directory receiving backups
    #[serde(default = "default_backup_dir")]
    pub backup_dir: PathBuf,

    /// File used when `--log` is given
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    #[serde(default)]
    pub prune_policy: PrunePolicy,
}

fn default_input() -> PathBuf {
    PathBuf::from("input.json")
}

fn default_output() -> PathBuf {
    PathBuf::from("output.json")
}

fn default_backup() -> bool {
    true
}

fn default_backup_dir() -> PathBuf {
    PathBuf::from("backups")
}

fn default_log_file() -> PathBuf {
    PathBuf::from("deduplication.log")
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
            backup: default_backup(),
            backup_dir: default_backup_dir(),
            log_file: default_log_file(),
            prune_policy: PrunePolicy::default(),
        }
    }
}

impl DedupConfig {
    /// Return the default config file path: ~/.config/domset/config.toml
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("domset").join("config.toml"))
    }

    /// Load config from the given path, or the default path.
    ///
    /// A missing default file yields defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    bail!("config file not found: {}", path.display());
                }
                Self::from_file(path)
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                other => {
                    debug!(config_path = ?other, "Config file not found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "Loading config");
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;
        Ok(config)
    }
}
