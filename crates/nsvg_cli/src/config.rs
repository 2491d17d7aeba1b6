//! nsvg configuration file handling
//!
//! `nsvg.toml` is optional. It is read from the working directory unless a
//! path is passed with `--config`:
//!
//! ```toml
//! [output]
//! format = "json"
//! precision = 3
//!
//! [log]
//! filter = "nsvg_core=debug"
//! ```

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "nsvg.toml";

#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct NsvgConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Pretty,
    /// JSON, one document per invocation
    Json,
}

#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Decimal places in pretty output
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            precision: default_precision(),
        }
    }
}

fn default_precision() -> usize {
    4
}

#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `--verbose` is not given
    #[serde(default)]
    pub filter: Option<String>,
}

impl NsvgConfig {
    /// The config file in effect: the explicit path, or `nsvg.toml` in `dir` if present
    pub fn locate(explicit: Option<&Path>, dir: &Path) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if !path.exists() {
                anyhow::bail!("Config file {} does not exist", path.display());
            }
            return Ok(Some(path.to_path_buf()));
        }

        let path = dir.join(CONFIG_FILE);
        Ok(path.exists().then_some(path))
    }

    /// Load the located config file, falling back to defaults when there is none
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: NsvgConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(config)
    }
}
