use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::version::{default_attributes, AttributeSpec};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// File holding the version variables, relative to the working directory
    #[serde(default = "default_makefile")]
    pub makefile: PathBuf,

    /// Attributes to publish, in report order
    #[serde(default = "default_attributes")]
    pub attributes: Vec<AttributeSpec>,
}

fn default_makefile() -> PathBuf {
    PathBuf::from("Makefile")
}

impl Config {
    /// Load config from repo root or user config directory
    #[allow(dead_code)]
    pub fn load() -> Result<Self> {
        Self::load_with_path(None)
    }

    /// Load configuration from a specific path, or use default search paths
    pub fn load_with_path(path: Option<String>) -> Result<Self> {
        // An explicit path must exist and parse
        if let Some(config_path) = path {
            debug!("Loading config from explicit path: {}", config_path);
            return Self::load_from_path(&config_path)
                .with_context(|| format!("Failed to load config from {}", config_path));
        }

        // Try repo root first (per-repo config)
        if Path::new("docver.toml").exists() {
            let config = Self::load_from_path("docver.toml")?;
            debug!("Loaded config from ./docver.toml");
            return Ok(config);
        }

        // Try user config directory
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("docver").join("config.toml");
            if config_path.exists() {
                let config = Self::load_from_path(&config_path)?;
                debug!("Loaded config from {:?}", config_path);
                return Ok(config);
            }
        }

        debug!("Using default config");
        Ok(Self::default())
    }

    fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject attribute lists that would publish empty or clashing names
    pub fn validate(&self) -> Result<()> {
        if self.attributes.is_empty() {
            bail!("Config must declare at least one attribute");
        }

        let mut seen = HashSet::new();
        for spec in &self.attributes {
            if spec.name.trim().is_empty() {
                bail!("Attribute with empty name (variable {:?})", spec.variable);
            }
            if spec.variable.trim().is_empty() || spec.variable.contains(char::is_whitespace) {
                bail!(
                    "Attribute {} has an invalid variable name: {:?}",
                    spec.name,
                    spec.variable
                );
            }
            if !seen.insert(spec.name.as_str()) {
                bail!("Duplicate attribute name: {}", spec.name);
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            makefile: default_makefile(),
            attributes: default_attributes(),
        }
    }
}
