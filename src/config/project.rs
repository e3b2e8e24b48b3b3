use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::Policy;

/// Project-level configuration, read from a TOML file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Built-in tools to enable. All of them when absent.
    #[serde(default)]
    pub tools: Option<Vec<String>>,

    /// Security policy
    #[serde(default)]
    pub policy: Policy,
}

impl ProjectConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        text.parse::<Self>()
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Whether the named tool is enabled by this configuration
    pub fn enables(&self, name: &str) -> bool {
        self.tools
            .as_ref()
            .is_none_or(|tools| tools.iter().any(|t| t == name))
    }
}

impl FromStr for ProjectConfig {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}
