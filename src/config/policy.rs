use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Security policy configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Paths that are allowed for file operations. Empty allows everything
    /// not denied.
    #[serde(default)]
    pub allow_paths: Vec<String>,

    /// Paths that are denied for file operations
    #[serde(default)]
    pub deny_paths: Vec<String>,
}

impl Policy {
    /// Check that `path` may be read under this policy.
    ///
    /// Paths are compared after canonicalization, so symlinks and `..`
    /// segments cannot step around a rule.
    pub fn check_path(&self, path: &Path) -> Result<()> {
        let canonical = std::fs::canonicalize(path)
            .with_context(|| format!("failed to resolve path: {}", path.display()))?;

        if let Some(denied) = self
            .deny_paths
            .iter()
            .map(|p| resolve_rule(p))
            .find(|rule| canonical.starts_with(rule))
        {
            anyhow::bail!(
                "access to {} is denied by policy ({})",
                path.display(),
                denied.display()
            );
        }

        if !self.allow_paths.is_empty()
            && !self
                .allow_paths
                .iter()
                .any(|p| canonical.starts_with(resolve_rule(p)))
        {
            anyhow::bail!("{} is outside the allowed paths", path.display());
        }

        Ok(())
    }
}

fn resolve_rule(rule: &str) -> PathBuf {
    std::fs::canonicalize(rule).unwrap_or_else(|_| PathBuf::from(rule))
}
