//! `gantry.toml` manifest parsing and project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// The top-level manifest structure for a gantry project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectManifest {
    /// Project metadata (required).
    pub project: ProjectConfig,
    /// Build configuration.
    #[serde(default)]
    pub build: Option<BuildConfig>,
}

/// Project metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name (required).
    pub name: String,
    /// Project version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Short description.
    #[serde(default)]
    pub description: Option<String>,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

/// Build configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildConfig {
    /// Directory holding rule files, relative to the project root.
    #[serde(default)]
    pub source_dir: Option<String>,
    /// Target planned when none is named on the command line.
    #[serde(default)]
    pub default_target: Option<String>,
}

impl ProjectManifest {
    /// Search upward from `start_dir` for a `gantry.toml` file, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join("gantry.toml");
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: ProjectManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing gantry.toml")
    }

    /// Directory holding rule files, relative to the project root.
    pub fn source_dir(&self) -> &str {
        self.build
            .as_ref()
            .and_then(|b| b.source_dir.as_deref())
            .unwrap_or("source")
    }

    /// Resolve the default target name from the manifest.
    pub fn default_target(&self) -> Option<&str> {
        self.build
            .as_ref()
            .and_then(|b| b.default_target.as_deref())
    }

    /// Generate the default template for `gantry init`.
    pub fn template(name: &str) -> String {
        format!(
            r#"[project]
name = "{name}"
version = "0.1.0"

[build]
source-dir = "source"
default-target = "{name}"
"#
        )
    }
}
