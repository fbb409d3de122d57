//! Loaded project state.
//!
//! A [`Project`] is everything the planning commands need in one place:
//! the manifest, a registry seeded with the engine catalog plus every
//! discovered project module, and the discovered targets.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use gantry_core::ModuleRegistry;
use gantry_rules::{
    discover_modules, discover_targets, load_module_rules, load_target_rules, TargetRules,
};

use crate::manifest::ProjectManifest;

/// A fully loaded project.
#[derive(Debug)]
pub struct Project {
    /// Project root, the directory holding `gantry.toml`.
    pub root: PathBuf,
    /// Parsed manifest.
    pub manifest: ProjectManifest,
    /// Engine and project modules, keyed by name.
    pub registry: ModuleRegistry,
    /// Discovered targets, in rule-file order.
    pub targets: Vec<TargetRules>,
    /// Names of modules discovered in the project source tree.
    pub project_modules: Vec<String>,
}

impl Project {
    /// Find `gantry.toml` upward from `start_dir` and load the project.
    pub fn load_required(start_dir: &Path) -> Result<Self> {
        match ProjectManifest::find_and_load(start_dir)? {
            Some((manifest, root)) => Project::load(root, manifest),
            None => bail!("no gantry.toml found (run `gantry init` first)"),
        }
    }

    /// Load project state for a known root and manifest.
    ///
    /// The registry starts from the builtin engine catalog; discovered
    /// project modules register on top, so a project module reusing an
    /// engine module's name fails here as a duplicate.
    pub fn load(root: PathBuf, manifest: ProjectManifest) -> Result<Self> {
        let source_dir = root.join(manifest.source_dir());

        let mut registry = ModuleRegistry::with_modules(gantry_engine::modules())
            .context("registering engine modules")?;

        let mut project_modules = Vec::new();
        for path in discover_modules(&source_dir)? {
            let rules = load_module_rules(&path)
                .with_context(|| format!("loading {}", path.display()))?;
            project_modules.push(rules.name.clone());
            registry
                .register(rules)
                .with_context(|| format!("registering {}", path.display()))?;
        }

        let mut targets = Vec::new();
        for path in discover_targets(&source_dir)? {
            let rules = load_target_rules(&path)
                .with_context(|| format!("loading {}", path.display()))?;
            targets.push(rules);
        }

        tracing::debug!(
            modules = registry.len(),
            targets = targets.len(),
            "loaded project"
        );

        Ok(Project {
            root,
            manifest,
            registry,
            targets,
            project_modules,
        })
    }

    /// Directory holding rule files.
    pub fn source_dir(&self) -> PathBuf {
        self.root.join(self.manifest.source_dir())
    }

    /// Pick the target to operate on: the explicit name if given, else the
    /// manifest's default target, else the sole discovered target.
    pub fn select_target(&self, name: Option<&str>) -> Result<&TargetRules> {
        let wanted = name.or_else(|| self.manifest.default_target());
        match wanted {
            Some(wanted) => match self.targets.iter().find(|t| t.name == wanted) {
                Some(target) => Ok(target),
                None => bail!("unknown target '{wanted}'{}", available_hint(&self.targets)),
            },
            None => match self.targets.as_slice() {
                [sole] => Ok(sole),
                [] => bail!("no targets found in {}", self.source_dir().display()),
                _ => bail!(
                    "multiple targets found; pick one with --target{}",
                    available_hint(&self.targets)
                ),
            },
        }
    }

    /// Whether a module was discovered in the project source tree rather
    /// than coming from the engine catalog.
    pub fn is_project_module(&self, name: &str) -> bool {
        self.project_modules.iter().any(|m| m == name)
    }
}

fn available_hint(targets: &[TargetRules]) -> String {
    if targets.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = targets.iter().map(|t| t.name.as_str()).collect();
    format!(" (available: {})", names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_project(root: &Path) {
        std::fs::create_dir_all(root.join("source/App")).unwrap();
        std::fs::write(
            root.join("gantry.toml"),
            "[project]\nname = \"App\"\n\n[build]\ndefault-target = \"App\"\n",
        )
        .unwrap();
        std::fs::write(
            root.join("source/App/App.module.toml"),
            "[module]\nname = \"App\"\npublic-dependencies = [\"Core\", \"Engine\"]\n",
        )
        .unwrap();
        std::fs::write(
            root.join("source/App.target.toml"),
            "[target]\nname = \"App\"\nkind = \"game\"\nmodules = [\"App\"]\n",
        )
        .unwrap();
        std::fs::write(
            root.join("source/AppEditor.target.toml"),
            "[target]\nname = \"AppEditor\"\nkind = \"editor\"\nmodules = [\"App\"]\n",
        )
        .unwrap();
    }

    #[test]
    fn load_merges_engine_and_project_modules() {
        let dir = tempfile::tempdir().unwrap();
        write_project(dir.path());

        let project = Project::load_required(dir.path()).unwrap();
        assert!(project.registry.contains("Core"));
        assert!(project.registry.contains("App"));
        assert_eq!(project.project_modules, vec!["App"]);
        assert!(project.is_project_module("App"));
        assert!(!project.is_project_module("Core"));
        assert_eq!(project.targets.len(), 2);
    }

    #[test]
    fn load_rejects_engine_name_collision() {
        let dir = tempfile::tempdir().unwrap();
        write_project(dir.path());
        std::fs::create_dir_all(dir.path().join("source/Core")).unwrap();
        std::fs::write(
            dir.path().join("source/Core/Core.module.toml"),
            "[module]\nname = \"Core\"\n",
        )
        .unwrap();

        let err = Project::load_required(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("already registered"));
    }

    #[test]
    fn load_required_without_manifest_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Project::load_required(dir.path()).unwrap_err();
        assert!(err.to_string().contains("no gantry.toml"));
    }

    #[test]
    fn select_target_prefers_explicit_name() {
        let dir = tempfile::tempdir().unwrap();
        write_project(dir.path());
        let project = Project::load_required(dir.path()).unwrap();

        let target = project.select_target(Some("AppEditor")).unwrap();
        assert_eq!(target.name, "AppEditor");
    }

    #[test]
    fn select_target_falls_back_to_manifest_default() {
        let dir = tempfile::tempdir().unwrap();
        write_project(dir.path());
        let project = Project::load_required(dir.path()).unwrap();

        let target = project.select_target(None).unwrap();
        assert_eq!(target.name, "App");
    }

    #[test]
    fn select_target_unknown_lists_available() {
        let dir = tempfile::tempdir().unwrap();
        write_project(dir.path());
        let project = Project::load_required(dir.path()).unwrap();

        let err = project.select_target(Some("Server")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("unknown target 'Server'"));
        assert!(message.contains("App"));
        assert!(message.contains("AppEditor"));
    }

    #[test]
    fn select_target_without_default_needs_sole_target() {
        let dir = tempfile::tempdir().unwrap();
        write_project(dir.path());
        // Drop the [build] section so there is no default target.
        std::fs::write(dir.path().join("gantry.toml"), "[project]\nname = \"App\"\n").unwrap();

        let project = Project::load_required(dir.path()).unwrap();
        let err = project.select_target(None).unwrap_err();
        assert!(err.to_string().contains("multiple targets"));

        std::fs::remove_file(dir.path().join("source/AppEditor.target.toml")).unwrap();
        let project = Project::load_required(dir.path()).unwrap();
        let target = project.select_target(None).unwrap();
        assert_eq!(target.name, "App");
    }
}
