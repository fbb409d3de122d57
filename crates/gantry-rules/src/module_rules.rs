//! Module rule records.
//!
//! A module rule describes one buildable module: its name, the modules it
//! depends on, the include paths it exports, and its precompiled-header
//! mode. Rules are declared in `<Name>.module.toml` files inside the
//! project source tree, or constructed in code for engine catalog entries.

use serde::{Deserialize, Serialize};

/// Precompiled-header mode for a module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PchMode {
    /// Inherit the toolchain default.
    #[default]
    Default,
    /// Build without precompiled headers.
    None,
    /// Use the shared engine precompiled header.
    Shared,
    /// Use the module's own precompiled header when it has one, the shared
    /// engine header otherwise.
    ExplicitOrShared,
}

impl PchMode {
    /// Stable kebab-case name, as written in rule files.
    pub fn as_str(&self) -> &'static str {
        match self {
            PchMode::Default => "default",
            PchMode::None => "none",
            PchMode::Shared => "shared",
            PchMode::ExplicitOrShared => "explicit-or-shared",
        }
    }
}

impl std::fmt::Display for PchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build rules for a single module.
///
/// Dependency lists are ordered. Planning walks them in declaration order,
/// public list first, so the order written here is the order the planner
/// sees. Duplicate entries are tolerated and collapse during planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModuleRules {
    /// Module name. Must be a valid identifier.
    pub name: String,

    /// Modules this module depends on and re-exports to its dependents.
    #[serde(default)]
    pub public_dependencies: Vec<String>,

    /// Modules this module depends on without re-exporting them.
    #[serde(default)]
    pub private_dependencies: Vec<String>,

    /// Include paths exported to dependents, relative to the source root.
    /// The first path component must be the module's own name.
    #[serde(default)]
    pub public_include_paths: Vec<String>,

    /// Precompiled-header mode.
    #[serde(default)]
    pub pch: PchMode,

    /// One-line description shown in listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ModuleRules {
    /// Create a module rule with the given name and no dependencies.
    pub fn new(name: impl Into<String>) -> Self {
        ModuleRules {
            name: name.into(),
            public_dependencies: Vec::new(),
            private_dependencies: Vec::new(),
            public_include_paths: Vec::new(),
            pch: PchMode::default(),
            description: None,
        }
    }

    /// Set the public dependency list.
    pub fn with_public_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.public_dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Set the private dependency list.
    pub fn with_private_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.private_dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Set the exported include paths.
    pub fn with_include_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.public_include_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Set the precompiled-header mode.
    pub fn with_pch(mut self, pch: PchMode) -> Self {
        self.pch = pch;
        self
    }

    /// Set the description line.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// All dependencies in planning order: the public list, then the
    /// private list, each in declaration order.
    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.public_dependencies
            .iter()
            .chain(self.private_dependencies.iter())
            .map(String::as_str)
    }

    /// Number of direct dependencies, counting duplicates.
    pub fn dependency_count(&self) -> usize {
        self.public_dependencies.len() + self.private_dependencies.len()
    }
}
