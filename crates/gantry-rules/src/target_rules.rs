//! Target rule records.
//!
//! A target rule describes one buildable output: which top-level modules it
//! links and which compatibility versions its build runs under. Targets are
//! declared in `<Name>.target.toml` files at the root of the project source
//! tree.

use serde::{Deserialize, Serialize};

/// The kind of output a target produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Standalone game executable.
    Game,
    /// Editor-hosted build of the game modules.
    Editor,
    /// Network client executable.
    Client,
    /// Dedicated server executable.
    Server,
    /// Standalone utility program.
    Program,
}

impl TargetKind {
    /// Stable lowercase name, as written in rule files.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Game => "game",
            TargetKind::Editor => "editor",
            TargetKind::Client => "client",
            TargetKind::Server => "server",
            TargetKind::Program => "program",
        }
    }
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build-settings compatibility version.
///
/// Selects the generation of toolchain defaults a target was authored
/// against. Tags are opaque to the planner and compared by identity; they
/// pass through to the build plan unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildSettingsVersion {
    V1,
    V2,
    V3,
    V4,
    V5,
    /// Track the newest settings generation.
    #[default]
    Latest,
}

impl BuildSettingsVersion {
    /// Stable lowercase name, as written in rule files.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildSettingsVersion::V1 => "v1",
            BuildSettingsVersion::V2 => "v2",
            BuildSettingsVersion::V3 => "v3",
            BuildSettingsVersion::V4 => "v4",
            BuildSettingsVersion::V5 => "v5",
            BuildSettingsVersion::Latest => "latest",
        }
    }
}

impl std::fmt::Display for BuildSettingsVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header include-order compatibility version.
///
/// Like [`BuildSettingsVersion`], an opaque tag recorded in the plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncludeOrderVersion {
    /// Pin to the oldest supported ordering.
    #[serde(rename = "oldest")]
    Oldest,
    #[serde(rename = "5.0")]
    V5_0,
    #[serde(rename = "5.1")]
    V5_1,
    #[serde(rename = "5.2")]
    V5_2,
    #[serde(rename = "5.3")]
    V5_3,
    #[serde(rename = "5.4")]
    V5_4,
    #[serde(rename = "5.5")]
    V5_5,
    #[serde(rename = "5.6")]
    V5_6,
    /// Track the newest ordering.
    #[default]
    #[serde(rename = "latest")]
    Latest,
}

impl IncludeOrderVersion {
    /// Stable name, as written in rule files.
    pub fn as_str(&self) -> &'static str {
        match self {
            IncludeOrderVersion::Oldest => "oldest",
            IncludeOrderVersion::V5_0 => "5.0",
            IncludeOrderVersion::V5_1 => "5.1",
            IncludeOrderVersion::V5_2 => "5.2",
            IncludeOrderVersion::V5_3 => "5.3",
            IncludeOrderVersion::V5_4 => "5.4",
            IncludeOrderVersion::V5_5 => "5.5",
            IncludeOrderVersion::V5_6 => "5.6",
            IncludeOrderVersion::Latest => "latest",
        }
    }
}

impl std::fmt::Display for IncludeOrderVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build rules for a single target.
///
/// The `modules` list names the top-level modules the target links, in
/// order. Planning seeds its dependency walk from this list, so the order
/// written here fixes the plan order. An empty list parses but is rejected
/// at planning time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetRules {
    /// Target name. Must be a valid identifier.
    pub name: String,

    /// What the target produces.
    pub kind: TargetKind,

    /// Build-settings compatibility version.
    #[serde(default)]
    pub build_settings: BuildSettingsVersion,

    /// Include-order compatibility version.
    #[serde(default)]
    pub include_order: IncludeOrderVersion,

    /// Top-level modules the target links, in link order.
    #[serde(default)]
    pub modules: Vec<String>,

    /// One-line description shown in listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TargetRules {
    /// Create a target rule with the given name and kind and no modules.
    pub fn new(name: impl Into<String>, kind: TargetKind) -> Self {
        TargetRules {
            name: name.into(),
            kind,
            build_settings: BuildSettingsVersion::default(),
            include_order: IncludeOrderVersion::default(),
            modules: Vec::new(),
            description: None,
        }
    }

    /// Set the linked module list.
    pub fn with_modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modules = modules.into_iter().map(Into::into).collect();
        self
    }

    /// Set the build-settings version.
    pub fn with_build_settings(mut self, version: BuildSettingsVersion) -> Self {
        self.build_settings = version;
        self
    }

    /// Set the include-order version.
    pub fn with_include_order(mut self, version: IncludeOrderVersion) -> Self {
        self.include_order = version;
        self
    }

    /// Set the description line.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
