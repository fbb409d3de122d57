//! Load, validate, and generate rule files.
//!
//! Module rules live at `<source-dir>/<Name>/<Name>.module.toml`, target
//! rules at `<source-dir>/<Name>.target.toml`. Both are TOML documents with
//! a single `[module]` or `[target]` table.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RulesError};
use crate::module_rules::{ModuleRules, PchMode};
use crate::target_rules::{BuildSettingsVersion, IncludeOrderVersion, TargetKind, TargetRules};

/// Filename suffix for module rule files.
pub const MODULE_RULES_SUFFIX: &str = ".module.toml";

/// Filename suffix for target rule files.
pub const TARGET_RULES_SUFFIX: &str = ".target.toml";

#[derive(Serialize, Deserialize)]
struct ModuleDoc {
    module: ModuleRules,
}

#[derive(Serialize, Deserialize)]
struct TargetDoc {
    target: TargetRules,
}

/// Load module rules from a TOML file.
///
/// When the filename follows the `<Name>.module.toml` convention, the file
/// stem must match the declared module name.
pub fn load_module_rules(path: &Path) -> Result<ModuleRules> {
    if !path.exists() {
        return Err(RulesError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    let rules = parse_module_rules(&content)?;
    check_stem(path, MODULE_RULES_SUFFIX, "module", &rules.name)?;
    Ok(rules)
}

/// Parse module rules from a TOML string.
pub fn parse_module_rules(toml_str: &str) -> Result<ModuleRules> {
    let doc: ModuleDoc = toml::from_str(toml_str)?;
    Ok(doc.module)
}

/// Serialize module rules to TOML.
pub fn module_rules_to_toml(rules: &ModuleRules) -> Result<String> {
    Ok(toml::to_string_pretty(&ModuleDoc {
        module: rules.clone(),
    })?)
}

/// Load target rules from a TOML file.
///
/// When the filename follows the `<Name>.target.toml` convention, the file
/// stem must match the declared target name.
pub fn load_target_rules(path: &Path) -> Result<TargetRules> {
    if !path.exists() {
        return Err(RulesError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    let rules = parse_target_rules(&content)?;
    check_stem(path, TARGET_RULES_SUFFIX, "target", &rules.name)?;
    Ok(rules)
}

/// Parse target rules from a TOML string.
pub fn parse_target_rules(toml_str: &str) -> Result<TargetRules> {
    let doc: TargetDoc = toml::from_str(toml_str)?;
    Ok(doc.target)
}

/// Serialize target rules to TOML.
pub fn target_rules_to_toml(rules: &TargetRules) -> Result<String> {
    Ok(toml::to_string_pretty(&TargetDoc {
        target: rules.clone(),
    })?)
}

fn check_stem(path: &Path, suffix: &str, what: &str, declared: &str) -> Result<()> {
    let file_name = match path.file_name().and_then(|n| n.to_str()) {
        Some(n) => n,
        None => return Ok(()),
    };
    if let Some(stem) = file_name.strip_suffix(suffix) {
        if stem != declared {
            return Err(RulesError::Validation {
                detail: format!(
                    "file '{file_name}' declares {what} '{declared}'; \
                     the file stem and the declared name must match"
                ),
            });
        }
    }
    Ok(())
}

/// A validation issue found in a rule record.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Issue severity: "error" or "warning".
    pub severity: &'static str,
    /// Human-readable description.
    pub message: String,
}

impl ValidationIssue {
    fn error(message: impl Into<String>) -> Self {
        ValidationIssue {
            severity: "error",
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        ValidationIssue {
            severity: "warning",
            message: message.into(),
        }
    }

    /// Whether this issue is an error rather than a warning.
    pub fn is_error(&self) -> bool {
        self.severity == "error"
    }
}

/// Validate module rules beyond what parsing enforces.
///
/// Checks names, dependency lists, and include paths. Does not look at
/// other modules; cross-module problems (unknown names, cycles) surface
/// when a plan is resolved.
pub fn validate_module(rules: &ModuleRules) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if !is_valid_name(&rules.name) {
        issues.push(ValidationIssue::error(format!(
            "module name '{}' is not a valid identifier",
            rules.name
        )));
    }

    let mut seen = Vec::new();
    for dep in rules.dependencies() {
        if !is_valid_name(dep) {
            issues.push(ValidationIssue::error(format!(
                "dependency name '{dep}' is not a valid identifier"
            )));
        }
        if dep == rules.name {
            issues.push(ValidationIssue::error(format!(
                "module '{}' depends on itself",
                rules.name
            )));
        }
        if seen.contains(&dep) {
            issues.push(ValidationIssue::warning(format!(
                "dependency '{dep}' is listed more than once"
            )));
        }
        seen.push(dep);
    }

    for dep in &rules.public_dependencies {
        if rules.private_dependencies.contains(dep) {
            issues.push(ValidationIssue::warning(format!(
                "dependency '{dep}' is listed as both public and private; \
                 the public entry prevails"
            )));
        }
    }

    let mut seen_paths = Vec::new();
    for path in &rules.public_include_paths {
        if seen_paths.contains(&path) {
            issues.push(ValidationIssue::warning(format!(
                "include path '{path}' is listed more than once"
            )));
        }
        seen_paths.push(path);
        if path.is_empty() {
            issues.push(ValidationIssue::error("include path is empty"));
            continue;
        }
        if path.contains('\\') {
            issues.push(ValidationIssue::error(format!(
                "include path '{path}' uses backslashes; paths use forward slashes"
            )));
            continue;
        }
        if path.starts_with('/') || path.contains(':') {
            issues.push(ValidationIssue::error(format!(
                "include path '{path}' is absolute; paths are relative to the source root"
            )));
            continue;
        }
        if path.split('/').any(|part| part == "..") {
            issues.push(ValidationIssue::error(format!(
                "include path '{path}' escapes the source tree"
            )));
            continue;
        }
        let first = path.split('/').next().unwrap_or_default();
        if first != rules.name {
            issues.push(ValidationIssue::error(format!(
                "include path '{path}' lies outside module '{}'; \
                 the first path component must be the module name",
                rules.name
            )));
        }
    }

    issues
}

/// Validate target rules beyond what parsing enforces.
pub fn validate_target(rules: &TargetRules) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if !is_valid_name(&rules.name) {
        issues.push(ValidationIssue::error(format!(
            "target name '{}' is not a valid identifier",
            rules.name
        )));
    }

    if rules.modules.is_empty() {
        issues.push(ValidationIssue::error(format!(
            "target '{}' lists no modules",
            rules.name
        )));
    }

    let mut seen = Vec::new();
    for module in &rules.modules {
        if !is_valid_name(module) {
            issues.push(ValidationIssue::error(format!(
                "module name '{module}' is not a valid identifier"
            )));
        }
        if seen.contains(&module) {
            issues.push(ValidationIssue::warning(format!(
                "module '{module}' is listed more than once"
            )));
        }
        seen.push(module);
    }

    issues
}

/// Whether a name is a valid module or target identifier: an ASCII letter
/// or underscore, then letters, digits, underscores.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Find module rule files under a source directory.
///
/// Looks for `<Dir>/<Dir>.module.toml` in each immediate subdirectory.
/// Results are sorted by path for deterministic iteration.
pub fn discover_modules(source_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    if !source_dir.is_dir() {
        return Ok(found);
    }
    for entry in fs::read_dir(source_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let dir_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n.to_string(),
            None => continue,
        };
        let rules_path = path.join(format!("{dir_name}{MODULE_RULES_SUFFIX}"));
        if rules_path.is_file() {
            found.push(rules_path);
        }
    }
    found.sort();
    tracing::debug!(count = found.len(), "discovered module rule files");
    Ok(found)
}

/// Find target rule files at the top of a source directory.
///
/// Results are sorted by path for deterministic iteration.
pub fn discover_targets(source_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    if !source_dir.is_dir() {
        return Ok(found);
    }
    for entry in fs::read_dir(source_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_target = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.ends_with(TARGET_RULES_SUFFIX))
            .unwrap_or(false);
        if is_target {
            found.push(path);
        }
    }
    found.sort();
    tracing::debug!(count = found.len(), "discovered target rule files");
    Ok(found)
}

/// Generate a starter module rule file for a new game module.
pub fn module_template(name: &str) -> Result<String> {
    let rules = ModuleRules::new(name)
        .with_public_dependencies([
            "Core",
            "CoreObject",
            "Engine",
            "InputCore",
            "EnhancedInput",
            "AIModule",
            "StateTreeModule",
            "GameplayStateTree",
            "UMG",
            "Slate",
        ])
        .with_include_paths([name])
        .with_pch(PchMode::ExplicitOrShared);
    let body = module_rules_to_toml(&rules)?;
    Ok(format!("# Module rules for {name}\n{body}"))
}

/// Generate a starter target rule file linking the given modules.
pub fn target_template<I, S>(name: &str, kind: TargetKind, modules: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let rules = TargetRules::new(name, kind)
        .with_build_settings(BuildSettingsVersion::V5)
        .with_include_order(IncludeOrderVersion::V5_6)
        .with_modules(modules);
    let body = target_rules_to_toml(&rules)?;
    Ok(format!("# Target rules for {name}\n{body}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_MODULE: &str = r#"
[module]
name = "Game"
public-dependencies = ["Core", "Engine"]
private-dependencies = ["Slate"]
public-include-paths = ["Game", "Game/Combat"]
pch = "explicit-or-shared"
"#;

    const SAMPLE_TARGET: &str = r#"
[target]
name = "GameEditor"
kind = "editor"
build-settings = "v5"
include-order = "5.6"
modules = ["Game"]
"#;

    #[test]
    fn parses_module_rules() {
        let rules = parse_module_rules(SAMPLE_MODULE).unwrap();
        assert_eq!(rules.name, "Game");
        assert_eq!(rules.public_dependencies, vec!["Core", "Engine"]);
        assert_eq!(rules.private_dependencies, vec!["Slate"]);
        assert_eq!(rules.public_include_paths, vec!["Game", "Game/Combat"]);
        assert_eq!(rules.pch, PchMode::ExplicitOrShared);
    }

    #[test]
    fn parses_target_rules() {
        let target = parse_target_rules(SAMPLE_TARGET).unwrap();
        assert_eq!(target.name, "GameEditor");
        assert_eq!(target.kind, TargetKind::Editor);
        assert_eq!(target.build_settings, BuildSettingsVersion::V5);
        assert_eq!(target.include_order, IncludeOrderVersion::V5_6);
        assert_eq!(target.modules, vec!["Game"]);
    }

    #[test]
    fn module_fields_default_when_omitted() {
        let rules = parse_module_rules("[module]\nname = \"Core\"\n").unwrap();
        assert!(rules.public_dependencies.is_empty());
        assert!(rules.private_dependencies.is_empty());
        assert!(rules.public_include_paths.is_empty());
        assert_eq!(rules.pch, PchMode::Default);
    }

    #[test]
    fn target_kind_is_required() {
        let err = parse_target_rules("[target]\nname = \"Game\"\n").unwrap_err();
        assert!(matches!(err, RulesError::Toml(_)));
    }

    #[test]
    fn module_toml_round_trips() {
        let rules = parse_module_rules(SAMPLE_MODULE).unwrap();
        let toml_str = module_rules_to_toml(&rules).unwrap();
        let reparsed = parse_module_rules(&toml_str).unwrap();
        assert_eq!(rules, reparsed);
    }

    #[test]
    fn load_rejects_mismatched_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Renamed.module.toml");
        std::fs::write(&path, SAMPLE_MODULE).unwrap();

        let err = load_module_rules(&path).unwrap_err();
        assert!(matches!(err, RulesError::Validation { .. }));
        assert!(err.to_string().contains("Game"));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Game.module.toml");
        let err = load_module_rules(&path).unwrap_err();
        assert!(matches!(err, RulesError::NotFound { .. }));
    }

    #[test]
    fn validate_accepts_well_formed_module() {
        let rules = parse_module_rules(SAMPLE_MODULE).unwrap();
        assert!(validate_module(&rules).is_empty());
    }

    #[test]
    fn name_validity() {
        assert!(is_valid_name("Game"));
        assert!(is_valid_name("_Internal"));
        assert!(is_valid_name("Slate2D"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("2Fast"));
        assert!(!is_valid_name("My-Module"));
        assert!(!is_valid_name("My Module"));
    }

    #[test]
    fn validate_rejects_bad_module_name() {
        let rules = ModuleRules::new("2Fast");
        let issues = validate_module(&rules);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert!(issues[0].message.contains("2Fast"));
    }

    #[test]
    fn validate_rejects_self_dependency() {
        let rules = ModuleRules::new("Game").with_private_dependencies(["Game"]);
        let issues = validate_module(&rules);
        assert!(issues.iter().any(|i| i.is_error() && i.message.contains("itself")));
    }

    #[test]
    fn validate_warns_on_duplicate_dependency() {
        let rules = ModuleRules::new("Game").with_public_dependencies(["Core", "Core"]);
        let issues = validate_module(&rules);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, "warning");
    }

    #[test]
    fn validate_warns_on_duplicate_include_path() {
        let rules = ModuleRules::new("Game").with_include_paths(["Game/Public", "Game/Public"]);
        let issues = validate_module(&rules);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, "warning");
        assert!(issues[0].message.contains("more than once"));
    }

    #[test]
    fn validate_rejects_foreign_include_path() {
        let rules = ModuleRules::new("Game").with_include_paths(["Engine/Public"]);
        let issues = validate_module(&rules);
        assert!(issues.iter().any(|i| i.is_error() && i.message.contains("outside")));
    }

    #[test]
    fn validate_rejects_escaping_include_path() {
        let rules = ModuleRules::new("Game").with_include_paths(["Game/../Engine"]);
        let issues = validate_module(&rules);
        assert!(issues.iter().any(|i| i.is_error() && i.message.contains("escapes")));
    }

    #[test]
    fn validate_rejects_absolute_include_path() {
        let rules = ModuleRules::new("Game").with_include_paths(["/usr/include"]);
        let issues = validate_module(&rules);
        assert!(issues.iter().any(|i| i.is_error() && i.message.contains("absolute")));
    }

    #[test]
    fn validate_rejects_empty_target() {
        let target = TargetRules::new("Game", TargetKind::Game);
        let issues = validate_target(&target);
        assert!(issues.iter().any(|i| i.is_error() && i.message.contains("no modules")));
    }

    #[test]
    fn discover_finds_module_rules_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["Gamma", "Alpha"] {
            let module_dir = dir.path().join(name);
            std::fs::create_dir(&module_dir).unwrap();
            std::fs::write(
                module_dir.join(format!("{name}{MODULE_RULES_SUFFIX}")),
                format!("[module]\nname = \"{name}\"\n"),
            )
            .unwrap();
        }
        // A subdirectory without rules is skipped.
        std::fs::create_dir(dir.path().join("Docs")).unwrap();

        let found = discover_modules(dir.path()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Alpha.module.toml", "Gamma.module.toml"]);
    }

    #[test]
    fn discover_finds_target_rules_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["Zeta", "Beta"] {
            std::fs::write(
                dir.path().join(format!("{name}{TARGET_RULES_SUFFIX}")),
                format!("[target]\nname = \"{name}\"\nkind = \"game\"\n"),
            )
            .unwrap();
        }
        std::fs::write(dir.path().join("notes.txt"), "skip me").unwrap();

        let found = discover_targets(dir.path()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Beta.target.toml", "Zeta.target.toml"]);
    }

    #[test]
    fn discover_on_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(discover_modules(&missing).unwrap().is_empty());
        assert!(discover_targets(&missing).unwrap().is_empty());
    }

    #[test]
    fn module_template_parses_and_validates() {
        let toml_str = module_template("Game").unwrap();
        let rules = parse_module_rules(&toml_str).unwrap();
        assert_eq!(rules.name, "Game");
        assert!(rules.public_dependencies.contains(&"Core".to_string()));
        assert_eq!(rules.public_include_paths, vec!["Game"]);
        assert!(validate_module(&rules).is_empty());
    }

    #[test]
    fn target_template_parses_and_validates() {
        let toml_str = target_template("GameEditor", TargetKind::Editor, ["Game"]).unwrap();
        let target = parse_target_rules(&toml_str).unwrap();
        assert_eq!(target.name, "GameEditor");
        assert_eq!(target.kind, TargetKind::Editor);
        assert_eq!(target.modules, vec!["Game"]);
        assert!(validate_target(&target).is_empty());
    }
}
