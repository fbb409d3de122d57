//! `gantry target`: target listing, description, and validation.

use anyhow::{bail, Result};
use gantry_rules::{load_target_rules, validate_target, ValidationIssue, TARGET_RULES_SUFFIX};

use crate::project::Project;

/// List targets discovered in the project source tree.
pub fn list(project: &Project) -> Result<()> {
    if project.targets.is_empty() {
        bail!("no targets found in {}", project.source_dir().display());
    }

    println!("Targets:");
    println!();
    let default = project.manifest.default_target();
    for target in &project.targets {
        let marker = if default == Some(target.name.as_str()) {
            " (default)"
        } else {
            ""
        };
        println!(
            "  {:<20} {:<8} {} modules{marker}",
            target.name,
            target.kind.as_str(),
            target.modules.len(),
        );
    }
    println!();
    println!("Use 'gantry target describe <name>' for details.");
    Ok(())
}

/// Describe a specific target in detail.
pub fn describe(project: &Project, name: &str) -> Result<()> {
    let target = match project.targets.iter().find(|t| t.name == name) {
        Some(t) => t,
        None => {
            bail!("unknown target: '{name}'. Use 'gantry target list' to see available targets.")
        }
    };

    println!("=== Target: {} ===", target.name);
    println!("Kind: {}", target.kind);
    if let Some(description) = &target.description {
        println!("Description: {description}");
    }
    println!("Build settings: {}", target.build_settings);
    println!("Include order: {}", target.include_order);
    println!();

    println!("Modules:");
    for module in &target.modules {
        let marker = if project.registry.contains(module) {
            ""
        } else {
            "  (unknown)"
        };
        println!("  {module}{marker}");
    }

    Ok(())
}

/// Re-validate a target's rule file and cross-check its module list
/// against the registry.
pub fn validate(project: &Project, name: &str) -> Result<()> {
    let path = project
        .source_dir()
        .join(format!("{name}{TARGET_RULES_SUFFIX}"));
    let target = load_target_rules(&path)?;

    let mut issues = validate_target(&target);
    for module in &target.modules {
        if !project.registry.contains(module) {
            issues.push(ValidationIssue {
                severity: "error",
                message: format!("module '{module}' is not a known engine or project module"),
            });
        }
    }

    if issues.is_empty() {
        println!("{name}: ok");
        return Ok(());
    }

    for issue in &issues {
        println!("{}: {}", issue.severity, issue.message);
    }
    let errors = issues.iter().filter(|issue| issue.is_error()).count();
    if errors > 0 {
        bail!("{errors} error(s) in '{name}'");
    }
    Ok(())
}
