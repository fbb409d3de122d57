//! `gantry doctor`: project diagnostics.

use std::path::Path;

use anyhow::Result;
use gantry_rules::{validate_module, validate_target};

use crate::manifest::ProjectManifest;
use crate::project::Project;

/// Print diagnostic information for the project around `start_dir`.
///
/// Doctor reports problems instead of failing on them, so it stays usable
/// on a broken project.
pub fn run(start_dir: &Path) -> Result<()> {
    println!("=== Gantry Doctor ===");
    println!();

    println!("Gantry version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "Engine catalog: {} modules",
        gantry_engine::modules().len()
    );
    println!();

    println!("--- Project ---");
    let (manifest, root) = match ProjectManifest::find_and_load(start_dir) {
        Ok(Some((manifest, root))) => {
            println!("  gantry.toml: found at {}", root.display());
            println!("  Project:     {}", manifest.project.name);
            println!("  Version:     {}", manifest.project.version);
            if let Some(default) = manifest.default_target() {
                println!("  Default target: {default}");
            }
            (manifest, root)
        }
        Ok(None) => {
            println!("  gantry.toml: not found");
            return Ok(());
        }
        Err(e) => {
            println!("  gantry.toml: error: {e:#}");
            return Ok(());
        }
    };

    let project = match Project::load(root, manifest) {
        Ok(project) => project,
        Err(e) => {
            println!("  load error: {e:#}");
            return Ok(());
        }
    };
    println!("  Source dir:  {}", project.source_dir().display());
    println!();

    println!("--- Modules ---");
    if project.project_modules.is_empty() {
        println!("  (no project modules)");
    }
    for name in &project.project_modules {
        match project.registry.resolve(name) {
            Ok(module) => {
                let issues = validate_module(module);
                if issues.is_empty() {
                    println!("  {name}: ok");
                } else {
                    for issue in &issues {
                        println!("  {name}: {}: {}", issue.severity, issue.message);
                    }
                }
            }
            Err(e) => println!("  {name}: error: {e}"),
        }
    }
    println!();

    println!("--- Targets ---");
    if project.targets.is_empty() {
        println!("  (no targets)");
    }
    for target in &project.targets {
        for issue in validate_target(target) {
            println!("  {}: {}: {}", target.name, issue.severity, issue.message);
        }
        match gantry_core::plan(target, &project.registry) {
            Ok(plan) => println!(
                "  {}: plans {} modules (digest {})",
                target.name,
                plan.modules.len(),
                plan.digest()?.short()
            ),
            Err(e) => println!("  {}: plan error: {e}", target.name),
        }
    }

    Ok(())
}
