//! `gantry module`: module listing and description.

use anyhow::{bail, Result};

use crate::project::Project;

/// List engine and project modules known to the current project.
pub fn list(project: &Project) -> Result<()> {
    println!("Engine modules:");
    println!();
    for module in gantry_engine::modules() {
        let description = module.description.as_deref().unwrap_or("");
        println!("  {:<20} {description}", module.name);
    }
    println!();
    println!("Project modules:");
    println!();
    if project.project_modules.is_empty() {
        println!("  (none)");
    } else {
        for name in &project.project_modules {
            let module = project.registry.resolve(name)?;
            let description = module.description.as_deref().unwrap_or("");
            println!("  {name:<20} {description}");
        }
    }
    println!();
    println!("Use 'gantry module describe <name>' for details.");
    Ok(())
}

/// Describe a specific module in detail.
pub fn describe(project: &Project, name: &str) -> Result<()> {
    let module = match project.registry.resolve(name) {
        Ok(m) => m,
        Err(_) => bail!("unknown module: '{name}'. Use 'gantry module list' to see known modules."),
    };

    println!("=== Module: {} ===", module.name);
    let origin = if project.is_project_module(&module.name) {
        "project"
    } else {
        "engine"
    };
    println!("Origin: {origin}");
    if let Some(description) = &module.description {
        println!("Description: {description}");
    }
    println!("PCH mode: {}", module.pch);
    println!();

    print_list("Public dependencies", &module.public_dependencies);
    print_list("Private dependencies", &module.private_dependencies);
    print_list("Public include paths", &module.public_include_paths);

    let mut required_by: Vec<&str> = project
        .registry
        .iter()
        .filter(|rules| rules.dependencies().any(|dep| dep == name))
        .map(|rules| rules.name.as_str())
        .collect();
    required_by.sort_unstable();
    print_list("Required by", &required_by);

    Ok(())
}

fn print_list<S: AsRef<str>>(label: &str, items: &[S]) {
    if items.is_empty() {
        return;
    }
    println!("{label}:");
    for item in items {
        println!("  {}", item.as_ref());
    }
    println!();
}
