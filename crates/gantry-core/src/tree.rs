//! Dependency tree rendering.
//!
//! Renders the module graph under a target as an ASCII tree. A module
//! already shown elsewhere in the tree is printed once more with a `(*)`
//! marker and not expanded again, so shared subtrees stay readable and
//! cyclic graphs still render.

use std::collections::HashSet;

use gantry_rules::TargetRules;

use crate::error::Result;
use crate::registry::ModuleRegistry;

/// Render the dependency tree for a target.
pub fn format_tree(target: &TargetRules, registry: &ModuleRegistry) -> Result<String> {
    let mut out = String::new();
    out.push_str(&format!("{} ({})\n", target.name, target.kind));
    let mut printed = HashSet::new();
    for (i, module) in target.modules.iter().enumerate() {
        let last = i + 1 == target.modules.len();
        render(module, None, registry, "", last, false, &mut printed, &mut out)?;
    }
    out.push_str(&format!("\n{} modules\n", printed.len()));
    Ok(out)
}

#[allow(clippy::too_many_arguments)]
fn render(
    name: &str,
    needed_by: Option<&str>,
    registry: &ModuleRegistry,
    prefix: &str,
    last: bool,
    private: bool,
    printed: &mut HashSet<String>,
    out: &mut String,
) -> Result<()> {
    let connector = if last { "└── " } else { "├── " };
    let privacy = if private { " (private)" } else { "" };

    if !printed.insert(name.to_string()) {
        out.push_str(&format!("{prefix}{connector}{name}{privacy} (*)\n"));
        return Ok(());
    }
    out.push_str(&format!("{prefix}{connector}{name}{privacy}\n"));

    let rules = registry.resolve_for(name, needed_by)?;
    let children: Vec<(&String, bool)> = rules
        .public_dependencies
        .iter()
        .map(|dep| (dep, false))
        .chain(rules.private_dependencies.iter().map(|dep| (dep, true)))
        .collect();

    let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
    for (i, (dep, dep_private)) in children.iter().enumerate() {
        let dep_last = i + 1 == children.len();
        render(
            dep,
            Some(name),
            registry,
            &child_prefix,
            dep_last,
            *dep_private,
            printed,
            out,
        )?;
    }
    Ok(())
}
