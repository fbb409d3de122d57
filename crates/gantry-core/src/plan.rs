//! Build planning.
//!
//! A build plan is the full answer to "what does it take to build this
//! target": every reachable module in dependency order, each with its
//! precompiled-header mode, the set of modules whose headers it may
//! include, and the include search paths that set implies.
//!
//! Planning is a pure function of the target rules and the registry. The
//! same inputs always produce the same plan, byte for byte.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use gantry_rules::{
    BuildSettingsVersion, IncludeOrderVersion, ModuleRules, PchMode, TargetKind, TargetRules,
};

use crate::digest::PlanDigest;
use crate::error::{ResolveError, Result};
use crate::registry::ModuleRegistry;

/// One module in a build plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlannedModule {
    /// Module name.
    pub name: String,

    /// Precompiled-header mode carried over from the module rules.
    pub pch: PchMode,

    /// Modules whose public headers this module may include: its direct
    /// dependencies plus everything those re-export publicly, in walk
    /// order. Private dependencies of other modules never appear here.
    pub visible_modules: Vec<String>,

    /// Include search paths for compiling this module: its own exported
    /// paths, then the exported paths of each visible module, deduplicated
    /// in first-seen order.
    pub include_paths: Vec<String>,
}

/// An ordered, dependency-complete build plan for one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildPlan {
    /// Target name.
    pub target: String,

    /// What the target produces.
    pub kind: TargetKind,

    /// Build-settings version carried over from the target rules.
    pub build_settings: BuildSettingsVersion,

    /// Include-order version carried over from the target rules.
    pub include_order: IncludeOrderVersion,

    /// Modules in build order. Every module precedes its dependents.
    pub modules: Vec<PlannedModule>,
}

impl BuildPlan {
    /// Module names in build order.
    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|m| m.name.as_str())
    }

    /// Digest of the serialized plan. Equal plans have equal digests.
    pub fn digest(&self) -> Result<PlanDigest> {
        Ok(PlanDigest::compute(&serde_json::to_vec(self)?))
    }
}

/// Produce the build plan for a target.
///
/// Fails on an empty module list, on any name that does not resolve, and
/// on dependency cycles. There is no partial output.
pub fn plan(target: &TargetRules, registry: &ModuleRegistry) -> Result<BuildPlan> {
    if target.modules.is_empty() {
        return Err(ResolveError::EmptyTarget {
            name: target.name.clone(),
        });
    }
    let order = registry.topological_order(&target.modules)?;
    let mut modules = Vec::with_capacity(order.len());
    for name in &order {
        let rules = registry.resolve(name)?;
        let visible_modules = visible_modules(rules, registry)?;
        let include_paths = include_paths(rules, &visible_modules, registry)?;
        modules.push(PlannedModule {
            name: name.clone(),
            pch: rules.pch,
            visible_modules,
            include_paths,
        });
    }
    tracing::debug!(target = %target.name, modules = modules.len(), "planned target");
    Ok(BuildPlan {
        target: target.name.clone(),
        kind: target.kind,
        build_settings: target.build_settings,
        include_order: target.include_order,
        modules,
    })
}

/// Modules visible to `rules`: each direct dependency, expanded through
/// the public dependency lists of everything it pulls in. A private
/// dependency grants visibility to the depending module only; it is not
/// passed on.
fn visible_modules(rules: &ModuleRules, registry: &ModuleRegistry) -> Result<Vec<String>> {
    let mut visible = Vec::new();
    let mut seen = HashSet::new();
    for dep in rules.dependencies() {
        add_exported(dep, registry, &mut seen, &mut visible)?;
    }
    Ok(visible)
}

fn add_exported(
    name: &str,
    registry: &ModuleRegistry,
    seen: &mut HashSet<String>,
    visible: &mut Vec<String>,
) -> Result<()> {
    if !seen.insert(name.to_string()) {
        return Ok(());
    }
    visible.push(name.to_string());
    let rules = registry.resolve(name)?;
    for public_dep in &rules.public_dependencies {
        add_exported(public_dep, registry, seen, visible)?;
    }
    Ok(())
}

fn include_paths(
    rules: &ModuleRules,
    visible: &[String],
    registry: &ModuleRegistry,
) -> Result<Vec<String>> {
    let mut paths: Vec<String> = Vec::new();
    for path in &rules.public_include_paths {
        if !paths.contains(path) {
            paths.push(path.clone());
        }
    }
    for name in visible {
        let dep = registry.resolve(name)?;
        for path in &dep.public_include_paths {
            if !paths.contains(path) {
                paths.push(path.clone());
            }
        }
    }
    Ok(paths)
}

/// Render a plan as human-readable text.
pub fn format_plan(plan: &BuildPlan) -> Result<String> {
    let mut out = String::new();
    out.push_str(&format!("Plan: {} ({})\n", plan.target, plan.kind));
    out.push_str(&format!("Build settings: {}\n", plan.build_settings));
    out.push_str(&format!("Include order:  {}\n", plan.include_order));
    out.push_str(&format!(
        "Modules ({}, dependencies first):\n",
        plan.modules.len()
    ));
    let width = plan
        .modules
        .iter()
        .map(|m| m.name.len())
        .max()
        .unwrap_or(0);
    for (i, module) in plan.modules.iter().enumerate() {
        out.push_str(&format!(
            "  {:>2}. {:<width$}  pch: {}\n",
            i + 1,
            module.name,
            module.pch,
        ));
    }
    out.push_str(&format!("Digest: {}\n", plan.digest()?.short()));
    Ok(out)
}
