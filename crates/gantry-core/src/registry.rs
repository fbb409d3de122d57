//! The module registry.
//!
//! The registry owns every module rule known to a planning session, engine
//! and project alike, keyed by name. Registration is explicit; nothing is
//! process-global, so independent registries never interfere.
//!
//! [`ModuleRegistry::topological_order`] is the ordering primitive the
//! planner builds on: a depth-first walk from a set of root modules that
//! yields dependencies before dependents and rejects cycles with the full
//! offending path.

use std::collections::{HashMap, HashSet};

use gantry_rules::ModuleRules;

use crate::error::{ResolveError, Result};

/// A name-keyed collection of module rules.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: HashMap<String, ModuleRules>,
}

impl ModuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        ModuleRegistry::default()
    }

    /// Create a registry from an iterator of module rules.
    pub fn with_modules<I>(modules: I) -> Result<Self>
    where
        I: IntoIterator<Item = ModuleRules>,
    {
        let mut registry = ModuleRegistry::new();
        for rules in modules {
            registry.register(rules)?;
        }
        Ok(registry)
    }

    /// Register a module. Names are unique; a second registration under
    /// the same name is rejected rather than replacing the first.
    pub fn register(&mut self, rules: ModuleRules) -> Result<()> {
        if self.modules.contains_key(&rules.name) {
            return Err(ResolveError::DuplicateModule { name: rules.name });
        }
        tracing::trace!(module = %rules.name, "registered module");
        self.modules.insert(rules.name.clone(), rules);
        Ok(())
    }

    /// Look up a module by name.
    pub fn resolve(&self, name: &str) -> Result<&ModuleRules> {
        self.resolve_for(name, None)
    }

    pub(crate) fn resolve_for(&self, name: &str, needed_by: Option<&str>) -> Result<&ModuleRules> {
        self.modules.get(name).ok_or_else(|| ResolveError::UnknownModule {
            name: name.to_string(),
            needed_by: needed_by.map(str::to_string),
        })
    }

    /// Whether a module with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Registered module names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.modules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Iterate over registered modules in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &ModuleRules> {
        self.modules.values()
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Order every module reachable from `roots` so that each module
    /// appears after all of its dependencies and exactly once.
    ///
    /// The walk is deterministic: roots are taken in the order given, and
    /// each module's dependencies in declaration order, public list first.
    /// Unregistered modules and dependency cycles abort the walk.
    pub fn topological_order(&self, roots: &[String]) -> Result<Vec<String>> {
        let mut path = Vec::new();
        let mut visited = HashSet::new();
        let mut order = Vec::new();
        for root in roots {
            self.visit(root, None, &mut path, &mut visited, &mut order)?;
        }
        Ok(order)
    }

    /// Depth-first post-order visit. `path` holds the modules currently
    /// being expanded, so finding `name` on it means the walk has come
    /// back around to an ancestor.
    fn visit(
        &self,
        name: &str,
        needed_by: Option<&str>,
        path: &mut Vec<String>,
        visited: &mut HashSet<String>,
        order: &mut Vec<String>,
    ) -> Result<()> {
        if let Some(pos) = path.iter().position(|visiting| visiting == name) {
            let mut cycle: Vec<String> = path[pos..].to_vec();
            cycle.push(name.to_string());
            return Err(ResolveError::CyclicDependency { path: cycle });
        }
        if visited.contains(name) {
            return Ok(());
        }
        let rules = self.resolve_for(name, needed_by)?;
        path.push(name.to_string());
        for dep in rules.dependencies() {
            self.visit(dep, Some(name), path, visited, order)?;
        }
        path.pop();
        visited.insert(name.to_string());
        order.push(name.to_string());
        Ok(())
    }
}
