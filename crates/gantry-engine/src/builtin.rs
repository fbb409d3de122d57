//! The builtin engine module catalog.
//!
//! Engine modules ship with the toolchain rather than with the project, so
//! their rules are constructed here instead of being discovered from rule
//! files. The catalog is closed: every dependency named by a builtin module
//! is itself a builtin module.

use gantry_rules::{ModuleRules, PchMode};

/// All builtin engine modules, in dependency-friendly declaration order.
pub fn modules() -> Vec<ModuleRules> {
    vec![
        core(),
        core_object(),
        input_core(),
        slate_core(),
        slate(),
        engine(),
        enhanced_input(),
        ai_module(),
        state_tree(),
        gameplay_state_tree(),
        umg(),
    ]
}

/// Look up a builtin module by name.
pub fn find(name: &str) -> Option<ModuleRules> {
    modules().into_iter().find(|m| m.name == name)
}

/// Names of all builtin modules, in declaration order.
pub fn names() -> Vec<String> {
    modules().into_iter().map(|m| m.name).collect()
}

fn core() -> ModuleRules {
    ModuleRules::new("Core")
        .with_include_paths(["Core"])
        .with_pch(PchMode::Shared)
        .with_description("Low-level utilities, containers, and platform abstraction")
}

fn core_object() -> ModuleRules {
    ModuleRules::new("CoreObject")
        .with_public_dependencies(["Core"])
        .with_include_paths(["CoreObject"])
        .with_pch(PchMode::Shared)
        .with_description("Object model, reflection, and serialization")
}

fn input_core() -> ModuleRules {
    ModuleRules::new("InputCore")
        .with_public_dependencies(["Core", "CoreObject"])
        .with_include_paths(["InputCore"])
        .with_pch(PchMode::Shared)
        .with_description("Input device types and key definitions")
}

fn slate_core() -> ModuleRules {
    ModuleRules::new("SlateCore")
        .with_public_dependencies(["Core", "InputCore"])
        .with_include_paths(["SlateCore"])
        .with_pch(PchMode::Shared)
        .with_description("Widget primitives and draw interface for the UI framework")
}

fn slate() -> ModuleRules {
    ModuleRules::new("Slate")
        .with_public_dependencies(["Core", "InputCore", "SlateCore"])
        .with_include_paths(["Slate"])
        .with_pch(PchMode::Shared)
        .with_description("Declarative widget UI framework")
}

fn engine() -> ModuleRules {
    ModuleRules::new("Engine")
        .with_public_dependencies(["Core", "CoreObject", "InputCore"])
        .with_private_dependencies(["SlateCore", "Slate"])
        .with_include_paths(["Engine"])
        .with_pch(PchMode::Shared)
        .with_description("Scene, actor, and gameplay framework")
}

fn enhanced_input() -> ModuleRules {
    ModuleRules::new("EnhancedInput")
        .with_public_dependencies(["Core", "CoreObject", "Engine", "InputCore"])
        .with_private_dependencies(["Slate", "SlateCore"])
        .with_include_paths(["EnhancedInput"])
        .with_pch(PchMode::Shared)
        .with_description("Action-based input mapping and processing")
}

fn ai_module() -> ModuleRules {
    ModuleRules::new("AIModule")
        .with_public_dependencies(["Core", "CoreObject", "Engine"])
        .with_include_paths(["AIModule"])
        .with_pch(PchMode::Shared)
        .with_description("Behavior trees, perception, and navigation agents")
}

fn state_tree() -> ModuleRules {
    ModuleRules::new("StateTreeModule")
        .with_public_dependencies(["Core", "CoreObject", "Engine"])
        .with_include_paths(["StateTreeModule"])
        .with_pch(PchMode::Shared)
        .with_description("Hierarchical state machine runtime")
}

fn gameplay_state_tree() -> ModuleRules {
    ModuleRules::new("GameplayStateTree")
        .with_public_dependencies(["Core", "CoreObject", "Engine", "StateTreeModule"])
        .with_private_dependencies(["AIModule"])
        .with_include_paths(["GameplayStateTree"])
        .with_pch(PchMode::Shared)
        .with_description("Gameplay bindings for the state tree runtime")
}

fn umg() -> ModuleRules {
    ModuleRules::new("UMG")
        .with_public_dependencies(["Core", "CoreObject", "Engine", "Slate", "SlateCore"])
        .with_private_dependencies(["InputCore"])
        .with_include_paths(["UMG"])
        .with_pch(PchMode::Shared)
        .with_description("Widget composition layer built on Slate")
}
