//! Rule records for the gantry build planner.
//!
//! This crate defines the two record types the planner consumes, module
//! rules ([`ModuleRules`]) and target rules ([`TargetRules`]), together
//! with the TOML file format they are declared in. Loading, validation,
//! discovery, and template generation live in [`parse`].
//!
//! The records here are plain data. Resolution and planning over them is
//! the business of the `gantry-core` crate.

pub mod error;
pub mod module_rules;
pub mod parse;
pub mod target_rules;

pub use error::{Result, RulesError};
pub use module_rules::{ModuleRules, PchMode};
pub use parse::{
    discover_modules, discover_targets, is_valid_name, load_module_rules, load_target_rules,
    module_template, target_template, validate_module, validate_target, ValidationIssue,
    MODULE_RULES_SUFFIX, TARGET_RULES_SUFFIX,
};
pub use target_rules::{BuildSettingsVersion, IncludeOrderVersion, TargetKind, TargetRules};
