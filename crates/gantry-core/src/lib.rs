//! Module resolution and build planning for gantry.
//!
//! This crate turns rule records from `gantry-rules` into build plans: an
//! explicit [`ModuleRegistry`] resolves names to module rules, and
//! [`plan`] orders every module reachable from a target into a
//! dependency-first sequence with include visibility worked out per
//! module.
//!
//! Everything here is single-threaded and deterministic. Errors are fatal
//! to the operation that raised them; there are no partial results.

pub mod digest;
pub mod error;
pub mod plan;
pub mod registry;
pub mod tree;

pub use digest::PlanDigest;
pub use error::{ResolveError, Result};
pub use plan::{format_plan, plan, BuildPlan, PlannedModule};
pub use registry::ModuleRegistry;
pub use tree::format_tree;
