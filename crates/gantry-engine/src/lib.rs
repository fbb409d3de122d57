//! Builtin engine modules for the gantry build planner.
//!
//! Projects build against a fixed catalog of engine modules. This crate
//! holds their rule records so the planner can resolve engine dependencies
//! without any engine source tree on disk.

pub mod builtin;

pub use builtin::{find, modules, names};
