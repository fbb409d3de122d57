//! CLI command implementations.

pub mod doctor;
pub mod init;
pub mod module;
pub mod plan;
pub mod target;
pub mod tree;
