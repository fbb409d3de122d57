//! Error types for module resolution and planning.

use thiserror::Error;

/// Errors from registry resolution and build planning.
///
/// Every variant is fatal to the operation that produced it; there is no
/// partial plan.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A module name could not be resolved against the registry.
    #[error("unknown module '{name}'{}", .needed_by.as_deref().map(|d| format!(" (required by '{d}')")).unwrap_or_default())]
    UnknownModule {
        /// The name that failed to resolve.
        name: String,
        /// The module whose dependency list named it, when resolution
        /// happened during a dependency walk.
        needed_by: Option<String>,
    },

    /// A module with this name is already registered.
    #[error("module '{name}' is already registered")]
    DuplicateModule {
        /// The colliding name.
        name: String,
    },

    /// The dependency walk returned to a module already on the walk path.
    #[error("cyclic module dependency: {}", .path.join(" -> "))]
    CyclicDependency {
        /// The cycle, from the revisited module back to itself.
        path: Vec<String>,
    },

    /// The target links no modules.
    #[error("target '{name}' lists no modules")]
    EmptyTarget {
        /// The offending target.
        name: String,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for resolution and planning operations.
pub type Result<T> = std::result::Result<T, ResolveError>;
