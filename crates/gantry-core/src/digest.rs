//! Content digests for build plans.

use sha2::{Digest, Sha256};

/// SHA-256 digest of a serialized build plan.
///
/// Planning is deterministic, so equal inputs produce equal digests. Useful
/// for change detection and for asserting that replanning was a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDigest(String);

impl PlanDigest {
    /// Compute the digest of serialized plan bytes.
    pub fn compute(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        PlanDigest(format!("{:x}", hasher.finalize()))
    }

    /// Full hex form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated hex form for display.
    pub fn short(&self) -> &str {
        &self.0[..12]
    }
}

impl std::fmt::Display for PlanDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
