//! Recursion and iteration budgets for the recursive rewriters.

use crate::error::{AlgebraError, Result};

pub const DEFAULT_MAX_DEPTH: usize = 256;
pub const DEFAULT_MAX_PASSES: usize = 512;

/// `max_depth` bounds recursion in the trace engine and the canonical orderer;
/// `max_passes` bounds the contraction fixed-point loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    pub max_depth: usize,
    pub max_passes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_depth: DEFAULT_MAX_DEPTH,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

impl Limits {
    pub fn new(max_depth: usize, max_passes: usize) -> Self {
        Limits {
            max_depth,
            max_passes,
        }
    }

    pub(crate) fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            tracing::debug!(target: "limits", depth, limit = self.max_depth, "depth budget exceeded");
            Err(AlgebraError::DepthExceeded {
                limit: self.max_depth,
            })
        } else {
            Ok(())
        }
    }
}
