//! Bay reassignment pipeline: regions, selection, filtering and pattern delegation.
use std::fmt;

use rand::RngCore;

pub mod assigner;
pub mod cell;
pub mod events;
pub mod filter;
pub mod metadata;
pub mod pattern;
pub mod region;
pub mod seed;
pub mod selector;
pub mod settings;

/// Default region distance threshold in meters, scaled by the unit coefficient.
pub const DEFAULT_REGION_DISTANCE_THRESHOLD: f64 = 0.1;

/// Default model tolerance in meters, scaled by the unit coefficient.
pub const DEFAULT_TOLERANCE: f64 = 0.001;

pub const DEFAULT_RANDOM_SEED: u64 = 1;

/// Falloff value that disables distance testing for a region.
pub const FALLOFF_SKIP_GRADIENT: f64 = -1.0;

/// A non-fatal diagnostic recorded while configuring or running the assigner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutWarning {
    /// Where the problem was found (e.g. `region:2`, `cell:3,4`).
    pub context: String,
    /// Human-readable message.
    pub message: String,
}

impl LayoutWarning {
    pub fn new(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.context, self.message)
    }
}

/// Generate a random float in the range [0, 1).
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f64 {
    (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}
