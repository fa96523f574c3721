//! Run settings and unit handling.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::{DEFAULT_RANDOM_SEED, DEFAULT_REGION_DISTANCE_THRESHOLD, DEFAULT_TOLERANCE};

/// Measurement unit of the host document.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnitSystem {
    #[default]
    Meters,
    Feet,
    Inches,
    Millimeters,
}

impl UnitSystem {
    /// Factor converting meters into this unit. Default thresholds are multiplied by it.
    pub fn coefficient(self) -> f64 {
        match self {
            UnitSystem::Meters => 1.0,
            UnitSystem::Feet => 3.28084,
            UnitSystem::Inches => 3.28084 * 12.0,
            UnitSystem::Millimeters => 1000.0,
        }
    }
}

/// Configuration fixed for the lifetime of a [`crate::layout::assigner::BayAssigner`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSettings {
    /// Unit system used to scale default thresholds.
    pub unit_system: UnitSystem,
    /// Explicit surface proximity threshold in model units. `None` uses the scaled default.
    pub region_distance_threshold: Option<f64>,
    /// Global edge falloff. 0 disables blending.
    pub falloff: f64,
    /// Explicit model tolerance. `None` uses the scaled default.
    pub tolerance: Option<f64>,
    /// Seed of the shared generator before any reset.
    pub random_seed: u64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            unit_system: UnitSystem::Meters,
            region_distance_threshold: None,
            falloff: 0.0,
            tolerance: None,
            random_seed: DEFAULT_RANDOM_SEED,
        }
    }
}

impl LayoutSettings {
    /// Creates settings for documents measured in `unit_system`.
    pub fn new(unit_system: UnitSystem) -> Self {
        Self {
            unit_system,
            ..Default::default()
        }
    }

    /// Sets an explicit region distance threshold (not unit-scaled).
    pub fn with_region_distance_threshold(mut self, threshold: f64) -> Self {
        self.region_distance_threshold = Some(threshold);
        self
    }

    /// Sets the global falloff.
    pub fn with_falloff(mut self, falloff: f64) -> Self {
        self.falloff = falloff;
        self
    }

    /// Sets an explicit model tolerance (not unit-scaled).
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// Sets the initial random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Effective region distance threshold in model units.
    pub fn region_distance_threshold(&self) -> f64 {
        self.region_distance_threshold
            .unwrap_or(DEFAULT_REGION_DISTANCE_THRESHOLD * self.unit_system.coefficient())
    }

    /// Effective model tolerance in model units.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
            .unwrap_or(DEFAULT_TOLERANCE * self.unit_system.coefficient())
    }

    /// Validates the settings, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.falloff.is_finite() {
            return Err(Error::InvalidConfig("falloff must be finite".into()));
        }
        let threshold = self.region_distance_threshold();
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(Error::InvalidConfig(
                "region_distance_threshold must be finite and >= 0".into(),
            ));
        }
        let tolerance = self.tolerance();
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(Error::InvalidConfig(
                "tolerance must be finite and >= 0".into(),
            ));
        }

        Ok(())
    }
}
