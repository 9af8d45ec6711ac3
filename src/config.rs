//! Knobs for table construction.

use crate::error::AliasError;

/// Settings consulted by [`build_with`](crate::build_with).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildConfig {
    tolerance: f64,
}

impl BuildConfig {
    /// How far the probability sum may stray from 1 by default.
    pub const DEFAULT_TOLERANCE: f64 = 1e-6;

    /// The loose bound older tooling accepted. Only use it to reproduce
    /// output from those tools; it lets a 5% error through.
    pub const LEGACY_TOLERANCE: f64 = 0.05;

    pub const fn new() -> Self {
        Self {
            tolerance: Self::DEFAULT_TOLERANCE,
        }
    }

    /// Replace the sum-to-one tolerance.
    ///
    /// # Errors
    /// [`AliasError::InvalidTolerance`] if `tolerance` is negative or not finite.
    pub fn with_tolerance(self, tolerance: f64) -> Result<Self, AliasError> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(AliasError::InvalidTolerance { value: tolerance });
        }
        Ok(Self { tolerance })
    }

    /// Shorthand for `BuildConfig::new().with_tolerance(LEGACY_TOLERANCE)`.
    pub const fn legacy() -> Self {
        Self {
            tolerance: Self::LEGACY_TOLERANCE,
        }
    }

    #[inline]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::new()
    }
}
