#![forbid(unsafe_code)]

//! Damped harmonic oscillator driving the settle animation.
//!
//! The sheet offset converges on a boundary under
//!
//!   F = -stiffness × (offset - target) - damping × velocity
//!
//! The default parameters are underdamped (c < 2√k), so a settle overshoots
//! the boundary slightly and swings back before coming to rest.
//!
//! # Integration
//!
//! Semi-implicit Euler. Frames longer than [`MAX_STEP_SECS`] are split into
//! sub-steps so a dropped frame does not blow up the integration.
//!
//! # Invariants
//!
//! 1. Once at rest, `offset() == target()` exactly and the velocity is zero.
//! 2. A spring at rest stays at rest until [`Spring::retarget`] moves the
//!    target.
//! 3. Retargeting keeps the current offset and velocity, so an interrupted
//!    settle continues without a discontinuity.

use std::time::Duration;

use crate::error::ConfigError;

#[cfg(feature = "sheet-config")]
use serde::{Deserialize, Serialize};

/// Maximum dt per integration step (4ms).
pub const MAX_STEP_SECS: f64 = 0.004;

/// Spring parameters, in offset units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "sheet-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "sheet-config", serde(default))]
pub struct SpringSpec {
    /// Restoring force strength.
    pub stiffness: f64,
    /// Velocity drag.
    pub damping: f64,
    /// Offset delta below which the spring may come to rest.
    pub rest_threshold: f64,
    /// Speed below which the spring may come to rest.
    pub velocity_threshold: f64,
}

impl Default for SpringSpec {
    /// Stiffness 100, damping 10: damping ratio 0.5, a visible but short
    /// bounce past the boundary.
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            rest_threshold: 0.001,
            velocity_threshold: 0.01,
        }
    }
}

impl SpringSpec {
    /// Reject parameters that would never converge or are not numbers.
    ///
    /// Every field must be finite and strictly positive: zero damping
    /// oscillates forever, and a zero threshold can never be met by the
    /// strict rest check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("stiffness", self.stiffness),
            ("damping", self.damping),
            ("rest_threshold", self.rest_threshold),
            ("velocity_threshold", self.velocity_threshold),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidSpring { field, value });
            }
        }
        Ok(())
    }
}

/// Live spring state for one settle.
#[derive(Debug, Clone)]
pub struct Spring {
    offset: f64,
    velocity: f64,
    target: f64,
    spec: SpringSpec,
    at_rest: bool,
}

impl Spring {
    /// Start a spring at `offset`, at rest in place, heading for `target`.
    #[must_use]
    pub fn new(offset: f64, target: f64, spec: SpringSpec) -> Self {
        Self {
            offset,
            velocity: 0.0,
            target,
            spec,
            at_rest: false,
        }
    }

    /// Current offset (unclamped; may overshoot the target).
    #[inline]
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Current velocity in offset units per second.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Current target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Parameters in use.
    #[inline]
    #[must_use]
    pub fn spec(&self) -> &SpringSpec {
        &self.spec
    }

    /// Whether the spring has settled on its target.
    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Move the target, keeping offset and velocity.
    ///
    /// Wakes a resting spring unless the new target is within the rest
    /// threshold of the old one.
    pub fn retarget(&mut self, target: f64) {
        if (self.target - target).abs() > self.spec.rest_threshold {
            self.target = target;
            self.at_rest = false;
        }
    }

    fn step(&mut self, dt: f64) {
        let displacement = self.offset - self.target;
        let acceleration = -self.spec.stiffness * displacement - self.spec.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.offset += self.velocity * dt;
    }

    /// Advance by `dt`. Returns `true` if the offset moved.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.at_rest {
            return false;
        }
        let total_secs = dt.as_secs_f64();
        if total_secs <= 0.0 {
            return false;
        }

        let before = self.offset;
        let mut remaining = total_secs;
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        if (self.offset - self.target).abs() < self.spec.rest_threshold
            && self.velocity.abs() < self.spec.velocity_threshold
        {
            self.offset = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
        self.offset != before
    }
}
