#![forbid(unsafe_code)]

//! Mapping from [`Status`] to an absolute offset along the drag axis.
//!
//! Offsets grow downward. The origin is the sheet's own top edge when fully
//! extended, so:
//!
//! - `Opened` = `delta_true` (inset from the top)
//! - `Closed` = `height - delta_false` (inset from the bottom)
//! - `Hidden` = `height` (entirely below the fold)
//!
//! # Invariants
//!
//! 1. `opened < closed < hidden` for every [`Boundaries`] value handed out by
//!    [`Boundaries::new`] or [`Geometry::boundaries`].
//! 2. Every boundary is finite.

use crate::error::ConfigError;
use crate::status::Status;

#[cfg(feature = "sheet-config")]
use serde::{Deserialize, Serialize};

/// Default inset of the opened position from the top edge.
pub const DEFAULT_DELTA_TRUE: f64 = 100.0;

/// Default inset of the closed position from the bottom edge.
pub const DEFAULT_DELTA_FALSE: f64 = 100.0;

/// Space left above the panel when no explicit height is configured.
pub const SCREEN_INSET: f64 = 100.0;

/// Geometric inputs for deriving boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Panel height.
    pub height: f64,
    /// Opened inset from the top.
    pub delta_true: f64,
    /// Closed inset from the bottom.
    pub delta_false: f64,
}

impl Geometry {
    /// Geometry with the default insets.
    #[must_use]
    pub fn with_height(height: f64) -> Self {
        Self {
            height,
            delta_true: DEFAULT_DELTA_TRUE,
            delta_false: DEFAULT_DELTA_FALSE,
        }
    }

    /// Panel height used when only the screen height is known.
    #[inline]
    #[must_use]
    pub fn default_height(screen_height: f64) -> f64 {
        screen_height - SCREEN_INSET
    }

    /// Derive and validate the boundaries for this geometry.
    pub fn boundaries(&self) -> Result<Boundaries, ConfigError> {
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(ConfigError::InvalidHeight(self.height));
        }
        Boundaries::new(
            self.delta_true,
            self.height - self.delta_false,
            self.height,
        )
    }
}

/// Validated `Status -> offset` mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "sheet-config", derive(Serialize))]
pub struct Boundaries {
    opened: f64,
    closed: f64,
    hidden: f64,
}

impl Boundaries {
    /// Build boundaries from explicit offsets.
    ///
    /// Fails if any offset is not finite or the ordering invariant is broken.
    pub fn new(opened: f64, closed: f64, hidden: f64) -> Result<Self, ConfigError> {
        for (status, value) in [
            (Status::Opened, opened),
            (Status::Closed, closed),
            (Status::Hidden, hidden),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteBoundary { status, value });
            }
        }
        if !(opened < closed && closed < hidden) {
            return Err(ConfigError::BoundaryOrder {
                opened,
                closed,
                hidden,
            });
        }
        Ok(Self {
            opened,
            closed,
            hidden,
        })
    }

    /// Offset associated with `status`.
    #[inline]
    #[must_use]
    pub const fn offset(&self, status: Status) -> f64 {
        match status {
            Status::Opened => self.opened,
            Status::Closed => self.closed,
            Status::Hidden => self.hidden,
        }
    }

    /// Offset of the opened position.
    #[inline]
    #[must_use]
    pub const fn opened(&self) -> f64 {
        self.opened
    }

    /// Offset of the closed position.
    #[inline]
    #[must_use]
    pub const fn closed(&self) -> f64 {
        self.closed
    }

    /// Offset of the hidden position.
    #[inline]
    #[must_use]
    pub const fn hidden(&self) -> f64 {
        self.hidden
    }
}

#[cfg(feature = "sheet-config")]
impl<'de> Deserialize<'de> for Boundaries {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            opened: f64,
            closed: f64,
            hidden: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Boundaries::new(raw.opened, raw.closed, raw.hidden).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_derives_expected_offsets() {
        let b = Geometry::with_height(800.0).boundaries().unwrap();
        assert_eq!(b.offset(Status::Opened), 100.0);
        assert_eq!(b.offset(Status::Closed), 700.0);
        assert_eq!(b.offset(Status::Hidden), 800.0);
    }

    #[test]
    fn default_height_leaves_inset() {
        assert_eq!(Geometry::default_height(900.0), 800.0);
    }

    #[test]
    fn overlapping_insets_rejected() {
        let g = Geometry {
            height: 300.0,
            delta_true: 200.0,
            delta_false: 150.0,
        };
        assert_eq!(
            g.boundaries(),
            Err(ConfigError::BoundaryOrder {
                opened: 200.0,
                closed: 150.0,
                hidden: 300.0,
            })
        );
    }

    #[test]
    fn zero_delta_false_collapses_closed_into_hidden() {
        let g = Geometry {
            height: 800.0,
            delta_true: 100.0,
            delta_false: 0.0,
        };
        assert!(matches!(
            g.boundaries(),
            Err(ConfigError::BoundaryOrder { .. })
        ));
    }

    #[test]
    fn non_positive_height_rejected() {
        assert_eq!(
            Geometry::with_height(0.0).boundaries(),
            Err(ConfigError::InvalidHeight(0.0))
        );
        assert!(matches!(
            Geometry::with_height(f64::NAN).boundaries(),
            Err(ConfigError::InvalidHeight(_))
        ));
    }

    #[test]
    fn explicit_boundaries_validated() {
        assert!(Boundaries::new(0.0, 10.0, 20.0).is_ok());
        assert!(Boundaries::new(10.0, 10.0, 20.0).is_err());
        assert!(matches!(
            Boundaries::new(0.0, f64::INFINITY, 20.0),
            Err(ConfigError::NonFiniteBoundary {
                status: Status::Closed,
                ..
            })
        ));
    }

    #[test]
    fn negative_offsets_allowed_when_ordered() {
        let b = Boundaries::new(-50.0, 0.0, 40.0).unwrap();
        assert_eq!(b.opened(), -50.0);
        assert_eq!(b.hidden(), 40.0);
    }
}
