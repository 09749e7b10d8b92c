#![forbid(unsafe_code)]

//! Release-velocity decision rule.
//!
//! Velocity is the only trigger for automatic transitions. A release slower
//! than [`VEL_LIMIT`] never commits, whatever distance the drag covered; the
//! caller re-settles to the current boundary and the sheet snaps back.
//!
//! | from     | velocity        | to                                   |
//! |----------|-----------------|--------------------------------------|
//! | any      | `abs(v) <= 100` | unchanged                            |
//! | `Closed` | `v < -100` (up) | `Opened`                             |
//! | `Opened` | `v > 100` (down)| `Closed`, or per [`FlingPolicy`]     |
//! | `Hidden` | any             | unchanged                            |
//! | other    | wrong direction | unchanged                            |
//!
//! `Hidden` has no fling escape. It is entered by a fling only under
//! [`FlingPolicy::Fallback`] and left only by an explicit status or
//! visibility request.

use crate::status::{Status, StatusSet};

#[cfg(feature = "sheet-config")]
use serde::{Deserialize, Serialize};

/// Release speed (offset units per second) at or below which nothing changes.
pub const VEL_LIMIT: f64 = 100.0;

/// Where a downward fling from `Opened` lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "sheet-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "sheet-config", serde(rename_all = "lowercase"))]
pub enum FlingPolicy {
    /// `Closed` if it is an available target, else `Hidden`.
    #[default]
    Fallback,
    /// Always `Closed`; the allow-list is not consulted.
    Strict,
}

/// Next status after a release at `velocity`.
///
/// `Opened` is assumed available; configurations that exclude it are
/// rejected before a sheet exists.
#[must_use]
pub fn decide(status: Status, velocity: f64, available: StatusSet, policy: FlingPolicy) -> Status {
    if !is_fling(velocity) {
        return status;
    }
    match status {
        Status::Closed if velocity < 0.0 => Status::Opened,
        Status::Opened if velocity > 0.0 => match policy {
            FlingPolicy::Strict => Status::Closed,
            FlingPolicy::Fallback if available.includes(Status::Closed) => Status::Closed,
            FlingPolicy::Fallback => Status::Hidden,
        },
        _ => status,
    }
}

/// Whether a release at `velocity` is fast enough to commit a transition.
///
/// NaN is never a fling.
#[inline]
#[must_use]
pub fn is_fling(velocity: f64) -> bool {
    velocity.abs() > VEL_LIMIT
}
