#![forbid(unsafe_code)]

//! Opacity and visibility signals derived from the live offset.
//!
//! Everything here is a pure function of `(offset, boundaries, flags)` and is
//! recomputed on every offset change. Nothing is cached between frames.
//!
//! - The dimming overlay fades from [`OVERLAY_MAX_OPACITY`] at `Closed` to
//!   zero at `Hidden`.
//! - Content fades from 1 at `Opened` to 0 at `Closed`.
//! - Both interpolations clamp outside their input range. The offset itself
//!   is never clamped.
//! - The back layer is skipped when the offset is within [`ERROR`] of
//!   `Hidden`; content is skipped within [`ERROR`] of `Closed` when
//!   `hide_on_zero_opacity` is set.

use crate::boundary::Boundaries;
use crate::status::{Status, StatusSet};

/// Tolerance window (offset units) for the visibility predicates.
pub const ERROR: f64 = 10.0;

/// Overlay opacity at and above the closed position.
pub const OVERLAY_MAX_OPACITY: f64 = 0.3;

/// Flags that shape the derived signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityFlags {
    /// Stop rendering content when its opacity is effectively zero.
    pub hide_on_zero_opacity: bool,
    /// Fade content with the offset. When unset content opacity is always 1.
    pub content_animated_opacity: bool,
}

impl Default for VisibilityFlags {
    fn default() -> Self {
        Self {
            hide_on_zero_opacity: true,
            content_animated_opacity: false,
        }
    }
}

/// Derived render signals for one offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visibility {
    /// Opacity of the dimming overlay, in `[0, 0.3]`.
    pub overlay_opacity: f64,
    /// Opacity of the sheet content, in `[0, 1]`.
    pub content_opacity: f64,
    /// Whether the dimming overlay should be rendered at all.
    pub back_layer_visible: bool,
    /// Whether the sheet content should be rendered at all.
    pub content_visible: bool,
}

/// Linear map of `value` from `[from, to]` onto `[out_from, out_to]`, clamped
/// to the output range.
///
/// `from == to` yields `out_to` at or past the input point and `out_from`
/// before it.
#[must_use]
pub fn clamped_lerp(value: f64, from: f64, to: f64, out_from: f64, out_to: f64) -> f64 {
    let span = to - from;
    if span == 0.0 {
        return if value < from { out_from } else { out_to };
    }
    let t = ((value - from) / span).clamp(0.0, 1.0);
    out_from + (out_to - out_from) * t
}

/// Overlay opacity: 0.3 at `Closed`, 0 at `Hidden`, clamped outside.
#[must_use]
pub fn overlay_opacity(offset: f64, boundaries: &Boundaries) -> f64 {
    clamped_lerp(
        offset,
        boundaries.closed(),
        boundaries.hidden(),
        OVERLAY_MAX_OPACITY,
        0.0,
    )
}

/// Content opacity: 1 at `Opened`, 0 at `Closed`, clamped outside.
#[must_use]
pub fn content_opacity(offset: f64, boundaries: &Boundaries) -> f64 {
    clamped_lerp(offset, boundaries.opened(), boundaries.closed(), 1.0, 0.0)
}

/// `false` only while the offset is within [`ERROR`] of `Hidden`.
#[inline]
#[must_use]
pub fn back_layer_visible(offset: f64, boundaries: &Boundaries) -> bool {
    (offset - boundaries.hidden()).abs() >= ERROR
}

/// `false` only while the offset is within [`ERROR`] of `Closed`.
#[inline]
#[must_use]
pub fn content_visible(offset: f64, boundaries: &Boundaries) -> bool {
    (offset - boundaries.closed()).abs() >= ERROR
}

/// Compute every signal for `offset`.
#[must_use]
pub fn derive(offset: f64, boundaries: &Boundaries, flags: VisibilityFlags) -> Visibility {
    Visibility {
        overlay_opacity: overlay_opacity(offset, boundaries),
        content_opacity: if flags.content_animated_opacity {
            content_opacity(offset, boundaries)
        } else {
            1.0
        },
        back_layer_visible: back_layer_visible(offset, boundaries),
        content_visible: !flags.hide_on_zero_opacity || content_visible(offset, boundaries),
    }
}

/// Whether content accepts input while resting at `status`.
///
/// When `false` the render layer covers the content with a transparent,
/// input-absorbing layer.
#[inline]
#[must_use]
pub fn interactable(status: Status, interactable_when: StatusSet) -> bool {
    interactable_when.includes(status)
}
