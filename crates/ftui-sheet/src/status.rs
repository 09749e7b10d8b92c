#![forbid(unsafe_code)]

//! Logical resting positions of the sheet and allow-lists over them.
//!
//! [`Status`] is the closed set of positions the sheet can rest at. The
//! associated offsets are strictly ordered (see [`crate::boundary`]):
//!
//! ```text
//! offset(Opened) < offset(Closed) < offset(Hidden)
//! ```
//!
//! `Opened` sits nearest the top of the screen, `Hidden` is fully off-screen
//! below. [`StatusSet`] is a bitflag allow-list used for fling targets and for
//! the interactivity gate.

use bitflags::bitflags;

#[cfg(feature = "sheet-config")]
use serde::{Deserialize, Serialize};

/// Discrete resting position of the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "sheet-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "sheet-config", serde(rename_all = "lowercase"))]
pub enum Status {
    /// Fully off-screen below.
    Hidden,
    /// Peeking from the bottom edge.
    Closed,
    /// Expanded towards the top of the screen.
    Opened,
}

impl Status {
    /// All statuses, ordered from the largest offset to the smallest.
    pub const ALL: [Status; 3] = [Status::Hidden, Status::Closed, Status::Opened];

    /// The single-member [`StatusSet`] for this status.
    #[inline]
    #[must_use]
    pub const fn as_set(self) -> StatusSet {
        match self {
            Status::Hidden => StatusSet::HIDDEN,
            Status::Closed => StatusSet::CLOSED,
            Status::Opened => StatusSet::OPENED,
        }
    }

    /// Boolean view used by the visible/not-visible control surface.
    #[inline]
    #[must_use]
    pub const fn is_visible(self) -> bool {
        !matches!(self, Status::Hidden)
    }

    /// Map the boolean control surface onto a status.
    ///
    /// `true` maps to `Closed`, `false` to `Hidden`.
    #[inline]
    #[must_use]
    pub const fn from_visible(visible: bool) -> Self {
        if visible {
            Status::Closed
        } else {
            Status::Hidden
        }
    }

    /// Lowercase name, stable for logs and config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Status::Hidden => "hidden",
            Status::Closed => "closed",
            Status::Opened => "opened",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Allow-list over [`Status`] values.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StatusSet: u8 {
        const HIDDEN = 1 << 0;
        const CLOSED = 1 << 1;
        const OPENED = 1 << 2;
    }
}

#[cfg(feature = "sheet-config")]
impl Serialize for StatusSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        bitflags::serde::serialize(self, serializer)
    }
}

#[cfg(feature = "sheet-config")]
impl<'de> Deserialize<'de> for StatusSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        bitflags::serde::deserialize(deserializer)
    }
}

impl StatusSet {
    /// Whether `status` is a member of the set.
    #[inline]
    #[must_use]
    pub const fn includes(self, status: Status) -> bool {
        self.contains(status.as_set())
    }
}

impl From<Status> for StatusSet {
    fn from(status: Status) -> Self {
        status.as_set()
    }
}

impl FromIterator<Status> for StatusSet {
    fn from_iter<I: IntoIterator<Item = Status>>(iter: I) -> Self {
        iter.into_iter()
            .fold(StatusSet::empty(), |acc, s| acc | s.as_set())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_mapping_round_trips_through_closed_and_hidden() {
        assert_eq!(Status::from_visible(true), Status::Closed);
        assert_eq!(Status::from_visible(false), Status::Hidden);
        assert!(Status::Opened.is_visible());
        assert!(Status::Closed.is_visible());
        assert!(!Status::Hidden.is_visible());
    }

    #[test]
    fn set_membership() {
        let set: StatusSet = [Status::Closed, Status::Opened].into_iter().collect();
        assert!(set.includes(Status::Closed));
        assert!(set.includes(Status::Opened));
        assert!(!set.includes(Status::Hidden));
        assert!(StatusSet::all().includes(Status::Hidden));
        assert!(!StatusSet::empty().includes(Status::Opened));
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(Status::Opened.to_string(), "opened");
        assert_eq!(format!("{}", Status::Hidden), "hidden");
    }
}
