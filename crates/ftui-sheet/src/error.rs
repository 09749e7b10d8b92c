#![forbid(unsafe_code)]

//! Error types for sheet configuration and listener management.
//!
//! Two classes exist:
//!
//! - [`ConfigError`]: rejected at configuration time. A sheet is never
//!   constructed from an invalid [`SheetConfig`](crate::config::SheetConfig).
//! - [`ListenerError`]: a precondition violation on the offset subscription.
//!   These are programming errors and are returned to the caller rather than
//!   repaired.
//!
//! Offsets and velocities have no error class. They are always numerically
//! usable; the opacity derivation clamps, the raw offset never does.

use std::fmt;

use crate::status::Status;
use crate::translation::ListenerHandle;

/// Invalid sheet configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Boundaries violate `opened < closed < hidden`.
    BoundaryOrder {
        opened: f64,
        closed: f64,
        hidden: f64,
    },
    /// A boundary is NaN or infinite.
    NonFiniteBoundary { status: Status, value: f64 },
    /// Panel height is not a positive finite number.
    InvalidHeight(f64),
    /// `Opened` was removed from the fling allow-list.
    OpenedUnavailable,
    /// Both the tri-state and the boolean control surface were supplied.
    ConflictingControl,
    /// A spring parameter is negative or not finite.
    InvalidSpring { field: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundaryOrder {
                opened,
                closed,
                hidden,
            } => write!(
                f,
                "boundaries must satisfy opened < closed < hidden, got opened={opened}, closed={closed}, hidden={hidden}"
            ),
            Self::NonFiniteBoundary { status, value } => {
                write!(f, "boundary for {status} is not finite: {value}")
            }
            Self::InvalidHeight(h) => write!(f, "height must be positive and finite, got {h}"),
            Self::OpenedUnavailable => {
                write!(f, "available statuses must include opened")
            }
            Self::ConflictingControl => write!(
                f,
                "status and visible control surfaces are mutually exclusive"
            ),
            Self::InvalidSpring { field, value } => {
                write!(f, "spring.{field} must be positive and finite, got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Misuse of the offset subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerError {
    /// `subscribe` was called while a listener is still registered.
    AlreadySubscribed { active: ListenerHandle },
    /// `unsubscribe` was called with a handle that is not registered.
    UnknownHandle { handle: ListenerHandle },
}

impl fmt::Display for ListenerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadySubscribed { active } => write!(
                f,
                "offset listener {} is still subscribed; unsubscribe it first",
                active.id()
            ),
            Self::UnknownHandle { handle } => {
                write!(f, "offset listener {} is not subscribed", handle.id())
            }
        }
    }
}

impl std::error::Error for ListenerError {}
