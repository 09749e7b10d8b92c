// Forbid unsafe in production; deny (with targeted allows) in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Sheet: a gesture-driven bottom sheet state machine.
//!
//! # Role in FrankenTUI
//! `ftui-sheet` owns the behavior of a vertically sliding panel that rests at
//! one of three positions ([`Status`]), follows drags, settles on release
//! with a spring, and derives the opacity and visibility signals a renderer
//! needs. It does not render and does not capture input: the host feeds it
//! drag translations, a release velocity, and frame ticks.
//!
//! # Primary responsibilities
//! - **Boundaries**: status → offset mapping with an enforced ordering.
//! - **TranslationController**: the one writer of the live offset
//!   (drag-follow and spring settle) and its single-listener subscription.
//! - **decide**: release velocity → next status.
//! - **Visibility**: overlay/content opacity and render-skip predicates.
//! - **BottomSheet**: the status lifecycle tying it all together.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use ftui_sheet::{BottomSheet, SheetConfig, SheetGesture, Status};
//!
//! let mut sheet = BottomSheet::new(
//!     SheetConfig::default().with_height(800.0).with_status(Status::Closed),
//! )
//! .unwrap();
//!
//! sheet.handle_gesture(SheetGesture::Drag { translation: -40.0 });
//! sheet.handle_gesture(SheetGesture::Release { velocity: -150.0 });
//! assert_eq!(sheet.status(), Status::Opened);
//!
//! while sheet.is_settling() {
//!     sheet.tick(Duration::from_millis(16));
//! }
//! assert_eq!(sheet.offset(), 100.0);
//! ```

pub mod boundary;
pub mod config;
pub mod decision;
pub mod error;
pub mod frame;
pub mod logging;
pub mod sheet;
pub mod spring;
pub mod status;
pub mod translation;
pub mod visibility;

pub use boundary::{Boundaries, Geometry};
pub use config::{ConfigLoadError, SheetConfig};
pub use decision::{FlingPolicy, VEL_LIMIT, decide};
pub use error::{ConfigError, ListenerError};
pub use sheet::{BottomSheet, SheetGesture, SheetSignals};
pub use spring::{Spring, SpringSpec};
pub use status::{Status, StatusSet};
pub use translation::{ListenerHandle, SettleMode, TranslationController};
pub use visibility::{Visibility, VisibilityFlags};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
