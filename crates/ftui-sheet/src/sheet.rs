#![forbid(unsafe_code)]

//! The bottom sheet: status lifecycle over a single translation controller.
//!
//! [`BottomSheet`] holds the logical [`Status`] and wires the pieces together:
//!
//! ```text
//! Drag { translation } ──► TranslationController::follow_immediate
//! Release { velocity } ──► decide ──► transition ──► settle(boundary) + callback
//! tick(dt)             ──► spring ──► offset ──► signals()
//! ```
//!
//! # Invariants
//!
//! 1. The status changes only on release or on an explicit request. It is
//!    never derived from the offset, which can overshoot during a settle.
//! 2. Every transition, including a request for the current status, settles
//!    to the boundary of the new status and then fires the status callback.
//! 3. A release that does not change the status still re-settles, so a slow
//!    drag snaps back.
//! 4. The boolean surface is a view: `visible() == (status() != Hidden)`,
//!    and `set_visible(v)` requests `Closed` or `Hidden`.

use std::fmt;
use std::time::Duration;

use web_time::Instant;

use crate::boundary::Boundaries;
use crate::config::SheetConfig;
use crate::decision::decide;
use crate::error::{ConfigError, ListenerError};
use crate::frame::FrameClock;
use crate::status::Status;
use crate::translation::{ListenerHandle, SettleMode, TranslationController};
use crate::visibility::{self, Visibility};

/// Gesture input consumed by the sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetGesture {
    /// Cumulative translation since the pan began, along the drag axis.
    Drag { translation: f64 },
    /// The pan ended with this velocity along the drag axis.
    Release { velocity: f64 },
}

/// Every output signal, for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetSignals {
    /// Logical status.
    pub status: Status,
    /// Live offset.
    pub offset: f64,
    /// Dimming overlay opacity.
    pub overlay_opacity: f64,
    /// Content opacity.
    pub content_opacity: f64,
    /// Whether to render the dimming overlay.
    pub back_layer_visible: bool,
    /// Whether to render the content.
    pub content_visible: bool,
    /// Whether content accepts input.
    pub interactable: bool,
}

type StatusCallback = Box<dyn FnMut(Status)>;

/// Gesture-driven bottom sheet.
pub struct BottomSheet {
    config: SheetConfig,
    boundaries: Boundaries,
    status: Status,
    controller: TranslationController,
    on_status_change: Option<StatusCallback>,
    clock: FrameClock,
}

impl fmt::Debug for BottomSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BottomSheet")
            .field("status", &self.status)
            .field("boundaries", &self.boundaries)
            .field("controller", &self.controller)
            .field("has_callback", &self.on_status_change.is_some())
            .finish()
    }
}

impl BottomSheet {
    /// Build a sheet resting at the boundary of its initial status.
    pub fn new(config: SheetConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let boundaries = config.resolve_boundaries()?;
        let status = config.initial_status();
        let controller = TranslationController::new(boundaries.offset(status), config.spring);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "sheet.mount",
            status = status.as_str(),
            opened = boundaries.opened(),
            closed = boundaries.closed(),
            hidden = boundaries.hidden()
        );

        Ok(Self {
            config,
            boundaries,
            status,
            controller,
            on_status_change: None,
            clock: FrameClock::new(),
        })
    }

    /// Sheet with default configuration for a screen of `screen_height`.
    pub fn for_screen(screen_height: f64) -> Result<Self, ConfigError> {
        Self::new(SheetConfig::for_screen(screen_height))
    }

    /// Register the status-change callback, replacing any previous one.
    pub fn set_on_status_change(&mut self, callback: impl FnMut(Status) + 'static) {
        self.on_status_change = Some(Box::new(callback));
    }

    /// Register the status-change callback and call it once with the
    /// current status, as a freshly mounted sheet reports its initial status.
    pub fn set_on_status_change_emitting(&mut self, callback: impl FnMut(Status) + 'static) {
        let mut callback: StatusCallback = Box::new(callback);
        callback(self.status);
        self.on_status_change = Some(callback);
    }

    /// Drop the status-change callback.
    pub fn clear_on_status_change(&mut self) {
        self.on_status_change = None;
    }

    // ── Tri-state surface ────────────────────────────────────────────────

    /// Current logical status.
    #[inline]
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Request `status`. Always settles, even if already there.
    pub fn set_status(&mut self, status: Status) {
        self.transition(status, "request");
    }

    // ── Boolean surface ──────────────────────────────────────────────────

    /// `true` unless hidden.
    #[inline]
    #[must_use]
    pub fn visible(&self) -> bool {
        self.status.is_visible()
    }

    /// Request `Closed` (`true`) or `Hidden` (`false`).
    pub fn set_visible(&mut self, visible: bool) {
        self.transition(Status::from_visible(visible), "visible");
    }

    /// Back-layer press: hide the sheet.
    pub fn dismiss(&mut self) {
        self.transition(Status::Hidden, "dismiss");
    }

    // ── Gestures ─────────────────────────────────────────────────────────

    /// Feed one gesture event. Returns the status after handling it.
    pub fn handle_gesture(&mut self, gesture: SheetGesture) -> Status {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("sheet.gesture", status = self.status.as_str()).entered();

        match gesture {
            SheetGesture::Drag { translation } => {
                self.drag(translation);
                self.status
            }
            SheetGesture::Release { velocity } => self.release(velocity),
        }
    }

    /// Follow the finger: offset = anchor + `translation`.
    ///
    /// A zero translation (the first sample of a pan) is ignored so it does
    /// not cancel a running settle. Non-finite samples are ignored.
    pub fn drag(&mut self, translation: f64) {
        if translation == 0.0 || !translation.is_finite() {
            return;
        }
        self.controller.follow_immediate(translation);
    }

    /// End the pan with `velocity` and decide where to rest.
    pub fn release(&mut self, velocity: f64) -> Status {
        let next = decide(
            self.status,
            velocity,
            self.config.available_statuses,
            self.config.fling_policy,
        );
        if next != self.status {
            self.transition(next, "fling");
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                message = "sheet.snap_back",
                status = self.status.as_str(),
                velocity
            );

            self.settle_to(self.status);
        }
        self.status
    }

    // ── Frames ───────────────────────────────────────────────────────────

    /// Advance the settle animation by `dt`. Returns `true` if the offset
    /// moved.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.controller.tick(dt)
    }

    /// Advance the settle animation to the frame at `now`.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        if !self.controller.is_settling() {
            self.clock.reset();
            return false;
        }
        let dt = self.clock.frame(now);
        self.controller.tick(dt)
    }

    /// Whether the host should keep scheduling frames.
    #[inline]
    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.controller.is_settling()
    }

    // ── Outputs ──────────────────────────────────────────────────────────

    /// Live offset.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.controller.offset()
    }

    /// Resolved boundaries.
    #[inline]
    #[must_use]
    pub fn boundaries(&self) -> &Boundaries {
        &self.boundaries
    }

    /// Active configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    /// Derived opacities and visibility for the live offset.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        visibility::derive(
            self.controller.offset(),
            &self.boundaries,
            self.config.visibility_flags(),
        )
    }

    /// Whether content accepts input in the current status.
    #[inline]
    #[must_use]
    pub fn interactable(&self) -> bool {
        visibility::interactable(self.status, self.config.interactable_when)
    }

    /// All output signals at once.
    #[must_use]
    pub fn signals(&self) -> SheetSignals {
        let v = self.visibility();
        SheetSignals {
            status: self.status,
            offset: self.offset(),
            overlay_opacity: v.overlay_opacity,
            content_opacity: v.content_opacity,
            back_layer_visible: v.back_layer_visible,
            content_visible: v.content_visible,
            interactable: self.interactable(),
        }
    }

    // ── Offset subscription ──────────────────────────────────────────────

    /// Register the offset listener. See [`TranslationController::subscribe`].
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(f64) + 'static,
    ) -> Result<ListenerHandle, ListenerError> {
        self.controller.subscribe(listener)
    }

    /// Remove the offset listener.
    pub fn unsubscribe(&mut self, handle: ListenerHandle) -> Result<(), ListenerError> {
        self.controller.unsubscribe(handle)
    }

    // ── Reconfiguration ──────────────────────────────────────────────────

    /// Apply a new configuration while mounted.
    ///
    /// Boundaries are recomputed and the sheet re-settles to the current
    /// status's new boundary, then the status callback fires. The control
    /// seeds (`status`/`visible`) of `config` are only checked for conflict;
    /// the live status is kept. On error nothing changes.
    pub fn reconfigure(&mut self, config: SheetConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let boundaries = config.resolve_boundaries()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "sheet.reconfigure",
            opened = boundaries.opened(),
            closed = boundaries.closed(),
            hidden = boundaries.hidden()
        );

        self.controller.set_spring_spec(config.spring);
        self.config = config;
        self.boundaries = boundaries;
        self.transition(self.status, "reconfigure");
        Ok(())
    }

    /// Settle on `status`'s boundary. A settle that starts from idle gets a
    /// fresh frame clock so the idle gap is not integrated.
    fn settle_to(&mut self, status: Status) {
        if !self.controller.is_settling() {
            self.clock.reset();
        }
        self.controller
            .settle(self.boundaries.offset(status), SettleMode::Animated);
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn transition(&mut self, next: Status, cause: &'static str) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "sheet.transition",
            from = self.status.as_str(),
            to = next.as_str(),
            cause
        );

        self.status = next;
        self.settle_to(next);
        if let Some(callback) = self.on_status_change.as_mut() {
            callback(next);
        }
    }
}
