#![forbid(unsafe_code)]

//! The single continuous offset of the sheet and its only writer.
//!
//! [`TranslationController`] owns the live offset. It moves in one of two
//! ways:
//!
//! - **Drag-follow** ([`follow_immediate`](TranslationController::follow_immediate)):
//!   synchronous, unanimated. The offset becomes `anchor + translation` before
//!   the call returns.
//! - **Settle** ([`settle`](TranslationController::settle)): a spring toward a
//!   target, advanced by [`tick`](TranslationController::tick) from the host's
//!   frame loop. Fire-and-forget; nothing waits on completion.
//!
//! # Invariants
//!
//! 1. The anchor (`prev_settled`) is set to the settle target when the settle
//!    starts, not when it finishes. A drag that begins mid-settle is measured
//!    from the boundary the sheet was heading to.
//! 2. `settle` during a settle retargets the running spring from the live
//!    offset and velocity. No jump.
//! 3. `follow_immediate` during a settle drops the spring; later ticks do
//!    nothing until the next `settle`.
//! 4. At most one offset listener is registered. A second `subscribe` without
//!    `unsubscribe` fails with [`ListenerError::AlreadySubscribed`].
//! 5. The listener is notified at most once per `tick`, and once per
//!    `follow_immediate`/instant settle that changes the offset.

use std::fmt;
use std::time::Duration;

use crate::error::ListenerError;
use crate::spring::{Spring, SpringSpec};

/// Opaque token returned by [`TranslationController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

impl ListenerHandle {
    /// Numeric id, for diagnostics.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// How [`TranslationController::settle`] reaches its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettleMode {
    /// Spring convergence over multiple frames.
    #[default]
    Animated,
    /// Jump to the target in the same call.
    Instant,
}

/// What is currently driving the offset.
#[derive(Debug, Clone)]
enum Motion {
    Idle,
    Following,
    Settling(Spring),
}

type OffsetListener = Box<dyn FnMut(f64)>;

/// Owner of the live sheet offset.
pub struct TranslationController {
    offset: f64,
    prev_settled: f64,
    motion: Motion,
    spring: SpringSpec,
    listener: Option<(ListenerHandle, OffsetListener)>,
    next_handle: u64,
}

impl fmt::Debug for TranslationController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationController")
            .field("offset", &self.offset)
            .field("prev_settled", &self.prev_settled)
            .field("motion", &self.motion)
            .field("listener", &self.listener.as_ref().map(|(h, _)| h.0))
            .finish()
    }
}

impl TranslationController {
    /// Controller resting at `offset`.
    #[must_use]
    pub fn new(offset: f64, spring: SpringSpec) -> Self {
        Self {
            offset,
            prev_settled: offset,
            motion: Motion::Idle,
            spring,
            listener: None,
            next_handle: 1,
        }
    }

    /// Live offset.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Anchor that drag translations are applied to.
    #[inline]
    #[must_use]
    pub fn prev_settled(&self) -> f64 {
        self.prev_settled
    }

    /// Whether a settle animation still needs frames.
    #[inline]
    #[must_use]
    pub fn is_settling(&self) -> bool {
        matches!(&self.motion, Motion::Settling(spring) if !spring.is_at_rest())
    }

    /// Whether the last write came from drag-follow.
    #[inline]
    #[must_use]
    pub fn is_following(&self) -> bool {
        matches!(self.motion, Motion::Following)
    }

    /// Spring parameters used for animated settles.
    #[inline]
    #[must_use]
    pub fn spring_spec(&self) -> &SpringSpec {
        &self.spring
    }

    /// Replace the spring parameters. A running settle keeps its old spec.
    pub fn set_spring_spec(&mut self, spring: SpringSpec) {
        self.spring = spring;
    }

    /// Drag-follow: `offset = prev_settled + translation`, synchronously.
    ///
    /// Cancels any in-flight settle.
    pub fn follow_immediate(&mut self, translation: f64) {
        self.motion = Motion::Following;
        self.write(self.prev_settled + translation);
    }

    /// Start converging on `target`.
    ///
    /// The anchor moves to `target` immediately. An animated settle that
    /// interrupts another keeps the running spring's velocity.
    pub fn settle(&mut self, target: f64, mode: SettleMode) {
        self.prev_settled = target;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            message = "sheet.settle",
            from = self.offset,
            target,
            mode = ?mode
        );

        match mode {
            SettleMode::Instant => {
                self.motion = Motion::Idle;
                self.write(target);
            }
            SettleMode::Animated => {
                if let Motion::Settling(spring) = &mut self.motion {
                    spring.retarget(target);
                    return;
                }
                self.motion = Motion::Settling(Spring::new(self.offset, target, self.spring));
            }
        }
    }

    /// Advance an in-flight settle by one frame of length `dt`.
    ///
    /// Returns `true` if the offset changed (and the listener was notified).
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Motion::Settling(spring) = &mut self.motion else {
            return false;
        };
        if !spring.advance(dt) {
            if spring.is_at_rest() {
                self.motion = Motion::Idle;
            }
            return false;
        }
        let next = spring.offset();
        if spring.is_at_rest() {
            self.motion = Motion::Idle;
        }
        self.write(next)
    }

    /// Register the offset listener.
    ///
    /// Fails if one is already registered; the existing listener is kept.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(f64) + 'static,
    ) -> Result<ListenerHandle, ListenerError> {
        if let Some((active, _)) = &self.listener {
            return Err(ListenerError::AlreadySubscribed { active: *active });
        }
        let handle = ListenerHandle(self.next_handle);
        self.next_handle += 1;
        self.listener = Some((handle, Box::new(listener)));

        #[cfg(feature = "tracing")]
        tracing::debug!(message = "sheet.listener", action = "subscribe", id = handle.0);

        Ok(handle)
    }

    /// Remove the listener registered under `handle`.
    pub fn unsubscribe(&mut self, handle: ListenerHandle) -> Result<(), ListenerError> {
        match &self.listener {
            Some((active, _)) if *active == handle => {
                self.listener = None;

                #[cfg(feature = "tracing")]
                tracing::debug!(message = "sheet.listener", action = "unsubscribe", id = handle.0);

                Ok(())
            }
            _ => Err(ListenerError::UnknownHandle { handle }),
        }
    }

    /// Whether a listener is registered.
    #[inline]
    #[must_use]
    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    fn write(&mut self, value: f64) -> bool {
        if value == self.offset {
            return false;
        }
        self.offset = value;
        if let Some((_, listener)) = &mut self.listener {
            listener(value);
        }
        true
    }
}
