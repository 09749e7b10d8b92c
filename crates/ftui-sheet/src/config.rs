#![forbid(unsafe_code)]

//! Sheet configuration surface.
//!
//! [`SheetConfig`] gathers every recognized option. It can be built in code
//! or, with the `sheet-config` feature, loaded from TOML or JSON:
//!
//! ```toml
//! screen_height = 900.0
//! delta_true = 80.0
//! available_statuses = "CLOSED | OPENED"
//! fling_policy = "strict"
//! status = "closed"
//!
//! [spring]
//! stiffness = 180.0
//! damping = 24.0
//! ```
//!
//! # Defaults
//!
//! Defaults match the stock sheet: 100-unit insets, every status available as
//! a fling target, content interactive only when opened, zero-opacity content
//! skipped, no content fade, fallback fling policy, and an initial `Hidden`
//! status.

#[cfg(feature = "sheet-config")]
use std::path::Path;

#[cfg(feature = "sheet-config")]
use serde::{Deserialize, Serialize};

use crate::boundary::{Boundaries, DEFAULT_DELTA_FALSE, DEFAULT_DELTA_TRUE, Geometry};
use crate::decision::FlingPolicy;
use crate::error::ConfigError;
use crate::spring::SpringSpec;
use crate::status::{Status, StatusSet};
use crate::visibility::VisibilityFlags;

/// Screen height assumed when the host does not provide one.
pub const DEFAULT_SCREEN_HEIGHT: f64 = 900.0;

/// Every tunable of a bottom sheet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "sheet-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "sheet-config", serde(default))]
pub struct SheetConfig {
    /// Host screen height; only used to derive `height` when absent.
    pub screen_height: f64,
    /// Panel height. Defaults to `screen_height - 100`.
    pub height: Option<f64>,
    /// Opened inset from the top.
    pub delta_true: f64,
    /// Closed inset from the bottom.
    pub delta_false: f64,
    /// Explicit boundaries; bypasses the geometric derivation.
    pub boundaries: Option<Boundaries>,
    /// Statuses a fling may land on.
    pub available_statuses: StatusSet,
    /// Statuses during which content accepts input.
    pub interactable_when: StatusSet,
    /// Skip rendering content near zero opacity.
    pub hide_on_zero_opacity: bool,
    /// Fade content with the offset.
    pub content_animated_opacity: bool,
    /// Landing rule for a downward fling from `Opened`.
    pub fling_policy: FlingPolicy,
    /// Settle spring parameters.
    pub spring: SpringSpec,
    /// Initial status when the host controls the tri-state surface.
    pub status: Option<Status>,
    /// Initial visibility when the host controls the boolean surface.
    pub visible: Option<bool>,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            screen_height: DEFAULT_SCREEN_HEIGHT,
            height: None,
            delta_true: DEFAULT_DELTA_TRUE,
            delta_false: DEFAULT_DELTA_FALSE,
            boundaries: None,
            available_statuses: StatusSet::all(),
            interactable_when: StatusSet::OPENED,
            hide_on_zero_opacity: true,
            content_animated_opacity: false,
            fling_policy: FlingPolicy::default(),
            spring: SpringSpec::default(),
            status: None,
            visible: None,
        }
    }
}

impl SheetConfig {
    /// Defaults for a host screen of `screen_height`.
    #[must_use]
    pub fn for_screen(screen_height: f64) -> Self {
        Self {
            screen_height,
            ..Self::default()
        }
    }

    /// Set the panel height.
    #[must_use]
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Set both geometric insets.
    #[must_use]
    pub fn with_deltas(mut self, delta_true: f64, delta_false: f64) -> Self {
        self.delta_true = delta_true;
        self.delta_false = delta_false;
        self
    }

    /// Use explicit boundaries.
    #[must_use]
    pub fn with_boundaries(mut self, boundaries: Boundaries) -> Self {
        self.boundaries = Some(boundaries);
        self
    }

    /// Restrict fling targets.
    #[must_use]
    pub fn with_available_statuses(mut self, available: StatusSet) -> Self {
        self.available_statuses = available;
        self
    }

    /// Set the statuses during which content accepts input.
    #[must_use]
    pub fn with_interactable_when(mut self, statuses: StatusSet) -> Self {
        self.interactable_when = statuses;
        self
    }

    /// Choose the fling landing rule.
    #[must_use]
    pub fn with_fling_policy(mut self, policy: FlingPolicy) -> Self {
        self.fling_policy = policy;
        self
    }

    /// Toggle the zero-opacity render skip.
    #[must_use]
    pub fn with_hide_on_zero_opacity(mut self, on: bool) -> Self {
        self.hide_on_zero_opacity = on;
        self
    }

    /// Toggle the content fade.
    #[must_use]
    pub fn with_content_animated_opacity(mut self, on: bool) -> Self {
        self.content_animated_opacity = on;
        self
    }

    /// Settle spring parameters.
    #[must_use]
    pub fn with_spring(mut self, spring: SpringSpec) -> Self {
        self.spring = spring;
        self
    }

    /// Host owns the tri-state surface, starting at `status`.
    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Host owns the boolean surface, starting at `visible`.
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    /// Geometric inputs with the height default applied.
    #[must_use]
    pub fn geometry(&self) -> Geometry {
        Geometry {
            height: self
                .height
                .unwrap_or_else(|| Geometry::default_height(self.screen_height)),
            delta_true: self.delta_true,
            delta_false: self.delta_false,
        }
    }

    /// Effective boundaries: the override if present, else derived.
    pub fn resolve_boundaries(&self) -> Result<Boundaries, ConfigError> {
        match self.boundaries {
            Some(b) => Ok(b),
            None => self.geometry().boundaries(),
        }
    }

    /// Status the sheet starts in.
    #[must_use]
    pub fn initial_status(&self) -> Status {
        match (self.status, self.visible) {
            (Some(status), _) => status,
            (None, Some(visible)) => Status::from_visible(visible),
            (None, None) => Status::Hidden,
        }
    }

    /// Flags for the visibility derivation.
    #[must_use]
    pub fn visibility_flags(&self) -> VisibilityFlags {
        VisibilityFlags {
            hide_on_zero_opacity: self.hide_on_zero_opacity,
            content_animated_opacity: self.content_animated_opacity,
        }
    }

    /// Check the configuration. Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.status.is_some() && self.visible.is_some() {
            return Err(ConfigError::ConflictingControl);
        }
        if !self.available_statuses.includes(Status::Opened) {
            return Err(ConfigError::OpenedUnavailable);
        }
        self.spring.validate()?;
        self.resolve_boundaries().map(|_| ())
    }

    /// Load from a TOML string.
    #[cfg(feature = "sheet-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = toml::from_str(s).map_err(ConfigLoadError::Toml)?;
        config.validate().map_err(ConfigLoadError::Invalid)?;
        Ok(config)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "sheet-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigLoadError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "sheet-config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigLoadError::Json)?;
        config.validate().map_err(ConfigLoadError::Invalid)?;
        Ok(config)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "sheet-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigLoadError::Io)?;
        Self::from_json_str(&content)
    }
}

/// Failure to load a [`SheetConfig`] from disk or text.
#[derive(Debug)]
pub enum ConfigLoadError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "sheet-config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "sheet-config")]
    Json(serde_json::Error),
    /// Parsed, but failed validation.
    Invalid(ConfigError),
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "sheet-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "sheet-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Invalid(e) => write!(f, "invalid sheet config: {e}"),
        }
    }
}

impl std::error::Error for ConfigLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "sheet-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "sheet-config")]
            Self::Json(e) => Some(e),
            Self::Invalid(e) => Some(e),
        }
    }
}

impl From<ConfigError> for ConfigLoadError {
    fn from(e: ConfigError) -> Self {
        Self::Invalid(e)
    }
}
