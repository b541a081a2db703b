//! Stage and timing configuration
//!
//! # Example
//!
//! ```rust
//! use danmaku_core::StageConfig;
//!
//! let config = StageConfig::default()
//!     .with_stage(1920, 1080)
//!     .with_bottom_reserve(120)
//!     .with_drop_when_full(true);
//!
//! config.validate()?;
//! assert_eq!(config.usable_height(), 960);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::{comment::DEFAULT_FONT_SIZE, utils::CoreError, Result};

/// Parameters for one conversion run
///
/// The scheduler reads the stage geometry, the two durations and the
/// saturation policy. Font face and opacity only affect the rendered
/// style header.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct StageConfig {
    /// Stage width in pixels
    pub width: u32,
    /// Stage height in pixels
    pub height: u32,
    /// Pixels kept free at the bottom of the stage
    pub bottom_reserve: u32,
    /// Default font face
    pub font_face: String,
    /// Default font size in pixels
    pub font_size: f64,
    /// Text opacity from 0 (transparent) to 1 (opaque)
    pub alpha: f64,
    /// Seconds a scrolling comment takes to cross the stage
    pub marquee_duration: f64,
    /// Seconds a stationary comment stays visible
    pub still_duration: f64,
    /// Drop comments that find no free row instead of force-placing them
    pub drop_when_full: bool,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            width: 683,
            height: 384,
            bottom_reserve: 0,
            font_face: "sans-serif".to_string(),
            font_size: DEFAULT_FONT_SIZE,
            alpha: 1.0,
            marquee_duration: 5.0,
            still_duration: 5.0,
            drop_when_full: false,
        }
    }
}

impl StageConfig {
    /// Set stage size in pixels.
    #[must_use]
    pub fn with_stage(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the blank band kept at the bottom of the stage.
    #[must_use]
    pub fn with_bottom_reserve(mut self, reserve: u32) -> Self {
        self.bottom_reserve = reserve;
        self
    }

    /// Set default font face.
    #[must_use]
    pub fn with_font_face(mut self, face: impl Into<String>) -> Self {
        self.font_face = face.into();
        self
    }

    /// Set default font size.
    #[must_use]
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    /// Set text opacity.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set scrolling and stationary display durations.
    #[must_use]
    pub fn with_durations(mut self, marquee: f64, still: f64) -> Self {
        self.marquee_duration = marquee;
        self.still_duration = still;
        self
    }

    /// Choose between dropping and force-placing when the stage is full.
    #[must_use]
    pub fn with_drop_when_full(mut self, drop: bool) -> Self {
        self.drop_when_full = drop;
        self
    }

    /// Rows available to the scheduler.
    #[must_use]
    pub const fn usable_height(&self) -> u32 {
        self.height.saturating_sub(self.bottom_reserve)
    }

    /// Check the configuration before a run.
    ///
    /// A zero-sized stage is accepted; the scheduler degrades on it instead
    /// of failing.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] for a non-positive font size, an
    /// opacity outside `0..=1`, negative or non-finite durations, or a
    /// bottom reserve taller than the stage.
    pub fn validate(&self) -> Result<()> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(CoreError::config(format!(
                "font size must be positive, got {}",
                self.font_size
            )));
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(CoreError::config(format!(
                "text opacity must be within 0..=1, got {}",
                self.alpha
            )));
        }
        for (name, value) in [
            ("marquee duration", self.marquee_duration),
            ("still duration", self.still_duration),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::config(format!(
                    "{name} must be a non-negative number of seconds, got {value}"
                )));
            }
        }
        if self.bottom_reserve > self.height {
            return Err(CoreError::config(format!(
                "bottom reserve {} exceeds stage height {}",
                self.bottom_reserve, self.height
            )));
        }
        Ok(())
    }
}
