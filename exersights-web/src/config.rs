//! Engine configuration
//!
//! Settings shared by every exercise. Per-exercise thresholds live in the
//! definition's targets instead.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::pose::VISIBILITY_THRESHOLD;

/// Default feedback when required limbs fall below the visibility threshold
pub const LIMBS_NOT_VISIBLE_MESSAGE: &str = "Make sure limbs are visible";
/// Default feedback when no landmarks were delivered
pub const NOT_IN_FRAME_MESSAGE: &str = "Make sure you are in frame";

/// Runtime settings for a [`RepEngine`](crate::fsm::RepEngine)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Minimum landmark visibility (exclusive), 0.0 to 1.0
    pub visibility_threshold: f32,
    /// Value reported for angle channels that cannot be measured
    pub neutral_angle: f32,
    pub limbs_not_visible_message: String,
    pub not_in_frame_message: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: VISIBILITY_THRESHOLD,
            neutral_angle: 0.0,
            limbs_not_visible_message: LIMBS_NOT_VISIBLE_MESSAGE.to_string(),
            not_in_frame_message: NOT_IN_FRAME_MESSAGE.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_visibility_threshold(mut self, threshold: f32) -> Self {
        self.visibility_threshold = threshold;
        self
    }

    pub fn with_neutral_angle(mut self, angle: f32) -> Self {
        self.neutral_angle = angle;
        self
    }

    pub fn with_limbs_not_visible_message(mut self, message: impl Into<String>) -> Self {
        self.limbs_not_visible_message = message.into();
        self
    }

    pub fn with_not_in_frame_message(mut self, message: impl Into<String>) -> Self {
        self.not_in_frame_message = message.into();
        self
    }

    /// Reject settings the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.visibility_threshold) {
            return Err(EngineError::InvalidConfig(format!(
                "visibilityThreshold must be within 0..=1, got {}",
                self.visibility_threshold
            )));
        }
        if !self.neutral_angle.is_finite() {
            return Err(EngineError::InvalidConfig(format!(
                "neutralAngle must be finite, got {}",
                self.neutral_angle
            )));
        }
        Ok(())
    }
}
