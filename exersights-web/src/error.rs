//! Engine error type
//!
//! Errors only surface while building definitions or changing settings.
//! Per-frame problems (missing frame, hidden limbs) are reported as data.

use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::pose::Side;

/// Result alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Everything that can go wrong outside the per-frame loop
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("unknown exercise '{0}'")]
    UnknownExercise(String),

    #[error("exercise '{exercise}' declares no states")]
    NoStates { exercise: String },

    #[error("exercise '{exercise}' declares state '{state}' more than once")]
    DuplicateState { exercise: String, state: String },

    #[error("exercise '{exercise}' references undeclared state '{state}'")]
    UnknownState { exercise: String, state: String },

    #[error("exercise '{exercise}' transitions on undeclared condition '{condition}'")]
    UnknownCondition { exercise: String, condition: String },

    #[error("exercise '{exercise}' has no target named '{target}'")]
    UnknownTarget { exercise: String, target: String },

    #[error("target '{target}' must be a finite number, got {value}")]
    InvalidTargetValue { target: String, value: f32 },

    #[error("exercise '{exercise}' cannot resolve joint '{joint}' on the {side} side")]
    UnresolvedJoint {
        exercise: String,
        joint: String,
        side: Side,
    },

    #[error("landmark index {index} is outside the 33-point pose topology")]
    LandmarkOutOfRange { index: usize },

    #[error("pose frame must hold 99 or 132 values, got {actual}")]
    InvalidFrame { actual: usize },

    #[error("invalid engine setting: {0}")]
    InvalidConfig(String),
}

impl From<EngineError> for JsValue {
    fn from(err: EngineError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::UnknownExercise("burpee".to_string());
        assert_eq!(err.to_string(), "unknown exercise 'burpee'");

        let err = EngineError::UnresolvedJoint {
            exercise: "pushUp".to_string(),
            joint: "kneeAngle".to_string(),
            side: Side::Right,
        };
        assert_eq!(
            err.to_string(),
            "exercise 'pushUp' cannot resolve joint 'kneeAngle' on the right side"
        );

        let err = EngineError::InvalidFrame { actual: 12 };
        assert_eq!(err.to_string(), "pose frame must hold 99 or 132 values, got 12");
    }
}
