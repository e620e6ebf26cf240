//! Exercise catalog
//!
//! Ids match the front-end routes. Every definition is rebuilt on load, so
//! each session owns its own copy of the targets.

mod games;
mod mat;
mod standing;
mod upper_body;

use crate::error::{EngineError, Result};
use crate::fsm::ExerciseDefinition;

/// Every exercise id, in menu order
pub const IDS: [&str; 19] = [
    "squat",
    "chestUp",
    "lunge",
    "bridge",
    "pushUp",
    "pullUp",
    "muscleUp",
    "shoulderPress",
    "lateralExternalRotation",
    "plank",
    "plankArms",
    "deadBug",
    "legRaise",
    "toeTouch",
    "treePose",
    "standingObliqueCrunch",
    "pilatesHundred",
    "squatGame",
    "pushUpGame",
];

/// Build the definition registered under `id`
pub fn load(id: &str) -> Result<ExerciseDefinition> {
    match id {
        "squat" => standing::squat(),
        "chestUp" => standing::chest_up(),
        "lunge" => standing::lunge(),
        "bridge" => mat::bridge(),
        "pushUp" => upper_body::push_up(),
        "pullUp" => upper_body::pull_up(),
        "muscleUp" => upper_body::muscle_up(),
        "shoulderPress" => upper_body::shoulder_press(),
        "lateralExternalRotation" => upper_body::lateral_external_rotation(),
        "plank" => mat::plank(),
        "plankArms" => mat::plank_arms(),
        "deadBug" => mat::dead_bug(),
        "legRaise" => mat::leg_raise(),
        "toeTouch" => standing::toe_touch(),
        "treePose" => standing::tree_pose(),
        "standingObliqueCrunch" => standing::standing_oblique_crunch(),
        "pilatesHundred" => mat::pilates_hundred(),
        "squatGame" => games::squat_game(),
        "pushUpGame" => games::push_up_game(),
        other => Err(EngineError::UnknownExercise(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{SideSelectionMode, VisibilityPolicy};

    #[test]
    fn test_every_definition_builds() {
        for id in IDS {
            let def = load(id).unwrap_or_else(|e| panic!("{id}: {e}"));
            assert_eq!(def.id(), id);
            assert!(!def.states().is_empty());
        }
    }

    #[test]
    fn test_unknown_exercise() {
        let err = load("burpee").unwrap_err();
        assert_eq!(err, EngineError::UnknownExercise("burpee".into()));
    }

    #[test]
    fn test_push_up_defaults() {
        let def = load("pushUp").unwrap();
        assert_eq!(def.targets().get("targetElbowAngle"), Some(65.0));
        assert_eq!(def.targets().get("thresholdElbowAngle"), Some(150.0));
        assert_eq!(def.state(def.initial_state()).feedback, "Please Begin Rep!");
        assert_eq!(def.angle_channels(), ["ElbowAngle".to_string()]);
    }

    #[test]
    fn test_games_are_sticky() {
        for id in ["squatGame", "pushUpGame"] {
            let def = load(id).unwrap();
            assert_eq!(def.side_selection().mode, SideSelectionMode::Sticky);
            assert_eq!(*def.visibility(), VisibilityPolicy::Disabled);
            assert!(def.states().iter().any(|s| s.holds_side));
        }
    }

    #[test]
    fn test_loads_are_independent() {
        let mut first = load("squat").unwrap();
        first.set_target("targetKneeAngle", 70.0).unwrap();
        let second = load("squat").unwrap();
        assert_eq!(second.targets().get("targetKneeAngle"), Some(90.0));
    }
}
