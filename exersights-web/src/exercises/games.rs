//! Two-player game variants
//!
//! Each player gets their own engine. The side is chosen from ankle or
//! wrist depth and held for the whole down-up cycle, so a player turning
//! mid-rep keeps being read from the same limb.

use crate::error::Result;
use crate::fsm::{angle, target, Condition, ExerciseDefinition, JointInfo, StateSpec};
use crate::pose::*;

/// READY → DOWN → UP → DOWN ..., a rep counts on coming back up
fn down_up_game(
    id: &str,
    title: &str,
    channel: &str,
    joints: JointInfo,
    depth: (usize, usize),
    target_angle: f32,
    threshold_angle: f32,
) -> Result<ExerciseDefinition> {
    let target_name = format!("target{channel}");
    let threshold_name = format!("threshold{channel}");

    ExerciseDefinition::builder(id, title)
        .state("READY", StateSpec::new(""))
        .state("DOWN", StateSpec::new("Down").hold_side())
        .state("UP", StateSpec::new("Up").rep())
        .transition("READY", "down", "DOWN")
        .transition("DOWN", "up", "UP")
        .transition("UP", "down", "DOWN")
        .condition(
            Condition::new("down", angle(channel).lt(target(&target_name)))
                .in_states(["READY", "UP"]),
        )
        .condition(
            Condition::new("up", angle(channel).gt(target(&threshold_name))).in_states(["DOWN"]),
        )
        .joints(joints)
        .target(&target_name, target_angle)
        .target(&threshold_name, threshold_angle)
        .angle_channel(channel)
        .visibility(VisibilityPolicy::Disabled)
        .side_selection(SideSelection::sticky().with_groups(&[depth.0], &[depth.1]))
        .build()
}

pub fn squat_game() -> Result<ExerciseDefinition> {
    let left = [LEFT_HIP, LEFT_KNEE, LEFT_ANKLE];
    let right = [RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE];
    down_up_game(
        "squatGame",
        "Squat Game",
        "KneeAngle",
        JointInfo::new(&left, &right).angle_pair("KneeAngle", left, right),
        (LEFT_ANKLE, RIGHT_ANKLE),
        90.0,
        160.0,
    )
}

pub fn push_up_game() -> Result<ExerciseDefinition> {
    let left = [LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST];
    let right = [RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST];
    down_up_game(
        "pushUpGame",
        "Push-up Game",
        "ElbowAngle",
        JointInfo::new(&left, &right).angle_pair("ElbowAngle", left, right),
        (LEFT_WRIST, RIGHT_WRIST),
        65.0,
        150.0,
    )
}
