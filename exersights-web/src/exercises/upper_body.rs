//! Arm and shoulder exercises: push-up, pull-up, muscle-up, shoulder press,
//! lateral external rotation

use crate::error::Result;
use crate::fsm::{
    angle, constant, target, y, Condition, DisplayColor, ExerciseDefinition, JointInfo, StateSpec,
};
use crate::pose::*;

const LEFT_ARM: [usize; 3] = [LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST];
const RIGHT_ARM: [usize; 3] = [RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST];

fn arm_joints() -> JointInfo {
    JointInfo::new(&LEFT_ARM, &RIGHT_ARM).angle_pair("ElbowAngle", LEFT_ARM, RIGHT_ARM)
}

/// Arms plus mouth corners, for exercises judged against a bar
fn bar_joints() -> JointInfo {
    JointInfo::new(
        &[LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST, MOUTH_LEFT],
        &[RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST, MOUTH_RIGHT],
    )
    .angle_pair("ElbowAngle", LEFT_ARM, RIGHT_ARM)
    .position_pair("WristPos", LEFT_WRIST, RIGHT_WRIST)
    .position_pair("MouthPos", MOUTH_LEFT, MOUTH_RIGHT)
}

pub fn push_up() -> Result<ExerciseDefinition> {
    ExerciseDefinition::builder("pushUp", "Push-up")
        .state("INIT", StateSpec::new("Please Begin Rep!").color(DisplayColor::Yellow))
        .state("DESCENDING", StateSpec::new("Go Down Lower!").audio().color(DisplayColor::Yellow))
        .state("HOLD", StateSpec::new("Excellent!").audio().color(DisplayColor::Green))
        .state("FINISHED", StateSpec::new("Excellent!").rep().color(DisplayColor::Green))
        .transition("INIT", "descending", "DESCENDING")
        .transition("DESCENDING", "hitTarget", "HOLD")
        .transition("DESCENDING", "finishing", "INIT")
        .transition("HOLD", "finishing", "FINISHED")
        .transition("FINISHED", "descending", "DESCENDING")
        .condition(Condition::new("hitTarget", angle("ElbowAngle").lt(target("targetElbowAngle"))))
        .condition(Condition::new(
            "descending",
            angle("ElbowAngle").lt(target("thresholdElbowAngle")),
        ))
        .condition(Condition::new(
            "finishing",
            angle("ElbowAngle").gt(target("thresholdElbowAngle")),
        ))
        .joints(arm_joints())
        .target("thresholdElbowAngle", 150.0)
        .target("targetElbowAngle", 65.0)
        .angle_channel("ElbowAngle")
        .build()
}

pub fn pull_up() -> Result<ExerciseDefinition> {
    let legs = JointInfo::default()
        .angle_pair(
            "KneeAngle",
            [LEFT_HIP, LEFT_KNEE, LEFT_ANKLE],
            [RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE],
        )
        .angles;
    let mut joints = bar_joints();
    joints.angles.extend(legs);

    ExerciseDefinition::builder("pullUp", "Pull-up")
        .state("INIT", StateSpec::new("Get in Pull Up Position!").color(DisplayColor::Yellow))
        .state(
            "ASCENDING",
            StateSpec::new("Pull Chin Above Bar!").audio().color(DisplayColor::Yellow),
        )
        .state("UP", StateSpec::new("Excellent!").audio().rep().color(DisplayColor::Green))
        .state(
            "DESCENDING",
            StateSpec::new("Fully lock out arms!").audio().color(DisplayColor::Yellow),
        )
        .state("KIP", StateSpec::new("Don't use legs!").audio().color(DisplayColor::Yellow))
        .transition("INIT", "chinBelow", "ASCENDING")
        .transition("ASCENDING", "chinAbove", "UP")
        .transition("ASCENDING", "kneeBend", "KIP")
        .transition("UP", "chinBelow", "DESCENDING")
        .transition("DESCENDING", "lockedOut", "ASCENDING")
        .transition("KIP", "kneeBend", "KIP")
        .transition("KIP", "lockedOut", "INIT")
        .condition(
            Condition::new("kneeBend", angle("KneeAngle").lt(target("thresholdKneeAngle")))
                .in_states(["KIP", "ASCENDING"]),
        )
        .condition(
            Condition::new("lockedOut", angle("ElbowAngle").gt(target("thresholdElbowAngle")))
                .in_states(["KIP", "DESCENDING"]),
        )
        .condition(
            Condition::new("chinAbove", y("MouthPos").lt(y("WristPos"))).in_states(["ASCENDING"]),
        )
        .condition(Condition::new("chinBelow", y("MouthPos").ge(y("WristPos"))))
        .joints(joints)
        .target("thresholdElbowAngle", 150.0)
        .target("thresholdKneeAngle", 120.0)
        .angle_channel("ElbowAngle")
        .build()
}

pub fn muscle_up() -> Result<ExerciseDefinition> {
    ExerciseDefinition::builder("muscleUp", "Muscle-up")
        .state("INIT", StateSpec::new("Get in position!"))
        .state("PULLUP", StateSpec::new("Pull chin above bar!").audio())
        .state("TRANSITION", StateSpec::new("Transition to dip position!").audio())
        .state("DIP", StateSpec::new("Push up!").audio())
        .state("FINISH", StateSpec::new("Excellent!").audio().rep())
        .transition("INIT", "chinBelowBar", "PULLUP")
        .transition("PULLUP", "chinAboveBar", "TRANSITION")
        .transition("TRANSITION", "elbowAboveBar", "DIP")
        .transition("TRANSITION", "chinBelowBar", "PULLUP")
        .transition("DIP", "lockedOut", "FINISH")
        .transition("DIP", "chinBelowBar", "PULLUP")
        .transition("FINISH", "chinBelowBar", "PULLUP")
        .condition(
            Condition::new("lockedOut", angle("ElbowAngle").gt(target("thresholdElbowAngle")))
                .in_states(["DIP"]),
        )
        .condition(
            Condition::new("chinAboveBar", y("MouthPos").lt(y("WristPos"))).in_states(["PULLUP"]),
        )
        .condition(
            Condition::new("elbowAboveBar", y("ElbowPos").lt(y("WristPos")))
                .in_states(["TRANSITION"]),
        )
        .condition(
            Condition::new("chinBelowBar", y("MouthPos").ge(y("WristPos")))
                .in_states(["INIT", "TRANSITION", "DIP", "FINISH"]),
        )
        .joints(bar_joints().position_pair("ElbowPos", LEFT_ELBOW, RIGHT_ELBOW))
        .target("thresholdElbowAngle", 170.0)
        .angle_channel("ElbowAngle")
        .build()
}

/// The elbow-flare cue is declared but attached to no state, so it never
/// fires; the cycle runs on shoulder and elbow angles only.
pub fn shoulder_press() -> Result<ExerciseDefinition> {
    let no_states: [&str; 0] = [];

    ExerciseDefinition::builder("shoulderPress", "Shoulder Press")
        .state(
            "INIT",
            StateSpec::new("Start with elbows tucked at 45°!").color(DisplayColor::Yellow),
        )
        .state("PRESSING", StateSpec::new("Press Overhead!").audio().color(DisplayColor::Yellow))
        .state("LOCKED_OUT", StateSpec::new("Excellent!").audio().rep().color(DisplayColor::Green))
        .state(
            "LOWERING",
            StateSpec::new("Lower down to initial position!").color(DisplayColor::Yellow),
        )
        .state(
            "FLARED",
            StateSpec::new("Don't flare elbows too wide!").audio().color(DisplayColor::Red),
        )
        .state(
            "OVERLOCKED",
            StateSpec::new("Don't lock out elbows!").audio().color(DisplayColor::Red),
        )
        .transition("INIT", "pressing", "PRESSING")
        .transition("INIT", "flared", "FLARED")
        .transition("PRESSING", "lockedOut", "LOCKED_OUT")
        .transition("PRESSING", "overLocked", "OVERLOCKED")
        .transition("PRESSING", "flared", "FLARED")
        .transition("LOCKED_OUT", "lowering", "LOWERING")
        .transition("LOCKED_OUT", "overLocked", "OVERLOCKED")
        .transition("LOWERING", "resetStart", "INIT")
        .transition("FLARED", "unflared", "INIT")
        .transition("OVERLOCKED", "lowering", "LOWERING")
        .condition(
            Condition::new("pressing", angle("ShoulderAngle").gt(target("startShoulderAngle")))
                .in_states(["INIT"]),
        )
        .condition(
            Condition::new("lockedOut", angle("ShoulderAngle").ge(target("targetShoulderAngle")))
                .in_states(["PRESSING"]),
        )
        .condition(
            Condition::new("overLocked", angle("ElbowAngle").ge(target("maxElbowAngle")))
                .in_states(["PRESSING", "LOCKED_OUT"]),
        )
        .condition(
            Condition::new(
                "lowering",
                angle("ShoulderAngle").lt(target("targetShoulderAngle").minus(constant(10.0))),
            )
            .in_states(["LOCKED_OUT", "OVERLOCKED"]),
        )
        .condition(
            Condition::new("resetStart", angle("ShoulderAngle").le(target("startShoulderAngle")))
                .in_states(["LOWERING"]),
        )
        .condition(
            Condition::new(
                "flared",
                angle("ShoulderAngle")
                    .gt(target("flareShoulderAngle"))
                    .and(angle("ElbowAngle").lt(constant(95.0))),
            )
            .in_states(no_states),
        )
        .condition(
            Condition::new(
                "unflared",
                angle("ShoulderAngle")
                    .le(target("flareShoulderAngle"))
                    .or(angle("ElbowAngle").ge(constant(95.0))),
            )
            .in_states(no_states),
        )
        .joints(
            arm_joints().angle_pair(
                "ShoulderAngle",
                [LEFT_ELBOW, LEFT_SHOULDER, LEFT_HIP],
                [RIGHT_ELBOW, RIGHT_SHOULDER, RIGHT_HIP],
            ),
        )
        .target("startShoulderAngle", 60.0)
        .target("targetShoulderAngle", 160.0)
        .target("flareShoulderAngle", 80.0)
        .target("maxElbowAngle", 175.0)
        .angle_channel("ShoulderAngle")
        .angle_channel("ElbowAngle")
        .build()
}

pub fn lateral_external_rotation() -> Result<ExerciseDefinition> {
    ExerciseDefinition::builder("lateralExternalRotation", "Lateral External Rotation")
        .state("INIT", StateSpec::new("Get ready!").color(DisplayColor::Yellow))
        .state(
            "NOT_PERPENDICULAR",
            StateSpec::new("Rotate arm upwards!").audio().color(DisplayColor::Yellow),
        )
        .state(
            "PERPENDICULAR",
            StateSpec::new("Excellent!").audio().rep().color(DisplayColor::Green),
        )
        .transition("INIT", "notPerpendicular", "NOT_PERPENDICULAR")
        .transition("NOT_PERPENDICULAR", "perpendicular", "PERPENDICULAR")
        .transition("PERPENDICULAR", "notPerpendicular", "NOT_PERPENDICULAR")
        .condition(
            Condition::new("perpendicular", angle("SideAngle").ge(target("targetSideAngle")))
                .in_states(["NOT_PERPENDICULAR"]),
        )
        .condition(
            Condition::new("notPerpendicular", angle("SideAngle").le(target("resetSideAngle")))
                .in_states(["PERPENDICULAR", "INIT"]),
        )
        .joints(
            JointInfo::new(
                &[LEFT_EAR, LEFT_ELBOW, LEFT_WRIST, LEFT_HIP],
                &[RIGHT_EAR, RIGHT_ELBOW, RIGHT_WRIST, RIGHT_HIP],
            )
            .angle_pair(
                "SideAngle",
                [LEFT_WRIST, LEFT_ELBOW, LEFT_HIP],
                [RIGHT_WRIST, RIGHT_ELBOW, RIGHT_HIP],
            )
            .position_pair("EarPos", LEFT_EAR, RIGHT_EAR)
            .position_pair("ElbowPos", LEFT_ELBOW, RIGHT_ELBOW)
            .position_pair("WristPos", LEFT_WRIST, RIGHT_WRIST),
        )
        .target("targetSideAngle", 140.0)
        .target("resetSideAngle", 100.0)
        .angle_channel("SideAngle")
        .build()
}
