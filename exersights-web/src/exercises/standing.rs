//! Standing exercises: squat, chest-up cue, lunge, toe touch, tree pose,
//! standing oblique crunch

use crate::error::Result;
use crate::fsm::{
    angle, target, Condition, DisplayColor, ExerciseDefinition, JointInfo, Predicate, StateSpec,
};
use crate::pose::*;

const LEFT_LEG: [usize; 3] = [LEFT_HIP, LEFT_KNEE, LEFT_ANKLE];
const RIGHT_LEG: [usize; 3] = [RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE];
const LEFT_TORSO: [usize; 3] = [LEFT_SHOULDER, LEFT_HIP, LEFT_KNEE];
const RIGHT_TORSO: [usize; 3] = [RIGHT_SHOULDER, RIGHT_HIP, RIGHT_KNEE];

/// Shoulder, hip, knee and ankle groups with hip and knee angles
fn full_leg_joints() -> JointInfo {
    JointInfo::new(
        &[LEFT_SHOULDER, LEFT_HIP, LEFT_KNEE, LEFT_ANKLE],
        &[RIGHT_SHOULDER, RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE],
    )
    .angle_pair("HipAngle", LEFT_TORSO, RIGHT_TORSO)
    .angle_pair("KneeAngle", LEFT_LEG, RIGHT_LEG)
}

/// Either knee passes; squats and lunges are judged on the deeper leg
fn knee_cycle(id: &str, title: &str, descending: &str, bottom: &str) -> Result<ExerciseDefinition> {
    let either_knee_below = |name: &str| {
        angle("leftKneeAngle")
            .lt(target(name))
            .or(angle("rightKneeAngle").lt(target(name)))
    };

    ExerciseDefinition::builder(id, title)
        .state("STANDING", StateSpec::new("Please Begin Rep!").color(DisplayColor::Yellow))
        .state("DESCENDING", StateSpec::new(descending).audio().color(DisplayColor::Yellow))
        .state(bottom, StateSpec::new("Excellent!").audio().color(DisplayColor::Green))
        .state("FINISHED", StateSpec::new("Excellent!").rep().color(DisplayColor::Green))
        .transition("STANDING", "descending", "DESCENDING")
        .transition("DESCENDING", "hitTarget", bottom)
        .transition("DESCENDING", "finishing", "STANDING")
        .transition(bottom, "finishing", "FINISHED")
        .transition("FINISHED", "descending", "DESCENDING")
        .condition(Condition::new("hitTarget", either_knee_below("targetKneeAngle")))
        .condition(Condition::new("descending", either_knee_below("thresholdKneeAngle")))
        .condition(Condition::new(
            "finishing",
            angle("leftKneeAngle")
                .gt(target("thresholdKneeAngle"))
                .or(angle("rightKneeAngle").gt(target("thresholdKneeAngle"))),
        ))
        .joints(JointInfo::new(&LEFT_LEG, &RIGHT_LEG).angle_pair("KneeAngle", LEFT_LEG, RIGHT_LEG))
        .target("thresholdKneeAngle", 160.0)
        .target("targetKneeAngle", 90.0)
        .angle_channel("KneeAngle")
        .build()
}

pub fn squat() -> Result<ExerciseDefinition> {
    knee_cycle("squat", "Squat", "Go Down Lower!", "SQUATTING")
}

pub fn lunge() -> Result<ExerciseDefinition> {
    knee_cycle("lunge", "Lunge", "Bend Knees Lower!", "LUNGED")
}

/// Posture cue shown next to the squat counter
pub fn chest_up() -> Result<ExerciseDefinition> {
    ExerciseDefinition::builder("chestUp", "Chest Up")
        .state("UPRIGHT", StateSpec::new(""))
        .state("LEANING_FORWARD", StateSpec::new("Chest up!"))
        .transition("UPRIGHT", "leaningTooFar", "LEANING_FORWARD")
        .transition("LEANING_FORWARD", "upright", "UPRIGHT")
        .condition(Condition::new(
            "leaningTooFar",
            angle("leftHipAngle")
                .lt(target("targetHipAngle"))
                .or(angle("rightHipAngle").lt(target("targetHipAngle"))),
        ))
        .condition(Condition::new("upright", Predicate::Always))
        .joints(
            JointInfo::new(&LEFT_TORSO, &RIGHT_TORSO)
                .angle_pair("HipAngle", LEFT_TORSO, RIGHT_TORSO),
        )
        .target("targetHipAngle", 45.0)
        .visibility(VisibilityPolicy::Disabled)
        .build()
}

pub fn toe_touch() -> Result<ExerciseDefinition> {
    ExerciseDefinition::builder("toeTouch", "Standing Toe Touch")
        .state("INIT", StateSpec::new("Stand Tall and Get Ready!").color(DisplayColor::Yellow))
        .state("FOLDING", StateSpec::new("Reach for Toes!").audio().color(DisplayColor::Yellow))
        .state(
            "TOUCHING",
            StateSpec::new("Excellent! Hold the Stretch!").audio().rep().color(DisplayColor::Green),
        )
        .state(
            "RETURNING",
            StateSpec::new("Stand Back Up Slowly!").audio().color(DisplayColor::Yellow),
        )
        .state(
            "BREAKING",
            StateSpec::new("Keep Your Knees Straight!").audio().color(DisplayColor::Red),
        )
        .transition("INIT", "folding", "FOLDING")
        .transition("FOLDING", "hitTarget", "TOUCHING")
        .transition("FOLDING", "breaking", "BREAKING")
        .transition("TOUCHING", "returning", "RETURNING")
        .transition("TOUCHING", "breaking", "BREAKING")
        .transition("RETURNING", "lockedOut", "INIT")
        .transition("BREAKING", "unbend", "FOLDING")
        .condition(
            Condition::new("breaking", angle("KneeAngle").lt(target("thresholdKneeAngle")))
                .in_states(["FOLDING", "TOUCHING"]),
        )
        .condition(
            Condition::new("unbend", angle("KneeAngle").ge(target("thresholdKneeAngle")))
                .in_states(["BREAKING"]),
        )
        .condition(
            Condition::new("lockedOut", angle("HipAngle").ge(target("thresholdHipAngle")))
                .in_states(["RETURNING"]),
        )
        .condition(
            Condition::new("hitTarget", angle("HipAngle").le(target("targetHipAngle")))
                .in_states(["FOLDING"]),
        )
        .condition(
            Condition::new("folding", angle("HipAngle").lt(target("thresholdHipAngle")))
                .in_states(["INIT"]),
        )
        .condition(
            Condition::new("returning", angle("HipAngle").gt(target("targetHipAngle")))
                .in_states(["TOUCHING"]),
        )
        .joints(full_leg_joints())
        .target("targetHipAngle", 75.0)
        .target("thresholdHipAngle", 160.0)
        .target("thresholdKneeAngle", 160.0)
        .angle_channel("HipAngle")
        .build()
}

pub fn tree_pose() -> Result<ExerciseDefinition> {
    let posing = angle("HipAngle")
        .lt(target("targetHipAngle"))
        .and(angle("KneeAngle").lt(target("targetKneeAngle")));
    let breaking = angle("HipAngle")
        .lt(target("thresholdHipAngle"))
        .and(angle("HipAngle").ge(target("targetHipAngle")))
        .and(angle("KneeAngle").ge(target("targetKneeAngle")));

    ExerciseDefinition::builder("treePose", "Tree Pose (Vrksasana)")
        .state(
            "INIT",
            StateSpec::new("Bring the sole of your foot into your inner thigh as high as possible!")
                .audio()
                .color(DisplayColor::Yellow),
        )
        .state(
            "POSING",
            StateSpec::new("You got it! Keep it up!").audio().color(DisplayColor::Green),
        )
        .state(
            "BREAKING",
            StateSpec::new("Balance! Try to keep your pose up!")
                .audio()
                .color(DisplayColor::Yellow),
        )
        .transition("INIT", "breaking", "BREAKING")
        .transition("POSING", "breaking", "BREAKING")
        .transition("BREAKING", "posing", "POSING")
        .transition("BREAKING", "init", "INIT")
        .condition(Condition::new("posing", posing).in_states(["BREAKING"]))
        .condition(Condition::new("breaking", breaking).in_states(["POSING", "INIT"]))
        .condition(
            Condition::new("init", angle("HipAngle").ge(target("thresholdHipAngle")))
                .in_states(["BREAKING"]),
        )
        .joints(full_leg_joints())
        .target("targetHipAngle", 150.0)
        .target("targetKneeAngle", 65.0)
        .target("thresholdHipAngle", 160.0)
        .angle_channel("HipAngle")
        .angle_channel("KneeAngle")
        .visibility(VisibilityPolicy::Extremal(ExtremalLandmarks {
            top: Some(MOUTH_LEFT),
            bottom: Some(LEFT_ANKLE),
            ..Default::default()
        }))
        .build()
}

pub fn standing_oblique_crunch() -> Result<ExerciseDefinition> {
    ExerciseDefinition::builder("standingObliqueCrunch", "Standing Oblique Crunch")
        .state("INIT", StateSpec::new("Stand tall and get ready!").color(DisplayColor::Yellow))
        .state(
            "CRUNCHING",
            StateSpec::new("Crunch your oblique!").audio().color(DisplayColor::Yellow),
        )
        .state(
            "CRUNCHED",
            StateSpec::new("Excellent work!").audio().rep().color(DisplayColor::Green),
        )
        .state(
            "RETURNING",
            StateSpec::new("Lower your knee and stand up straight!")
                .audio()
                .color(DisplayColor::Yellow),
        )
        .state(
            "BREAKING",
            StateSpec::new("Keep your hands and elbows up and bent!")
                .audio()
                .color(DisplayColor::Red),
        )
        .transition("INIT", "crunching", "CRUNCHING")
        .transition("CRUNCHING", "hitTarget", "CRUNCHED")
        .transition("CRUNCHING", "breaking", "BREAKING")
        .transition("CRUNCHED", "returning", "RETURNING")
        .transition("CRUNCHED", "breaking", "BREAKING")
        .transition("RETURNING", "lockedOut", "INIT")
        .transition("BREAKING", "bend", "CRUNCHING")
        .condition(
            Condition::new("crunching", angle("HipAngle").lt(target("thresholdHipAngle")))
                .in_states(["INIT"]),
        )
        .condition(
            Condition::new("hitTarget", angle("HipAngle").le(target("targetHipAngle")))
                .in_states(["CRUNCHING"]),
        )
        .condition(
            Condition::new("returning", angle("HipAngle").gt(target("targetHipAngle")))
                .in_states(["CRUNCHED"]),
        )
        .condition(
            Condition::new("lockedOut", angle("HipAngle").ge(target("thresholdHipAngle")))
                .in_states(["RETURNING"]),
        )
        .condition(
            Condition::new("breaking", angle("ElbowAngle").gt(target("thresholdElbowAngle")))
                .in_states(["CRUNCHING", "CRUNCHED"]),
        )
        .condition(
            Condition::new("bend", angle("ElbowAngle").le(target("thresholdElbowAngle")))
                .in_states(["BREAKING"]),
        )
        .joints(
            JointInfo::new(
                &[LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST, LEFT_HIP, LEFT_KNEE, LEFT_ANKLE],
                &[RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST, RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE],
            )
            .angle_pair(
                "ElbowAngle",
                [LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST],
                [RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST],
            )
            .angle_pair("HipAngle", LEFT_TORSO, RIGHT_TORSO)
            .angle_pair("KneeAngle", LEFT_LEG, RIGHT_LEG),
        )
        .target("targetHipAngle", 100.0)
        .target("thresholdHipAngle", 150.0)
        .target("thresholdElbowAngle", 90.0)
        .angle_channel("HipAngle")
        .build()
}
