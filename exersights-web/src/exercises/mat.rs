//! Floor exercises: bridge, plank, plank arm alignment, dead bug, leg
//! raise, pilates hundred

use crate::error::Result;
use crate::fsm::{
    angle, target, x, Condition, DisplayColor, ExerciseDefinition, JointInfo, StateSpec,
};
use crate::pose::*;

const LEFT_TORSO: [usize; 3] = [LEFT_SHOULDER, LEFT_HIP, LEFT_KNEE];
const RIGHT_TORSO: [usize; 3] = [RIGHT_SHOULDER, RIGHT_HIP, RIGHT_KNEE];
const LEFT_LEG: [usize; 3] = [LEFT_HIP, LEFT_KNEE, LEFT_ANKLE];
const RIGHT_LEG: [usize; 3] = [RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE];

/// Shoulder, hip and knee with the hip angle
fn torso_joints() -> JointInfo {
    JointInfo::new(&LEFT_TORSO, &RIGHT_TORSO).angle_pair("HipAngle", LEFT_TORSO, RIGHT_TORSO)
}

/// Torso down to the ankle with hip and knee angles
fn lying_joints() -> JointInfo {
    JointInfo::new(
        &[LEFT_SHOULDER, LEFT_HIP, LEFT_KNEE, LEFT_ANKLE],
        &[RIGHT_SHOULDER, RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE],
    )
    .angle_pair("HipAngle", LEFT_TORSO, RIGHT_TORSO)
    .angle_pair("KneeAngle", LEFT_LEG, RIGHT_LEG)
}

pub fn bridge() -> Result<ExerciseDefinition> {
    ExerciseDefinition::builder("bridge", "Bridge")
        .state("ADJUST_FEET", StateSpec::new("Bend Knees").audio().color(DisplayColor::Yellow))
        .state("RAISING_HIPS", StateSpec::new("Raise Hips").audio().color(DisplayColor::Yellow))
        .state("FINISHED", StateSpec::new("Excellent!").rep().color(DisplayColor::Green))
        .transition("ADJUST_FEET", "hipsRaising", "RAISING_HIPS")
        .transition("RAISING_HIPS", "hitTarget", "FINISHED")
        .transition("RAISING_HIPS", "adjusting", "ADJUST_FEET")
        .transition("FINISHED", "hipsRaising", "RAISING_HIPS")
        .condition(Condition::new("adjusting", angle("KneeAngle").gt(target("targetKneeAngle"))))
        .condition(Condition::new("hipsRaising", angle("HipAngle").lt(target("targetHipAngle"))))
        .condition(Condition::new("hitTarget", angle("HipAngle").ge(target("targetHipAngle"))))
        .joints(lying_joints())
        .target("targetHipAngle", 140.0)
        .target("targetKneeAngle", 90.0)
        .angle_channel("HipAngle")
        .angle_channel("KneeAngle")
        .build()
}

pub fn plank() -> Result<ExerciseDefinition> {
    ExerciseDefinition::builder("plank", "Plank")
        .state(
            "MISALIGNED_HIP",
            StateSpec::new("Make sure hip is aligned with shoulder and knee")
                .audio()
                .color(DisplayColor::Yellow),
        )
        .state("ALIGNED_HIP", StateSpec::new("Excellent!").audio().color(DisplayColor::Green))
        .transition("MISALIGNED_HIP", "aligned", "ALIGNED_HIP")
        .transition("ALIGNED_HIP", "misaligned", "MISALIGNED_HIP")
        .condition(
            Condition::new("aligned", angle("HipAngle").gt(target("targetHipAngle")))
                .in_states(["MISALIGNED_HIP"]),
        )
        .condition(
            Condition::new("misaligned", angle("HipAngle").lt(target("targetHipAngle")))
                .in_states(["ALIGNED_HIP"]),
        )
        .joints(torso_joints())
        .target("targetHipAngle", 145.0)
        .angle_channel("HipAngle")
        .build()
}

/// Shoulders stacked over elbows, within `alignmentTolerance` horizontally
pub fn plank_arms() -> Result<ExerciseDefinition> {
    let within = x("ShoulderPos")
        .le(x("ElbowPos").plus(target("alignmentTolerance")))
        .and(x("ShoulderPos").ge(x("ElbowPos").minus(target("alignmentTolerance"))));
    let outside = x("ShoulderPos")
        .gt(x("ElbowPos").plus(target("alignmentTolerance")))
        .or(x("ShoulderPos").lt(x("ElbowPos").minus(target("alignmentTolerance"))));

    ExerciseDefinition::builder("plankArms", "Plank Arms")
        .state("MISALIGNED_ARM", StateSpec::new("Make sure shoulder(s) are above elbow(s)"))
        .state("ALIGNED_ARM", StateSpec::new("Arms Good"))
        .transition("MISALIGNED_ARM", "aligned", "ALIGNED_ARM")
        .transition("ALIGNED_ARM", "misaligned", "MISALIGNED_ARM")
        .condition(Condition::new("aligned", within).in_states(["MISALIGNED_ARM"]))
        .condition(Condition::new("misaligned", outside).in_states(["ALIGNED_ARM"]))
        .joints(
            JointInfo::new(&[LEFT_SHOULDER, LEFT_ELBOW], &[RIGHT_SHOULDER, RIGHT_ELBOW])
                .position_pair("ShoulderPos", LEFT_SHOULDER, RIGHT_SHOULDER)
                .position_pair("ElbowPos", LEFT_ELBOW, RIGHT_ELBOW),
        )
        .target("alignmentTolerance", 0.05)
        .visibility(VisibilityPolicy::Disabled)
        .build()
}

/// Opposite arm and leg extend together, so channels are per side
pub fn dead_bug() -> Result<ExerciseDefinition> {
    let bent = |arm: &str, hip: &str| {
        angle(arm)
            .lt(target("targetFlatAngle"))
            .and(angle(hip).lt(target("targetFlatAngle")))
    };
    let flat = |arm: &str, hip: &str| {
        angle(arm)
            .ge(target("targetFlatAngle"))
            .and(angle(hip).ge(target("targetFlatAngle")))
    };

    ExerciseDefinition::builder("deadBug", "Dead Bug")
        .state("INIT", StateSpec::new("Please Begin Rep!").color(DisplayColor::Yellow))
        .state(
            "EXTENDING",
            StateSpec::new("Extend alternate sides!").audio().color(DisplayColor::Yellow),
        )
        .state("HOLD", StateSpec::new("Excellent!").audio().rep().color(DisplayColor::Green))
        .transition("INIT", "extending", "EXTENDING")
        .transition("EXTENDING", "hitTarget", "HOLD")
        .transition("HOLD", "extending", "EXTENDING")
        .condition(Condition::new(
            "extending",
            bent("leftUnderarmAngle", "rightHipAngle")
                .or(bent("rightUnderarmAngle", "leftHipAngle")),
        ))
        .condition(Condition::new(
            "hitTarget",
            flat("leftUnderarmAngle", "rightHipAngle")
                .or(flat("rightUnderarmAngle", "leftHipAngle")),
        ))
        .joints(
            JointInfo::new(
                &[LEFT_SHOULDER, LEFT_ELBOW, LEFT_HIP, LEFT_KNEE],
                &[RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_HIP, RIGHT_KNEE],
            )
            .angle_pair(
                "UnderarmAngle",
                [LEFT_ELBOW, LEFT_SHOULDER, LEFT_HIP],
                [RIGHT_ELBOW, RIGHT_SHOULDER, RIGHT_HIP],
            )
            .angle_pair("HipAngle", LEFT_TORSO, RIGHT_TORSO),
        )
        .target("targetFlatAngle", 140.0)
        .angle_channel("leftUnderarmAngle")
        .angle_channel("rightUnderarmAngle")
        .angle_channel("leftHipAngle")
        .angle_channel("rightHipAngle")
        .build()
}

pub fn leg_raise() -> Result<ExerciseDefinition> {
    ExerciseDefinition::builder("legRaise", "Leg Raises")
        .state("INIT", StateSpec::new("Lay down!").audio().color(DisplayColor::Yellow))
        .state("RAISING", StateSpec::new("Raise legs higher!").audio().color(DisplayColor::Yellow))
        .state("BENT", StateSpec::new("Don't bend knees!").audio().color(DisplayColor::Red))
        .state("UP", StateSpec::new("Excellent!").audio().rep().color(DisplayColor::Green))
        .state("LOWERING", StateSpec::new("Fully lower legs!").color(DisplayColor::Yellow))
        .transition("INIT", "flat", "RAISING")
        .transition("RAISING", "raised", "UP")
        .transition("RAISING", "kneeBend", "BENT")
        .transition("BENT", "kneeBend", "BENT")
        .transition("BENT", "noKneeBend", "RAISING")
        .transition("UP", "lowering", "LOWERING")
        .transition("LOWERING", "flat", "RAISING")
        .condition(
            Condition::new("flat", angle("HipAngle").gt(target("thresholdHipAngle")))
                .in_states(["INIT", "LOWERING"]),
        )
        .condition(
            Condition::new("raised", angle("HipAngle").le(target("targetHipAngle")))
                .in_states(["RAISING"]),
        )
        .condition(
            Condition::new("lowering", angle("HipAngle").gt(target("targetHipAngle")))
                .in_states(["UP"]),
        )
        .condition(
            Condition::new("kneeBend", angle("KneeAngle").lt(target("thresholdKneeAngle")))
                .in_states(["RAISING"]),
        )
        .condition(
            Condition::new("noKneeBend", angle("KneeAngle").ge(target("thresholdKneeAngle")))
                .in_states(["BENT"]),
        )
        .joints(lying_joints())
        .target("targetHipAngle", 100.0)
        .target("thresholdHipAngle", 130.0)
        .target("thresholdKneeAngle", 160.0)
        .angle_channel("HipAngle")
        .build()
}

/// Hold legs within `targetTolerance` degrees of the target hip angle
pub fn pilates_hundred() -> Result<ExerciseDefinition> {
    let low = target("targetHipAngle").minus(target("targetTolerance"));
    let high = target("targetHipAngle").plus(target("targetTolerance"));

    ExerciseDefinition::builder("pilatesHundred", "Pilates Hundred")
        .state(
            "OUTSIDE_TARGET",
            StateSpec::new("Try to keep your legs off the ground at the target angle!")
                .audio()
                .color(DisplayColor::Yellow),
        )
        .state("AT_TARGET", StateSpec::new("Excellent!").audio().color(DisplayColor::Green))
        .transition("OUTSIDE_TARGET", "atTarget", "AT_TARGET")
        .transition("AT_TARGET", "outsideTarget", "OUTSIDE_TARGET")
        .condition(
            Condition::new(
                "atTarget",
                angle("HipAngle").ge(low.clone()).and(angle("HipAngle").le(high.clone())),
            )
            .in_states(["OUTSIDE_TARGET"]),
        )
        .condition(
            Condition::new(
                "outsideTarget",
                angle("HipAngle").lt(low).or(angle("HipAngle").gt(high)),
            )
            .in_states(["AT_TARGET"]),
        )
        .joints(torso_joints())
        .target("targetHipAngle", 135.0)
        .target("targetTolerance", 5.0)
        .angle_channel("HipAngle")
        .build()
}
