//! FSM module - exercise definitions and the engine that runs them
//!
//! Re-exports only. All logic in submodules.

mod condition;
mod definition;
mod engine;
mod joints;
mod output;

pub use condition::{
    angle, constant, first_satisfied, target, x, y, Applicability, CompareOp, Condition, Expr,
    Predicate, Reference,
};
pub use definition::{
    DefinitionBuilder, DisplayColor, ExerciseDefinition, ExerciseSummary, StateId, StateSpec,
    Targets,
};
pub use engine::{AngleReading, FrameOutcome, FrameStatus, RepEngine};
pub use joints::{sided, JointAngleSpec, JointData, JointInfo, JointPositionSpec, JointView};
pub use output::{AudioCues, FeedbackSink, NullSink, Silent};
