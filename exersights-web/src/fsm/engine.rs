//! Rep engine - runs one exercise definition over a stream of pose frames
//!
//! Every call to [`RepEngine::process`] handles one frame:
//! 1. Missing frame → "not in frame" feedback, nothing else
//! 2. Measure all declared angles and positions
//! 3. Visibility gate, short-circuit if no side is usable
//! 4. Pick the side to read (closer side, or the only visible one)
//! 5. First satisfied condition decides the transition
//! 6. Count reps and trigger audio on entering a new state
//! 7. Report angles, colour and feedback
//!
//! Nothing in here returns an error; a bad frame just produces feedback.

use log::{debug, info, warn};
use serde::Serialize;

use super::condition::first_satisfied;
use super::definition::{DisplayColor, ExerciseDefinition, StateId, Targets};
use super::output::{AudioCues, FeedbackSink, Silent};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::pose::{
    closer_side, PoseFrame, Side, SideSelectionMode, SideVisibility, VisibilityGate,
    VisibilityPolicy,
};

// ============================================================================
// FRAME OUTCOME
// ============================================================================

/// How far a frame got through the pipeline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FrameStatus {
    Evaluated,
    NotInFrame,
    LimbsNotVisible,
}

/// Value reported on one angle channel
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AngleReading {
    pub channel: String,
    pub value: f32,
}

/// Everything one processed frame produced
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameOutcome {
    pub state: String,
    pub feedback: String,
    pub rep_count: u32,
    pub angles: Vec<AngleReading>,
    pub color: DisplayColor,
    pub status: FrameStatus,
    pub side: Option<Side>,
    /// Condition whose transition was taken
    pub transition: Option<String>,
    pub rep_completed: bool,
}

// ============================================================================
// ENGINE
// ============================================================================

/// Per-session state machine for one exercise
pub struct RepEngine {
    definition: ExerciseDefinition,
    config: EngineConfig,
    gate: VisibilityGate,
    audio: Box<dyn AudioCues>,
    current_state: Option<StateId>,
    rep_count: u32,
    latched_side: Option<Side>,
    last_side: Option<Side>,
}

impl RepEngine {
    pub fn new(definition: ExerciseDefinition) -> Self {
        let config = EngineConfig::default();
        Self {
            definition,
            gate: VisibilityGate::new(config.visibility_threshold),
            config,
            audio: Box::new(Silent),
            current_state: None,
            rep_count: 0,
            latched_side: None,
            last_side: None,
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.set_config(config);
        self
    }

    pub fn with_audio(mut self, audio: Box<dyn AudioCues>) -> Self {
        self.audio = audio;
        self
    }

    pub fn set_config(&mut self, config: EngineConfig) {
        self.gate = VisibilityGate::new(config.visibility_threshold);
        self.config = config;
    }

    pub fn set_audio(&mut self, audio: Box<dyn AudioCues>) {
        self.audio = audio;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn definition(&self) -> &ExerciseDefinition {
        &self.definition
    }

    pub fn rep_count(&self) -> u32 {
        self.rep_count
    }

    /// Name of the current state (the initial state before any frame)
    pub fn state_name(&self) -> &str {
        &self.definition.state(self.current()).name
    }

    /// Side used for the most recent evaluated frame
    pub fn last_side(&self) -> Option<Side> {
        self.last_side
    }

    pub fn targets(&self) -> &Targets {
        self.definition.targets()
    }

    /// Change one target; takes effect on the next frame
    pub fn set_target(&mut self, name: &str, value: f32) -> Result<()> {
        self.definition.set_target(name, value).map_err(|err| {
            warn!("{}: rejected target {}={}: {}", self.definition.id(), name, value, err);
            err
        })
    }

    /// Change several targets; nothing changes if any is rejected
    pub fn set_targets<'a, I>(&mut self, targets: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, f32)>,
    {
        let mut staged = self.definition.clone();
        for (name, value) in targets {
            staged.set_target(name, value).map_err(|err| {
                warn!("{}: rejected target {}={}: {}", staged.id(), name, value, err);
                err
            })?;
        }
        self.definition = staged;
        Ok(())
    }

    /// Set the rep count, go back to the initial state and drop the side latch
    pub fn reset(&mut self, rep_count: u32) {
        info!("{}: reset to {} reps", self.definition.id(), rep_count);
        self.rep_count = rep_count;
        self.current_state = None;
        self.latched_side = None;
        self.last_side = None;
    }

    fn current(&self) -> StateId {
        self.current_state.unwrap_or_else(|| self.definition.initial_state())
    }

    /// Process one frame, `None` when the pose model saw nobody
    pub fn process(
        &mut self,
        frame: Option<&PoseFrame>,
        sink: &mut dyn FeedbackSink,
    ) -> FrameOutcome {
        let Some(frame) = frame else {
            let feedback = match self.definition.visibility() {
                VisibilityPolicy::Disabled => String::new(),
                _ => self.config.not_in_frame_message.clone(),
            };
            sink.feedback(&feedback);
            return self.outcome(feedback, Vec::new(), FrameStatus::NotInFrame, None);
        };

        let current = self.current();
        self.current_state = Some(current);

        let data = self.definition.joints().measure(frame);

        let joints = self.definition.joints();
        let visible = self.gate.check(
            self.definition.visibility(),
            frame,
            joints.group(Side::Left),
            joints.group(Side::Right),
        );

        if !visible.any() {
            let neutral = self.config.neutral_angle;
            let angles: Vec<AngleReading> = self
                .definition
                .angle_channels()
                .iter()
                .map(|channel| AngleReading {
                    channel: channel.clone(),
                    value: neutral,
                })
                .collect();
            for reading in &angles {
                sink.angle(&reading.channel, reading.value);
            }
            let feedback = self.config.limbs_not_visible_message.clone();
            sink.feedback(&feedback);
            return self.outcome(feedback, angles, FrameStatus::LimbsNotVisible, None);
        }

        let side = self.select_side(frame, visible, current);
        let view = data.view(side);

        let fired = first_satisfied(
            self.definition.conditions(),
            &self.definition.state(current).name,
            &view,
            self.definition.targets(),
        )
        .map(str::to_string);

        let mut transition = None;
        let mut rep_completed = false;

        if let Some(condition) = fired {
            if let Some(next) = self.definition.transition(current, &condition) {
                rep_completed = self.enter(current, next, &condition, sink);
                transition = Some(condition);
            }
        }

        let neutral = self.config.neutral_angle;
        let angles: Vec<AngleReading> = self
            .definition
            .angle_channels()
            .iter()
            .map(|channel| AngleReading {
                channel: channel.clone(),
                value: view.angle(channel).unwrap_or(neutral),
            })
            .collect();
        for reading in &angles {
            sink.angle(&reading.channel, reading.value);
        }

        let state = self.definition.state(self.current());
        sink.color(state.color);
        let feedback = state.feedback.clone();
        sink.feedback(&feedback);

        let mut outcome = self.outcome(feedback, angles, FrameStatus::Evaluated, Some(side));
        outcome.transition = transition;
        outcome.rep_completed = rep_completed;
        outcome
    }

    /// Take a declared transition, self-loops included.
    /// Returns whether a rep was completed.
    fn enter(
        &mut self,
        from: StateId,
        next: StateId,
        condition: &str,
        sink: &mut dyn FeedbackSink,
    ) -> bool {
        self.current_state = Some(next);
        let state = self.definition.state(next);

        debug!(
            "{}: {} -> {} on {}",
            self.definition.id(),
            self.definition.state(from).name,
            state.name,
            condition
        );

        if state.counts_rep {
            if self.rep_count == u32::MAX {
                warn!("{}: rep count saturated at {}", self.definition.id(), u32::MAX);
            }
            self.rep_count = self.rep_count.saturating_add(1);
            info!("{}: rep {} completed", self.definition.id(), self.rep_count);
            sink.rep_count(self.rep_count);
            self.audio.play_confirmation();
        }

        if state.triggers_audio {
            self.audio.speak(&state.feedback);
        }

        state.counts_rep
    }

    fn select_side(
        &mut self,
        frame: &PoseFrame,
        visible: SideVisibility,
        current: StateId,
    ) -> Side {
        let sticky = self.definition.side_selection().mode == SideSelectionMode::Sticky;

        let side = match (visible.left, visible.right) {
            (true, false) => {
                self.latched_side = Some(Side::Left);
                Side::Left
            }
            (false, true) => {
                self.latched_side = Some(Side::Right);
                Side::Right
            }
            _ => match self.latched_side {
                Some(latched) if sticky && self.definition.state(current).holds_side => latched,
                _ => {
                    let (left, right) = self.definition.side_groups();
                    let side = closer_side(frame, left, right);
                    self.latched_side = Some(side);
                    side
                }
            },
        };

        if self.last_side != Some(side) {
            debug!("{}: reading the {} side", self.definition.id(), side);
            self.last_side = Some(side);
        }
        side
    }

    fn outcome(
        &self,
        feedback: String,
        angles: Vec<AngleReading>,
        status: FrameStatus,
        side: Option<Side>,
    ) -> FrameOutcome {
        let state = self.definition.state(self.current());
        FrameOutcome {
            state: state.name.clone(),
            feedback,
            rep_count: self.rep_count,
            angles,
            color: state.color,
            status,
            side,
            transition: None,
            rep_completed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsm::output::NullSink;
    use crate::fsm::{angle, constant, target, Condition, JointInfo, StateSpec};
    use crate::pose::{Landmark, LEFT_ELBOW, LEFT_SHOULDER, LEFT_WRIST, RIGHT_ELBOW,
        RIGHT_SHOULDER, RIGHT_WRIST};

    fn curl() -> ExerciseDefinition {
        ExerciseDefinition::builder("curl", "Curl")
            .state("DOWN", StateSpec::new("Curl up").color(DisplayColor::Yellow))
            .state("UP", StateSpec::new("Nice!").rep().color(DisplayColor::Green))
            .transition("DOWN", "bent", "UP")
            .transition("UP", "straight", "DOWN")
            .condition(Condition::new("bent", angle("ElbowAngle").lt(target("bend"))))
            .condition(Condition::new("straight", angle("ElbowAngle").gt(constant(160.0))))
            .joints(
                JointInfo::new(
                    &[LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST],
                    &[RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST],
                )
                .angle_pair(
                    "ElbowAngle",
                    [LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST],
                    [RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST],
                ),
            )
            .target("bend", 60.0)
            .angle_channel("ElbowAngle")
            .build()
            .unwrap()
    }

    /// Both arms with the same elbow angle, shoulder straight above the elbow
    fn arms_at(degrees: f32) -> PoseFrame {
        let theta = degrees.to_radians();
        let mut frame = PoseFrame::default();
        for (shoulder, elbow, wrist, x) in [
            (LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST, 0.3),
            (RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST, 0.7),
        ] {
            frame = frame
                .with_landmark(shoulder, Landmark::new(x, 0.3, 0.0, 0.9))
                .with_landmark(elbow, Landmark::new(x, 0.5, 0.0, 0.9))
                .with_landmark(
                    wrist,
                    Landmark::new(x + 0.2 * theta.sin(), 0.5 - 0.2 * theta.cos(), 0.0, 0.9),
                );
        }
        frame
    }

    #[test]
    fn test_missing_frame() {
        let mut engine = RepEngine::new(curl());
        let outcome = engine.process(None, &mut NullSink);
        assert_eq!(outcome.status, FrameStatus::NotInFrame);
        assert_eq!(outcome.feedback, "Make sure you are in frame");
        assert_eq!(outcome.state, "DOWN");
        assert!(outcome.angles.is_empty());
    }

    #[test]
    fn test_one_rep() {
        let mut engine = RepEngine::new(curl());
        let outcome = engine.process(Some(&arms_at(170.0)), &mut NullSink);
        assert_eq!(outcome.feedback, "Curl up");
        assert_eq!(outcome.transition, None);

        let outcome = engine.process(Some(&arms_at(40.0)), &mut NullSink);
        assert_eq!(outcome.state, "UP");
        assert_eq!(outcome.rep_count, 1);
        assert!(outcome.rep_completed);
        assert_eq!(outcome.color, DisplayColor::Green);
        assert_eq!(outcome.transition.as_deref(), Some("bent"));
        assert!((outcome.angles[0].value - 40.0).abs() < 0.1);

        // Staying bent does not count again
        let outcome = engine.process(Some(&arms_at(40.0)), &mut NullSink);
        assert_eq!(outcome.rep_count, 1);
        assert!(!outcome.rep_completed);
    }

    #[test]
    fn test_self_loop_applies_side_effects() {
        let looping = ExerciseDefinition::builder("hold", "Hold")
            .state("OPEN", StateSpec::new("Bend"))
            .state("HELD", StateSpec::new("Hold it").audio().rep())
            .transition("OPEN", "bent", "HELD")
            .transition("HELD", "bent", "HELD")
            .condition(Condition::new("bent", angle("ElbowAngle").lt(target("bend"))))
            .joints(curl().joints().clone())
            .target("bend", 60.0)
            .build()
            .unwrap();
        let mut engine = RepEngine::new(looping);

        for expected in 1..=3 {
            let outcome = engine.process(Some(&arms_at(40.0)), &mut NullSink);
            assert_eq!(outcome.state, "HELD");
            assert_eq!(outcome.rep_count, expected);
            assert!(outcome.rep_completed);
        }
    }

    #[test]
    fn test_rep_count_saturates() {
        let mut engine = RepEngine::new(curl());
        engine.reset(u32::MAX);

        let outcome = engine.process(Some(&arms_at(40.0)), &mut NullSink);
        assert_eq!(outcome.state, "UP");
        assert_eq!(outcome.rep_count, u32::MAX);
    }

    #[test]
    fn test_reset() {
        let mut engine = RepEngine::new(curl());
        engine.process(Some(&arms_at(40.0)), &mut NullSink);
        assert_eq!(engine.rep_count(), 1);
        assert_eq!(engine.state_name(), "UP");

        engine.reset(0);
        assert_eq!(engine.rep_count(), 0);
        assert_eq!(engine.state_name(), "DOWN");
        assert_eq!(engine.last_side(), None);
    }

    #[test]
    fn test_set_targets_is_atomic() {
        let mut engine = RepEngine::new(curl());
        let result = engine.set_targets([("bend", 30.0), ("depth", 10.0)]);
        assert!(result.is_err());
        assert_eq!(engine.targets().get("bend"), Some(60.0));

        engine.set_targets([("bend", 30.0)]).unwrap();
        assert_eq!(engine.targets().get("bend"), Some(30.0));
    }
}
