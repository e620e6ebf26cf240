//! Exercise definitions
//!
//! A definition is pure data: states, transitions, conditions, joints and
//! targets. [`DefinitionBuilder::build`] validates it once so the engine
//! never meets a dangling reference at frame time.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::condition::{Applicability, Condition, Reference};
use super::joints::{sided, JointInfo};
use crate::error::{EngineError, Result};
use crate::pose::{Side, SideSelection, VisibilityPolicy, LANDMARK_COUNT};

// ============================================================================
// STATES
// ============================================================================

/// Tint the front-end applies to the feedback panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayColor {
    #[default]
    None,
    Yellow,
    Green,
    Red,
}

impl DisplayColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayColor::None => "none",
            DisplayColor::Yellow => "yellow",
            DisplayColor::Green => "green",
            DisplayColor::Red => "red",
        }
    }
}

/// Index of a state in its definition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StateId(pub(crate) usize);

/// One state of an exercise cycle
#[derive(Clone, Debug, PartialEq)]
pub struct StateSpec {
    pub name: String,
    pub feedback: String,
    /// Speak the feedback when the state is entered
    pub triggers_audio: bool,
    /// Entering the state completes a rep
    pub counts_rep: bool,
    pub color: DisplayColor,
    /// A sticky side latch is kept while in this state
    pub holds_side: bool,
}

impl StateSpec {
    pub fn new(feedback: &str) -> Self {
        Self {
            name: String::new(),
            feedback: feedback.to_string(),
            triggers_audio: false,
            counts_rep: false,
            color: DisplayColor::None,
            holds_side: false,
        }
    }

    pub fn audio(mut self) -> Self {
        self.triggers_audio = true;
        self
    }

    pub fn rep(mut self) -> Self {
        self.counts_rep = true;
        self
    }

    pub fn color(mut self, color: DisplayColor) -> Self {
        self.color = color;
        self
    }

    pub fn hold_side(mut self) -> Self {
        self.holds_side = true;
        self
    }
}

// ============================================================================
// TARGETS
// ============================================================================

/// Named thresholds in declaration order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Targets {
    entries: Vec<(String, f32)>,
}

impl Targets {
    /// Add a target, or overwrite it if already declared
    pub fn declare(&mut self, name: &str, value: f32) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| *value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut f32> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }
}

impl Serialize for Targets {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// ============================================================================
// DEFINITION
// ============================================================================

/// Complete recognition logic for one exercise
#[derive(Clone, Debug)]
pub struct ExerciseDefinition {
    id: String,
    title: String,
    states: Vec<StateSpec>,
    /// Per state, condition name → destination
    transitions: Vec<Vec<(String, StateId)>>,
    conditions: Vec<Condition>,
    joints: JointInfo,
    targets: Targets,
    angle_channels: Vec<String>,
    visibility: VisibilityPolicy,
    side_selection: SideSelection,
}

impl ExerciseDefinition {
    pub fn builder(id: &str, title: &str) -> DefinitionBuilder {
        DefinitionBuilder {
            id: id.to_string(),
            title: title.to_string(),
            states: Vec::new(),
            transitions: Vec::new(),
            conditions: Vec::new(),
            joints: JointInfo::default(),
            targets: Targets::default(),
            angle_channels: Vec::new(),
            visibility: VisibilityPolicy::default(),
            side_selection: SideSelection::per_frame(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn states(&self) -> &[StateSpec] {
        &self.states
    }

    pub fn initial_state(&self) -> StateId {
        StateId(0)
    }

    /// State spec by id. Ids only come from this definition.
    pub fn state(&self, id: StateId) -> &StateSpec {
        &self.states[id.0]
    }

    /// Destination of `condition` out of `from`, if declared
    pub fn transition(&self, from: StateId, condition: &str) -> Option<StateId> {
        self.transitions
            .get(from.0)?
            .iter()
            .find(|(name, _)| name == condition)
            .map(|(_, to)| *to)
    }

    /// Conditions in priority order
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn joints(&self) -> &JointInfo {
        &self.joints
    }

    pub fn targets(&self) -> &Targets {
        &self.targets
    }

    pub fn angle_channels(&self) -> &[String] {
        &self.angle_channels
    }

    pub fn visibility(&self) -> &VisibilityPolicy {
        &self.visibility
    }

    pub fn side_selection(&self) -> &SideSelection {
        &self.side_selection
    }

    /// Landmark groups compared for closer-side selection
    pub fn side_groups(&self) -> (&[usize], &[usize]) {
        match &self.side_selection.groups {
            Some((left, right)) => (left, right),
            None => (self.joints.group(Side::Left), self.joints.group(Side::Right)),
        }
    }

    /// Change a declared target
    pub fn set_target(&mut self, name: &str, value: f32) -> Result<()> {
        if !value.is_finite() {
            return Err(EngineError::InvalidTargetValue {
                target: name.to_string(),
                value,
            });
        }
        let exercise = &self.id;
        let slot = self
            .targets
            .slot_mut(name)
            .ok_or_else(|| EngineError::UnknownTarget {
                exercise: exercise.clone(),
                target: name.to_string(),
            })?;
        *slot = value;
        Ok(())
    }

    /// Static description for the front-end
    pub fn summary(&self) -> ExerciseSummary<'_> {
        ExerciseSummary {
            id: &self.id,
            title: &self.title,
            states: self.states.iter().map(|s| s.name.as_str()).collect(),
            targets: &self.targets,
            angle_channels: &self.angle_channels,
        }
    }
}

/// Serialisable overview of a definition
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSummary<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub states: Vec<&'a str>,
    pub targets: &'a Targets,
    pub angle_channels: &'a [String],
}

// ============================================================================
// BUILDER
// ============================================================================

/// Collects declarations; see [`ExerciseDefinition::builder`]
#[derive(Clone, Debug)]
pub struct DefinitionBuilder {
    id: String,
    title: String,
    states: Vec<StateSpec>,
    transitions: Vec<(String, String, String)>,
    conditions: Vec<Condition>,
    joints: JointInfo,
    targets: Targets,
    angle_channels: Vec<String>,
    visibility: VisibilityPolicy,
    side_selection: SideSelection,
}

impl DefinitionBuilder {
    /// Declare a state; the first one declared is the initial state
    pub fn state(mut self, name: &str, spec: StateSpec) -> Self {
        self.states.push(StateSpec {
            name: name.to_string(),
            ..spec
        });
        self
    }

    pub fn transition(mut self, from: &str, condition: &str, to: &str) -> Self {
        self.transitions
            .push((from.to_string(), condition.to_string(), to.to_string()));
        self
    }

    /// Declare a condition; earlier declarations take priority
    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn joints(mut self, joints: JointInfo) -> Self {
        self.joints = joints;
        self
    }

    pub fn target(mut self, name: &str, value: f32) -> Self {
        self.targets.declare(name, value);
        self
    }

    pub fn angle_channel(mut self, name: &str) -> Self {
        self.angle_channels.push(name.to_string());
        self
    }

    pub fn visibility(mut self, policy: VisibilityPolicy) -> Self {
        self.visibility = policy;
        self
    }

    pub fn side_selection(mut self, selection: SideSelection) -> Self {
        self.side_selection = selection;
        self
    }

    /// Validate and freeze the definition
    pub fn build(self) -> Result<ExerciseDefinition> {
        if self.states.is_empty() {
            return Err(EngineError::NoStates {
                exercise: self.id.clone(),
            });
        }

        for (i, state) in self.states.iter().enumerate() {
            if self.states[..i].iter().any(|s| s.name == state.name) {
                return Err(EngineError::DuplicateState {
                    exercise: self.id.clone(),
                    state: state.name.clone(),
                });
            }
        }

        let mut transitions = vec![Vec::new(); self.states.len()];
        for (from, condition, to) in &self.transitions {
            let from = self.lookup(from)?;
            let to = self.lookup(to)?;
            if !self.conditions.iter().any(|c| &c.name == condition) {
                return Err(EngineError::UnknownCondition {
                    exercise: self.id.clone(),
                    condition: condition.clone(),
                });
            }
            transitions[from.0].push((condition.clone(), to));
        }

        for condition in &self.conditions {
            if let Applicability::States(states) = &condition.applies {
                for state in states {
                    self.lookup(state)?;
                }
            }
            for reference in condition.predicate.references() {
                self.check_reference(reference)?;
            }
        }

        for channel in &self.angle_channels {
            self.check_reference(Reference::Angle(channel))?;
        }

        for (name, value) in self.targets.iter() {
            if !value.is_finite() {
                return Err(EngineError::InvalidTargetValue {
                    target: name.to_string(),
                    value,
                });
            }
        }

        self.check_landmarks()?;

        Ok(ExerciseDefinition {
            id: self.id,
            title: self.title,
            states: self.states,
            transitions,
            conditions: self.conditions,
            joints: self.joints,
            targets: self.targets,
            angle_channels: self.angle_channels,
            visibility: self.visibility,
            side_selection: self.side_selection,
        })
    }

    fn lookup(&self, name: &str) -> Result<StateId> {
        self.states
            .iter()
            .position(|s| s.name == name)
            .map(StateId)
            .ok_or_else(|| EngineError::UnknownState {
                exercise: self.id.clone(),
                state: name.to_string(),
            })
    }

    /// Joint names must resolve on both sides, targets must be declared
    fn check_reference(&self, reference: Reference<'_>) -> Result<()> {
        match reference {
            Reference::Target(name) if self.targets.contains(name) => Ok(()),
            Reference::Target(name) => Err(EngineError::UnknownTarget {
                exercise: self.id.clone(),
                target: name.to_string(),
            }),
            Reference::Angle(name) => self.check_joint(name, |n| self.joints.has_angle(n)),
            Reference::Position(name) => self.check_joint(name, |n| self.joints.has_position(n)),
        }
    }

    fn check_joint(&self, name: &str, declared: impl Fn(&str) -> bool) -> Result<()> {
        if declared(name) {
            return Ok(());
        }
        for side in [Side::Left, Side::Right] {
            if !declared(&sided(side, name)) {
                return Err(EngineError::UnresolvedJoint {
                    exercise: self.id.clone(),
                    joint: name.to_string(),
                    side,
                });
            }
        }
        Ok(())
    }

    fn check_landmarks(&self) -> Result<()> {
        let extremal = match &self.visibility {
            VisibilityPolicy::Extremal(e) => vec![e.top, e.bottom, e.left, e.right],
            _ => Vec::new(),
        };
        let side_groups = self
            .side_selection
            .groups
            .iter()
            .flat_map(|(left, right)| left.iter().chain(right.iter()).copied());

        let mut indices = self
            .joints
            .landmark_indices()
            .chain(extremal.into_iter().flatten())
            .chain(side_groups);

        match indices.find(|&index| index >= LANDMARK_COUNT) {
            Some(index) => Err(EngineError::LandmarkOutOfRange { index }),
            None => Ok(()),
        }
    }
}
