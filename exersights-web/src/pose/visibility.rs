//! Visibility gate - decides whether enough of the body is trustworthy
//!
//! When the pose model is unsure about a required landmark the frame is
//! not evaluated at all. This prevents counting reps from hallucinated
//! limbs.

use super::landmarks::PoseFrame;

/// Default minimum landmark visibility
pub const VISIBILITY_THRESHOLD: f32 = 0.5;

/// Extremal landmarks that must be visible for the body to be "in frame".
///
/// Not all exercises need all four (a bridge only needs top and bottom);
/// unset entries are left out of the check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtremalLandmarks {
    pub top: Option<usize>,
    pub bottom: Option<usize>,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

impl ExtremalLandmarks {
    fn provided(&self) -> impl Iterator<Item = usize> {
        [self.top, self.bottom, self.left, self.right].into_iter().flatten()
    }
}

/// Which landmark sets an exercise requires
#[derive(Clone, Debug, Default, PartialEq)]
pub enum VisibilityPolicy {
    /// Each side's joint group is checked on its own; one full side is enough
    #[default]
    SideSets,
    /// Every provided extremal landmark must be visible
    Extremal(ExtremalLandmarks),
    /// No gating, for exercises whose key landmarks are often borderline
    Disabled,
}

/// Per-side result of the gate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SideVisibility {
    pub left: bool,
    pub right: bool,
}

impl SideVisibility {
    pub const BOTH: Self = Self { left: true, right: true };
    pub const NEITHER: Self = Self { left: false, right: false };

    /// Whether the frame can be evaluated at all
    pub fn any(&self) -> bool {
        self.left || self.right
    }
}

/// Body is in frame if every provided extremal landmark is visible.
/// With nothing provided the body is never in frame.
pub fn in_frame(frame: &PoseFrame, extremal: &ExtremalLandmarks, threshold: f32) -> bool {
    let mut required = 0;
    for index in extremal.provided() {
        required += 1;
        if !is_visible(frame, index, threshold) {
            return false;
        }
    }
    required > 0
}

/// Every listed landmark is visible
pub fn all_visible(frame: &PoseFrame, indices: &[usize], threshold: f32) -> bool {
    indices.iter().all(|&index| is_visible(frame, index, threshold))
}

fn is_visible(frame: &PoseFrame, index: usize, threshold: f32) -> bool {
    frame
        .get(index)
        .map(|lm| lm.visibility > threshold)
        .unwrap_or(false)
}

/// Applies a visibility policy with a configurable threshold
#[derive(Clone, Copy, Debug)]
pub struct VisibilityGate {
    threshold: f32,
}

impl VisibilityGate {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Check a frame against `policy`, using `left`/`right` as the side
    /// groups for [`VisibilityPolicy::SideSets`].
    pub fn check(
        &self,
        policy: &VisibilityPolicy,
        frame: &PoseFrame,
        left: &[usize],
        right: &[usize],
    ) -> SideVisibility {
        match policy {
            VisibilityPolicy::Disabled => SideVisibility::BOTH,
            VisibilityPolicy::Extremal(extremal) => {
                if in_frame(frame, extremal, self.threshold) {
                    SideVisibility::BOTH
                } else {
                    SideVisibility::NEITHER
                }
            }
            VisibilityPolicy::SideSets => SideVisibility {
                left: !left.is_empty() && all_visible(frame, left, self.threshold),
                right: !right.is_empty() && all_visible(frame, right, self.threshold),
            },
        }
    }
}

impl Default for VisibilityGate {
    fn default() -> Self {
        Self::new(VISIBILITY_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{
        Landmark, LEFT_ANKLE, LEFT_HIP, LEFT_KNEE, MOUTH_LEFT, RIGHT_ANKLE, RIGHT_HIP,
        RIGHT_KNEE,
    };

    fn frame_with_visibility(visibility: f32) -> PoseFrame {
        let mut frame = PoseFrame::default();
        for i in 0..33 {
            frame = frame.with_landmark(i, Landmark::new(0.5, 0.5, 0.0, visibility));
        }
        frame
    }

    #[test]
    fn test_in_frame_ignores_unprovided() {
        let frame = frame_with_visibility(0.9)
            .with_landmark(LEFT_KNEE, Landmark::new(0.5, 0.5, 0.0, 0.1));
        let extremal = ExtremalLandmarks {
            top: Some(MOUTH_LEFT),
            bottom: Some(LEFT_ANKLE),
            ..Default::default()
        };
        assert!(in_frame(&frame, &extremal, VISIBILITY_THRESHOLD));
    }

    #[test]
    fn test_in_frame_requires_every_provided() {
        let frame = frame_with_visibility(0.9)
            .with_landmark(LEFT_ANKLE, Landmark::new(0.5, 0.5, 0.0, 0.3));
        let extremal = ExtremalLandmarks {
            top: Some(MOUTH_LEFT),
            bottom: Some(LEFT_ANKLE),
            ..Default::default()
        };
        assert!(!in_frame(&frame, &extremal, VISIBILITY_THRESHOLD));
    }

    #[test]
    fn test_in_frame_with_nothing_provided() {
        let frame = frame_with_visibility(1.0);
        assert!(!in_frame(&frame, &ExtremalLandmarks::default(), VISIBILITY_THRESHOLD));
    }

    #[test]
    fn test_threshold_is_strict() {
        let frame = frame_with_visibility(0.5);
        assert!(!all_visible(&frame, &[LEFT_HIP], 0.5));
        assert!(all_visible(&frame, &[LEFT_HIP], 0.49));
    }

    #[test]
    fn test_side_sets_independent() {
        let gate = VisibilityGate::default();
        let frame = frame_with_visibility(0.9)
            .with_landmark(RIGHT_ANKLE, Landmark::new(0.5, 0.5, 0.0, 0.2));
        let left = [LEFT_HIP, LEFT_KNEE, LEFT_ANKLE];
        let right = [RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE];

        let result = gate.check(&VisibilityPolicy::SideSets, &frame, &left, &right);
        assert_eq!(result, SideVisibility { left: true, right: false });
        assert!(result.any());
    }

    #[test]
    fn test_disabled_always_passes() {
        let gate = VisibilityGate::default();
        let frame = frame_with_visibility(0.0);
        let result = gate.check(&VisibilityPolicy::Disabled, &frame, &[LEFT_HIP], &[RIGHT_HIP]);
        assert_eq!(result, SideVisibility::BOTH);
    }
}
