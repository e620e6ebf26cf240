//! Closer-side selection from landmark depth
//!
//! Many exercises are filmed side-on, so only the limb nearest the camera
//! is measured reliably. The side whose landmarks have the smaller mean
//! `z` is treated as the closer one.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::landmarks::PoseFrame;

/// Body side
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Joint-name prefix for this side
    pub fn prefix(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// When the closer side is recomputed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SideSelectionMode {
    /// Recompute on every evaluated frame
    #[default]
    PerFrame,
    /// Keep the chosen side while the exercise holds a position,
    /// recompute once it leaves that position
    Sticky,
}

/// Side selection policy of one exercise
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SideSelection {
    pub mode: SideSelectionMode,
    /// Landmarks compared for depth; `None` uses the exercise's joint groups
    pub groups: Option<(Vec<usize>, Vec<usize>)>,
}

impl SideSelection {
    pub fn per_frame() -> Self {
        Self::default()
    }

    pub fn sticky() -> Self {
        Self {
            mode: SideSelectionMode::Sticky,
            groups: None,
        }
    }

    /// Compare depth on these landmarks instead of the joint groups
    pub fn with_groups(mut self, left: &[usize], right: &[usize]) -> Self {
        self.groups = Some((left.to_vec(), right.to_vec()));
        self
    }
}

/// Mean depth of a landmark group, `None` if no listed landmark exists
pub fn mean_depth(frame: &PoseFrame, indices: &[usize]) -> Option<f32> {
    let (sum, count) = indices
        .iter()
        .filter_map(|&i| frame.get(i))
        .fold((0.0f32, 0usize), |(sum, count), lm| (sum + lm.z, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f32)
    }
}

/// Side whose group is closer to the camera.
///
/// Ties go to the right side. A group without landmarks loses; with both
/// empty the left side is returned.
pub fn closer_side(frame: &PoseFrame, left: &[usize], right: &[usize]) -> Side {
    match (mean_depth(frame, left), mean_depth(frame, right)) {
        (Some(l), Some(r)) => {
            if l < r {
                Side::Left
            } else {
                Side::Right
            }
        }
        (None, Some(_)) => Side::Right,
        _ => Side::Left,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{Landmark, LEFT_ELBOW, LEFT_SHOULDER, LEFT_WRIST, RIGHT_ELBOW,
        RIGHT_SHOULDER, RIGHT_WRIST};

    fn frame_with_depths(left: f32, right: f32) -> PoseFrame {
        let mut frame = PoseFrame::default();
        for i in [LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST] {
            frame = frame.with_landmark(i, Landmark::new(0.5, 0.5, left, 1.0));
        }
        for i in [RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST] {
            frame = frame.with_landmark(i, Landmark::new(0.5, 0.5, right, 1.0));
        }
        frame
    }

    const LEFT: [usize; 3] = [LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST];
    const RIGHT: [usize; 3] = [RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST];

    #[test]
    fn test_left_closer() {
        let frame = frame_with_depths(-0.10, 0.05);
        assert_eq!(closer_side(&frame, &LEFT, &RIGHT), Side::Left);
    }

    #[test]
    fn test_right_closer() {
        let frame = frame_with_depths(0.2, -0.3);
        assert_eq!(closer_side(&frame, &LEFT, &RIGHT), Side::Right);
    }

    #[test]
    fn test_tie_goes_right() {
        let frame = frame_with_depths(0.0, 0.0);
        assert_eq!(closer_side(&frame, &LEFT, &RIGHT), Side::Right);
    }

    #[test]
    fn test_mean_is_arithmetic() {
        let frame = PoseFrame::default()
            .with_landmark(LEFT_SHOULDER, Landmark::new(0.0, 0.0, -0.3, 1.0))
            .with_landmark(LEFT_ELBOW, Landmark::new(0.0, 0.0, 0.1, 1.0));
        let mean = mean_depth(&frame, &[LEFT_SHOULDER, LEFT_ELBOW]).unwrap();
        assert!((mean + 0.1).abs() < 1e-6);
        assert_eq!(mean_depth(&frame, &[]), None);
    }

    #[test]
    fn test_side_display() {
        assert_eq!(Side::Left.to_string(), "left");
        assert_eq!(Side::Right.prefix(), "right");
    }
}
