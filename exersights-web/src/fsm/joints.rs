//! Joint declarations and per-frame measurement
//!
//! An exercise names the angles and positions it cares about. Each frame
//! they are measured once into [`JointData`]; conditions then read them
//! through a [`JointView`] bound to the selected side.

use std::collections::HashMap;

use nalgebra::Point2;

use crate::pose::{angle_at, position, PoseFrame, Side};

/// Angle measured at landmark `b`, between `a` and `c`
#[derive(Clone, Debug, PartialEq)]
pub struct JointAngleSpec {
    pub name: String,
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

/// Planar position of a single landmark
#[derive(Clone, Debug, PartialEq)]
pub struct JointPositionSpec {
    pub name: String,
    pub index: usize,
}

/// Landmark groups and named measurements of one exercise
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JointInfo {
    pub left: Vec<usize>,
    pub right: Vec<usize>,
    pub angles: Vec<JointAngleSpec>,
    pub positions: Vec<JointPositionSpec>,
}

impl JointInfo {
    /// Start from the landmarks that make up each side
    pub fn new(left: &[usize], right: &[usize]) -> Self {
        Self {
            left: left.to_vec(),
            right: right.to_vec(),
            angles: Vec::new(),
            positions: Vec::new(),
        }
    }

    pub fn angle(mut self, name: &str, [a, b, c]: [usize; 3]) -> Self {
        self.angles.push(JointAngleSpec {
            name: name.to_string(),
            a,
            b,
            c,
        });
        self
    }

    /// Declare `left{Name}` and `right{Name}` in one go
    pub fn angle_pair(self, name: &str, left: [usize; 3], right: [usize; 3]) -> Self {
        self.angle(&sided(Side::Left, name), left)
            .angle(&sided(Side::Right, name), right)
    }

    pub fn position(mut self, name: &str, index: usize) -> Self {
        self.positions.push(JointPositionSpec {
            name: name.to_string(),
            index,
        });
        self
    }

    /// Declare `left{Name}` and `right{Name}` positions
    pub fn position_pair(self, name: &str, left: usize, right: usize) -> Self {
        self.position(&sided(Side::Left, name), left)
            .position(&sided(Side::Right, name), right)
    }

    /// Landmark group of one side
    pub fn group(&self, side: Side) -> &[usize] {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Every landmark index the declaration touches
    pub fn landmark_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.left
            .iter()
            .chain(self.right.iter())
            .copied()
            .chain(self.angles.iter().flat_map(|spec| [spec.a, spec.b, spec.c]))
            .chain(self.positions.iter().map(|spec| spec.index))
    }

    pub fn has_angle(&self, name: &str) -> bool {
        self.angles.iter().any(|spec| spec.name == name)
    }

    pub fn has_position(&self, name: &str) -> bool {
        self.positions.iter().any(|spec| spec.name == name)
    }

    /// Measure every declared angle and position
    pub fn measure(&self, frame: &PoseFrame) -> JointData {
        let mut data = JointData::default();

        for spec in &self.angles {
            if let (Some(a), Some(b), Some(c)) = (
                position(frame, spec.a),
                position(frame, spec.b),
                position(frame, spec.c),
            ) {
                data.angles.insert(spec.name.clone(), angle_at(a, b, c));
            }
        }

        for spec in &self.positions {
            if let Some(point) = position(frame, spec.index) {
                data.positions.insert(spec.name.clone(), point);
            }
        }

        data
    }
}

/// `side` + `name` with the first letter capitalised, e.g. `leftElbowAngle`
pub fn sided(side: Side, name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => format!("{}{}{}", side.prefix(), first.to_uppercase(), chars.as_str()),
        None => side.prefix().to_string(),
    }
}

/// Measurements of one frame
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JointData {
    pub angles: HashMap<String, f32>,
    pub positions: HashMap<String, Point2<f32>>,
}

impl JointData {
    /// Read the measurements from the point of view of `side`
    pub fn view(&self, side: Side) -> JointView<'_> {
        JointView { data: self, side }
    }
}

/// Side-resolving accessor over [`JointData`].
///
/// A name present verbatim wins; otherwise the side-qualified form is used.
#[derive(Clone, Copy, Debug)]
pub struct JointView<'a> {
    data: &'a JointData,
    side: Side,
}

impl<'a> JointView<'a> {
    pub fn side(&self) -> Side {
        self.side
    }

    pub fn angle(&self, name: &str) -> Option<f32> {
        self.data
            .angles
            .get(name)
            .or_else(|| self.data.angles.get(&sided(self.side, name)))
            .copied()
    }

    pub fn position(&self, name: &str) -> Option<Point2<f32>> {
        self.data
            .positions
            .get(name)
            .or_else(|| self.data.positions.get(&sided(self.side, name)))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{
        Landmark, LEFT_ELBOW, LEFT_SHOULDER, LEFT_WRIST, MOUTH_LEFT, RIGHT_ELBOW,
        RIGHT_SHOULDER, RIGHT_WRIST,
    };

    fn arms() -> JointInfo {
        JointInfo::new(
            &[LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST],
            &[RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST],
        )
        .angle_pair(
            "ElbowAngle",
            [LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST],
            [RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST],
        )
        .position("mouthPos", MOUTH_LEFT)
    }

    #[test]
    fn test_sided_names() {
        assert_eq!(sided(Side::Left, "ElbowAngle"), "leftElbowAngle");
        assert_eq!(sided(Side::Right, "hipAngle"), "rightHipAngle");
    }

    #[test]
    fn test_pair_declares_both_sides() {
        let info = arms();
        assert!(info.has_angle("leftElbowAngle"));
        assert!(info.has_angle("rightElbowAngle"));
        assert!(!info.has_angle("ElbowAngle"));
    }

    #[test]
    fn test_view_resolution() {
        // Left arm straight, right arm bent 90°
        let frame = PoseFrame::default()
            .with_landmark(LEFT_SHOULDER, Landmark::new(0.3, 0.2, 0.0, 1.0))
            .with_landmark(LEFT_ELBOW, Landmark::new(0.3, 0.4, 0.0, 1.0))
            .with_landmark(LEFT_WRIST, Landmark::new(0.3, 0.6, 0.0, 1.0))
            .with_landmark(RIGHT_SHOULDER, Landmark::new(0.7, 0.2, 0.0, 1.0))
            .with_landmark(RIGHT_ELBOW, Landmark::new(0.7, 0.4, 0.0, 1.0))
            .with_landmark(RIGHT_WRIST, Landmark::new(0.9, 0.4, 0.0, 1.0))
            .with_landmark(MOUTH_LEFT, Landmark::new(0.5, 0.1, 0.0, 1.0));

        let data = arms().measure(&frame);

        let left = data.view(Side::Left);
        assert!((left.angle("ElbowAngle").unwrap() - 180.0).abs() < 0.01);
        assert!((data.view(Side::Right).angle("ElbowAngle").unwrap() - 90.0).abs() < 0.01);

        // Verbatim names ignore the side
        assert!((left.angle("rightElbowAngle").unwrap() - 90.0).abs() < 0.01);
        assert_eq!(left.position("mouthPos"), Some(Point2::new(0.5, 0.1)));
        assert_eq!(left.angle("KneeAngle"), None);
    }
}
