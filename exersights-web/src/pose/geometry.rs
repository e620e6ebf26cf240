//! Joint angle calculation
//!
//! Measures the planar angle at a joint from three landmarks, e.g.
//! shoulder→elbow→wrist for the elbow.

use nalgebra::Point2;

use super::landmarks::PoseFrame;

/// Angle at vertex `b` between rays b→a and b→c, in degrees.
///
/// Uses the difference of the two ray headings and folds reflex angles
/// back into range, so the result is always 0°..=180°:
/// - 180° = straight limb
/// - 90° = right angle
///
/// Coincident points give 0°.
pub fn angle_at(a: Point2<f32>, b: Point2<f32>, c: Point2<f32>) -> f32 {
    let to_a = a - b;
    let to_c = c - b;

    let radians = to_c.y.atan2(to_c.x) - to_a.y.atan2(to_a.x);
    let angle = radians.to_degrees().abs();

    if angle > 180.0 {
        360.0 - angle
    } else {
        angle
    }
}

/// Planar position of a landmark, `None` outside the topology
pub fn position(frame: &PoseFrame, index: usize) -> Option<Point2<f32>> {
    frame.get(index).map(|lm| lm.point())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{Landmark, LEFT_ELBOW};

    fn p(x: f32, y: f32) -> Point2<f32> {
        Point2::new(x, y)
    }

    #[test]
    fn test_straight_limb() {
        let angle = angle_at(p(0.0, 0.0), p(0.5, 0.0), p(1.0, 0.0));
        assert!((angle - 180.0).abs() < 0.01);
    }

    #[test]
    fn test_right_angle() {
        let angle = angle_at(p(0.0, 0.0), p(0.5, 0.0), p(0.5, 0.5));
        assert!((angle - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_reflex_folds_back() {
        // Raw heading difference here is 270°, folded to 90°
        let angle = angle_at(p(0.0, -1.0), p(0.0, 0.0), p(-1.0, 0.0));
        assert!((angle - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_symmetric_and_bounded() {
        let points = [
            (p(0.1, 0.9), p(0.4, 0.2), p(0.8, 0.7)),
            (p(-3.0, 2.0), p(1.0, 1.0), p(0.5, -4.0)),
            (p(0.3, 0.3), p(0.3, 0.6), p(0.31, 0.3)),
            (p(10.0, 0.0), p(0.0, 0.0), p(-10.0, 0.001)),
        ];

        for (a, b, c) in points {
            let forward = angle_at(a, b, c);
            let backward = angle_at(c, b, a);
            assert!((0.0..=180.0).contains(&forward));
            assert!((forward - backward).abs() < 1e-3);
        }
    }

    #[test]
    fn test_degenerate_is_zero() {
        let angle = angle_at(p(0.5, 0.5), p(0.5, 0.5), p(0.5, 0.5));
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn test_position_extraction() {
        let frame = PoseFrame::default()
            .with_landmark(LEFT_ELBOW, Landmark::new(0.2, 0.4, 0.0, 1.0));
        assert_eq!(position(&frame, LEFT_ELBOW), Some(p(0.2, 0.4)));
        assert_eq!(position(&frame, 40), None);
    }
}
