//! Landmark frame storage
//!
//! Holds one frame of MediaPipe Pose landmarks as delivered by the
//! JavaScript pose pipeline.

use nalgebra::Point2;

use crate::error::{EngineError, Result};

// ============================================================================
// LANDMARK INDICES (MediaPipe Pose - 33 total)
// ============================================================================

pub const LANDMARK_COUNT: usize = 33;

pub const NOSE: usize = 0;
pub const LEFT_EAR: usize = 7;
pub const RIGHT_EAR: usize = 8;
pub const MOUTH_LEFT: usize = 9;
pub const MOUTH_RIGHT: usize = 10;
pub const LEFT_SHOULDER: usize = 11;
pub const RIGHT_SHOULDER: usize = 12;
pub const LEFT_ELBOW: usize = 13;
pub const RIGHT_ELBOW: usize = 14;
pub const LEFT_WRIST: usize = 15;
pub const RIGHT_WRIST: usize = 16;
pub const LEFT_HIP: usize = 23;
pub const RIGHT_HIP: usize = 24;
pub const LEFT_KNEE: usize = 25;
pub const RIGHT_KNEE: usize = 26;
pub const LEFT_ANKLE: usize = 27;
pub const RIGHT_ANKLE: usize = 28;

/// Values per landmark in the full flat layout (x, y, z, visibility)
const STRIDE_WITH_VISIBILITY: usize = 4;
/// Values per landmark in the legacy flat layout (x, y, z)
const STRIDE_POSITION_ONLY: usize = 3;

// ============================================================================
// LANDMARK DATA STRUCTURE
// ============================================================================

/// A single tracked body point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,          // 0-1 normalized, left to right
    pub y: f32,          // 0-1 normalized, top to bottom
    pub z: f32,          // Relative depth, smaller = closer to camera
    pub visibility: f32, // Model confidence, 0-1
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self { x, y, z, visibility }
    }

    /// Planar position, ignoring depth
    pub fn point(&self) -> Point2<f32> {
        Point2::new(self.x, self.y)
    }
}

/// One full frame of landmarks in MediaPipe order
#[derive(Clone, Debug, PartialEq)]
pub struct PoseFrame {
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl PoseFrame {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { landmarks }
    }

    /// Parse a flat `Float32Array` from JavaScript.
    ///
    /// Accepts 132 values (x, y, z, visibility per landmark) or the
    /// position-only 99 value layout, where every landmark is treated as
    /// fully visible.
    pub fn from_flat(data: &[f32]) -> Result<Self> {
        let stride = match data.len() {
            n if n == LANDMARK_COUNT * STRIDE_WITH_VISIBILITY => STRIDE_WITH_VISIBILITY,
            n if n == LANDMARK_COUNT * STRIDE_POSITION_ONLY => STRIDE_POSITION_ONLY,
            actual => return Err(EngineError::InvalidFrame { actual }),
        };

        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        for (landmark, chunk) in landmarks.iter_mut().zip(data.chunks_exact(stride)) {
            *landmark = Landmark {
                x: chunk[0],
                y: chunk[1],
                z: chunk[2],
                visibility: chunk.get(3).copied().unwrap_or(1.0),
            };
        }

        Ok(Self { landmarks })
    }

    /// Get a landmark by index, `None` outside the topology
    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.landmarks.get(index)
    }

    /// Replace one landmark, returning the modified frame
    pub fn with_landmark(mut self, index: usize, landmark: Landmark) -> Self {
        if let Some(slot) = self.landmarks.get_mut(index) {
            *slot = landmark;
        }
        self
    }
}

impl Default for PoseFrame {
    fn default() -> Self {
        Self {
            landmarks: [Landmark::default(); LANDMARK_COUNT],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_layout() {
        let mut data = vec![0.0f32; 132];
        data[LEFT_WRIST * 4] = 0.25;
        data[LEFT_WRIST * 4 + 1] = 0.75;
        data[LEFT_WRIST * 4 + 2] = -0.1;
        data[LEFT_WRIST * 4 + 3] = 0.9;

        let frame = PoseFrame::from_flat(&data).unwrap();
        let wrist = frame.get(LEFT_WRIST).unwrap();
        assert_eq!(*wrist, Landmark::new(0.25, 0.75, -0.1, 0.9));
    }

    #[test]
    fn test_parse_position_only_layout() {
        let mut data = vec![0.5f32; 99];
        data[RIGHT_KNEE * 3 + 1] = 0.8;

        let frame = PoseFrame::from_flat(&data).unwrap();
        let knee = frame.get(RIGHT_KNEE).unwrap();
        assert_eq!(knee.y, 0.8);
        assert_eq!(knee.visibility, 1.0);
    }

    #[test]
    fn test_reject_wrong_length() {
        let err = PoseFrame::from_flat(&[0.0; 100]).unwrap_err();
        assert_eq!(err, EngineError::InvalidFrame { actual: 100 });
    }

    #[test]
    fn test_out_of_range_index() {
        let frame = PoseFrame::default();
        assert!(frame.get(LANDMARK_COUNT).is_none());
    }
}
