//! Pose module - landmark frames, geometry, visibility and side selection
//!
//! Re-exports only. All logic in submodules.

mod landmarks;
mod geometry;
mod visibility;
mod side;

pub use landmarks::{
    Landmark, PoseFrame, LANDMARK_COUNT,
    NOSE, LEFT_EAR, RIGHT_EAR, MOUTH_LEFT, MOUTH_RIGHT,
    LEFT_SHOULDER, RIGHT_SHOULDER, LEFT_ELBOW, RIGHT_ELBOW,
    LEFT_WRIST, RIGHT_WRIST, LEFT_HIP, RIGHT_HIP,
    LEFT_KNEE, RIGHT_KNEE, LEFT_ANKLE, RIGHT_ANKLE,
};
pub use geometry::{angle_at, position};
pub use visibility::{
    all_visible, in_frame, ExtremalLandmarks, SideVisibility, VisibilityGate,
    VisibilityPolicy, VISIBILITY_THRESHOLD,
};
pub use side::{closer_side, mean_depth, Side, SideSelection, SideSelectionMode};
