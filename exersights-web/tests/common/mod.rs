//! Shared helpers for the integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use exersights_web::fsm::{AudioCues, DisplayColor, FeedbackSink};
use exersights_web::pose::*;

/// Place `a`, `b`, `c` so the angle at `b` is `degrees`.
/// `a` sits straight above `b`, `c` swings around `b`.
pub fn bend(
    frame: PoseFrame,
    [a, b, c]: [usize; 3],
    x: f32,
    degrees: f32,
    z: f32,
    visibility: f32,
) -> PoseFrame {
    let theta = degrees.to_radians();
    frame
        .with_landmark(a, Landmark::new(x, 0.3, z, visibility))
        .with_landmark(b, Landmark::new(x, 0.5, z, visibility))
        .with_landmark(
            c,
            Landmark::new(x + 0.2 * theta.sin(), 0.5 - 0.2 * theta.cos(), z, visibility),
        )
}

pub const LEFT_ARM: [usize; 3] = [LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST];
pub const RIGHT_ARM: [usize; 3] = [RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST];
pub const LEFT_LEG: [usize; 3] = [LEFT_HIP, LEFT_KNEE, LEFT_ANKLE];
pub const RIGHT_LEG: [usize; 3] = [RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE];

/// Both elbows at the same angle, all landmarks clearly visible
pub fn arms(degrees: f32) -> PoseFrame {
    arms_with(degrees, degrees, 0.0, 0.0)
}

pub fn arms_with(left: f32, right: f32, left_z: f32, right_z: f32) -> PoseFrame {
    let frame = bend(PoseFrame::default(), LEFT_ARM, 0.3, left, left_z, 0.9);
    bend(frame, RIGHT_ARM, 0.7, right, right_z, 0.9)
}

/// Both knees at the same angle
pub fn legs(degrees: f32) -> PoseFrame {
    legs_with(degrees, degrees, 0.0, 0.0)
}

pub fn legs_with(left: f32, right: f32, left_z: f32, right_z: f32) -> PoseFrame {
    let frame = bend(PoseFrame::default(), LEFT_LEG, 0.3, left, left_z, 0.9);
    bend(frame, RIGHT_LEG, 0.7, right, right_z, 0.9)
}

/// Lower the visibility of one landmark
pub fn hide(frame: PoseFrame, index: usize, visibility: f32) -> PoseFrame {
    let landmark = frame.get(index).copied().unwrap_or_default();
    frame.with_landmark(index, Landmark { visibility, ..landmark })
}

/// Sink that remembers everything it was told
#[derive(Default)]
pub struct RecordingSink {
    pub feedback: Vec<String>,
    pub angles: Vec<(String, f32)>,
    pub rep_counts: Vec<u32>,
    pub colors: Vec<DisplayColor>,
}

impl FeedbackSink for RecordingSink {
    fn feedback(&mut self, text: &str) {
        self.feedback.push(text.to_string());
    }

    fn angle(&mut self, channel: &str, value: f32) {
        self.angles.push((channel.to_string(), value));
    }

    fn rep_count(&mut self, count: u32) {
        self.rep_counts.push(count);
    }

    fn color(&mut self, color: DisplayColor) {
        self.colors.push(color);
    }
}

/// Audio double; clones share the same log
#[derive(Clone, Default)]
pub struct RecordingAudio {
    pub events: Rc<RefCell<Vec<String>>>,
}

impl AudioCues for RecordingAudio {
    fn play_confirmation(&mut self) {
        self.events.borrow_mut().push("confirm".to_string());
    }

    fn speak(&mut self, text: &str) {
        self.events.borrow_mut().push(format!("speak:{text}"));
    }
}
