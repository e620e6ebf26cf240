//! Output capabilities
//!
//! The engine never touches the UI or the speakers directly. Per-frame
//! values go to a [`FeedbackSink`], audible cues to [`AudioCues`].

use super::definition::DisplayColor;

/// Receives everything the engine reports for a frame
pub trait FeedbackSink {
    fn feedback(&mut self, text: &str);
    fn angle(&mut self, channel: &str, value: f32);
    fn rep_count(&mut self, count: u32);
    fn color(&mut self, color: DisplayColor);
}

/// Sink that drops everything
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl FeedbackSink for NullSink {
    fn feedback(&mut self, _text: &str) {}
    fn angle(&mut self, _channel: &str, _value: f32) {}
    fn rep_count(&mut self, _count: u32) {}
    fn color(&mut self, _color: DisplayColor) {}
}

/// Fire-and-forget audio triggers
pub trait AudioCues {
    /// Short sound confirming a completed rep
    fn play_confirmation(&mut self);
    /// Read a feedback line aloud
    fn speak(&mut self, text: &str);
}

/// Audio that plays nothing
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl AudioCues for Silent {
    fn play_confirmation(&mut self) {}
    fn speak(&mut self, _text: &str) {}
}
