//! Exercise session - one rep engine per JavaScript object
//!
//! Two players are two sessions; nothing is shared between them.

use std::collections::HashMap;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::audio::BrowserAudio;
use crate::config::EngineConfig;
use crate::exercises;
use crate::fsm::{DisplayColor, FeedbackSink, RepEngine};
use crate::pose::PoseFrame;

// ============================================================================
// CALLBACK SINK
// ============================================================================

/// Forwards engine output to registered JavaScript functions
#[derive(Default)]
struct JsCallbacks {
    on_feedback: Option<js_sys::Function>,
    on_angle: Option<js_sys::Function>,
    on_rep_count: Option<js_sys::Function>,
    on_color: Option<js_sys::Function>,
}

impl FeedbackSink for JsCallbacks {
    fn feedback(&mut self, text: &str) {
        if let Some(callback) = &self.on_feedback {
            let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(text));
        }
    }

    fn angle(&mut self, channel: &str, value: f32) {
        if let Some(callback) = &self.on_angle {
            let _ = callback.call2(
                &JsValue::NULL,
                &JsValue::from_str(channel),
                &JsValue::from_f64(value as f64),
            );
        }
    }

    fn rep_count(&mut self, count: u32) {
        if let Some(callback) = &self.on_rep_count {
            let _ = callback.call1(&JsValue::NULL, &JsValue::from(count));
        }
    }

    fn color(&mut self, color: DisplayColor) {
        if let Some(callback) = &self.on_color {
            let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(color.as_str()));
        }
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// Rep counting session for one exercise and one person
#[wasm_bindgen]
pub struct ExerciseSession {
    engine: RepEngine,
    audio: BrowserAudio,
    callbacks: JsCallbacks,
}

#[wasm_bindgen]
impl ExerciseSession {
    /// Start a session for the exercise registered under `id`.
    ///
    /// @param {string} id - Exercise id, e.g. "pushUp"
    #[wasm_bindgen(constructor)]
    pub fn new(id: &str) -> Result<ExerciseSession, JsValue> {
        let definition = exercises::load(id)?;
        let audio = BrowserAudio::new();
        let engine = RepEngine::new(definition).with_audio(Box::new(audio.clone()));

        log::info!("session started: {}", id);
        Ok(ExerciseSession {
            engine,
            audio,
            callbacks: JsCallbacks::default(),
        })
    }

    /// Apply engine settings. Missing fields keep their defaults.
    ///
    /// @param {object} config - `{ visibilityThreshold, neutralAngle, ... }`
    pub fn configure(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config: EngineConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        if let Err(err) = config.validate() {
            log::warn!("{}: rejected config: {}", self.engine.definition().id(), err);
            return Err(err.into());
        }

        self.engine.set_config(config);
        Ok(())
    }

    /// Process one pose frame.
    ///
    /// @param {Float32Array | undefined} landmarks - 33 × (x, y, z, visibility)
    ///   or 33 × (x, y, z); `undefined` when nobody was detected
    /// @returns {object} Frame outcome
    #[wasm_bindgen(js_name = processFrame)]
    pub fn process_frame(&mut self, landmarks: Option<Vec<f32>>) -> JsValue {
        let frame = landmarks.and_then(|data| match PoseFrame::from_flat(&data) {
            Ok(frame) => Some(frame),
            Err(err) => {
                log::warn!("{}: dropped frame: {}", self.engine.definition().id(), err);
                None
            }
        });

        let outcome = self.engine.process(frame.as_ref(), &mut self.callbacks);
        serde_wasm_bindgen::to_value(&outcome).unwrap_or(JsValue::NULL)
    }

    #[wasm_bindgen(js_name = setTarget)]
    pub fn set_target(&mut self, name: &str, value: f32) -> Result<(), JsValue> {
        self.engine.set_target(name, value).map_err(JsValue::from)
    }

    /// Change several targets at once; none change if any is rejected.
    ///
    /// @param {object} targets - e.g. `{ targetKneeAngle: 80 }`
    #[wasm_bindgen(js_name = setTargets)]
    pub fn set_targets(&mut self, targets: JsValue) -> Result<(), JsValue> {
        let targets: HashMap<String, f32> = serde_wasm_bindgen::from_value(targets)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        self.engine
            .set_targets(targets.iter().map(|(name, value)| (name.as_str(), *value)))
            .map_err(JsValue::from)
    }

    #[wasm_bindgen(js_name = getTargets)]
    pub fn get_targets(&self) -> JsValue {
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        self.engine
            .targets()
            .serialize(&serializer)
            .unwrap_or(JsValue::NULL)
    }

    /// Set the rep count and restart the cycle
    pub fn reset(&mut self, count: u32) {
        self.engine.reset(count);
    }

    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.engine.state_name().to_string()
    }

    #[wasm_bindgen(getter, js_name = repCount)]
    pub fn rep_count(&self) -> u32 {
        self.engine.rep_count()
    }

    #[wasm_bindgen(getter)]
    pub fn title(&self) -> String {
        self.engine.definition().title().to_string()
    }

    #[wasm_bindgen(getter, js_name = angleChannels)]
    pub fn angle_channels(&self) -> js_sys::Array {
        self.engine
            .definition()
            .angle_channels()
            .iter()
            .map(|channel| JsValue::from_str(channel))
            .collect()
    }

    // ========================================================================
    // Callback Registration
    // ========================================================================

    /// @param {Function} callback - Called with the feedback text every frame
    #[wasm_bindgen(js_name = onFeedback)]
    pub fn on_feedback(&mut self, callback: js_sys::Function) {
        self.callbacks.on_feedback = Some(callback);
    }

    /// @param {Function} callback - Called with (channel, degrees)
    #[wasm_bindgen(js_name = onAngle)]
    pub fn on_angle(&mut self, callback: js_sys::Function) {
        self.callbacks.on_angle = Some(callback);
    }

    /// @param {Function} callback - Called with the new count after each rep
    #[wasm_bindgen(js_name = onRepCount)]
    pub fn on_rep_count(&mut self, callback: js_sys::Function) {
        self.callbacks.on_rep_count = Some(callback);
    }

    /// @param {Function} callback - Called with "none" | "yellow" | "green" | "red"
    #[wasm_bindgen(js_name = onColor)]
    pub fn on_color(&mut self, callback: js_sys::Function) {
        self.callbacks.on_color = Some(callback);
    }

    /// Replaces the built-in confirmation sound
    #[wasm_bindgen(js_name = onRepConfirmed)]
    pub fn on_rep_confirmed(&self, callback: js_sys::Function) {
        self.audio.on_rep_confirmed(callback);
    }

    /// Replaces built-in speech synthesis
    #[wasm_bindgen(js_name = onSpeak)]
    pub fn on_speak(&self, callback: js_sys::Function) {
        self.audio.on_speak(callback);
    }

    #[wasm_bindgen(js_name = setConfirmationSound)]
    pub fn set_confirmation_sound(&self, url: &str) -> Result<(), JsValue> {
        self.audio.set_confirmation_sound(url)
    }

    #[wasm_bindgen(js_name = setVoiceEnabled)]
    pub fn set_voice_enabled(&self, enabled: bool) {
        self.audio.set_voice_enabled(enabled);
    }
}
