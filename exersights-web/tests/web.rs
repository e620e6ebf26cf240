//! Web tests for exersights-web
//!
//! Run with: wasm-pack test --headless --chrome

#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Function, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use exersights_web::fsm::AudioCues;
use exersights_web::*;

/// 33 landmarks at one point, all clearly visible
fn flat_frame() -> Vec<f32> {
    (0..33).flat_map(|_| [0.5, 0.5, 0.0, 0.9]).collect()
}

fn field(value: &JsValue, name: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(name)).unwrap()
}

// ============================================================================
// Module
// ============================================================================

#[wasm_bindgen_test]
fn test_version() {
    assert_eq!(get_version(), env!("CARGO_PKG_VERSION"));
}

#[wasm_bindgen_test]
fn test_list_exercises() {
    let list = list_exercises();
    assert!(Array::is_array(&list));

    let list = Array::from(&list);
    assert_eq!(list.length(), 19);
    assert_eq!(field(&list.get(0), "id").as_string().as_deref(), Some("squat"));
}

#[wasm_bindgen_test]
fn test_describe_exercise() {
    let summary = describe_exercise("pushUp").unwrap();
    let targets = field(&summary, "targets");
    assert_eq!(field(&targets, "targetElbowAngle").as_f64(), Some(65.0));

    assert!(describe_exercise("burpee").is_err());
}

// ============================================================================
// Session
// ============================================================================

#[wasm_bindgen_test]
fn test_session_processes_frame() {
    let mut session = ExerciseSession::new("pushUp").unwrap();
    assert_eq!(session.title(), "Push-up");

    let outcome = session.process_frame(Some(flat_frame()));
    assert_eq!(field(&outcome, "state").as_string().as_deref(), Some("INIT"));
    assert_eq!(
        field(&outcome, "feedback").as_string().as_deref(),
        Some("Please Begin Rep!")
    );
    assert_eq!(field(&outcome, "repCount").as_f64(), Some(0.0));
}

#[wasm_bindgen_test]
fn test_unknown_exercise() {
    assert!(ExerciseSession::new("burpee").is_err());
}

#[wasm_bindgen_test]
fn test_bad_frame_is_treated_as_missing() {
    let mut session = ExerciseSession::new("squat").unwrap();
    let outcome = session.process_frame(Some(vec![0.5; 10]));
    assert_eq!(
        field(&outcome, "feedback").as_string().as_deref(),
        Some("Make sure you are in frame")
    );
    assert_eq!(session.state(), "STANDING");
}

#[wasm_bindgen_test]
fn test_feedback_callback() {
    let mut session = ExerciseSession::new("pushUp").unwrap();
    session.on_feedback(Function::new_with_args(
        "text",
        "globalThis.__lastFeedback = text;",
    ));

    session.process_frame(None);
    let last = Reflect::get(&js_sys::global(), &JsValue::from_str("__lastFeedback")).unwrap();
    assert_eq!(last.as_string().as_deref(), Some("Make sure you are in frame"));
}

#[wasm_bindgen_test]
fn test_targets_round_trip() {
    let mut session = ExerciseSession::new("squat").unwrap();
    session.set_target("targetKneeAngle", 80.0).unwrap();
    assert!(session.set_target("targetElbowAngle", 80.0).is_err());

    let targets = session.get_targets();
    assert_eq!(field(&targets, "targetKneeAngle").as_f64(), Some(80.0));
    assert_eq!(session.angle_channels().length(), 1);
}

// ============================================================================
// Audio
// ============================================================================

#[wasm_bindgen_test]
fn test_blocked_confirmation_sound_is_contained() {
    let mut audio = bridge::BrowserAudio::new();
    audio.set_confirmation_sound("data:,not-audio").unwrap();

    // Playback is rejected asynchronously; the call itself must not throw
    audio.play_confirmation();
    audio.play_confirmation();
}

#[wasm_bindgen_test]
fn test_speak_callback_replaces_speech() {
    let mut audio = bridge::BrowserAudio::new();
    audio.on_speak(Function::new_with_args("text", "globalThis.__lastSpoken = text;"));

    audio.speak("Go Down Lower!");
    let spoken = Reflect::get(&js_sys::global(), &JsValue::from_str("__lastSpoken")).unwrap();
    assert_eq!(spoken.as_string().as_deref(), Some("Go Down Lower!"));

    audio.set_voice_enabled(false);
    audio.speak("Excellent!");
    let spoken = Reflect::get(&js_sys::global(), &JsValue::from_str("__lastSpoken")).unwrap();
    assert_eq!(spoken.as_string().as_deref(), Some("Go Down Lower!"));
}
