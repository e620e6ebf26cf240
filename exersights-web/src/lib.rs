//! ExerSights Web - exercise rep counting from pose landmarks
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - wasm_bindgen entry points that delegate to submodules
//!
//! ```javascript
//! import init, { ExerciseSession, initLogging } from './exersights_web.js';
//!
//! await init();
//! initLogging('info');
//!
//! const session = new ExerciseSession('pushUp');
//! session.onFeedback((text) => setFeedback(text));
//! session.onRepCount((count) => setReps(count));
//!
//! // Once per pose result
//! session.processFrame(landmarks);
//! ```

pub mod bridge;
pub mod config;
pub mod error;
pub mod exercises;
pub mod fsm;
pub mod pose;

use wasm_bindgen::prelude::*;

pub use bridge::{describe_exercise, list_exercises, ExerciseSession};
pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use fsm::{FrameOutcome, RepEngine};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Route `log` output to the browser console.
///
/// @param {string} level - "trace", "debug", "info", "warn" or "error"
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: &str) {
    let log_level = match level.to_lowercase().as_str() {
        "trace" => log::Level::Trace,
        "debug" => log::Level::Debug,
        "info" => log::Level::Info,
        "warn" => log::Level::Warn,
        "error" => log::Level::Error,
        _ => log::Level::Info,
    };

    let _ = wasm_logger::init(wasm_logger::Config::new(log_level));
    log::info!("exersights-web {} logging at {}", env!("CARGO_PKG_VERSION"), log_level);
}

#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
