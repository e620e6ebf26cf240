//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod audio;
mod catalog;
mod session;

pub use audio::BrowserAudio;
pub use catalog::{describe_exercise, list_exercises};
pub use session::ExerciseSession;
