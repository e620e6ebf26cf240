//! Browser audio for rep confirmation and spoken feedback
//!
//! Plays a short clip through an `<audio>` element and speaks feedback via
//! the Web Speech API. JavaScript can take over either cue by registering
//! a callback, in which case the built-in playback is skipped.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlAudioElement, SpeechSynthesisUtterance};

use crate::fsm::AudioCues;

#[derive(Default)]
struct AudioState {
    confirmation: Option<HtmlAudioElement>,
    voice_enabled: bool,
    on_rep_confirmed: Option<js_sys::Function>,
    on_speak: Option<js_sys::Function>,
}

/// Shared handle; the engine owns one clone, the session keeps another
#[derive(Clone)]
pub struct BrowserAudio {
    state: Rc<RefCell<AudioState>>,
}

impl BrowserAudio {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(AudioState {
                voice_enabled: true,
                ..Default::default()
            })),
        }
    }

    /// Load the clip played on every completed rep
    pub fn set_confirmation_sound(&self, url: &str) -> Result<(), JsValue> {
        let element = HtmlAudioElement::new_with_src(url)?;
        self.state.borrow_mut().confirmation = Some(element);
        log::debug!("confirmation sound set to {}", url);
        Ok(())
    }

    pub fn set_voice_enabled(&self, enabled: bool) {
        self.state.borrow_mut().voice_enabled = enabled;
    }

    pub fn on_rep_confirmed(&self, callback: js_sys::Function) {
        self.state.borrow_mut().on_rep_confirmed = Some(callback);
    }

    pub fn on_speak(&self, callback: js_sys::Function) {
        self.state.borrow_mut().on_speak = Some(callback);
    }
}

impl Default for BrowserAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioCues for BrowserAudio {
    fn play_confirmation(&mut self) {
        let state = self.state.borrow();

        if let Some(callback) = &state.on_rep_confirmed {
            let _ = callback.call0(&JsValue::NULL);
            return;
        }

        if let Some(element) = &state.confirmation {
            element.set_current_time(0.0);
            match element.play() {
                // Autoplay policy rejects the promise, not the call
                Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                    if let Err(err) = JsFuture::from(promise).await {
                        log::warn!("confirmation sound rejected: {:?}", err);
                    }
                }),
                Err(err) => log::warn!("confirmation sound failed: {:?}", err),
            }
        }
    }

    fn speak(&mut self, text: &str) {
        let state = self.state.borrow();
        if !state.voice_enabled || text.is_empty() {
            return;
        }

        if let Some(callback) = &state.on_speak {
            let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(text));
            return;
        }

        let Some(window) = web_sys::window() else {
            return;
        };
        let synthesis = match window.speech_synthesis() {
            Ok(synthesis) => synthesis,
            Err(err) => {
                log::warn!("speech synthesis unavailable: {:?}", err);
                return;
            }
        };

        // Newer feedback replaces whatever is still being spoken
        synthesis.cancel();
        match SpeechSynthesisUtterance::new_with_text(text) {
            Ok(utterance) => synthesis.speak(&utterance),
            Err(err) => log::warn!("could not create utterance: {:?}", err),
        }
    }
}
