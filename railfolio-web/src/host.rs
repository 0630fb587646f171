//! Browser implementations of the engine's audio and speech collaborators.
//!
//! Speech goes straight through `window.speechSynthesis`. Engine audio is
//! delegated to a page-provided `window.railfolioAudio` object
//! (`startEngine`, `stopEngine`, `setLevel`, `playHorn`, `setMuted`); when the
//! page ships without it the journey simply runs silent.

use railfolio_core::Language;

/// Pick the voice to use for `language` from the voices' BCP-47 tags.
///
/// German prefers an exact `de-DE` voice over any other German one.
#[must_use]
pub fn preferred_voice<S: AsRef<str>>(voice_langs: &[S], language: Language) -> Option<usize> {
    let position = |pred: &dyn Fn(&str) -> bool| voice_langs.iter().position(|l| pred(l.as_ref()));
    match language {
        Language::De => position(&|l| l == language.speech_tag())
            .or_else(|| position(&|l| l.contains(language.tag()))),
        Language::En => position(&|l| l.contains(language.tag())),
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::{WebAudio, WebSpeech};

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::preferred_voice;
    use crate::dom;
    use railfolio_core::{AudioSink, SpeechSink, Utterance};
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance, SpeechSynthesisVoice};

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(catch, js_namespace = railfolioAudio, js_name = startEngine)]
        fn js_start_engine() -> Result<(), JsValue>;
        #[wasm_bindgen(catch, js_namespace = railfolioAudio, js_name = stopEngine)]
        fn js_stop_engine() -> Result<(), JsValue>;
        #[wasm_bindgen(catch, js_namespace = railfolioAudio, js_name = setLevel)]
        fn js_set_level(level: f64) -> Result<(), JsValue>;
        #[wasm_bindgen(catch, js_namespace = railfolioAudio, js_name = playHorn)]
        fn js_play_horn() -> Result<(), JsValue>;
        #[wasm_bindgen(catch, js_namespace = railfolioAudio, js_name = setMuted)]
        fn js_set_muted(muted: bool) -> Result<(), JsValue>;
    }

    /// Audio sink backed by the page's audio bridge.
    #[derive(Debug, Default)]
    pub struct WebAudio {
        muted: bool,
        reported: bool,
    }

    impl WebAudio {
        #[must_use]
        pub const fn new() -> Self {
            Self {
                muted: false,
                reported: false,
            }
        }

        fn check(&mut self, what: &str, result: Result<(), JsValue>) {
            if let Err(err) = result
                && !self.reported
            {
                self.reported = true;
                dom::console_error(&format!(
                    "audio bridge unavailable ({what}): {}",
                    dom::js_error_message(&err)
                ));
            }
        }
    }

    impl AudioSink for WebAudio {
        fn start_ambient_engine(&mut self) {
            self.check("startEngine", js_start_engine());
        }

        fn stop_ambient_engine(&mut self) {
            self.check("stopEngine", js_stop_engine());
        }

        fn set_ambient_level(&mut self, level: f64) {
            let level = if self.muted { 0.0 } else { level };
            self.check("setLevel", js_set_level(level));
        }

        fn play_arrival_cue(&mut self) {
            if !self.muted {
                self.check("playHorn", js_play_horn());
            }
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
            self.check("setMuted", js_set_muted(muted));
        }
    }

    /// Speech sink over `window.speechSynthesis`.
    pub struct WebSpeech {
        synth: Option<SpeechSynthesis>,
    }

    impl WebSpeech {
        #[must_use]
        pub fn new() -> Self {
            Self {
                synth: dom::window().and_then(|win| win.speech_synthesis().ok()),
            }
        }

        /// Speak a silent utterance from inside a user gesture so later
        /// announcements are allowed to play.
        pub fn prime(&self) {
            if let Some(synth) = &self.synth
                && let Ok(silent) = SpeechSynthesisUtterance::new_with_text("")
            {
                silent.set_volume(0.0);
                synth.speak(&silent);
            }
        }

        fn voice_for(synth: &SpeechSynthesis, utterance: &Utterance) -> Option<SpeechSynthesisVoice> {
            let voices: Vec<SpeechSynthesisVoice> = synth
                .get_voices()
                .iter()
                .filter_map(|v| v.dyn_into::<SpeechSynthesisVoice>().ok())
                .collect();
            let langs: Vec<String> = voices.iter().map(SpeechSynthesisVoice::lang).collect();
            preferred_voice(&langs, utterance.language).and_then(|i| voices.get(i).cloned())
        }
    }

    impl Default for WebSpeech {
        fn default() -> Self {
            Self::new()
        }
    }

    impl SpeechSink for WebSpeech {
        fn is_available(&self) -> bool {
            self.synth.is_some()
        }

        fn cancel(&mut self) {
            if let Some(synth) = &self.synth {
                synth.cancel();
            }
        }

        fn speak(&mut self, utterance: &Utterance) {
            let Some(synth) = &self.synth else {
                return;
            };
            let spoken = match SpeechSynthesisUtterance::new_with_text(&utterance.text) {
                Ok(spoken) => spoken,
                Err(err) => {
                    dom::console_error(&format!(
                        "speech unavailable: {}",
                        dom::js_error_message(&err)
                    ));
                    return;
                }
            };
            spoken.set_lang(utterance.speech_tag());
            spoken.set_rate(utterance.rate);
            if let Some(voice) = Self::voice_for(synth, utterance) {
                spoken.set_voice(Some(&voice));
            }
            synth.speak(&spoken);
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn german_prefers_the_exact_regional_voice() {
        let langs = ["en-US", "de-AT", "de-DE"];
        assert_eq!(preferred_voice(&langs, Language::De), Some(2));
        assert_eq!(preferred_voice(&["en-GB", "de-CH"], Language::De), Some(1));
    }

    #[test]
    fn english_takes_the_first_english_voice() {
        assert_eq!(preferred_voice(&["fr-FR", "en-GB", "en-US"], Language::En), Some(1));
        assert_eq!(preferred_voice(&["fr-FR"], Language::En), None);
        assert_eq!(preferred_voice::<&str>(&[], Language::De), None);
    }
}
