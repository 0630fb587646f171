//! Side-effect surfaces the journey engine drives but does not implement.
//!
//! Audio and speech are collaborators owned by the session. Viewport work
//! (scrolling the page, opening a detail view) is queued as [`HostEffect`]s and
//! drained by the host after each call.

use serde::{Deserialize, Serialize};

use crate::locale::Language;

/// Ambient engine audio and the arrival horn.
pub trait AudioSink {
    /// Start the looping engine rumble (idempotent).
    fn start_ambient_engine(&mut self);

    /// Stop the engine rumble, used on restart.
    fn stop_ambient_engine(&mut self) {}

    /// Set the engine level in `[0, 1]`.
    fn set_ambient_level(&mut self, level: f64);

    /// Play the arrival cue; also used for the manual horn.
    fn play_arrival_cue(&mut self);

    /// Mute or unmute everything routed through the sink.
    fn set_muted(&mut self, _muted: bool) {}
}

/// A single spoken announcement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub text: String,
    pub language: Language,
    pub rate: f32,
}

impl Utterance {
    #[must_use]
    pub fn new(text: impl Into<String>, language: Language) -> Self {
        Self {
            text: text.into(),
            language,
            rate: language.speech_rate(),
        }
    }

    /// Voice tag such as `de-DE`.
    #[must_use]
    pub const fn speech_tag(&self) -> &'static str {
        self.language.speech_tag()
    }
}

/// Speech synthesis with "cancel then speak" semantics.
pub trait SpeechSink {
    /// Whether the host actually has a speech engine.
    fn is_available(&self) -> bool {
        true
    }

    /// Drop any queued or in-flight utterance.
    fn cancel(&mut self);

    /// Speak an utterance. Callers cancel first; at most one is in flight.
    fn speak(&mut self, utterance: &Utterance);
}

/// Audio sink for hosts without audio.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn start_ambient_engine(&mut self) {}
    fn set_ambient_level(&mut self, _level: f64) {}
    fn play_arrival_cue(&mut self) {}
}

/// Speech sink for hosts without a speech engine; the journey continues silently.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSpeech;

impl SpeechSink for NullSpeech {
    fn is_available(&self) -> bool {
        false
    }
    fn cancel(&mut self) {}
    fn speak(&mut self, _utterance: &Utterance) {}
}

/// Direction for the guided detail tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailScroll {
    Top,
    Bottom,
}

/// Viewport work the host performs on the engine's behalf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", content = "value", rename_all = "snake_case")]
pub enum HostEffect {
    /// Jump the page to an absolute scroll offset in pixels, without animation.
    ScrollTo(f64),
    /// Scroll the page by `delta` pixels. Autopilot steps jump (`smooth` is
    /// false) so the page never lags behind the mirrored offset.
    ScrollBy { delta: f64, smooth: bool },
    /// Show the detail view for a station index.
    OpenDetail(usize),
    CloseDetail,
    ScrollDetail(DetailScroll),
    /// Show the one-time controls hint.
    ShowControlsHint,
    /// Text for the screen-reader live region.
    Status(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utterance_carries_language_pacing() {
        let en = Utterance::new("Next Station: Softoo", Language::En);
        assert_eq!(en.speech_tag(), "en-US");
        assert!((en.rate - 0.9).abs() < f32::EPSILON);
        let de = Utterance::new("Nächster Halt", Language::De);
        assert_eq!(de.speech_tag(), "de-DE");
        assert!((de.rate - 0.85).abs() < f32::EPSILON);
    }

    #[test]
    fn null_speech_reports_missing_engine() {
        let mut speech = NullSpeech;
        assert!(!speech.is_available());
        speech.cancel();
        speech.speak(&Utterance::new("ignored", Language::En));
    }

    #[test]
    fn host_effects_serialize_with_tags() {
        let json = serde_json::to_string(&HostEffect::ScrollTo(120.0)).unwrap();
        assert_eq!(json, r#"{"effect":"scroll_to","value":120.0}"#);
        let json = serde_json::to_string(&HostEffect::CloseDetail).unwrap();
        assert_eq!(json, r#"{"effect":"close_detail"}"#);
        let json = serde_json::to_string(&HostEffect::ScrollBy {
            delta: 3.0,
            smooth: false,
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"effect":"scroll_by","value":{"delta":3.0,"smooth":false}}"#
        );
    }
}
