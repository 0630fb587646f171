//! Sinks that record what the engine asked of them, for headless hosts and
//! tests.

use crate::effects::{AudioSink, SpeechSink, Utterance};

/// Audio sink that remembers what it was asked to do.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingAudio {
    pub engine_running: bool,
    pub cues: usize,
    pub levels: Vec<f64>,
    pub muted: bool,
}

impl AudioSink for RecordingAudio {
    fn start_ambient_engine(&mut self) {
        self.engine_running = true;
    }

    fn stop_ambient_engine(&mut self) {
        self.engine_running = false;
    }

    fn set_ambient_level(&mut self, level: f64) {
        self.levels.push(level);
    }

    fn play_arrival_cue(&mut self) {
        self.cues += 1;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

/// Speech sink that is always available and keeps every utterance.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingSpeech {
    pub cancels: usize,
    pub spoken: Vec<Utterance>,
}

impl SpeechSink for RecordingSpeech {
    fn cancel(&mut self) {
        self.cancels += 1;
    }

    fn speak(&mut self, utterance: &Utterance) {
        self.spoken.push(utterance.clone());
    }
}
