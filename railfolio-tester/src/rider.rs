//! Headless host used by scenarios: recording sinks plus a small driver that
//! plays the page's role (drains effects, feeds scroll, waits on the clock).

use anyhow::{Context, Result};
use railfolio_core::recording::{RecordingAudio, RecordingSpeech};
use railfolio_core::{
    EventKind, HostEffect, JourneyCfg, JourneyMode, JourneySession, Language, StaticDataLoader,
    Viewport, build_session,
};

pub type RiderSession = JourneySession<RecordingAudio, RecordingSpeech>;

/// One frame at the browser's usual refresh rate.
pub const FRAME_MS: u64 = 16;

/// Drives a session the way the web page does, keeping every drained effect.
pub struct Rider {
    pub session: RiderSession,
    pub effects: Vec<HostEffect>,
    language: Language,
}

impl Rider {
    /// Build a session from the bundled station data and start it.
    pub fn board(mode: JourneyMode, language: Language, viewport: Viewport) -> Result<Self> {
        let mut session = build_session(
            &StaticDataLoader,
            RecordingAudio::default(),
            RecordingSpeech::default(),
        )
        .context("building journey session from bundled data")?;
        session.resize(viewport);
        session
            .start(mode, language)
            .with_context(|| format!("starting journey in {mode:?}"))?;
        let mut rider = Self {
            session,
            effects: Vec::new(),
            language,
        };
        rider.collect();
        Ok(rider)
    }

    pub const fn language(&self) -> Language {
        self.language
    }

    /// Timing the bundled loader hands the session.
    pub fn cfg() -> JourneyCfg {
        JourneyCfg::default_config()
    }

    fn collect(&mut self) {
        self.effects.extend(self.session.drain_effects());
    }

    /// Let `ms` of virtual time pass.
    pub fn wait(&mut self, ms: u64) {
        self.session.advance(ms);
        self.collect();
    }

    pub fn scroll(&mut self, scroll_y: f64) -> bool {
        let accepted = self.session.on_scroll(scroll_y);
        self.collect();
        accepted
    }

    pub fn push_progress(&mut self, progress: f64) -> bool {
        let accepted = self.session.on_progress(progress);
        self.collect();
        accepted
    }

    /// Feed `progress`, give it one frame, then sit out the normal dwell.
    pub fn ride_to(&mut self, progress: f64) {
        self.push_progress(progress);
        self.wait(FRAME_MS);
        let dwell_ms = match self.session.mode() {
            JourneyMode::Normal { dwell_ms } => dwell_ms,
            JourneyMode::GuidedDemo => 0,
        };
        self.wait(Self::cfg().timing.snap_release_ms.max(dwell_ms) + 100);
    }

    /// Scroll down in `step_px` increments, one frame each, until a station is
    /// reached or the page ends.
    pub fn scroll_until_arrival(&mut self, step_px: f64) -> Option<usize> {
        let start = self.arrivals().len();
        let limit = self.session.viewport().scroll_range().unwrap_or(0.0);
        let mut y = self.session.scroll_y();
        while self.arrivals().len() == start && y < limit {
            y = (y + step_px).min(limit);
            self.scroll(y);
            self.wait(FRAME_MS);
        }
        self.arrivals().get(start).copied()
    }

    /// Advance in frame-sized steps until `kind` shows up or `limit_ms` runs out.
    pub fn wait_for(&mut self, kind: EventKind, limit_ms: u64) -> Option<u64> {
        let deadline = self.session.now_ms().saturating_add(limit_ms);
        while self.session.now_ms() < deadline {
            if let Some(at) = self.event_ms(kind) {
                return Some(at);
            }
            self.wait(FRAME_MS * 10);
        }
        self.event_ms(kind)
    }

    /// Station indices in arrival order.
    pub fn arrivals(&self) -> Vec<usize> {
        self.session
            .events()
            .filter(|event| event.is(EventKind::StationArrived))
            .filter_map(|event| event.station)
            .collect()
    }

    pub fn event_ms(&self, kind: EventKind) -> Option<u64> {
        self.session
            .events()
            .find(|event| event.is(kind))
            .map(|event| event.at_ms)
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.session.events().filter(|event| event.is(kind)).count()
    }

    /// Threshold of a station by id at the current viewport.
    pub fn threshold_of(&self, id: &str) -> Result<f64> {
        let index = self
            .session
            .journey()
            .index_of(id)
            .with_context(|| format!("station {id} missing from the bundled data"))?;
        self.session
            .thresholds()
            .get(index)
            .copied()
            .flatten()
            .with_context(|| format!("station {id} has no threshold at this viewport"))
    }
}
