use smallvec::SmallVec;

use super::arrival::{ArrivalController, ArrivalPhase, ArrivalState};
use super::autopilot::AutopilotDriver;
use super::banner::{AnnouncementBanner, AnnouncementState, BannerInput, DelayZone};
use super::command::{Command, CommandOutcome};
use super::event::{EventKind, EventLog, JourneyEvent};
use super::progress::{ProgressOrigin, ProgressSource};
use super::scanner::StationScanner;
use super::smoother::{MotionSmoother, ProgressState};
use super::timers::{TimerSlot, Timers};
use super::track::{Journey, Station, Viewport};
use super::{JourneyCfg, JourneyConfigError, JourneyMode};
use crate::constants::{
    AMBIENT_BASE_LEVEL, AMBIENT_CRUISE_LEVEL, AMBIENT_IDLE_LEVEL, AMBIENT_SPEED_GAIN,
    AMBIENT_SPEED_SCALE_PX,
};
use crate::effects::{
    AudioSink, DetailScroll, HostEffect, NullAudio, NullSpeech, SpeechSink, Utterance,
};
use crate::hud::{HudInput, HudSnapshot};
use crate::locale::Language;
use crate::numbers::{millis_to_secs, usize_to_f64};

/// Host-facing owner of all journey state.
///
/// Every host interaction (scroll, frame tick, key press, click, detail close,
/// restart, resize) goes through this type. Viewport work is queued as
/// [`HostEffect`]s; audio and speech go straight to the owned sinks.
#[derive(Debug)]
pub struct JourneySession<A = NullAudio, S = NullSpeech>
where
    A: AudioSink,
    S: SpeechSink,
{
    cfg: JourneyCfg,
    journey: Journey,
    viewport: Viewport,
    thresholds: Vec<Option<f64>>,
    zone: Option<DelayZone>,
    mode: JourneyMode,
    language: Language,
    started: bool,
    muted: bool,
    source: ProgressSource,
    smoother: MotionSmoother,
    arrival: ArrivalController,
    autopilot: AutopilotDriver,
    timers: Timers,
    announcement: AnnouncementState,
    last_displayed: f64,
    ambient_level: f64,
    active_detail: Option<usize>,
    effects: SmallVec<[HostEffect; 4]>,
    events: EventLog,
    audio: A,
    speech: S,
}

impl<A: AudioSink, S: SpeechSink> JourneySession<A, S> {
    /// Build an idle session; call [`Self::start`] to begin a run.
    ///
    /// # Errors
    ///
    /// Returns `JourneyConfigError` when `cfg` fails validation.
    pub fn new(
        cfg: JourneyCfg,
        journey: Journey,
        audio: A,
        speech: S,
    ) -> Result<Self, JourneyConfigError> {
        cfg.validate()?;
        let smoother = MotionSmoother::new(cfg.smoothing.clone());
        let autopilot = AutopilotDriver::new(cfg.autopilot.clone());
        let mut session = Self {
            cfg,
            journey,
            viewport: Viewport::default(),
            thresholds: Vec::new(),
            zone: None,
            mode: JourneyMode::default(),
            language: Language::default(),
            started: false,
            muted: false,
            source: ProgressSource::new(),
            smoother,
            arrival: ArrivalController::new(),
            autopilot,
            timers: Timers::new(),
            announcement: AnnouncementState::default(),
            last_displayed: 0.0,
            ambient_level: AMBIENT_IDLE_LEVEL,
            active_detail: None,
            effects: SmallVec::new(),
            events: EventLog::new(),
            audio,
            speech,
        };
        session.refresh_layout();
        Ok(session)
    }

    /// Begin a run in `mode`, narrated in `language`.
    ///
    /// # Errors
    ///
    /// Returns `JourneyConfigError` when the mode parameters are out of range;
    /// the session is left idle.
    pub fn start(
        &mut self,
        mode: JourneyMode,
        language: Language,
    ) -> Result<(), JourneyConfigError> {
        mode.validate()?;
        self.reset_run();
        self.mode = mode;
        self.language = language;
        self.started = true;

        self.speech.cancel();
        self.audio.start_ambient_engine();
        self.audio.play_arrival_cue();
        self.autopilot.set_enabled(mode.is_demo());
        if !mode.is_demo() {
            self.timers
                .schedule(TimerSlot::ControlsHint, self.cfg.timing.controls_hint_delay_ms);
        }
        self.effects.push(HostEffect::ScrollTo(0.0));
        self.record(
            EventKind::JourneyStarted,
            None,
            serde_json::json!({ "mode": mode, "language": language }),
        );
        log::debug!("journey started ({mode:?}, {language})");
        Ok(())
    }

    /// Stop the run and return to the idle state. Pending timers never fire.
    pub fn restart(&mut self) {
        let had_detail = self.active_detail.is_some();
        self.speech.cancel();
        self.audio.stop_ambient_engine();
        self.reset_run();
        self.mode = JourneyMode::default();
        self.started = false;
        self.effects.clear();
        if had_detail {
            self.effects.push(HostEffect::CloseDetail);
        }
        self.effects.push(HostEffect::ScrollTo(0.0));
        self.record(EventKind::JourneyRestarted, None, serde_json::Value::Null);
        log::debug!("journey restarted");
    }

    /// Update the viewport; thresholds and the delay zone are recomputed.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.refresh_layout();
    }

    /// Absolute scroll offset reported by the host.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        if !self.started {
            return false;
        }
        let accepted = self.source.on_scroll(scroll_y, &self.viewport);
        self.after_input(accepted, scroll_y)
    }

    /// Normalized progress from hosts that have no scrollable document.
    pub fn on_progress(&mut self, progress: f64) -> bool {
        if !self.started {
            return false;
        }
        let accepted = self.source.set_progress(progress, &self.viewport);
        self.after_input(accepted, progress)
    }

    /// Advance virtual time by `elapsed_ms`, running motion frames and firing
    /// due timers in chronological order.
    pub fn advance(&mut self, elapsed_ms: u64) {
        let end = self.timers.now_ms().saturating_add(elapsed_ms);
        let frame_ms = self.cfg.autopilot.tick_ms.max(1);
        self.fire_due();
        while self.timers.now_ms() < end {
            let now = self.timers.now_ms();
            let mut until = now.saturating_add(frame_ms).min(end);
            if let Some((_, at)) = self.timers.next_due(until) {
                until = until.min(at);
            }
            self.timers.advance_to(until);
            self.frame(until - now);
            self.fire_due();
        }
    }

    /// Apply a rider command.
    pub fn command(&mut self, command: Command) -> CommandOutcome {
        if !self.started || self.arrival.is_locked() || self.active_detail.is_some() {
            return CommandOutcome::Ignored;
        }
        match command {
            Command::StepForward => self.step(self.cfg.key_step_px),
            Command::StepBack => self.step(-self.cfg.key_step_px),
            Command::Brake => CommandOutcome::Consumed,
            Command::Horn => {
                self.audio.play_arrival_cue();
                self.record(EventKind::HornSounded, None, serde_json::Value::Null);
                CommandOutcome::Applied
            }
            Command::Restart => {
                self.restart();
                CommandOutcome::Applied
            }
        }
    }

    /// Open the detail view for a station the rider clicked.
    pub fn select_station(&mut self, index: usize) -> bool {
        if !self.started || index >= self.journey.len() {
            return false;
        }
        self.open_detail(index);
        true
    }

    /// Close the open detail view. In the guided demo this starts resuming
    /// when the train is stopped.
    pub fn close_detail(&mut self) -> bool {
        let Some(index) = self.active_detail.take() else {
            return false;
        };
        self.source.set_detail_open(false);
        for slot in [
            TimerSlot::DetailOpen,
            TimerSlot::TourScrollDown,
            TimerSlot::TourScrollUp,
            TimerSlot::TourClose,
        ] {
            self.timers.cancel(slot);
        }
        self.effects.push(HostEffect::CloseDetail);
        self.record(EventKind::DetailClosed, Some(index), serde_json::Value::Null);

        if self.mode.is_demo() && self.arrival.begin_resume() {
            self.timers
                .schedule(TimerSlot::ResumeRelease, self.cfg.timing.demo_resume_delay_ms);
            self.record(
                EventKind::ResumeStarted,
                self.arrival.state().current_station,
                serde_json::Value::Null,
            );
        }
        true
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.audio.set_muted(muted);
    }

    /// Switch narration language; the delay banner follows immediately.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        self.update_banner(self.last_displayed);
    }

    /// Take every queued host effect.
    pub fn drain_effects(&mut self) -> SmallVec<[HostEffect; 4]> {
        std::mem::take(&mut self.effects)
    }

    pub fn events(&self) -> impl Iterator<Item = &JourneyEvent> {
        self.events.iter()
    }

    #[must_use]
    pub const fn progress(&self) -> ProgressState {
        ProgressState {
            raw: self.source.raw(),
            displayed: self.smoother.displayed(),
            velocity: self.smoother.velocity(),
        }
    }

    #[must_use]
    pub const fn phase(&self) -> ArrivalPhase {
        self.arrival.phase()
    }

    #[must_use]
    pub const fn arrival(&self) -> &ArrivalState {
        self.arrival.state()
    }

    #[must_use]
    pub const fn announcement(&self) -> &AnnouncementState {
        &self.announcement
    }

    #[must_use]
    pub fn hud(&self) -> HudSnapshot {
        let state = self.arrival.state();
        HudSnapshot::derive(
            &self.journey,
            &HudInput {
                progress: self.smoother.displayed(),
                velocity: self.smoother.velocity(),
                locked: state.locked,
                at_station: state.at_station(),
                language: self.language,
            },
        )
    }

    #[must_use]
    pub const fn active_detail_index(&self) -> Option<usize> {
        self.active_detail
    }

    #[must_use]
    pub fn active_detail(&self) -> Option<&Station> {
        self.active_detail.and_then(|index| self.journey.station(index))
    }

    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.started
    }

    #[must_use]
    pub const fn is_muted(&self) -> bool {
        self.muted
    }

    #[must_use]
    pub const fn mode(&self) -> JourneyMode {
        self.mode
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub const fn journey(&self) -> &Journey {
        &self.journey
    }

    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn thresholds(&self) -> &[Option<f64>] {
        &self.thresholds
    }

    #[must_use]
    pub const fn timers(&self) -> &Timers {
        &self.timers
    }

    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    /// Scroll offset matching the current raw progress.
    #[must_use]
    pub const fn scroll_y(&self) -> f64 {
        self.source.scroll_y()
    }

    #[must_use]
    pub const fn ambient_level(&self) -> f64 {
        self.ambient_level
    }

    #[must_use]
    pub const fn audio(&self) -> &A {
        &self.audio
    }

    #[must_use]
    pub const fn speech(&self) -> &S {
        &self.speech
    }

    fn refresh_layout(&mut self) {
        self.thresholds = self.journey.thresholds(&self.viewport);
        let threshold_of = |id: &str| {
            self.journey
                .index_of(id)
                .and_then(|index| self.thresholds.get(index).copied().flatten())
        };
        self.zone = DelayZone::between(
            threshold_of(&self.cfg.banner.delay_zone_from),
            threshold_of(&self.cfg.banner.delay_zone_to),
        );
        if self.zone.is_none() {
            log::debug!(
                "no delay zone between `{}` and `{}` for this viewport",
                self.cfg.banner.delay_zone_from,
                self.cfg.banner.delay_zone_to
            );
        }
    }

    fn reset_run(&mut self) {
        self.timers.cancel_all();
        self.source.reset();
        self.smoother.reset();
        self.arrival.reset();
        self.autopilot.reset();
        self.announcement = AnnouncementState::default();
        self.last_displayed = 0.0;
        self.ambient_level = AMBIENT_IDLE_LEVEL;
        self.active_detail = None;
        self.events.next_run();
    }

    fn after_input(&mut self, accepted: bool, value: f64) -> bool {
        if accepted {
            self.smoother.set_target(self.source.raw());
        } else if !value.is_finite() {
            self.record(
                EventKind::InputRejected,
                None,
                serde_json::json!({ "value": value.to_string() }),
            );
        }
        accepted
    }

    fn step(&mut self, delta_px: f64) -> CommandOutcome {
        if self
            .source
            .nudge(ProgressOrigin::Keyboard, delta_px, &self.viewport)
        {
            self.smoother.set_target(self.source.raw());
            self.effects.push(HostEffect::ScrollBy {
                delta: delta_px,
                smooth: true,
            });
            CommandOutcome::Applied
        } else {
            CommandOutcome::Ignored
        }
    }

    fn autopilot_gate(&self) -> bool {
        self.started
            && self.mode.is_demo()
            && self.arrival.state().is_en_route()
            && !self.source.is_gated()
    }

    fn frame(&mut self, dt_ms: u64) {
        if !self.started || dt_ms == 0 {
            return;
        }
        let gate = self.autopilot_gate();
        let steps = self.autopilot.tick(dt_ms, gate);
        if steps > 0 {
            let delta = usize_to_f64(usize::try_from(steps).unwrap_or(usize::MAX))
                * self.autopilot.step_px();
            if self
                .source
                .nudge(ProgressOrigin::Autopilot, delta, &self.viewport)
            {
                self.smoother.set_target(self.source.raw());
                self.effects.push(HostEffect::ScrollBy {
                    delta,
                    smooth: false,
                });
            }
        }

        let previous = self.last_displayed;
        let displayed = self.smoother.step(millis_to_secs(dt_ms));
        self.last_displayed = displayed;
        self.update_banner(displayed);

        if self.viewport.scroll_range().is_none() {
            return;
        }
        let state = self.arrival.state();
        let en_route = state.is_en_route() && !state.locked;
        if let Some(index) = StationScanner::scan(
            &self.thresholds,
            previous,
            displayed,
            state.last_resolved,
            en_route,
        ) {
            self.arrive(index);
        } else {
            self.follow_velocity();
        }
    }

    fn update_banner(&mut self, displayed: f64) {
        let state = self.arrival.state();
        let next = AnnouncementBanner::update(
            &self.announcement,
            &BannerInput {
                displayed,
                language: self.language,
                at_station: state.at_station(),
                zone: self.zone,
                stopped_at: state.stopped_at,
                tolerance: self.cfg.banner.arrival_tolerance,
            },
        );
        self.set_announcement(next);
    }

    fn set_announcement(&mut self, next: AnnouncementState) {
        if next != self.announcement {
            self.announcement = next;
            self.record(
                EventKind::AnnouncementChanged,
                None,
                serde_json::json!({ "text": self.announcement.text }),
            );
            if !self.announcement.is_empty() {
                self.effects
                    .push(HostEffect::Status(self.announcement.text.clone()));
            }
        }
    }

    fn follow_velocity(&mut self) {
        if !self.started || self.muted || !self.arrival.state().is_en_route() {
            return;
        }
        let range = self.viewport.scroll_range().unwrap_or(0.0);
        let speed = (self.smoother.velocity() * range).abs() / AMBIENT_SPEED_SCALE_PX;
        let level = speed.clamp(0.0, 1.0) * AMBIENT_SPEED_GAIN + AMBIENT_BASE_LEVEL;
        self.set_ambient(level);
    }

    fn set_ambient(&mut self, level: f64) {
        if (level - self.ambient_level).abs() > 1e-3 || level <= AMBIENT_IDLE_LEVEL {
            self.ambient_level = level;
            self.audio.set_ambient_level(level);
        }
    }

    fn arrive(&mut self, index: usize) {
        let Some(threshold) = self.thresholds.get(index).copied().flatten() else {
            return;
        };
        if !self.arrival.arrive(index, threshold) {
            return;
        }
        self.source.set_locked(true);
        self.source.set_snapping(true);
        for slot in [
            TimerSlot::Dwell,
            TimerSlot::ResumeRelease,
            TimerSlot::DetailOpen,
        ] {
            self.timers.cancel(slot);
        }
        self.speech.cancel();

        self.smoother.snap(threshold);
        self.source.force(threshold, &self.viewport);
        self.last_displayed = threshold;
        let target_scroll = self.viewport.scroll_for_progress(threshold).unwrap_or(0.0);
        self.effects.push(HostEffect::ScrollTo(target_scroll));
        self.timers
            .schedule(TimerSlot::SnapRelease, self.cfg.timing.snap_release_ms);
        self.record(
            EventKind::StationArrived,
            Some(index),
            serde_json::json!({ "threshold": threshold, "scroll_to": target_scroll }),
        );

        self.audio.play_arrival_cue();
        self.set_ambient(AMBIENT_IDLE_LEVEL);
        if let Some(station) = self.journey.station(index) {
            let utterance = Utterance::new(
                self.language
                    .arrival_announcement(station.content.title(self.language)),
                self.language,
            );
            if self.speech.is_available() {
                self.speech.cancel();
                self.speech.speak(&utterance);
            }
            self.effects.push(HostEffect::Status(utterance.text));
        }
        self.timers.schedule(
            TimerSlot::StoppedBanner,
            self.cfg.timing.stopped_banner_delay_ms,
        );
        match self.mode {
            JourneyMode::Normal { dwell_ms } => self.timers.schedule(TimerSlot::Dwell, dwell_ms),
            JourneyMode::GuidedDemo => self
                .timers
                .schedule(TimerSlot::DetailOpen, self.cfg.timing.demo_detail_delay_ms),
        }
        self.arrival.settle();
    }

    fn open_detail(&mut self, index: usize) {
        self.active_detail = Some(index);
        self.source.set_detail_open(true);
        self.effects.push(HostEffect::OpenDetail(index));
        self.record(EventKind::DetailOpened, Some(index), serde_json::Value::Null);
        if self.mode.is_demo() {
            let timing = &self.cfg.timing;
            let (down, up, close) = (
                timing.tour_scroll_down_ms,
                timing.tour_scroll_up_ms,
                timing.tour_close_ms,
            );
            self.timers.schedule(TimerSlot::TourScrollDown, down);
            self.timers.schedule(TimerSlot::TourScrollUp, up);
            self.timers.schedule(TimerSlot::TourClose, close);
        }
    }

    fn unlock(&mut self) {
        self.source.set_locked(false);
        self.record(
            EventKind::MotionResumed,
            self.arrival.state().last_resolved,
            serde_json::Value::Null,
        );
    }

    fn fire_due(&mut self) {
        while let Some((slot, _)) = self.timers.next_due(self.timers.now_ms()) {
            if self.timers.take_due(slot) {
                self.fire(slot);
            }
        }
    }

    fn fire(&mut self, slot: TimerSlot) {
        log::debug!("timer {slot:?} fired at {} ms", self.timers.now_ms());
        match slot {
            TimerSlot::SnapRelease => {
                self.arrival.release_snap();
                self.source.set_snapping(false);
                self.record(
                    EventKind::SnapReleased,
                    self.arrival.state().current_station,
                    serde_json::Value::Null,
                );
            }
            TimerSlot::Dwell => {
                if self.arrival.begin_resume() && self.arrival.finish_resume() {
                    self.unlock();
                }
            }
            TimerSlot::DetailOpen => {
                let state = self.arrival.state();
                if state.phase == ArrivalPhase::Stopped
                    && let Some(index) = state.current_station
                {
                    self.open_detail(index);
                }
            }
            TimerSlot::ResumeRelease => {
                if self.arrival.finish_resume() {
                    self.unlock();
                    self.set_ambient(AMBIENT_CRUISE_LEVEL);
                }
            }
            TimerSlot::StoppedBanner => {
                let state = self.arrival.state();
                if AnnouncementBanner::still_stopped(
                    self.smoother.displayed(),
                    state.stopped_at,
                    self.cfg.banner.arrival_tolerance,
                ) {
                    self.set_announcement(AnnouncementBanner::stopped(self.language));
                }
            }
            TimerSlot::ControlsHint => {
                self.effects.push(HostEffect::ShowControlsHint);
                self.record(EventKind::ControlsHintShown, None, serde_json::Value::Null);
            }
            TimerSlot::TourScrollDown => {
                self.effects
                    .push(HostEffect::ScrollDetail(DetailScroll::Bottom));
            }
            TimerSlot::TourScrollUp => {
                self.effects.push(HostEffect::ScrollDetail(DetailScroll::Top));
            }
            TimerSlot::TourClose => {
                self.close_detail();
            }
        }
    }

    fn record(&mut self, kind: EventKind, station: Option<usize>, payload: serde_json::Value) {
        self.events.push(self.timers.now_ms(), kind, station, payload);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{StationContent, StationData, StationKind};
    use crate::journey::{LayoutConfig, SmoothingConfig};

    fn station(id: &str) -> StationContent {
        StationContent {
            id: id.to_string(),
            kind: StationKind::Professional,
            year: "2024".to_string(),
            title: format!("Station {id}"),
            title_de: None,
            subtitle: String::new(),
            subtitle_de: None,
            institution: String::new(),
            institution_de: None,
            description: String::new(),
            description_de: None,
            highlights: Vec::new(),
            highlights_de: None,
        }
    }

    /// Three stations at thresholds 0.2 / 0.5 / 0.8 with a 10 000 px scroll range.
    fn session(smoothing: SmoothingConfig) -> JourneySession {
        let layout = LayoutConfig {
            station_spacing: 1200.0,
            station_offset: 0.0,
            tail_padding: 200.0,
            anchor_ratio: 0.0,
            anchor_offset: 400.0,
        };
        let cfg = JourneyCfg {
            layout: layout.clone(),
            smoothing,
            ..JourneyCfg::default_config()
        };
        let data = StationData {
            stations: vec![station("a"), station("b"), station("c")],
            skills: std::collections::BTreeMap::new(),
        };
        let journey = Journey::new(data, &layout).unwrap();
        let mut session = JourneySession::new(cfg, journey, NullAudio, NullSpeech).unwrap();
        session.resize(Viewport::new(1000.0, 1000.0, 11_000.0));
        session
    }

    #[test]
    fn thresholds_follow_the_layout() {
        let session = session(SmoothingConfig::passthrough());
        assert_eq!(session.thresholds(), &[Some(0.2), Some(0.5), Some(0.8)]);
    }

    #[test]
    fn input_is_ignored_before_start() {
        let mut session = session(SmoothingConfig::passthrough());
        assert!(!session.on_scroll(3000.0));
        assert_eq!(session.command(Command::StepForward), CommandOutcome::Ignored);
        assert!(!session.select_station(0));
        session.advance(100);
        assert!(session.progress().displayed.abs() < f64::EPSILON);
    }

    #[test]
    fn normal_stop_unlocks_after_dwell() {
        let mut session = session(SmoothingConfig::passthrough());
        session.start(JourneyMode::normal(), Language::En).unwrap();
        session.on_progress(0.25);
        session.advance(16);
        assert_eq!(session.phase(), ArrivalPhase::Stopped);
        assert!((session.progress().displayed - 0.2).abs() < 1e-9);
        assert!(session.arrival().locked);

        session.advance(99);
        assert!(session.arrival().snapping);
        session.advance(1);
        assert!(!session.arrival().snapping);
        session.advance(899);
        assert!(session.arrival().locked);
        session.advance(1);
        assert_eq!(session.phase(), ArrivalPhase::EnRoute);
        assert!(!session.arrival().locked);
        assert_eq!(session.arrival().last_resolved, Some(0));
    }

    #[test]
    fn controls_hint_only_in_normal_mode() {
        let mut session = session(SmoothingConfig::passthrough());
        session.start(JourneyMode::normal(), Language::En).unwrap();
        session.advance(1000);
        assert!(
            session
                .drain_effects()
                .contains(&HostEffect::ShowControlsHint)
        );

        session.start(JourneyMode::GuidedDemo, Language::En).unwrap();
        session.advance(1000);
        assert!(
            !session
                .drain_effects()
                .contains(&HostEffect::ShowControlsHint)
        );
    }

    #[test]
    fn keys_step_and_respect_the_lock() {
        let mut session = session(SmoothingConfig::passthrough());
        session.start(JourneyMode::normal(), Language::En).unwrap();
        session.drain_effects();
        assert_eq!(session.command(Command::StepForward), CommandOutcome::Applied);
        assert_eq!(
            session.drain_effects().as_slice(),
            &[HostEffect::ScrollBy {
                delta: 300.0,
                smooth: true
            }]
        );
        assert!((session.progress().raw - 0.03).abs() < 1e-12);
        assert_eq!(session.command(Command::Brake), CommandOutcome::Consumed);
        assert_eq!(session.command(Command::StepBack), CommandOutcome::Applied);
        assert!(session.progress().raw.abs() < 1e-12);

        session.on_progress(0.21);
        session.advance(16);
        assert!(session.arrival().locked);
        assert_eq!(session.command(Command::StepForward), CommandOutcome::Ignored);
        assert_eq!(session.command(Command::Horn), CommandOutcome::Ignored);
    }

    #[test]
    fn open_detail_blocks_scroll_and_keys() {
        let mut session = session(SmoothingConfig::passthrough());
        session.start(JourneyMode::normal(), Language::En).unwrap();
        assert!(session.select_station(2));
        assert_eq!(session.active_detail().map(Station::id), Some("c"));
        assert!(!session.on_progress(0.4));
        assert_eq!(session.command(Command::StepForward), CommandOutcome::Ignored);
        assert!(session.close_detail());
        assert!(!session.close_detail());
        assert!(session.on_progress(0.4));
    }

    #[test]
    fn flat_page_never_arrives() {
        let mut session = session(SmoothingConfig::passthrough());
        session.resize(Viewport::new(1000.0, 1000.0, 1000.0));
        session.start(JourneyMode::normal(), Language::En).unwrap();
        session.drain_effects();
        assert!(session.on_progress(0.3));
        session.advance(16);
        assert!(session.progress().raw.abs() < f64::EPSILON);
        assert!(session.progress().displayed.abs() < f64::EPSILON);
        assert_eq!(session.phase(), ArrivalPhase::EnRoute);
        assert!(
            !session
                .events()
                .any(|event| event.kind == EventKind::StationArrived)
        );
        assert!(
            !session
                .drain_effects()
                .iter()
                .any(|effect| matches!(effect, HostEffect::ScrollTo(_)))
        );
    }

    #[test]
    fn early_close_in_the_demo_cancels_the_pending_detail() {
        let mut session = session(SmoothingConfig::passthrough());
        session.start(JourneyMode::GuidedDemo, Language::En).unwrap();
        session.on_progress(0.25);
        session.advance(16);
        assert_eq!(session.phase(), ArrivalPhase::Stopped);

        session.advance(100);
        assert!(session.select_station(2));
        session.advance(1400);
        assert!(session.close_detail());
        assert_eq!(session.phase(), ArrivalPhase::Resuming);
        assert!(!session.timers().is_pending(TimerSlot::DetailOpen));

        session.advance(600);
        assert_eq!(session.active_detail_index(), None);
        assert_eq!(session.phase(), ArrivalPhase::Resuming);
        assert!(session.arrival().locked);
        session.advance(400);
        assert_eq!(session.phase(), ArrivalPhase::EnRoute);
        assert!(!session.arrival().locked);
        assert_eq!(session.active_detail_index(), None);
    }

    #[test]
    fn language_switch_updates_the_delay_banner() {
        let mut session = session(SmoothingConfig::passthrough());
        session.start(JourneyMode::normal(), Language::En).unwrap();
        session.set_language(Language::De);
        assert_eq!(session.language(), Language::De);
        assert!(session.announcement().is_empty());
    }
}
