//! Glue between the journey session and the page: per-tick frame capture and
//! translation of engine effects into DOM work.

use railfolio_core::{
    AudioSink, DetailScroll, HostEffect, HudSnapshot, JourneySession, Language, SpeechSink,
};

/// Cap on a single tick so a backgrounded tab does not replay minutes of motion.
pub const MAX_TICK_MS: u64 = 250;
pub const TICK_INTERVAL_MS: i32 = 16;

/// Everything the page view reads for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub started: bool,
    pub muted: bool,
    pub demo: bool,
    pub language: Language,
    pub hud: HudSnapshot,
    pub displayed: f64,
    pub translation: f64,
    pub announcement: String,
    pub current_station: Option<usize>,
    pub detail: Option<usize>,
    pub controls_hint: bool,
}

impl Frame {
    #[must_use]
    pub fn capture<A: AudioSink, S: SpeechSink>(session: &JourneySession<A, S>) -> Self {
        let displayed = session.progress().displayed;
        Self {
            started: session.is_started(),
            muted: session.is_muted(),
            demo: session.mode().is_demo(),
            language: session.language(),
            hud: session.hud(),
            displayed,
            translation: session
                .journey()
                .track_translation(displayed, session.viewport()),
            announcement: session.announcement().text.clone(),
            current_station: session.arrival().current_station,
            detail: session.active_detail_index(),
            controls_hint: false,
        }
    }
}

/// DOM work requested by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum PageAction {
    ScrollTo(f64),
    ScrollBy { delta: f64, smooth: bool },
    /// Scroll the detail body; `None` scrolls to the bottom.
    ScrollDetail(Option<f64>),
    Announce(String),
}

/// Host-only UI state fed by engine effects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlay {
    pub controls_hint: bool,
}

impl Overlay {
    pub fn apply(&mut self, effects: impl IntoIterator<Item = HostEffect>) -> Vec<PageAction> {
        effects
            .into_iter()
            .filter_map(|effect| match effect {
                HostEffect::ScrollTo(y) => Some(PageAction::ScrollTo(y)),
                HostEffect::ScrollBy { delta, smooth } => {
                    Some(PageAction::ScrollBy { delta, smooth })
                }
                HostEffect::ScrollDetail(DetailScroll::Top) => {
                    Some(PageAction::ScrollDetail(Some(0.0)))
                }
                HostEffect::ScrollDetail(DetailScroll::Bottom) => {
                    Some(PageAction::ScrollDetail(None))
                }
                HostEffect::Status(text) => Some(PageAction::Announce(text)),
                HostEffect::ShowControlsHint => {
                    self.controls_hint = true;
                    None
                }
                // The session already tracks the open detail; frames carry it.
                HostEffect::OpenDetail(_) | HostEffect::CloseDetail => None,
            })
            .collect()
    }

    pub fn dismiss_hint(&mut self) {
        self.controls_hint = false;
    }

    /// Stamp host-only state onto a captured frame.
    #[must_use]
    pub fn decorate(&self, mut frame: Frame) -> Frame {
        frame.controls_hint = self.controls_hint && frame.started;
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use railfolio_core::{
        Command, CommandOutcome, JourneyMode, NullAudio, NullSpeech, StaticDataLoader,
        build_session,
    };

    #[test]
    fn effects_become_page_actions_in_order() {
        let mut overlay = Overlay::default();
        let actions = overlay.apply([
            HostEffect::ScrollTo(0.0),
            HostEffect::ShowControlsHint,
            HostEffect::Status("Next Station: Berlin".to_string()),
            HostEffect::ScrollDetail(DetailScroll::Bottom),
            HostEffect::ScrollBy {
                delta: 3.0,
                smooth: false,
            },
        ]);
        assert_eq!(
            actions,
            vec![
                PageAction::ScrollTo(0.0),
                PageAction::Announce("Next Station: Berlin".to_string()),
                PageAction::ScrollDetail(None),
                PageAction::ScrollBy {
                    delta: 3.0,
                    smooth: false,
                },
            ]
        );
        assert!(overlay.controls_hint);
    }

    #[test]
    fn normal_start_shows_the_hint_after_its_delay() {
        let mut session = build_session(&StaticDataLoader, NullAudio, NullSpeech).unwrap();
        let mut overlay = Overlay::default();
        session.start(JourneyMode::normal(), Language::De).unwrap();
        let actions = overlay.apply(session.drain_effects());
        assert_eq!(actions, vec![PageAction::ScrollTo(0.0)]);
        assert!(!overlay.controls_hint);

        session.advance(1000);
        overlay.apply(session.drain_effects());
        let frame = overlay.decorate(Frame::capture(&session));
        assert!(frame.controls_hint);
        assert!(frame.started);
        assert!(!frame.demo);
        assert_eq!(frame.language, Language::De);
        assert_eq!(frame.hud.station_label, "Hauptbahnhof");

        overlay.dismiss_hint();
        assert!(!overlay.decorate(Frame::capture(&session)).controls_hint);
    }

    #[test]
    fn idle_frames_never_show_the_hint() {
        let mut session = build_session(&StaticDataLoader, NullAudio, NullSpeech).unwrap();
        let overlay = Overlay {
            controls_hint: true,
        };
        assert_eq!(session.command(Command::Horn), CommandOutcome::Ignored);
        let frame = overlay.decorate(Frame::capture(&session));
        assert!(!frame.started);
        assert!(!frame.controls_hint);
        assert!(frame.translation.abs() < f64::EPSILON);
    }
}
