use anyhow::{Context, Result, ensure};
use railfolio_core::{
    AnnouncementSource, ArrivalPhase, Command, CommandOutcome, DetailScroll, EventKind,
    HostEffect, JourneyMode, Language, PROGRESS_EPSILON,
};

use super::JourneyScenario;
use crate::rider::{FRAME_MS, Rider};

/// Upper bound for waits on the guided tour, in virtual milliseconds.
const DEMO_PATIENCE_MS: u64 = 120_000;

/// Pixels per frame for a steady wheel scroll.
const SCROLL_STEP_PX: f64 = 40.0;

pub fn catalog_scenarios() -> Vec<JourneyScenario> {
    vec![
        JourneyScenario::new(
            "smoke",
            "Smoke Ride",
            "Board, scroll to the first station, hear the announcement",
            JourneyMode::normal(),
            smoke,
        ),
        JourneyScenario::new(
            "first-arrival-snap",
            "First Arrival Snap",
            "Scrolling past the first marker stops exactly on its threshold",
            JourneyMode::normal(),
            first_arrival_snap,
        ),
        JourneyScenario::new(
            "backward-crossing",
            "Backward Crossing",
            "Scrolling back over a resolved station never re-arrives",
            JourneyMode::normal(),
            backward_crossing,
        ),
        JourneyScenario::new(
            "ordered-arrivals",
            "Ordered Arrivals",
            "Every station is reached once, in track order, up to the ticket",
            JourneyMode::normal(),
            ordered_arrivals,
        ),
        JourneyScenario::new(
            "lock-exclusivity",
            "Lock Exclusivity",
            "While stopped, scroll, progress and keys cannot move the train",
            JourneyMode::normal(),
            lock_exclusivity,
        ),
        JourneyScenario::new(
            "keyboard-stepping",
            "Keyboard Stepping",
            "Arrow keys nudge the page, space brakes, the horn sounds",
            JourneyMode::normal(),
            keyboard_stepping,
        ),
        JourneyScenario::new(
            "detail-roundtrip",
            "Detail Roundtrip",
            "Opening a station detail freezes the ride until it closes",
            JourneyMode::normal(),
            detail_roundtrip,
        ),
        JourneyScenario::new(
            "delay-zone",
            "Delay Zone Banner",
            "The track work notice shows between Cottbus and Berlin only",
            JourneyMode::normal(),
            delay_zone,
        ),
        JourneyScenario::new(
            "language-switch",
            "Language Switch",
            "Switching language mid-ride changes the next announcement voice",
            JourneyMode::normal(),
            language_switch,
        ),
        JourneyScenario::new(
            "horn-and-mute",
            "Horn And Mute",
            "The horn reaches the audio sink and mute silences level updates",
            JourneyMode::normal(),
            horn_and_mute,
        ),
        JourneyScenario::new(
            "non-finite-input",
            "Non-finite Input",
            "NaN and infinite scroll values are rejected and logged",
            JourneyMode::normal(),
            non_finite_input,
        ),
        JourneyScenario::new(
            "demo-gating",
            "Guided Tour Gating",
            "The autopilot never moves the train while it is stopped",
            JourneyMode::GuidedDemo,
            demo_gating,
        ),
        JourneyScenario::new(
            "demo-delays",
            "Guided Tour Delays",
            "Detail open, tour close and resume run back to back",
            JourneyMode::GuidedDemo,
            demo_delays,
        ),
        JourneyScenario::new(
            "restart-idempotent",
            "Restart Idempotence",
            "Restarting twice equals restarting once and no timer survives",
            JourneyMode::GuidedDemo,
            restart_idempotent,
        ),
    ]
}

const fn other_language(language: Language) -> Language {
    match language {
        Language::En => Language::De,
        Language::De => Language::En,
    }
}

fn first_threshold(rider: &Rider) -> Result<f64> {
    rider
        .session
        .thresholds()
        .first()
        .copied()
        .flatten()
        .context("first station has no threshold")
}

fn smoke(rider: &mut Rider) -> Result<()> {
    ensure!(rider.session.is_started(), "journey did not start");
    ensure!(rider.session.audio().engine_running, "engine never started");
    ensure!(
        rider.session.audio().cues == 1,
        "expected one departure cue, heard {}",
        rider.session.audio().cues
    );
    ensure!(
        rider.session.speech().cancels >= 1,
        "start did not cancel pending speech"
    );
    ensure!(
        rider.effects.contains(&HostEffect::ScrollTo(0.0)),
        "start did not reset the page scroll"
    );
    let language = rider.language();
    ensure!(
        rider.session.hud().station_label == language.terminal_name(),
        "HUD should start at the terminal, shows {}",
        rider.session.hud().station_label
    );

    let arrived = rider.scroll_until_arrival(SCROLL_STEP_PX);
    ensure!(arrived == Some(0), "first arrival was {arrived:?}");
    let title = rider
        .session
        .journey()
        .station(0)
        .map(|station| station.content.title(language).to_string())
        .context("first station missing")?;
    let spoken = rider.session.speech().spoken.last().cloned();
    ensure!(
        spoken.as_ref().map(|u| u.text.as_str())
            == Some(language.arrival_announcement(&title).as_str()),
        "unexpected announcement {spoken:?}"
    );
    rider.wait(Rider::cfg().timing.controls_hint_delay_ms);
    ensure!(
        rider.effects.contains(&HostEffect::ShowControlsHint),
        "controls hint never appeared"
    );
    Ok(())
}

fn first_arrival_snap(rider: &mut Rider) -> Result<()> {
    let threshold = first_threshold(rider)?;
    let range = rider
        .session
        .viewport()
        .scroll_range()
        .context("viewport cannot scroll")?;

    let arrived = rider.scroll_until_arrival(SCROLL_STEP_PX);
    ensure!(arrived == Some(0), "first arrival was {arrived:?}");
    let progress = rider.session.progress();
    ensure!(
        (progress.displayed - threshold).abs() < PROGRESS_EPSILON,
        "displayed {} is not on threshold {threshold}",
        progress.displayed
    );
    ensure!(
        (progress.raw - threshold).abs() < PROGRESS_EPSILON,
        "raw {} is not on threshold {threshold}",
        progress.raw
    );
    ensure!(progress.velocity.abs() < f64::EPSILON, "train still moving");
    ensure!(rider.session.arrival().locked, "arrival did not take the lock");

    let expected = threshold * range;
    ensure!(
        rider.effects.iter().any(|effect| matches!(
            effect,
            HostEffect::ScrollTo(y) if (y - expected).abs() < 1e-6
        )),
        "no snap to scroll offset {expected}"
    );

    rider.wait(1100);
    ensure!(!rider.session.arrival().locked, "dwell never released the lock");
    ensure!(
        rider.session.phase() == ArrivalPhase::EnRoute,
        "expected en route after the dwell, got {:?}",
        rider.session.phase()
    );
    Ok(())
}

fn backward_crossing(rider: &mut Rider) -> Result<()> {
    let thresholds = rider.session.thresholds().to_vec();
    let (Some(Some(first)), Some(Some(second))) = (thresholds.first(), thresholds.get(1)) else {
        anyhow::bail!("need two stations with thresholds");
    };
    let between = (first + second) / 2.0;

    rider.ride_to(between);
    ensure!(rider.arrivals() == vec![0], "arrivals {:?}", rider.arrivals());

    for progress in [first - 0.05, first - 0.001, between] {
        rider.push_progress(progress);
        rider.wait(FRAME_MS);
    }
    rider.wait(500);
    ensure!(
        rider.arrivals() == vec![0],
        "re-crossing produced arrivals {:?}",
        rider.arrivals()
    );
    ensure!(
        rider.session.phase() == ArrivalPhase::EnRoute,
        "phase {:?}",
        rider.session.phase()
    );
    Ok(())
}

fn ordered_arrivals(rider: &mut Rider) -> Result<()> {
    let count = rider.session.journey().len();
    for _ in 0..count * 3 {
        if rider.session.progress().displayed >= 1.0 - PROGRESS_EPSILON {
            break;
        }
        rider.ride_to(1.0);
    }
    let expected: Vec<usize> = (0..count).collect();
    ensure!(
        rider.arrivals() == expected,
        "arrivals {:?}, expected {expected:?}",
        rider.arrivals()
    );
    ensure!(
        rider.session.arrival().last_resolved == count.checked_sub(1),
        "last resolved {:?}",
        rider.session.arrival().last_resolved
    );
    let hud = rider.session.hud();
    ensure!(hud.ticket_visible, "ticket hidden at the end of the line");
    ensure!(
        hud.next_station == count.checked_sub(1),
        "HUD points at {:?} at the terminus",
        hud.next_station
    );
    Ok(())
}

fn lock_exclusivity(rider: &mut Rider) -> Result<()> {
    let threshold = first_threshold(rider)?;
    rider.push_progress(threshold + 0.01);
    rider.wait(FRAME_MS);
    ensure!(rider.session.arrival().locked, "crossing did not lock");

    let before = rider.session.progress();
    let scroll_before = rider.session.scroll_y();
    ensure!(!rider.scroll(scroll_before + 5000.0), "scroll accepted while locked");
    ensure!(!rider.push_progress(0.9), "progress accepted while locked");
    ensure!(
        rider.session.command(Command::StepForward) == CommandOutcome::Ignored,
        "arrow key accepted while locked"
    );
    rider.wait(500);
    let after = rider.session.progress();
    ensure!(after.raw == before.raw, "raw moved from {} to {}", before.raw, after.raw);
    ensure!(
        (after.displayed - threshold).abs() < PROGRESS_EPSILON,
        "displayed drifted to {}",
        after.displayed
    );
    ensure!(
        (rider.session.scroll_y() - scroll_before).abs() < 1e-6,
        "scroll offset moved while locked"
    );
    Ok(())
}

fn keyboard_stepping(rider: &mut Rider) -> Result<()> {
    let step = Rider::cfg().key_step_px;
    ensure!(
        rider.session.command(Command::StepForward) == CommandOutcome::Applied,
        "arrow right was not applied"
    );
    ensure!(
        rider.session.drain_effects().as_slice()
            == [HostEffect::ScrollBy {
                delta: step,
                smooth: true
            }],
        "arrow right did not scroll by {step}"
    );
    ensure!(
        !rider.session.on_scroll(step / 2.0),
        "a lagging scroll report mid-step was accepted"
    );
    ensure!(
        (rider.session.scroll_y() - step).abs() < 1e-6,
        "a lagging scroll report dragged the train back to {}",
        rider.session.scroll_y()
    );
    ensure!(
        rider.session.command(Command::StepBack) == CommandOutcome::Applied,
        "arrow left was not applied"
    );
    ensure!(
        rider.session.drain_effects().as_slice()
            == [HostEffect::ScrollBy {
                delta: -step,
                smooth: true
            }],
        "arrow left did not scroll by {}",
        -step
    );
    let raw = rider.session.progress().raw;
    ensure!(
        rider.session.command(Command::Brake) == CommandOutcome::Consumed,
        "space was not consumed"
    );
    ensure!(rider.session.progress().raw == raw, "brake moved the train");
    ensure!(
        rider.session.command(Command::Horn) == CommandOutcome::Applied,
        "horn was not applied"
    );
    ensure!(rider.count(EventKind::HornSounded) == 1, "horn not logged");
    Ok(())
}

fn detail_roundtrip(rider: &mut Rider) -> Result<()> {
    let index = rider
        .session
        .journey()
        .index_of("berlin")
        .context("berlin missing")?;
    ensure!(rider.session.select_station(index), "detail did not open");
    rider.wait(FRAME_MS);
    ensure!(
        rider.effects.contains(&HostEffect::OpenDetail(index)),
        "no open-detail effect"
    );
    ensure!(
        rider.session.active_detail_index() == Some(index),
        "active detail {:?}",
        rider.session.active_detail_index()
    );
    ensure!(!rider.scroll(600.0), "page scroll accepted under the detail");
    ensure!(
        rider.session.command(Command::StepForward) == CommandOutcome::Ignored,
        "arrow key accepted under the detail"
    );

    ensure!(rider.session.close_detail(), "detail did not close");
    rider.wait(FRAME_MS);
    ensure!(
        rider.effects.contains(&HostEffect::CloseDetail),
        "no close-detail effect"
    );
    ensure!(!rider.session.close_detail(), "second close reported success");
    ensure!(rider.scroll(600.0), "scroll still swallowed after closing");
    Ok(())
}

fn delay_zone(rider: &mut Rider) -> Result<()> {
    let cottbus = rider.threshold_of("cottbus")?;
    let berlin = rider.threshold_of("berlin")?;
    let cottbus_index = rider
        .session
        .journey()
        .index_of("cottbus")
        .context("cottbus missing")?;
    let middle = (cottbus + berlin) / 2.0;

    for _ in 0..rider.session.journey().len() * 2 {
        if rider.session.arrival().last_resolved == Some(cottbus_index) {
            break;
        }
        rider.ride_to(middle);
    }
    ensure!(
        rider.session.arrival().last_resolved == Some(cottbus_index),
        "never reached cottbus, arrivals {:?}",
        rider.arrivals()
    );
    rider.push_progress(middle);
    rider.wait(500);

    let language = rider.language();
    let banner = rider.session.announcement().clone();
    ensure!(
        banner.source == AnnouncementSource::DelayZone,
        "banner source {:?}",
        banner.source
    );
    ensure!(banner.text == language.delay_message(), "banner text {}", banner.text);

    let other = other_language(language);
    rider.session.set_language(other);
    ensure!(
        rider.session.announcement().text == other.delay_message(),
        "banner did not follow the language switch"
    );
    rider.session.set_language(language);

    rider.push_progress(1.0);
    rider.wait(200);
    let berlin_index = rider
        .session
        .journey()
        .index_of("berlin")
        .context("berlin missing")?;
    ensure!(
        rider.arrivals().last() == Some(&berlin_index),
        "did not stop in berlin, arrivals {:?}",
        rider.arrivals()
    );
    ensure!(
        rider.session.announcement().is_empty(),
        "banner left up at the terminus"
    );
    Ok(())
}

fn language_switch(rider: &mut Rider) -> Result<()> {
    let other = other_language(rider.language());
    rider.session.set_language(other);
    ensure!(rider.session.language() == other, "language did not switch");

    let arrived = rider.scroll_until_arrival(SCROLL_STEP_PX);
    ensure!(arrived == Some(0), "first arrival was {arrived:?}");
    let title = rider
        .session
        .journey()
        .station(0)
        .map(|station| station.content.title(other).to_string())
        .context("first station missing")?;
    let utterance = rider
        .session
        .speech()
        .spoken
        .last()
        .cloned()
        .context("nothing was announced")?;
    ensure!(
        utterance.text == other.arrival_announcement(&title),
        "announcement {}",
        utterance.text
    );
    ensure!(
        utterance.speech_tag() == other.speech_tag(),
        "voice {}",
        utterance.speech_tag()
    );
    ensure!(
        (utterance.rate - other.speech_rate()).abs() < f32::EPSILON,
        "rate {}",
        utterance.rate
    );
    Ok(())
}

fn horn_and_mute(rider: &mut Rider) -> Result<()> {
    ensure!(
        rider.session.command(Command::Horn) == CommandOutcome::Applied,
        "horn ignored"
    );
    ensure!(
        rider.session.audio().cues == 2,
        "expected departure cue plus horn, heard {}",
        rider.session.audio().cues
    );

    rider.session.set_muted(true);
    ensure!(rider.session.audio().muted, "mute never reached the sink");
    let levels = rider.session.audio().levels.len();
    rider.push_progress(0.05);
    rider.wait(FRAME_MS);
    ensure!(
        rider.session.audio().levels.len() == levels,
        "engine level changed while muted"
    );

    rider.session.set_muted(false);
    ensure!(!rider.session.audio().muted, "unmute never reached the sink");
    ensure!(!rider.session.is_muted(), "session still muted");
    Ok(())
}

fn non_finite_input(rider: &mut Rider) -> Result<()> {
    rider.push_progress(0.05);
    rider.wait(FRAME_MS);
    ensure!(!rider.scroll(f64::NAN), "NaN scroll accepted");
    ensure!(!rider.push_progress(f64::INFINITY), "infinite progress accepted");
    rider.wait(FRAME_MS);

    let progress = rider.session.progress();
    ensure!(
        (progress.raw - 0.05).abs() < PROGRESS_EPSILON,
        "raw progress became {}",
        progress.raw
    );
    ensure!(
        progress.displayed.is_finite() && progress.velocity.is_finite(),
        "non-finite motion state {progress:?}"
    );
    let rejected = rider.count(EventKind::InputRejected);
    ensure!(rejected == 2, "expected two rejections, logged {rejected}");
    Ok(())
}

fn demo_gating(rider: &mut Rider) -> Result<()> {
    rider
        .wait_for(EventKind::StationArrived, DEMO_PATIENCE_MS)
        .context("autopilot never reached a station")?;
    let stopped_raw = rider.session.progress().raw;

    rider.wait(1500);
    ensure!(
        rider.session.progress().raw == stopped_raw,
        "autopilot moved during the stop"
    );
    ensure!(!rider.push_progress(0.9), "progress accepted during the stop");

    rider
        .wait_for(EventKind::DetailOpened, DEMO_PATIENCE_MS)
        .context("detail never opened")?;
    rider.wait(5000);
    ensure!(
        rider.session.progress().raw == stopped_raw,
        "autopilot moved under the open detail"
    );
    ensure!(
        rider.session.active_detail_index() == Some(0),
        "tour shows detail {:?}",
        rider.session.active_detail_index()
    );
    Ok(())
}

fn demo_delays(rider: &mut Rider) -> Result<()> {
    rider
        .wait_for(EventKind::MotionResumed, DEMO_PATIENCE_MS)
        .context("tour never resumed after the first stop")?;
    let timing = Rider::cfg().timing;

    let at = |kind: EventKind| rider.event_ms(kind).with_context(|| format!("{kind:?} missing"));
    let arrived = at(EventKind::StationArrived)?;
    let opened = at(EventKind::DetailOpened)?;
    let closed = at(EventKind::DetailClosed)?;
    let resumed = at(EventKind::MotionResumed)?;

    ensure!(
        opened - arrived == timing.demo_detail_delay_ms,
        "detail opened {}ms after arrival",
        opened - arrived
    );
    ensure!(
        closed - opened == timing.tour_close_ms,
        "detail closed {}ms after opening",
        closed - opened
    );
    ensure!(
        resumed - closed == timing.demo_resume_delay_ms,
        "motion resumed {}ms after closing",
        resumed - closed
    );
    for direction in [DetailScroll::Bottom, DetailScroll::Top] {
        ensure!(
            rider.effects.contains(&HostEffect::ScrollDetail(direction)),
            "tour never scrolled the detail to {direction:?}"
        );
    }
    Ok(())
}

fn restart_idempotent(rider: &mut Rider) -> Result<()> {
    rider
        .wait_for(EventKind::DetailOpened, DEMO_PATIENCE_MS)
        .context("tour never opened a detail")?;

    let snapshot = |rider: &Rider| {
        (
            rider.session.progress(),
            *rider.session.arrival(),
            rider.session.announcement().clone(),
            rider.session.active_detail_index(),
        )
    };

    rider.session.restart();
    let first = snapshot(rider);
    ensure!(
        rider.session.timers().pending().is_empty(),
        "timers survived the restart: {:?}",
        rider.session.timers().pending()
    );
    ensure!(!rider.session.audio().engine_running, "engine still running");
    ensure!(!rider.session.is_started(), "session still running");

    rider.session.restart();
    ensure!(snapshot(rider) == first, "second restart changed the state");

    let events = rider.session.events().count();
    rider.wait(30_000);
    ensure!(
        rider.session.events().count() == events,
        "events fired after the restart"
    );
    Ok(())
}
