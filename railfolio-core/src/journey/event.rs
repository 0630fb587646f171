//! Structured events emitted by the journey session.
//!
//! Hosts and the scenario tester read these instead of scraping logs. The
//! `kind` is a mechanical descriptor; anything presentation-specific rides in
//! the optional payload.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::constants::EVENT_LOG_CAPACITY;

/// Stable identifier for a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId {
    /// Run counter, bumped by every start or restart.
    pub run: u32,
    /// Sequence number within the run (0-based).
    pub seq: u32,
}

impl EventId {
    #[must_use]
    pub const fn new(run: u32, seq: u32) -> Self {
        Self { run, seq }
    }
}

/// Mechanical event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    JourneyStarted,
    JourneyRestarted,
    StationArrived,
    SnapReleased,
    DetailOpened,
    DetailClosed,
    ResumeStarted,
    MotionResumed,
    AnnouncementChanged,
    HornSounded,
    ControlsHintShown,
    InputRejected,
}

/// Severity tier for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSeverity {
    Info,
    Warning,
}

/// Structured event emitted by the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyEvent {
    pub id: EventId,
    /// Virtual time of the event in milliseconds since the session was created.
    pub at_ms: u64,
    pub kind: EventKind,
    pub severity: EventSeverity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<usize>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub payload: serde_json::Value,
}

impl JourneyEvent {
    #[must_use]
    pub fn is(&self, kind: EventKind) -> bool {
        self.kind == kind
    }
}

/// Bounded event history; the oldest entries are dropped first.
#[derive(Debug, Clone)]
pub(crate) struct EventLog {
    run: u32,
    seq: u32,
    entries: VecDeque<JourneyEvent>,
}

impl EventLog {
    pub(crate) fn new() -> Self {
        Self {
            run: 0,
            seq: 0,
            entries: VecDeque::with_capacity(EVENT_LOG_CAPACITY),
        }
    }

    pub(crate) fn next_run(&mut self) {
        self.run = self.run.wrapping_add(1);
        self.seq = 0;
    }

    pub(crate) fn push(
        &mut self,
        at_ms: u64,
        kind: EventKind,
        station: Option<usize>,
        payload: serde_json::Value,
    ) {
        let severity = match kind {
            EventKind::InputRejected => EventSeverity::Warning,
            _ => EventSeverity::Info,
        };
        if self.entries.len() == EVENT_LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(JourneyEvent {
            id: EventId::new(self.run, self.seq),
            at_ms,
            kind,
            severity,
            station,
            payload,
        });
        self.seq = self.seq.wrapping_add(1);
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &JourneyEvent> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_roundtrip_and_number_per_run() {
        let mut log = EventLog::new();
        log.push(0, EventKind::JourneyStarted, None, serde_json::Value::Null);
        log.push(
            120,
            EventKind::StationArrived,
            Some(2),
            serde_json::json!({ "threshold": 0.5 }),
        );
        log.next_run();
        log.push(200, EventKind::JourneyRestarted, None, serde_json::Value::Null);

        let events: Vec<_> = log.iter().cloned().collect();
        assert_eq!(events[1].id, EventId::new(0, 1));
        assert_eq!(events[2].id, EventId::new(1, 0));
        assert!(events[1].is(EventKind::StationArrived));

        let json = serde_json::to_string(&events[1]).expect("serialize");
        assert!(json.contains(r#""kind":"station_arrived""#));
        let restored: JourneyEvent = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, events[1]);
    }

    #[test]
    fn log_is_bounded() {
        let mut log = EventLog::new();
        for i in 0..(EVENT_LOG_CAPACITY as u64 + 5) {
            log.push(i, EventKind::HornSounded, None, serde_json::Value::Null);
        }
        assert_eq!(log.iter().count(), EVENT_LOG_CAPACITY);
        assert_eq!(log.iter().next().map(|e| e.at_ms), Some(5));
    }

    #[test]
    fn rejected_input_is_a_warning() {
        let mut log = EventLog::new();
        log.push(0, EventKind::InputRejected, None, serde_json::Value::Null);
        assert_eq!(
            log.iter().next().map(|e| e.severity),
            Some(EventSeverity::Warning)
        );
    }
}
