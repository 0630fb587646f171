//! Virtual-clock timers with one pending deadline per named slot.
//!
//! Hosts never hand out real timer handles: the session advances its own
//! clock and asks [`Timers`] which slots came due. Cancelling everything bumps
//! a generation counter so deadlines scheduled before a restart can never
//! fire afterwards.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Named timer slots used by the arrival sequence and the guided tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerSlot {
    SnapRelease,
    Dwell,
    DetailOpen,
    ResumeRelease,
    StoppedBanner,
    ControlsHint,
    TourScrollDown,
    TourScrollUp,
    TourClose,
}

impl TimerSlot {
    pub const ALL: [Self; 9] = [
        Self::SnapRelease,
        Self::Dwell,
        Self::DetailOpen,
        Self::ResumeRelease,
        Self::StoppedBanner,
        Self::ControlsHint,
        Self::TourScrollDown,
        Self::TourScrollUp,
        Self::TourClose,
    ];

    const fn slot(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Deadline {
    at_ms: u64,
    generation: u64,
}

/// Pending deadlines keyed by slot.
#[derive(Debug, Clone, Default)]
pub struct Timers {
    now_ms: u64,
    generation: u64,
    slots: [Option<Deadline>; TimerSlot::ALL.len()],
}

impl Timers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Schedule `slot` to fire `delay_ms` from now, replacing any earlier deadline.
    pub fn schedule(&mut self, slot: TimerSlot, delay_ms: u64) {
        self.slots[slot.slot()] = Some(Deadline {
            at_ms: self.now_ms.saturating_add(delay_ms),
            generation: self.generation,
        });
    }

    pub fn cancel(&mut self, slot: TimerSlot) {
        self.slots[slot.slot()] = None;
    }

    /// Drop every pending deadline and invalidate anything scheduled so far.
    pub fn cancel_all(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.slots = [None; TimerSlot::ALL.len()];
    }

    #[must_use]
    pub fn is_pending(&self, slot: TimerSlot) -> bool {
        self.live(slot).is_some()
    }

    /// Milliseconds until `slot` fires, if pending.
    #[must_use]
    pub fn remaining_ms(&self, slot: TimerSlot) -> Option<u64> {
        self.live(slot).map(|at| at.saturating_sub(self.now_ms))
    }

    #[must_use]
    pub fn pending(&self) -> SmallVec<[TimerSlot; 4]> {
        TimerSlot::ALL
            .into_iter()
            .filter(|slot| self.is_pending(*slot))
            .collect()
    }

    /// Earliest pending deadline at or before `limit_ms`.
    #[must_use]
    pub fn next_due(&self, limit_ms: u64) -> Option<(TimerSlot, u64)> {
        TimerSlot::ALL
            .into_iter()
            .filter_map(|slot| self.live(slot).map(|at| (slot, at)))
            .filter(|(_, at)| *at <= limit_ms)
            .min_by_key(|(slot, at)| (*at, *slot))
    }

    /// Move the clock to `at_ms` (never backwards).
    pub fn advance_to(&mut self, at_ms: u64) {
        self.now_ms = self.now_ms.max(at_ms);
    }

    /// Clear `slot` if it is due now and report whether it fired.
    pub fn take_due(&mut self, slot: TimerSlot) -> bool {
        match self.live(slot) {
            Some(at) if at <= self.now_ms => {
                self.slots[slot.slot()] = None;
                true
            }
            _ => false,
        }
    }

    fn live(&self, slot: TimerSlot) -> Option<u64> {
        self.slots[slot.slot()]
            .filter(|deadline| deadline.generation == self.generation)
            .map(|deadline| deadline.at_ms)
    }
}
