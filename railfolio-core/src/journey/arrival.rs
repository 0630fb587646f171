//! Station arrival state machine.
//!
//! The controller only tracks phases and the two handshake flags (`locked`
//! and `snapping`). Timers, audio and scroll effects are driven by the
//! session around each transition.
use serde::{Deserialize, Serialize};

/// Phase of the arrival cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrivalPhase {
    #[default]
    EnRoute,
    Arriving,
    Stopped,
    Resuming,
}

/// Snapshot of the arrival cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ArrivalState {
    pub phase: ArrivalPhase,
    /// Station the train is stopped at, while not en route.
    pub current_station: Option<usize>,
    /// Highest station already handled this run.
    pub last_resolved: Option<usize>,
    /// Motion lock; every progress origin is ignored while held.
    pub locked: bool,
    /// Set while the forced scroll-to-station settles.
    pub snapping: bool,
    /// Threshold of the most recent stop, kept after resuming.
    pub stopped_at: Option<f64>,
}

impl ArrivalState {
    #[must_use]
    pub const fn is_en_route(&self) -> bool {
        matches!(self.phase, ArrivalPhase::EnRoute)
    }

    #[must_use]
    pub const fn at_station(&self) -> bool {
        self.current_station.is_some()
    }
}

/// Drives `EnRoute → Arriving → Stopped → Resuming → EnRoute`.
#[derive(Debug, Clone, Default)]
pub struct ArrivalController {
    state: ArrivalState,
}

impl ArrivalController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &ArrivalState {
        &self.state
    }

    #[must_use]
    pub const fn phase(&self) -> ArrivalPhase {
        self.state.phase
    }

    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.state.locked
    }

    #[must_use]
    pub const fn is_snapping(&self) -> bool {
        self.state.snapping
    }

    /// Enter `Arriving` for station `index` sitting at `threshold`.
    ///
    /// Returns `false` (and changes nothing) when not en route or when the
    /// station was already resolved.
    pub fn arrive(&mut self, index: usize, threshold: f64) -> bool {
        if !self.state.is_en_route() {
            log::debug!("ignoring arrival at {index}: phase {:?}", self.state.phase);
            return false;
        }
        if self.state.last_resolved.is_some_and(|last| index <= last) {
            log::debug!("ignoring arrival at {index}: already resolved");
            return false;
        }
        self.state = ArrivalState {
            phase: ArrivalPhase::Arriving,
            current_station: Some(index),
            last_resolved: Some(index),
            locked: true,
            snapping: true,
            stopped_at: Some(threshold),
        };
        log::debug!("arriving at station {index} (threshold {threshold:.6})");
        true
    }

    /// `Arriving → Stopped`, once the arrival effects ran.
    pub fn settle(&mut self) -> bool {
        self.transition(ArrivalPhase::Arriving, ArrivalPhase::Stopped)
    }

    /// Clear the snapping flag after the forced scroll had time to land.
    pub fn release_snap(&mut self) {
        self.state.snapping = false;
    }

    /// `Stopped → Resuming`.
    pub fn begin_resume(&mut self) -> bool {
        self.transition(ArrivalPhase::Stopped, ArrivalPhase::Resuming)
    }

    /// `Resuming → EnRoute`: release the lock and clear the arrival flags.
    pub fn finish_resume(&mut self) -> bool {
        if !self.transition(ArrivalPhase::Resuming, ArrivalPhase::EnRoute) {
            return false;
        }
        self.state.locked = false;
        self.state.current_station = None;
        true
    }

    /// Back to the initial state.
    pub fn reset(&mut self) {
        self.state = ArrivalState::default();
    }

    fn transition(&mut self, from: ArrivalPhase, to: ArrivalPhase) -> bool {
        if self.state.phase == from {
            log::debug!("arrival phase {from:?} -> {to:?}");
            self.state.phase = to;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_cycle_returns_en_route_unlocked() {
        let mut controller = ArrivalController::new();
        assert!(controller.arrive(1, 0.5));
        assert!(controller.is_locked());
        assert!(controller.is_snapping());
        assert_eq!(controller.phase(), ArrivalPhase::Arriving);
        assert!(controller.settle());
        controller.release_snap();
        assert!(!controller.is_snapping());
        assert!(controller.begin_resume());
        assert!(controller.finish_resume());

        let state = controller.state();
        assert!(state.is_en_route());
        assert!(!state.locked);
        assert_eq!(state.current_station, None);
        assert_eq!(state.last_resolved, Some(1));
        assert_eq!(state.stopped_at, Some(0.5));
    }

    #[test]
    fn arrivals_are_ignored_unless_en_route() {
        let mut controller = ArrivalController::new();
        assert!(controller.arrive(0, 0.2));
        assert!(!controller.arrive(1, 0.5));
        controller.settle();
        assert!(!controller.arrive(1, 0.5));
        assert_eq!(controller.state().current_station, Some(0));
    }

    #[test]
    fn resolved_stations_stay_resolved() {
        let mut controller = ArrivalController::new();
        controller.arrive(2, 0.8);
        controller.settle();
        controller.begin_resume();
        controller.finish_resume();
        assert!(!controller.arrive(2, 0.8));
        assert!(!controller.arrive(0, 0.2));
        assert!(controller.arrive(3, 0.9));
    }

    #[test]
    fn out_of_order_transitions_are_rejected() {
        let mut controller = ArrivalController::new();
        assert!(!controller.settle());
        assert!(!controller.begin_resume());
        assert!(!controller.finish_resume());
        controller.arrive(0, 0.2);
        assert!(!controller.finish_resume());
        controller.reset();
        assert_eq!(controller.state(), &ArrivalState::default());
    }
}
