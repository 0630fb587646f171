use serde::{Deserialize, Serialize};

use super::track::Viewport;
use crate::numbers::unit_clamp;

/// Where a progress update came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressOrigin {
    Scroll,
    Autopilot,
    Keyboard,
}

/// Offsets within this many pixels of a glide target count as landed.
const GLIDE_SLACK_PX: f64 = 1.0;

/// A smooth page scroll the host is still animating.
///
/// Scroll reports on the segment `from..=to` are the animation catching up
/// with an offset the source already holds.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Glide {
    from: f64,
    to: f64,
}

impl Glide {
    fn covers(self, scroll_y: f64) -> bool {
        let (lo, hi) = if self.from <= self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        };
        scroll_y >= lo - GLIDE_SLACK_PX && scroll_y <= hi + GLIDE_SLACK_PX
    }

    fn landed(self, scroll_y: f64) -> bool {
        (scroll_y - self.to).abs() <= GLIDE_SLACK_PX
    }
}

/// Normalized raw progress plus the scroll offset it mirrors.
///
/// All origins are swallowed while the motion lock, the snapping flag, or an
/// open detail view gate the source. Only [`ProgressSource::force`] bypasses
/// the gates, and only the arrival snap uses it.
///
/// Keyboard steps are animated by the host. Until the page lands on the
/// stepped offset, scroll reports along the way are absorbed instead of
/// dragging progress back toward the starting point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressSource {
    raw: f64,
    scroll_y: f64,
    locked: bool,
    snapping: bool,
    detail_open: bool,
    glide: Option<Glide>,
    rejected: u64,
}

impl ProgressSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest accepted progress in `[0, 1]`.
    #[must_use]
    pub const fn raw(&self) -> f64 {
        self.raw
    }

    /// Scroll offset in pixels matching [`Self::raw`].
    #[must_use]
    pub const fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub const fn is_snapping(&self) -> bool {
        self.snapping
    }

    #[must_use]
    pub const fn is_detail_open(&self) -> bool {
        self.detail_open
    }

    /// Whether any update would currently be swallowed.
    #[must_use]
    pub const fn is_gated(&self) -> bool {
        self.locked || self.snapping || self.detail_open
    }

    /// Whether a keyboard step is still being animated by the host.
    #[must_use]
    pub const fn is_gliding(&self) -> bool {
        self.glide.is_some()
    }

    /// Count of non-finite inputs that were dropped.
    #[must_use]
    pub const fn rejected(&self) -> u64 {
        self.rejected
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub fn set_snapping(&mut self, snapping: bool) {
        self.snapping = snapping;
    }

    pub fn set_detail_open(&mut self, open: bool) {
        self.detail_open = open;
    }

    /// Absolute scroll offset reported by the host.
    ///
    /// Reports inside a pending keyboard glide are absorbed and return
    /// `false`; the glide ends when the page lands or leaves its path.
    pub fn on_scroll(&mut self, scroll_y: f64, viewport: &Viewport) -> bool {
        if let Some(glide) = self.glide
            && scroll_y.is_finite()
            && !self.is_gated()
        {
            if glide.landed(scroll_y) {
                self.glide = None;
            }
            if glide.covers(scroll_y) {
                return false;
            }
        }
        self.accept(ProgressOrigin::Scroll, scroll_y, viewport)
    }

    /// Relative move in pixels from the autopilot or a key press.
    pub fn nudge(&mut self, origin: ProgressOrigin, delta_px: f64, viewport: &Viewport) -> bool {
        let from = self.scroll_y;
        let accepted = self.accept(origin, from + delta_px, viewport);
        if accepted && origin == ProgressOrigin::Keyboard && (self.scroll_y - from).abs() > f64::EPSILON {
            let from = self.glide.map_or(from, |glide| glide.from);
            self.glide = Some(Glide {
                from,
                to: self.scroll_y,
            });
        }
        accepted
    }

    /// Normalized progress from hosts that do not scroll a document.
    pub fn set_progress(&mut self, progress: f64, viewport: &Viewport) -> bool {
        if !progress.is_finite() {
            return self.reject(ProgressOrigin::Scroll, progress);
        }
        if self.is_gated() {
            return false;
        }
        self.glide = None;
        let progress = progress.clamp(0.0, 1.0);
        match viewport.scroll_for_progress(progress) {
            Some(scroll_y) if viewport.scroll_range().is_some() => {
                self.scroll_y = scroll_y;
                self.raw = progress;
            }
            _ => {
                self.scroll_y = 0.0;
                self.raw = 0.0;
            }
        }
        true
    }

    /// Place the source at `progress` regardless of the gates.
    pub fn force(&mut self, progress: f64, viewport: &Viewport) {
        if let Some(value) = unit_clamp(progress) {
            self.glide = None;
            self.raw = value;
            self.scroll_y = viewport.scroll_for_progress(value).unwrap_or(0.0);
        }
    }

    /// Return to the start of the track with no gates held.
    pub fn reset(&mut self) {
        *self = Self {
            rejected: self.rejected,
            ..Self::default()
        };
    }

    fn accept(&mut self, origin: ProgressOrigin, scroll_y: f64, viewport: &Viewport) -> bool {
        if !scroll_y.is_finite() {
            return self.reject(origin, scroll_y);
        }
        if self.is_gated() {
            return false;
        }
        if origin != ProgressOrigin::Keyboard {
            self.glide = None;
        }
        match viewport.scroll_range() {
            Some(range) => {
                self.scroll_y = scroll_y.clamp(0.0, range);
                self.raw = viewport
                    .progress_for_scroll(self.scroll_y)
                    .and_then(unit_clamp)
                    .unwrap_or(self.raw);
            }
            None => {
                self.scroll_y = 0.0;
                self.raw = 0.0;
            }
        }
        true
    }

    fn reject(&mut self, origin: ProgressOrigin, value: f64) -> bool {
        self.rejected += 1;
        log::warn!("dropping non-finite {origin:?} input {value}");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(1000.0, 1000.0, 11_000.0)
    }

    #[test]
    fn scroll_maps_linearly_and_clamps() {
        let mut source = ProgressSource::new();
        assert!(source.on_scroll(2500.0, &viewport()));
        assert!((source.raw() - 0.25).abs() < f64::EPSILON);
        assert!(source.on_scroll(50_000.0, &viewport()));
        assert!((source.raw() - 1.0).abs() < f64::EPSILON);
        assert!((source.scroll_y() - 10_000.0).abs() < f64::EPSILON);
        assert!(source.on_scroll(-40.0, &viewport()));
        assert!(source.raw().abs() < f64::EPSILON);
    }

    #[test]
    fn every_gate_swallows_every_origin() {
        let mut source = ProgressSource::new();
        source.on_scroll(1000.0, &viewport());
        for gate in 0..3 {
            source.set_locked(gate == 0);
            source.set_snapping(gate == 1);
            source.set_detail_open(gate == 2);
            assert!(source.is_gated());
            assert!(!source.on_scroll(4000.0, &viewport()));
            assert!(!source.nudge(ProgressOrigin::Autopilot, 3.0, &viewport()));
            assert!(!source.nudge(ProgressOrigin::Keyboard, 300.0, &viewport()));
            assert!(!source.set_progress(0.9, &viewport()));
            assert!((source.raw() - 0.1).abs() < f64::EPSILON);
            assert!((source.scroll_y() - 1000.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn nudges_accumulate_from_the_mirrored_offset() {
        let mut source = ProgressSource::new();
        source.nudge(ProgressOrigin::Keyboard, 300.0, &viewport());
        source.nudge(ProgressOrigin::Autopilot, 3.0, &viewport());
        assert!((source.scroll_y() - 303.0).abs() < f64::EPSILON);
        source.nudge(ProgressOrigin::Keyboard, -1000.0, &viewport());
        assert!(source.scroll_y().abs() < f64::EPSILON);
    }

    #[test]
    fn non_finite_input_keeps_previous_value() {
        let mut source = ProgressSource::new();
        source.on_scroll(5000.0, &viewport());
        assert!(!source.on_scroll(f64::NAN, &viewport()));
        assert!(!source.set_progress(f64::INFINITY, &viewport()));
        assert!((source.raw() - 0.5).abs() < f64::EPSILON);
        assert_eq!(source.rejected(), 2);
    }

    #[test]
    fn degenerate_range_pins_progress_to_zero() {
        let mut source = ProgressSource::new();
        let flat = Viewport::new(1000.0, 1000.0, 1000.0);
        assert!(source.on_scroll(300.0, &flat));
        assert!(source.raw().abs() < f64::EPSILON);
    }

    #[test]
    fn degenerate_range_pins_normalized_progress_to_zero() {
        let mut source = ProgressSource::new();
        let flat = Viewport::new(1000.0, 1000.0, 1000.0);
        assert!(source.set_progress(0.3, &flat));
        assert!(source.raw().abs() < f64::EPSILON);
        assert!(source.scroll_y().abs() < f64::EPSILON);
    }

    #[test]
    fn keyboard_glide_absorbs_lagging_scroll_reports() {
        let mut source = ProgressSource::new();
        assert!(source.nudge(ProgressOrigin::Keyboard, 300.0, &viewport()));
        assert!(source.is_gliding());
        for lagging in [40.0, 150.0, 280.0] {
            assert!(!source.on_scroll(lagging, &viewport()));
            assert!((source.scroll_y() - 300.0).abs() < f64::EPSILON);
            assert!((source.raw() - 0.03).abs() < 1e-12);
        }
        assert!(!source.on_scroll(300.0, &viewport()));
        assert!(!source.is_gliding());
        assert!(source.on_scroll(120.0, &viewport()));
        assert!((source.scroll_y() - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn consecutive_key_steps_extend_one_glide() {
        let mut source = ProgressSource::new();
        source.nudge(ProgressOrigin::Keyboard, 300.0, &viewport());
        source.nudge(ProgressOrigin::Keyboard, 300.0, &viewport());
        assert!(!source.on_scroll(90.0, &viewport()));
        assert!((source.scroll_y() - 600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn scroll_off_the_glide_path_takes_over() {
        let mut source = ProgressSource::new();
        source.on_scroll(1000.0, &viewport());
        source.nudge(ProgressOrigin::Keyboard, 300.0, &viewport());
        assert!(source.on_scroll(4000.0, &viewport()));
        assert!(!source.is_gliding());
        assert!((source.raw() - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn autopilot_nudges_do_not_glide() {
        let mut source = ProgressSource::new();
        source.nudge(ProgressOrigin::Autopilot, 3.0, &viewport());
        assert!(!source.is_gliding());
    }

    #[test]
    fn force_bypasses_gates() {
        let mut source = ProgressSource::new();
        source.set_locked(true);
        source.set_snapping(true);
        source.force(0.2, &viewport());
        assert!((source.raw() - 0.2).abs() < f64::EPSILON);
        assert!((source.scroll_y() - 2000.0).abs() < f64::EPSILON);
        source.reset();
        assert!(!source.is_gated());
        assert!(source.raw().abs() < f64::EPSILON);
    }
}
