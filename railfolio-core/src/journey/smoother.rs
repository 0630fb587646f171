//! Critically damped smoothing between raw and displayed progress.
use serde::{Deserialize, Serialize};

use super::SmoothingConfig;

/// Raw, displayed and velocity values for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProgressState {
    pub raw: f64,
    pub displayed: f64,
    /// Displayed progress units per second.
    pub velocity: f64,
}

/// SmoothDamp filter that chases the raw progress without overshooting.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionSmoother {
    cfg: SmoothingConfig,
    target: f64,
    displayed: f64,
    velocity: f64,
    dropped: u64,
}

impl MotionSmoother {
    #[must_use]
    pub const fn new(cfg: SmoothingConfig) -> Self {
        Self {
            cfg,
            target: 0.0,
            displayed: 0.0,
            velocity: 0.0,
            dropped: 0,
        }
    }

    #[must_use]
    pub const fn displayed(&self) -> f64 {
        self.displayed
    }

    #[must_use]
    pub const fn velocity(&self) -> f64 {
        self.velocity
    }

    #[must_use]
    pub const fn target(&self) -> f64 {
        self.target
    }

    /// Number of non-finite results discarded so far.
    #[must_use]
    pub const fn dropped(&self) -> u64 {
        self.dropped
    }

    #[must_use]
    pub const fn state(&self) -> ProgressState {
        ProgressState {
            raw: self.target,
            displayed: self.displayed,
            velocity: self.velocity,
        }
    }

    #[must_use]
    pub const fn is_passthrough(&self) -> bool {
        self.cfg.smooth_time_secs <= 0.0
    }

    pub fn set_target(&mut self, raw: f64) {
        if raw.is_finite() {
            self.target = raw;
        } else {
            self.drop_value("target", raw);
        }
    }

    /// Advance the filter by `dt_secs` and return the displayed value.
    pub fn step(&mut self, dt_secs: f64) -> f64 {
        if !(dt_secs.is_finite() && dt_secs > 0.0) {
            return self.displayed;
        }
        if self.is_passthrough() {
            let velocity = (self.target - self.displayed) / dt_secs;
            self.commit(self.target, velocity);
            return self.displayed;
        }

        let smooth_time = self.cfg.smooth_time_secs;
        let omega = 2.0 / smooth_time;
        let x = omega * dt_secs;
        let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

        let original_to = self.target;
        let max_change = self.cfg.max_speed * smooth_time;
        let change = (self.displayed - original_to).clamp(-max_change, max_change);
        let target = self.displayed - change;

        let temp = (self.velocity + omega * change) * dt_secs;
        let velocity = ((self.velocity - omega * temp) * exp)
            .clamp(-self.cfg.max_speed, self.cfg.max_speed);
        let mut output = target + (change + temp) * exp;
        let mut velocity = velocity;

        if (original_to - self.displayed).signum() == (output - original_to).signum() {
            output = original_to;
            velocity = 0.0;
        }
        if (original_to - output).abs() < self.cfg.rest_delta
            && velocity.abs() < self.cfg.rest_delta * 10.0
        {
            output = original_to;
            velocity = 0.0;
        }
        self.commit(output, velocity);
        self.displayed
    }

    /// Jump to `value` exactly with zero velocity.
    pub fn snap(&mut self, value: f64) {
        if value.is_finite() {
            self.target = value;
            self.displayed = value;
            self.velocity = 0.0;
        } else {
            self.drop_value("snap", value);
        }
    }

    pub fn reset(&mut self) {
        self.target = 0.0;
        self.displayed = 0.0;
        self.velocity = 0.0;
    }

    fn commit(&mut self, displayed: f64, velocity: f64) {
        if displayed.is_finite() && velocity.is_finite() {
            self.displayed = displayed;
            self.velocity = velocity;
        } else {
            self.drop_value("output", displayed);
        }
    }

    fn drop_value(&mut self, what: &str, value: f64) {
        self.dropped += 1;
        log::warn!(
            "smoother dropped non-finite {what} ({value}); keeping {}",
            self.displayed
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smoother() -> MotionSmoother {
        MotionSmoother::new(SmoothingConfig::default())
    }

    #[test]
    fn converges_without_overshoot() {
        let mut smoother = smoother();
        smoother.set_target(0.4);
        let mut previous = 0.0;
        for _ in 0..200 {
            let value = smoother.step(0.016);
            assert!(value >= previous - f64::EPSILON);
            assert!(value <= 0.4 + f64::EPSILON);
            previous = value;
        }
        assert!((smoother.displayed() - 0.4).abs() < f64::EPSILON);
        assert!(smoother.velocity().abs() < f64::EPSILON);
    }

    #[test]
    fn velocity_respects_max_speed() {
        let mut smoother = smoother();
        smoother.set_target(1.0);
        for _ in 0..20 {
            smoother.step(0.016);
            assert!(smoother.velocity().abs() <= 2.5 + f64::EPSILON);
        }
    }

    #[test]
    fn passthrough_copies_target() {
        let mut smoother = MotionSmoother::new(SmoothingConfig::passthrough());
        smoother.set_target(0.25);
        assert!((smoother.step(0.016) - 0.25).abs() < f64::EPSILON);
        assert!((smoother.velocity() - 0.25 / 0.016).abs() < 1e-9);
    }

    #[test]
    fn snap_is_exact() {
        let mut smoother = smoother();
        smoother.set_target(0.9);
        smoother.step(0.016);
        smoother.snap(0.2);
        assert!((smoother.displayed() - 0.2).abs() < f64::EPSILON);
        assert!((smoother.target() - 0.2).abs() < f64::EPSILON);
        assert!(smoother.velocity().abs() < f64::EPSILON);
        assert!((smoother.step(0.016) - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn non_finite_values_are_dropped() {
        let mut smoother = smoother();
        smoother.snap(0.3);
        smoother.set_target(f64::NAN);
        smoother.snap(f64::INFINITY);
        assert_eq!(smoother.dropped(), 2);
        assert!((smoother.step(0.016) - 0.3).abs() < f64::EPSILON);
        assert!((smoother.step(f64::NAN) - 0.3).abs() < f64::EPSILON);
    }
}
