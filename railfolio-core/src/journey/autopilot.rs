use super::AutopilotConfig;

/// Guided-demo driver that advances the train at a fixed pace.
///
/// Ticks only accumulate while the gate is open; closing the gate discards
/// any partial tick so the first step after resuming lands one full interval
/// later.
#[derive(Debug, Clone)]
pub struct AutopilotDriver {
    cfg: AutopilotConfig,
    enabled: bool,
    carry_ms: u64,
    steps: u64,
}

impl AutopilotDriver {
    #[must_use]
    pub const fn new(cfg: AutopilotConfig) -> Self {
        Self {
            cfg,
            enabled: false,
            carry_ms: 0,
            steps: 0,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.carry_ms = 0;
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Total steps emitted since the last reset.
    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    #[must_use]
    pub const fn step_px(&self) -> f64 {
        self.cfg.step_px
    }

    /// Milliseconds until the next step would be due with the gate open.
    #[must_use]
    pub const fn until_next_ms(&self) -> u64 {
        self.cfg.tick_ms.saturating_sub(self.carry_ms)
    }

    /// Feed `elapsed_ms` of virtual time and return how many steps are due.
    pub fn tick(&mut self, elapsed_ms: u64, gate_open: bool) -> u64 {
        if !self.enabled || !gate_open {
            self.carry_ms = 0;
            return 0;
        }
        let tick_ms = self.cfg.tick_ms.max(1);
        let total = self.carry_ms.saturating_add(elapsed_ms);
        let due = total / tick_ms;
        self.carry_ms = total % tick_ms;
        self.steps = self.steps.saturating_add(due);
        due
    }

    pub fn reset(&mut self) {
        self.enabled = false;
        self.carry_ms = 0;
        self.steps = 0;
    }
}
