//! Journey engine: scroll input, motion smoothing, station arrivals and the
//! guided demo, plus the configuration that tunes all of it.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    ANCHOR_OFFSET_PX, ANCHOR_VIEWPORT_RATIO, ARRIVAL_BANNER_TOLERANCE, AUTOPILOT_STEP_PX,
    AUTOPILOT_TICK_MS, CONTROLS_HINT_DELAY_MS, DELAY_ZONE_FROM, DELAY_ZONE_TO,
    DEMO_DETAIL_DELAY_MS, DEMO_RESUME_DELAY_MS, KEY_STEP_PX, NORMAL_DWELL_MS, SMOOTH_MAX_SPEED,
    SMOOTH_REST_DELTA, SMOOTH_TIME_SECS, SNAP_RELEASE_MS, STATION_OFFSET_PX, STATION_SPACING_PX,
    STOPPED_BANNER_DELAY_MS, TAIL_PADDING_PX, TOUR_CLOSE_MS, TOUR_SCROLL_DOWN_MS,
    TOUR_SCROLL_UP_MS,
};

pub mod arrival;
pub mod autopilot;
pub mod banner;
pub mod command;
pub mod event;
pub mod progress;
pub mod scanner;
pub mod session;
pub mod smoother;
pub mod timers;
pub mod track;

pub use arrival::{ArrivalController, ArrivalPhase, ArrivalState};
pub use autopilot::AutopilotDriver;
pub use banner::{
    AnnouncementBanner, AnnouncementSource, AnnouncementState, BannerInput, DelayZone,
};
pub use command::{Command, CommandOutcome};
pub use event::{EventId, EventKind, EventSeverity, JourneyEvent};
pub use progress::{ProgressOrigin, ProgressSource};
pub use scanner::StationScanner;
pub use session::JourneySession;
pub use smoother::{MotionSmoother, ProgressState};
pub use timers::{TimerSlot, Timers};
pub use track::{Journey, Station, Viewport};

/// How the journey is driven for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum JourneyMode {
    /// The rider scrolls; stops last `dwell_ms` before motion resumes.
    Normal { dwell_ms: u64 },
    /// Autopilot drives the train and each stop opens the station detail.
    GuidedDemo,
}

impl JourneyMode {
    /// Normal mode with the default dwell.
    #[must_use]
    pub const fn normal() -> Self {
        Self::Normal {
            dwell_ms: NORMAL_DWELL_MS,
        }
    }

    #[must_use]
    pub const fn is_demo(self) -> bool {
        matches!(self, Self::GuidedDemo)
    }

    /// Validate mode parameters.
    ///
    /// # Errors
    ///
    /// Returns `JourneyConfigError` when the dwell is outside `0..=60_000` ms.
    pub fn validate(self) -> Result<(), JourneyConfigError> {
        const MAX_DWELL_MS: u64 = 60_000;
        match self {
            Self::Normal { dwell_ms } if dwell_ms > MAX_DWELL_MS => {
                Err(JourneyConfigError::RangeViolation {
                    field: "mode.dwell_ms",
                    min: 0.0,
                    max: ms(MAX_DWELL_MS),
                    value: ms(dwell_ms),
                })
            }
            _ => Ok(()),
        }
    }
}

impl Default for JourneyMode {
    fn default() -> Self {
        Self::normal()
    }
}

/// Top-level journey configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyCfg {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub smoothing: SmoothingConfig,
    #[serde(default)]
    pub autopilot: AutopilotConfig,
    #[serde(default)]
    pub banner: BannerConfig,
    #[serde(default = "JourneyCfg::default_key_step_px")]
    pub key_step_px: f64,
}

impl JourneyCfg {
    #[must_use]
    pub fn default_config() -> Self {
        Self {
            layout: LayoutConfig::default(),
            timing: TimingConfig::default(),
            smoothing: SmoothingConfig::default(),
            autopilot: AutopilotConfig::default(),
            banner: BannerConfig::default(),
            key_step_px: Self::default_key_step_px(),
        }
    }

    #[must_use]
    pub const fn default_key_step_px() -> f64 {
        KEY_STEP_PX
    }

    /// Parse a configuration from JSON, filling unspecified fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns `JourneyConfigError` when any field violates the documented bounds.
    pub fn validate(&self) -> Result<(), JourneyConfigError> {
        self.layout.validate()?;
        self.timing.validate()?;
        self.smoothing.validate()?;
        self.autopilot.validate()?;
        self.banner.validate()?;
        if !(self.key_step_px > 0.0 && self.key_step_px.is_finite()) {
            return Err(JourneyConfigError::MinViolation {
                field: "key_step_px",
                min: 1.0,
                value: self.key_step_px,
            });
        }
        Ok(())
    }
}

impl Default for JourneyCfg {
    fn default() -> Self {
        Self::default_config()
    }
}

/// Errors raised when journey configuration invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum JourneyConfigError {
    #[error("{field} must be at least {min:.3} (got {value:.3})")]
    MinViolation {
        field: &'static str,
        min: f64,
        value: f64,
    },
    #[error("{field} must be between {min:.3} and {max:.3} (got {value:.3})")]
    RangeViolation {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("detail tour steps must be ordered (down {down} < up {up} < close {close})")]
    TourOrder { down: u64, up: u64, close: u64 },
    #[error("delay zone needs two distinct stations (got `{0}`)")]
    DelayZoneStations(String),
}

fn check_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), JourneyConfigError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(JourneyConfigError::RangeViolation {
            field,
            min,
            max,
            value,
        })
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), JourneyConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(JourneyConfigError::MinViolation {
            field,
            min: f64::EPSILON,
            value,
        })
    }
}

fn ms(value: u64) -> f64 {
    crate::numbers::millis_to_f64(value)
}

/// Track geometry in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "LayoutConfig::default_station_spacing")]
    pub station_spacing: f64,
    #[serde(default = "LayoutConfig::default_station_offset")]
    pub station_offset: f64,
    #[serde(default = "LayoutConfig::default_tail_padding")]
    pub tail_padding: f64,
    /// Fraction of the viewport width where the train's midpoint sits.
    #[serde(default = "LayoutConfig::default_anchor_ratio")]
    pub anchor_ratio: f64,
    #[serde(default = "LayoutConfig::default_anchor_offset")]
    pub anchor_offset: f64,
}

impl LayoutConfig {
    const fn default_station_spacing() -> f64 {
        STATION_SPACING_PX
    }

    const fn default_station_offset() -> f64 {
        STATION_OFFSET_PX
    }

    const fn default_tail_padding() -> f64 {
        TAIL_PADDING_PX
    }

    const fn default_anchor_ratio() -> f64 {
        ANCHOR_VIEWPORT_RATIO
    }

    const fn default_anchor_offset() -> f64 {
        ANCHOR_OFFSET_PX
    }

    fn validate(&self) -> Result<(), JourneyConfigError> {
        check_positive("layout.station_spacing", self.station_spacing)?;
        check_range("layout.station_offset", self.station_offset, 0.0, 1.0e6)?;
        check_range("layout.tail_padding", self.tail_padding, 0.0, 1.0e6)?;
        check_range("layout.anchor_ratio", self.anchor_ratio, 0.0, 1.0)?;
        check_range("layout.anchor_offset", self.anchor_offset, 0.0, 1.0e6)?;
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            station_spacing: Self::default_station_spacing(),
            station_offset: Self::default_station_offset(),
            tail_padding: Self::default_tail_padding(),
            anchor_ratio: Self::default_anchor_ratio(),
            anchor_offset: Self::default_anchor_offset(),
        }
    }
}

/// Delays used by the arrival sequence, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "TimingConfig::default_snap_release_ms")]
    pub snap_release_ms: u64,
    #[serde(default = "TimingConfig::default_demo_detail_delay_ms")]
    pub demo_detail_delay_ms: u64,
    #[serde(default = "TimingConfig::default_demo_resume_delay_ms")]
    pub demo_resume_delay_ms: u64,
    #[serde(default = "TimingConfig::default_stopped_banner_delay_ms")]
    pub stopped_banner_delay_ms: u64,
    #[serde(default = "TimingConfig::default_controls_hint_delay_ms")]
    pub controls_hint_delay_ms: u64,
    #[serde(default = "TimingConfig::default_tour_scroll_down_ms")]
    pub tour_scroll_down_ms: u64,
    #[serde(default = "TimingConfig::default_tour_scroll_up_ms")]
    pub tour_scroll_up_ms: u64,
    #[serde(default = "TimingConfig::default_tour_close_ms")]
    pub tour_close_ms: u64,
}

impl TimingConfig {
    const fn default_snap_release_ms() -> u64 {
        SNAP_RELEASE_MS
    }

    const fn default_demo_detail_delay_ms() -> u64 {
        DEMO_DETAIL_DELAY_MS
    }

    const fn default_demo_resume_delay_ms() -> u64 {
        DEMO_RESUME_DELAY_MS
    }

    const fn default_stopped_banner_delay_ms() -> u64 {
        STOPPED_BANNER_DELAY_MS
    }

    const fn default_controls_hint_delay_ms() -> u64 {
        CONTROLS_HINT_DELAY_MS
    }

    const fn default_tour_scroll_down_ms() -> u64 {
        TOUR_SCROLL_DOWN_MS
    }

    const fn default_tour_scroll_up_ms() -> u64 {
        TOUR_SCROLL_UP_MS
    }

    const fn default_tour_close_ms() -> u64 {
        TOUR_CLOSE_MS
    }

    fn validate(&self) -> Result<(), JourneyConfigError> {
        check_range("timing.snap_release_ms", ms(self.snap_release_ms), 1.0, 1000.0)?;
        check_range(
            "timing.demo_detail_delay_ms",
            ms(self.demo_detail_delay_ms),
            0.0,
            60_000.0,
        )?;
        check_range(
            "timing.demo_resume_delay_ms",
            ms(self.demo_resume_delay_ms),
            0.0,
            60_000.0,
        )?;
        if !(self.tour_scroll_down_ms < self.tour_scroll_up_ms
            && self.tour_scroll_up_ms < self.tour_close_ms)
        {
            return Err(JourneyConfigError::TourOrder {
                down: self.tour_scroll_down_ms,
                up: self.tour_scroll_up_ms,
                close: self.tour_close_ms,
            });
        }
        Ok(())
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            snap_release_ms: Self::default_snap_release_ms(),
            demo_detail_delay_ms: Self::default_demo_detail_delay_ms(),
            demo_resume_delay_ms: Self::default_demo_resume_delay_ms(),
            stopped_banner_delay_ms: Self::default_stopped_banner_delay_ms(),
            controls_hint_delay_ms: Self::default_controls_hint_delay_ms(),
            tour_scroll_down_ms: Self::default_tour_scroll_down_ms(),
            tour_scroll_up_ms: Self::default_tour_scroll_up_ms(),
            tour_close_ms: Self::default_tour_close_ms(),
        }
    }
}

/// Motion filter tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Approximate time to reach the target; `0` disables smoothing.
    #[serde(default = "SmoothingConfig::default_smooth_time_secs")]
    pub smooth_time_secs: f64,
    /// Maximum displayed speed in progress units per second.
    #[serde(default = "SmoothingConfig::default_max_speed")]
    pub max_speed: f64,
    /// Distance under which the filter settles exactly on the target.
    #[serde(default = "SmoothingConfig::default_rest_delta")]
    pub rest_delta: f64,
}

impl SmoothingConfig {
    const fn default_smooth_time_secs() -> f64 {
        SMOOTH_TIME_SECS
    }

    const fn default_max_speed() -> f64 {
        SMOOTH_MAX_SPEED
    }

    const fn default_rest_delta() -> f64 {
        SMOOTH_REST_DELTA
    }

    /// Smoothing that passes the target through unchanged.
    #[must_use]
    pub const fn passthrough() -> Self {
        Self {
            smooth_time_secs: 0.0,
            max_speed: SMOOTH_MAX_SPEED,
            rest_delta: SMOOTH_REST_DELTA,
        }
    }

    fn validate(&self) -> Result<(), JourneyConfigError> {
        check_range("smoothing.smooth_time_secs", self.smooth_time_secs, 0.0, 2.0)?;
        check_positive("smoothing.max_speed", self.max_speed)?;
        check_range("smoothing.rest_delta", self.rest_delta, 0.0, 0.05)?;
        Ok(())
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            smooth_time_secs: Self::default_smooth_time_secs(),
            max_speed: Self::default_max_speed(),
            rest_delta: Self::default_rest_delta(),
        }
    }
}

/// Guided demo autopilot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutopilotConfig {
    #[serde(default = "AutopilotConfig::default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "AutopilotConfig::default_step_px")]
    pub step_px: f64,
}

impl AutopilotConfig {
    const fn default_tick_ms() -> u64 {
        AUTOPILOT_TICK_MS
    }

    const fn default_step_px() -> f64 {
        AUTOPILOT_STEP_PX
    }

    fn validate(&self) -> Result<(), JourneyConfigError> {
        check_range("autopilot.tick_ms", ms(self.tick_ms), 1.0, 1000.0)?;
        check_range("autopilot.step_px", self.step_px, 0.1, 500.0)?;
        Ok(())
    }
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self {
            tick_ms: Self::default_tick_ms(),
            step_px: Self::default_step_px(),
        }
    }
}

/// Announcement banner rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerConfig {
    /// Station id where the delay zone starts.
    #[serde(default = "BannerConfig::default_zone_from")]
    pub delay_zone_from: String,
    /// Station id where the delay zone ends.
    #[serde(default = "BannerConfig::default_zone_to")]
    pub delay_zone_to: String,
    /// How far the train may drift from a stop before the arrival banner clears.
    #[serde(default = "BannerConfig::default_arrival_tolerance")]
    pub arrival_tolerance: f64,
}

impl BannerConfig {
    fn default_zone_from() -> String {
        DELAY_ZONE_FROM.to_string()
    }

    fn default_zone_to() -> String {
        DELAY_ZONE_TO.to_string()
    }

    const fn default_arrival_tolerance() -> f64 {
        ARRIVAL_BANNER_TOLERANCE
    }

    fn validate(&self) -> Result<(), JourneyConfigError> {
        if self.delay_zone_from.trim().is_empty() || self.delay_zone_from == self.delay_zone_to {
            return Err(JourneyConfigError::DelayZoneStations(
                self.delay_zone_from.clone(),
            ));
        }
        check_range(
            "banner.arrival_tolerance",
            self.arrival_tolerance,
            0.0,
            0.1,
        )?;
        Ok(())
    }
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            delay_zone_from: Self::default_zone_from(),
            delay_zone_to: Self::default_zone_to(),
            arrival_tolerance: Self::default_arrival_tolerance(),
        }
    }
}
