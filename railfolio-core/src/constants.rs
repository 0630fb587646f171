//! Centralized layout, timing and tuning constants for the Railfolio journey.
//!
//! These values are the defaults behind [`crate::journey::JourneyCfg`]. Keeping
//! them together means the feel of the ride is adjusted through reviewed code
//! changes, while hosts can still override individual fields via config.

// Track layout (pixels) ----------------------------------------------------
pub(crate) const STATION_SPACING_PX: f64 = 2500.0;
pub(crate) const STATION_OFFSET_PX: f64 = 1500.0;
pub(crate) const TAIL_PADDING_PX: f64 = 3000.0;
pub(crate) const ANCHOR_VIEWPORT_RATIO: f64 = 0.2;
pub(crate) const ANCHOR_OFFSET_PX: f64 = 300.0;

// Arrival sequencing (milliseconds) ----------------------------------------
pub(crate) const SNAP_RELEASE_MS: u64 = 100;
pub(crate) const NORMAL_DWELL_MS: u64 = 1000;
pub(crate) const DEMO_DETAIL_DELAY_MS: u64 = 2000;
pub(crate) const DEMO_RESUME_DELAY_MS: u64 = 1000;
pub(crate) const STOPPED_BANNER_DELAY_MS: u64 = 2500;
pub(crate) const CONTROLS_HINT_DELAY_MS: u64 = 1000;

// Guided detail tour (milliseconds after the detail opens) -----------------
pub(crate) const TOUR_SCROLL_DOWN_MS: u64 = 1500;
pub(crate) const TOUR_SCROLL_UP_MS: u64 = 6500;
pub(crate) const TOUR_CLOSE_MS: u64 = 8000;

// Motion smoothing ---------------------------------------------------------
pub(crate) const SMOOTH_TIME_SECS: f64 = 0.045;
pub(crate) const SMOOTH_MAX_SPEED: f64 = 2.5;
pub(crate) const SMOOTH_REST_DELTA: f64 = 0.001;

// Autopilot ----------------------------------------------------------------
pub(crate) const AUTOPILOT_TICK_MS: u64 = 16;
pub(crate) const AUTOPILOT_STEP_PX: f64 = 3.0;

// Keyboard -----------------------------------------------------------------
pub(crate) const KEY_STEP_PX: f64 = 300.0;

// Banner -------------------------------------------------------------------
pub(crate) const DELAY_ZONE_FROM: &str = "cottbus";
pub(crate) const DELAY_ZONE_TO: &str = "berlin";
pub(crate) const ARRIVAL_BANNER_TOLERANCE: f64 = 0.002;

// Audio levels -------------------------------------------------------------
pub(crate) const AMBIENT_IDLE_LEVEL: f64 = 0.0;
pub(crate) const AMBIENT_CRUISE_LEVEL: f64 = 0.1;
pub(crate) const AMBIENT_BASE_LEVEL: f64 = 0.05;
pub(crate) const AMBIENT_SPEED_GAIN: f64 = 0.2;
pub(crate) const AMBIENT_SPEED_SCALE_PX: f64 = 1000.0;

// HUD ----------------------------------------------------------------------
pub(crate) const HUD_TERMINAL_PROGRESS: f64 = 0.02;
pub(crate) const HUD_ORIGIN_PROGRESS: f64 = 0.05;
pub(crate) const HUD_REGION_SWITCH: f64 = 0.7;
pub(crate) const HUD_TICKET_PROGRESS: f64 = 0.99;

// Numeric tolerance used when comparing snapped progress -------------------
pub const PROGRESS_EPSILON: f64 = 1e-6;

// Event log ----------------------------------------------------------------
pub(crate) const EVENT_LOG_CAPACITY: usize = 512;
