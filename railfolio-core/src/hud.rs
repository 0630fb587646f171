//! Rider telemetry derived from displayed progress.
use serde::{Deserialize, Serialize};

use crate::constants::{
    HUD_ORIGIN_PROGRESS, HUD_REGION_SWITCH, HUD_TERMINAL_PROGRESS, HUD_TICKET_PROGRESS,
};
use crate::journey::Journey;
use crate::locale::Language;
use crate::numbers::{floor_to_usize, usize_to_f64};

/// Country the scenery belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    #[default]
    Pakistan,
    Germany,
}

impl Region {
    #[must_use]
    pub fn for_progress(progress: f64) -> Self {
        if progress > HUD_REGION_SWITCH {
            Self::Germany
        } else {
            Self::Pakistan
        }
    }
}

/// Everything the heads-up display shows for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub next_station: Option<usize>,
    pub station_label: String,
    /// Still at the origin; the label reads "origin" rather than "next arrival".
    pub at_origin: bool,
    pub region: Region,
    pub remaining_percent: f64,
    /// Speed readout, zero while stopped.
    pub speed: f64,
    pub stopped: bool,
    pub ticket_visible: bool,
}

/// Inputs for [`HudSnapshot::derive`].
#[derive(Debug, Clone, Copy)]
pub struct HudInput {
    pub progress: f64,
    /// Displayed velocity in progress units per second.
    pub velocity: f64,
    pub locked: bool,
    pub at_station: bool,
    pub language: Language,
}

impl HudSnapshot {
    #[must_use]
    pub fn derive(journey: &Journey, input: &HudInput) -> Self {
        let progress = if input.progress.is_finite() {
            input.progress
        } else {
            0.0
        };
        let count = journey.len();
        let next_station = count
            .checked_sub(1)
            .map(|last| floor_to_usize(progress * usize_to_f64(count)).min(last));

        let station_label = if progress < HUD_TERMINAL_PROGRESS {
            input.language.terminal_name().to_string()
        } else {
            next_station
                .and_then(|index| journey.station(index))
                .map_or_else(
                    || input.language.final_destination().to_string(),
                    |station| station.content.title(input.language).to_string(),
                )
        };

        let stopped = input.locked || input.at_station;
        Self {
            next_station,
            station_label,
            at_origin: progress < HUD_ORIGIN_PROGRESS,
            region: Region::for_progress(progress),
            remaining_percent: (100.0 - progress * 100.0).max(0.0),
            speed: if stopped || !input.velocity.is_finite() {
                0.0
            } else {
                input.velocity.abs() * 100.0
            },
            stopped,
            ticket_visible: progress >= HUD_TICKET_PROGRESS,
        }
    }
}
