use serde::{Deserialize, Serialize};

use crate::locale::Language;

/// What produced the banner text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementSource {
    #[default]
    None,
    DelayZone,
    Arrival,
}

/// Banner contents shown above the track.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnnouncementState {
    pub text: String,
    pub source: AnnouncementSource,
}

impl AnnouncementState {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self.source, AnnouncementSource::None)
    }

    fn delay(language: Language) -> Self {
        Self {
            text: language.delay_message().to_string(),
            source: AnnouncementSource::DelayZone,
        }
    }
}

/// Progress interval between two stations where the track work notice shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelayZone {
    pub start: f64,
    pub end: f64,
}

impl DelayZone {
    /// Zone between two thresholds, `None` unless both exist and `start < end`.
    #[must_use]
    pub fn between(start: Option<f64>, end: Option<f64>) -> Option<Self> {
        let (start, end) = (start?, end?);
        (start < end).then_some(Self { start, end })
    }

    #[must_use]
    pub fn contains(&self, progress: f64) -> bool {
        progress > self.start && progress < self.end
    }
}

/// Inputs observed on each displayed-progress update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BannerInput {
    pub displayed: f64,
    pub language: Language,
    pub at_station: bool,
    pub zone: Option<DelayZone>,
    /// Threshold of the last station the train stopped at.
    pub stopped_at: Option<f64>,
    pub tolerance: f64,
}

/// Derives the banner from displayed progress, language and arrival state.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnouncementBanner;

impl AnnouncementBanner {
    /// Next banner state given the current one.
    #[must_use]
    pub fn update(current: &AnnouncementState, input: &BannerInput) -> AnnouncementState {
        if !input.displayed.is_finite() {
            return current.clone();
        }
        let mut next = current.clone();

        if !next.is_empty()
            && input
                .stopped_at
                .is_some_and(|at| (input.displayed - at).abs() > input.tolerance)
        {
            next = AnnouncementState::default();
        }

        if let Some(zone) = input.zone {
            if zone.contains(input.displayed) {
                if !input.at_station {
                    next = AnnouncementState::delay(input.language);
                }
            } else if next.source == AnnouncementSource::DelayZone {
                next = AnnouncementState::default();
            }
        }
        next
    }

    /// Banner shown once the train has been stopped for a while.
    #[must_use]
    pub fn stopped(language: Language) -> AnnouncementState {
        AnnouncementState {
            text: language.stopped_message().to_string(),
            source: AnnouncementSource::Arrival,
        }
    }

    /// Whether the stopped banner still applies at `displayed`.
    #[must_use]
    pub fn still_stopped(displayed: f64, stopped_at: Option<f64>, tolerance: f64) -> bool {
        stopped_at.is_some_and(|at| (displayed - at).abs() <= tolerance)
    }
}
