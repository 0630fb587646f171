//! Track geometry: where stations sit and which progress value brings each
//! one under the train.
use serde::{Deserialize, Serialize};

use super::LayoutConfig;
use crate::data::{DataError, StationContent, StationData};
use crate::numbers::{finite, ratio, usize_to_f64};

/// Visible window and scrollable document size, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Full document height; the scrollable range is `scroll_height - height`.
    pub scroll_height: f64,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: f64, height: f64, scroll_height: f64) -> Self {
        Self {
            width,
            height,
            scroll_height,
        }
    }

    /// Vertical pixels the page can scroll, `None` when the page cannot scroll.
    #[must_use]
    pub fn scroll_range(&self) -> Option<f64> {
        let range = finite(self.scroll_height - self.height)?;
        (range > 0.0).then_some(range)
    }

    /// Normalize a raw scroll offset to progress.
    #[must_use]
    pub fn progress_for_scroll(&self, scroll_y: f64) -> Option<f64> {
        ratio(scroll_y, self.scroll_range()?)
    }

    /// Scroll offset that corresponds to `progress`, never negative.
    #[must_use]
    pub fn scroll_for_progress(&self, progress: f64) -> Option<f64> {
        let range = self.scroll_range()?;
        finite(progress * range).map(|y| y.max(0.0))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0, 8000.0)
    }
}

/// A stop on the journey with its fixed offset along the track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub index: usize,
    /// Horizontal position of the station's center on the track, in pixels.
    pub center_offset: f64,
    pub content: StationContent,
}

impl Station {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.content.id
    }
}

/// Ordered stations laid out on a horizontal track.
#[derive(Debug, Clone, PartialEq)]
pub struct Journey {
    stations: Vec<Station>,
    track_length: f64,
    layout: LayoutConfig,
    skills: std::collections::BTreeMap<String, Vec<String>>,
}

impl Journey {
    /// Lay stations out at fixed spacing.
    ///
    /// # Errors
    ///
    /// Returns [`DataError`] when the station list is empty or ids are not unique.
    pub fn new(data: StationData, layout: &LayoutConfig) -> Result<Self, DataError> {
        data.validate()?;
        let StationData { stations, skills } = data;
        let count = stations.len();
        let stations = stations
            .into_iter()
            .enumerate()
            .map(|(index, content)| Station {
                index,
                center_offset: usize_to_f64(index + 1) * layout.station_spacing
                    + layout.station_offset,
                content,
            })
            .collect();
        let track_length = usize_to_f64(count + 1) * layout.station_spacing + layout.tail_padding;
        Ok(Self {
            stations,
            track_length,
            layout: layout.clone(),
            skills,
        })
    }

    #[must_use]
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    #[must_use]
    pub fn station(&self, index: usize) -> Option<&Station> {
        self.stations.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.stations.iter().position(|station| station.id() == id)
    }

    #[must_use]
    pub const fn track_length(&self) -> f64 {
        self.track_length
    }

    #[must_use]
    pub fn skills(&self) -> &std::collections::BTreeMap<String, Vec<String>> {
        &self.skills
    }

    /// Horizontal point of the viewport that the train's midpoint occupies.
    #[must_use]
    pub fn anchor_x(&self, viewport: &Viewport) -> f64 {
        viewport.width * self.layout.anchor_ratio + self.layout.anchor_offset
    }

    /// How far the track can slide under the viewport.
    #[must_use]
    pub fn scrollable_width(&self, viewport: &Viewport) -> f64 {
        self.track_length - viewport.width
    }

    /// Track translation for a progress value; negative values slide left.
    #[must_use]
    pub fn track_translation(&self, progress: f64, viewport: &Viewport) -> f64 {
        -progress * self.scrollable_width(viewport).max(0.0)
    }

    /// Progress at which station `index` sits under the train.
    ///
    /// `None` when the viewport is degenerate or the index is unknown.
    #[must_use]
    pub fn threshold(&self, index: usize, viewport: &Viewport) -> Option<f64> {
        let station = self.stations.get(index)?;
        ratio(
            station.center_offset - self.anchor_x(viewport),
            self.scrollable_width(viewport),
        )
    }

    /// Thresholds for every station in order.
    #[must_use]
    pub fn thresholds(&self, viewport: &Viewport) -> Vec<Option<f64>> {
        (0..self.stations.len())
            .map(|index| self.threshold(index, viewport))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::StationKind;

    fn content(id: &str) -> StationContent {
        StationContent {
            id: id.to_string(),
            kind: StationKind::Professional,
            year: "2024".to_string(),
            title: id.to_uppercase(),
            title_de: None,
            subtitle: String::new(),
            subtitle_de: None,
            institution: String::new(),
            institution_de: None,
            description: String::new(),
            description_de: None,
            highlights: Vec::new(),
            highlights_de: None,
        }
    }

    fn data(ids: &[&str]) -> StationData {
        StationData {
            stations: ids.iter().map(|id| content(id)).collect(),
            skills: std::collections::BTreeMap::new(),
        }
    }

    #[test]
    fn default_layout_places_stations_on_spacing() {
        let journey = Journey::new(data(&["a", "b", "c"]), &LayoutConfig::default()).unwrap();
        assert_eq!(journey.len(), 3);
        assert!((journey.stations()[0].center_offset - 4000.0).abs() < f64::EPSILON);
        assert!((journey.stations()[2].center_offset - 9000.0).abs() < f64::EPSILON);
        assert!((journey.track_length() - 13_000.0).abs() < f64::EPSILON);
        assert_eq!(journey.index_of("b"), Some(1));
    }

    #[test]
    fn thresholds_match_anchor_geometry() {
        let journey = Journey::new(data(&["a", "b"]), &LayoutConfig::default()).unwrap();
        let viewport = Viewport::new(1000.0, 800.0, 5000.0);
        // anchor = 0.2 * 1000 + 300 = 500, scrollable = 10500 - 1000 = 9500
        let first = journey.threshold(0, &viewport).unwrap();
        assert!((first - 3500.0 / 9500.0).abs() < 1e-12);
        let second = journey.threshold(1, &viewport).unwrap();
        assert!(second > first);
    }

    #[test]
    fn degenerate_viewport_has_no_thresholds() {
        let journey = Journey::new(data(&["a"]), &LayoutConfig::default()).unwrap();
        let too_wide = Viewport::new(journey.track_length() + 10.0, 800.0, 4000.0);
        assert_eq!(journey.threshold(0, &too_wide), None);
        let nan = Viewport::new(f64::NAN, 800.0, 4000.0);
        assert_eq!(journey.thresholds(&nan), vec![None]);
        assert_eq!(journey.threshold(4, &Viewport::default()), None);
    }

    #[test]
    fn viewport_maps_scroll_both_ways() {
        let viewport = Viewport::new(1000.0, 1000.0, 11_000.0);
        assert_eq!(viewport.scroll_range(), Some(10_000.0));
        assert_eq!(viewport.progress_for_scroll(2500.0), Some(0.25));
        assert_eq!(viewport.scroll_for_progress(-0.1), Some(0.0));
        let flat = Viewport::new(1000.0, 1000.0, 900.0);
        assert_eq!(flat.progress_for_scroll(10.0), None);
    }

    #[test]
    fn empty_data_is_rejected() {
        assert!(Journey::new(StationData::empty(), &LayoutConfig::default()).is_err());
    }
}
