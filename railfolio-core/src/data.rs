use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

use crate::locale::Language;

const DEFAULT_STATION_DATA: &str =
    include_str!("../../railfolio-web/static/assets/data/stations.json");

/// Career category a station belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationKind {
    Education,
    Freelance,
    Professional,
    Transition,
    Current,
}

/// Localized content describing one stop on the journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationContent {
    pub id: String,
    pub kind: StationKind,
    pub year: String,
    pub title: String,
    #[serde(default)]
    pub title_de: Option<String>,
    pub subtitle: String,
    #[serde(default)]
    pub subtitle_de: Option<String>,
    pub institution: String,
    #[serde(default)]
    pub institution_de: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_de: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub highlights_de: Option<Vec<String>>,
}

fn pick<'a>(lang: Language, base: &'a str, de: Option<&'a String>) -> &'a str {
    match (lang, de) {
        (Language::De, Some(text)) if !text.trim().is_empty() => text.as_str(),
        _ => base,
    }
}

impl StationContent {
    /// Title in the requested language, falling back to English.
    #[must_use]
    pub fn title(&self, lang: Language) -> &str {
        pick(lang, &self.title, self.title_de.as_ref())
    }

    #[must_use]
    pub fn subtitle(&self, lang: Language) -> &str {
        pick(lang, &self.subtitle, self.subtitle_de.as_ref())
    }

    #[must_use]
    pub fn institution(&self, lang: Language) -> &str {
        pick(lang, &self.institution, self.institution_de.as_ref())
    }

    #[must_use]
    pub fn description(&self, lang: Language) -> &str {
        pick(lang, &self.description, self.description_de.as_ref())
    }

    #[must_use]
    pub fn highlights(&self, lang: Language) -> &[String] {
        match (lang, self.highlights_de.as_ref()) {
            (Language::De, Some(list)) if !list.is_empty() => list.as_slice(),
            _ => self.highlights.as_slice(),
        }
    }
}

/// Errors raised when station data cannot be turned into a journey.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("station data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("journey requires at least one station")]
    Empty,
    #[error("station #{index} has an empty id")]
    BlankId { index: usize },
    #[error("station id `{0}` appears more than once")]
    DuplicateId(String),
    #[error("unknown data set `{0}`")]
    UnknownDataSet(String),
}

/// Container for all station data shipped with the site.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StationData {
    pub stations: Vec<StationContent>,
    /// Skill groups shown by the tech-stack detail view.
    #[serde(default)]
    pub skills: BTreeMap<String, Vec<String>>,
}

impl StationData {
    /// Create empty station data (useful for tests)
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Station data bundled with the site.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file is malformed.
    pub fn load_from_static() -> Result<Self, DataError> {
        Self::from_json(DEFAULT_STATION_DATA)
    }

    /// Load station data from a JSON string and check ids.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed, the list is empty, or an id
    /// is blank or duplicated.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let data: Self = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    /// Check the structural invariants the journey relies on.
    ///
    /// # Errors
    ///
    /// Returns [`DataError`] when the list is empty or ids are blank/duplicated.
    pub fn validate(&self) -> Result<(), DataError> {
        if self.stations.is_empty() {
            return Err(DataError::Empty);
        }
        let mut seen = HashSet::with_capacity(self.stations.len());
        for (index, station) in self.stations.iter().enumerate() {
            if station.id.trim().is_empty() {
                return Err(DataError::BlankId { index });
            }
            if !seen.insert(station.id.as_str()) {
                return Err(DataError::DuplicateId(station.id.clone()));
            }
        }
        Ok(())
    }

    /// Find a station's position by id.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.stations.iter().position(|station| station.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: &str) -> StationContent {
        StationContent {
            id: id.to_string(),
            kind: StationKind::Professional,
            year: "2024".to_string(),
            title: format!("{id} title"),
            title_de: None,
            subtitle: "Engineer".to_string(),
            subtitle_de: Some("Entwickler".to_string()),
            institution: "Acme".to_string(),
            institution_de: None,
            description: String::new(),
            description_de: None,
            highlights: vec!["one".to_string()],
            highlights_de: Some(Vec::new()),
        }
    }

    #[test]
    fn station_data_from_json() {
        let json = r#"{
            "stations": [{
                "id": "nova",
                "kind": "professional",
                "year": "2023 - 2024",
                "title": "Nova Pakistan",
                "subtitle": "Software Engineer",
                "subtitle_de": "Softwareentwickler",
                "institution": "Nova Pakistan"
            }]
        }"#;
        let data = StationData::from_json(json).unwrap();
        assert_eq!(data.stations.len(), 1);
        assert_eq!(data.stations[0].subtitle(Language::De), "Softwareentwickler");
        assert_eq!(data.stations[0].title(Language::De), "Nova Pakistan");
        assert!(data.skills.is_empty());
    }

    #[test]
    fn localized_lookups_fall_back_to_english() {
        let s = station("softoo");
        assert_eq!(s.title(Language::De), "softoo title");
        assert_eq!(s.subtitle(Language::En), "Engineer");
        assert_eq!(s.highlights(Language::De), ["one".to_string()]);
    }

    #[test]
    fn validation_rejects_duplicates_and_blanks() {
        let empty = StationData::empty();
        assert!(matches!(empty.validate(), Err(DataError::Empty)));

        let dup = StationData {
            stations: vec![station("a"), station("a")],
            skills: BTreeMap::new(),
        };
        assert!(matches!(dup.validate(), Err(DataError::DuplicateId(id)) if id == "a"));

        let blank = StationData {
            stations: vec![station("a"), station("  ")],
            skills: BTreeMap::new(),
        };
        assert!(matches!(
            blank.validate(),
            Err(DataError::BlankId { index: 1 })
        ));
    }

    #[test]
    fn bundled_data_is_valid() {
        let data = StationData::load_from_static().unwrap();
        assert_eq!(data.stations.first().map(|s| s.id.as_str()), Some("education_taxila"));
        assert_eq!(data.index_of("berlin"), Some(data.stations.len() - 1));
        assert!(data.skills.len() > 1);
    }

    #[test]
    fn parse_errors_surface() {
        assert!(matches!(
            StationData::from_json("{not json"),
            Err(DataError::Parse(_))
        ));
    }
}
