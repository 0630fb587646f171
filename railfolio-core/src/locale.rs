//! Rider-facing language selection and the handful of strings the engine
//! itself has to produce (spoken announcements, banner messages, HUD labels).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language the journey is narrated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    En,
    De,
}

impl Language {
    /// Short language tag (`en`, `de`).
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
        }
    }

    /// Tag handed to speech engines when picking a voice.
    #[must_use]
    pub const fn speech_tag(self) -> &'static str {
        match self {
            Self::En => "en-US",
            Self::De => "de-DE",
        }
    }

    /// Announcement pace; German announcements are read slower.
    #[must_use]
    pub const fn speech_rate(self) -> f32 {
        match self {
            Self::En => 0.9,
            Self::De => 0.85,
        }
    }

    /// Text spoken when the train stops at a station.
    #[must_use]
    pub fn arrival_announcement(self, station_title: &str) -> String {
        match self {
            Self::En => format!("Next Station: {station_title}"),
            Self::De => format!("Nächster Halt: {station_title}. Ausstieg links."),
        }
    }

    #[must_use]
    pub const fn delay_message(self) -> &'static str {
        match self {
            Self::En => "⚠️ Delay due to track work in Lübbenau",
            Self::De => "⚠️ Verzögerung wegen Gleisarbeiten in Lübbenau",
        }
    }

    #[must_use]
    pub const fn stopped_message(self) -> &'static str {
        "🛑 STOPPED"
    }

    #[must_use]
    pub const fn terminal_name(self) -> &'static str {
        match self {
            Self::En => "Railway Terminal",
            Self::De => "Hauptbahnhof",
        }
    }

    #[must_use]
    pub const fn final_destination(self) -> &'static str {
        match self {
            Self::En => "Berlin - Ready to Join",
            Self::De => "Berlin - Bereit für den Einstieg",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned when a language tag is not supported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language tag `{0}` (expected `en` or `de`)")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.split(['-', '_']).next().unwrap_or_default() {
            "en" => Ok(Self::En),
            "de" => Ok(Self::De),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}
