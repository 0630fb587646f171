//! Railfolio Journey Engine
//!
//! Platform-agnostic core of the Railfolio scrolling portfolio: scroll input is
//! turned into a lockable progress value, station crossings trigger an arrival
//! sequence (snap, announcement, dwell) and an optional guided demo drives the
//! train on its own. Hosts supply audio, speech and viewport plumbing.

pub mod constants;
pub mod data;
pub mod detail;
pub mod effects;
pub mod hud;
pub mod journey;
pub mod locale;
pub mod numbers;
#[cfg(any(test, feature = "test-support"))]
pub mod recording;

// Re-export commonly used types
pub use constants::PROGRESS_EPSILON;
pub use data::{DataError, StationContent, StationData, StationKind};
pub use detail::{DetailCatalog, DetailContent, ReviewSource};
pub use effects::{
    AudioSink, DetailScroll, HostEffect, NullAudio, NullSpeech, SpeechSink, Utterance,
};
pub use hud::{HudInput, HudSnapshot, Region};
pub use journey::{
    AnnouncementSource, AnnouncementState, ArrivalPhase, ArrivalState, Command, CommandOutcome,
    EventKind, Journey, JourneyCfg, JourneyConfigError, JourneyEvent, JourneyMode,
    JourneySession, ProgressState, Station, TimerSlot, Viewport,
};
pub use locale::{Language, UnknownLanguage};

/// Trait for abstracting data loading operations
/// Platform-specific implementations should provide this
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the station list shown along the track.
    ///
    /// # Errors
    ///
    /// Returns an error if the station data cannot be loaded.
    fn load_station_data(&self) -> Result<StationData, Self::Error>;

    /// Load configuration data for a specific system
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or parsed.
    fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
    where
        T: serde::de::DeserializeOwned;
}

/// Loader backed by the data files compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticDataLoader;

impl DataLoader for StaticDataLoader {
    type Error = DataError;

    fn load_station_data(&self) -> Result<StationData, Self::Error> {
        StationData::load_from_static()
    }

    fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
    where
        T: serde::de::DeserializeOwned,
    {
        match config_name {
            "journey" => Ok(serde_json::from_str("{}")?),
            other => Err(DataError::UnknownDataSet(other.to_string())),
        }
    }
}

/// Build a session from whatever a loader provides.
///
/// # Errors
///
/// Returns an error if data or configuration cannot be loaded, or if the
/// configuration fails validation.
pub fn build_session<L, A, S>(
    loader: &L,
    audio: A,
    speech: S,
) -> Result<JourneySession<A, S>, SessionBuildError<L::Error>>
where
    L: DataLoader,
    A: AudioSink,
    S: SpeechSink,
{
    let cfg: JourneyCfg = loader
        .load_config("journey")
        .map_err(SessionBuildError::Load)?;
    let data = loader.load_station_data().map_err(SessionBuildError::Load)?;
    let journey = Journey::new(data, &cfg.layout)?;
    Ok(JourneySession::new(cfg, journey, audio, speech)?)
}

/// Failure while assembling a session from loaded data.
#[derive(Debug, thiserror::Error)]
pub enum SessionBuildError<E: std::error::Error + 'static> {
    #[error("failed to load journey inputs: {0}")]
    Load(#[source] E),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Config(#[from] JourneyConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::DeserializeOwned;
    use std::convert::Infallible;

    #[derive(Clone, Copy, Default)]
    struct FixtureLoader;

    impl DataLoader for FixtureLoader {
        type Error = Infallible;

        fn load_station_data(&self) -> Result<StationData, Self::Error> {
            Ok(StationData::load_from_static().unwrap())
        }

        fn load_config<T>(&self, _config_name: &str) -> Result<T, Self::Error>
        where
            T: DeserializeOwned,
        {
            Ok(serde_json::from_str(r#"{"key_step_px": 150.0}"#).unwrap())
        }
    }

    #[test]
    fn static_loader_builds_a_session() {
        let session = build_session(&StaticDataLoader, NullAudio, NullSpeech).unwrap();
        assert_eq!(session.journey().len(), 8);
        assert!(!session.is_started());
        assert!(session.thresholds().iter().all(Option::is_some));
    }

    #[test]
    fn static_loader_rejects_unknown_config() {
        let result: Result<JourneyCfg, _> = StaticDataLoader.load_config("weather");
        assert!(matches!(result, Err(DataError::UnknownDataSet(name)) if name == "weather"));
    }

    #[test]
    fn loader_config_flows_into_the_session() {
        let mut session = build_session(&FixtureLoader, NullAudio, NullSpeech).unwrap();
        session.start(JourneyMode::normal(), Language::En).unwrap();
        session.drain_effects();
        assert_eq!(session.command(Command::StepForward), CommandOutcome::Applied);
        assert_eq!(
            session.drain_effects().as_slice(),
            &[HostEffect::ScrollBy {
                delta: 150.0,
                smooth: true
            }]
        );
    }
}
