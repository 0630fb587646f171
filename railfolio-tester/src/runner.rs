use colored::Colorize;
use railfolio_core::{Language, Viewport};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::rider::Rider;
use crate::scenario::JourneyScenario;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub language: Language,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
    #[serde(with = "duration_vec_serde")]
    pub performance_data: Vec<Duration>,
}

/// Runs catalog scenarios against fresh sessions.
pub struct ScenarioRunner {
    language: Language,
    viewport: Viewport,
    verbose: bool,
}

impl ScenarioRunner {
    pub const fn new(language: Language, viewport: Viewport, verbose: bool) -> Self {
        Self {
            language,
            viewport,
            verbose,
        }
    }

    pub fn run_scenario(&self, scenario: &JourneyScenario, iterations: usize) -> ScenarioResult {
        if self.verbose {
            println!(
                "🚆 Riding scenario: {} (mode: {:?}, language: {})",
                scenario.name.bright_white(),
                scenario.mode,
                self.language
            );
        }

        let mut failures = Vec::new();
        let mut performance_data = Vec::with_capacity(iterations);
        let mut successes = 0;

        for iteration in 1..=iterations {
            let started = Instant::now();
            let outcome = Rider::board(scenario.mode, self.language, self.viewport)
                .and_then(|mut rider| (scenario.check)(&mut rider));
            performance_data.push(started.elapsed());
            match outcome {
                Ok(()) => successes += 1,
                Err(err) => {
                    log::warn!("{} iteration {iteration} failed: {err:#}", scenario.key);
                    failures.push(format!("iteration {iteration}: {err:#}"));
                }
            }
        }

        let average_duration = if performance_data.is_empty() {
            Duration::ZERO
        } else {
            performance_data.iter().sum::<Duration>()
                / u32::try_from(performance_data.len()).unwrap_or(u32::MAX)
        };

        if self.verbose {
            let status = if failures.is_empty() {
                "passed".green()
            } else {
                "failed".red()
            };
            println!(
                "   {successes}/{iterations} iterations {status} (avg {average_duration:?})"
            );
        }

        ScenarioResult {
            scenario_name: scenario.name.to_string(),
            language: self.language,
            passed: failures.is_empty() && iterations > 0,
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_duration,
            performance_data,
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_micros().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let micros = u128::deserialize(deserializer)?;
        Ok(Duration::from_micros(u64::try_from(micros).unwrap_or(u64::MAX)))
    }
}

mod duration_vec_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(durations: &[Duration], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let micros: Vec<u128> = durations.iter().map(Duration::as_micros).collect();
        micros.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let micros = Vec::<u128>::deserialize(deserializer)?;
        Ok(micros
            .into_iter()
            .map(|m| Duration::from_micros(u64::try_from(m).unwrap_or(u64::MAX)))
            .collect())
    }
}
