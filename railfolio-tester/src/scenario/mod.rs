pub mod catalog;

use anyhow::Result;
use railfolio_core::JourneyMode;

use crate::rider::Rider;

pub use catalog::catalog_scenarios;

/// A scripted ride with its own pass/fail checks.
#[derive(Clone)]
pub struct JourneyScenario {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub mode: JourneyMode,
    pub check: fn(&mut Rider) -> Result<()>,
}

impl JourneyScenario {
    pub const fn new(
        key: &'static str,
        name: &'static str,
        description: &'static str,
        mode: JourneyMode,
        check: fn(&mut Rider) -> Result<()>,
    ) -> Self {
        Self {
            key,
            name,
            description,
            mode,
            check,
        }
    }
}

impl std::fmt::Debug for JourneyScenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JourneyScenario")
            .field("key", &self.key)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

pub fn get_scenario(key: &str) -> Option<JourneyScenario> {
    catalog_scenarios()
        .into_iter()
        .find(|scenario| scenario.key == key)
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    catalog_scenarios()
        .into_iter()
        .map(|scenario| (scenario.key, scenario.description))
        .collect()
}

pub fn scenario_keys() -> Vec<&'static str> {
    catalog_scenarios()
        .into_iter()
        .map(|scenario| scenario.key)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keys_are_unique_and_resolvable() {
        let keys = scenario_keys();
        let unique: HashSet<_> = keys.iter().collect();
        assert_eq!(unique.len(), keys.len());
        for key in keys {
            assert_eq!(get_scenario(key).map(|s| s.key), Some(key));
        }
    }

    #[test]
    fn unknown_key_resolves_to_none() {
        assert!(get_scenario("boss-fight").is_none());
    }

    #[test]
    fn listing_includes_descriptions() {
        let listing = list_scenarios();
        assert!(listing.iter().any(|(key, _)| *key == "smoke"));
        assert!(listing.iter().all(|(_, description)| !description.is_empty()));
    }
}
