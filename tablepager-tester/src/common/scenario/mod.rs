use anyhow::Result;
use rand_chacha::ChaCha20Rng;

pub mod catalog;

use catalog::CATALOG;

/// One iteration of a scenario, driven by a seeded RNG.
pub type ScenarioFn = fn(&mut ChaCha20Rng) -> Result<()>;

#[derive(Debug, Clone, Copy)]
pub struct TestScenario {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub run: ScenarioFn,
}

impl TestScenario {
    /// Run one iteration.
    ///
    /// # Errors
    ///
    /// Returns the first violated expectation.
    pub fn run_once(&self, rng: &mut ChaCha20Rng) -> Result<()> {
        (self.run)(rng)
    }
}

#[must_use]
pub fn get_scenario(key: &str) -> Option<TestScenario> {
    CATALOG.iter().find(|s| s.key == key).copied()
}

#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    CATALOG.iter().map(|s| (s.key, s.description)).collect()
}

#[must_use]
pub fn all_scenario_keys() -> Vec<String> {
    CATALOG.iter().map(|s| s.key.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_key() {
        let smoke = get_scenario("smoke").expect("smoke scenario");
        assert_eq!(smoke.name, "Smoke");
        assert!(get_scenario("missing").is_none());
    }

    #[test]
    fn keys_are_unique() {
        let mut keys = all_scenario_keys();
        let len = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), len);
        assert_eq!(list_scenarios().len(), len);
    }
}
