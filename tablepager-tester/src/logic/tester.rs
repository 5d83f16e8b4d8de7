use colored::Colorize;
use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::common::scenario::TestScenario;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub seed: u64,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
    #[serde(with = "duration_vec_serde")]
    pub performance_data: Vec<Duration>,
}

pub struct LogicTester {
    verbose: bool,
}

impl LogicTester {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn run_scenario(
        &self,
        scenario: &TestScenario,
        seeds: &[u64],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        seeds
            .iter()
            .map(|&seed| {
                if self.verbose {
                    println!(
                        "🧪 Testing scenario: {} (seed: {})",
                        scenario.name.bright_white(),
                        seed
                    );
                }
                self.run_single_scenario(scenario, seed, iterations)
            })
            .collect()
    }

    fn run_single_scenario(
        &self,
        scenario: &TestScenario,
        seed: u64,
        iterations: usize,
    ) -> ScenarioResult {
        let mut successes = 0;
        let mut failures = Vec::new();
        let mut performance_data = Vec::with_capacity(iterations);

        for i in 0..iterations {
            let iteration_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));
            let mut rng = ChaCha20Rng::seed_from_u64(iteration_seed);
            let start_time = Instant::now();
            let outcome = scenario.run_once(&mut rng);
            performance_data.push(start_time.elapsed());

            match outcome {
                Ok(()) => successes += 1,
                Err(err) => {
                    let message = format!("Iteration {} (seed {iteration_seed}): {err:#}", i + 1);
                    if self.verbose {
                        println!(
                            "  ❌ Iteration {}/{} failed: {}",
                            i + 1,
                            iterations,
                            message.clone().red()
                        );
                    }
                    failures.push(message);
                }
            }
        }

        let average_duration = if performance_data.is_empty() {
            Duration::ZERO
        } else {
            performance_data.iter().sum::<Duration>()
                / u32::try_from(performance_data.len()).unwrap_or(u32::MAX)
        };
        debug!(
            "{} seed {seed}: {successes}/{iterations} passed",
            scenario.key
        );

        ScenarioResult {
            scenario_name: scenario.name.to_string(),
            seed,
            passed: failures.is_empty(),
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
        Ok(Duration::from_micros(u64::try_from(micros).unwrap_or(0)))
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
            .map(|m| Duration::from_micros(u64::try_from(m).unwrap_or(0)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::scenario::get_scenario;
    use anyhow::bail;

    fn always_fails(_rng: &mut ChaCha20Rng) -> anyhow::Result<()> {
        bail!("boom")
    }

    #[test]
    fn runs_one_result_per_seed() {
        let scenario = get_scenario("smoke").expect("smoke");
        let results = LogicTester::new(false).run_scenario(&scenario, &[1, 2, 3], 4);
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.passed));
        assert!(results.iter().all(|r| r.successful_iterations == 4));
        assert_eq!(results[1].seed, 2);
        assert_eq!(results[0].performance_data.len(), 4);
    }

    #[test]
    fn failures_are_collected_with_iteration_seed() {
        let scenario = TestScenario {
            key: "fails",
            name: "Fails",
            description: "always fails",
            run: always_fails,
        };
        let results = LogicTester::new(false).run_scenario(&scenario, &[10], 2);
        let result = &results[0];
        assert!(!result.passed);
        assert_eq!(result.successful_iterations, 0);
        assert_eq!(result.failures.len(), 2);
        assert!(result.failures[1].contains("seed 11"));
        assert!(result.failures[1].contains("boom"));
    }

    #[test]
    fn zero_iterations_average_is_zero() {
        let scenario = get_scenario("page-window").expect("window");
        let results = LogicTester::new(false).run_scenario(&scenario, &[5], 0);
        assert_eq!(results[0].average_duration, Duration::ZERO);
        assert!(results[0].passed);
    }

    #[test]
    fn durations_serialize_as_micros() {
        let result = ScenarioResult {
            scenario_name: "Smoke".to_string(),
            seed: 1,
            passed: true,
            iterations_run: 1,
            successful_iterations: 1,
            failures: Vec::new(),
            average_duration: Duration::from_micros(1500),
            performance_data: vec![Duration::from_micros(1500)],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["average_duration"], 1500);
        assert_eq!(json["performance_data"][0], 1500);
    }
}
