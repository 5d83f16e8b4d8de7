use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use super::ScenarioResult;

fn success_rate(results: &[ScenarioResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let passed = results.iter().filter(|r| r.passed).count();
    #[allow(clippy::cast_precision_loss)]
    let rate = (passed as f64 / results.len() as f64) * 100.0;
    rate
}

/// Human-readable summary with per-scenario detail.
///
/// # Errors
///
/// Propagates write failures.
pub fn generate_console_report(
    out: &mut dyn Write,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Pagination Test Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "==================================".cyan())?;

    let total_tests = results.len();
    let passed_tests = results.iter().filter(|r| r.passed).count();
    let failed_tests = total_tests - passed_tests;

    writeln!(out, "Total runs: {total_tests}")?;
    writeln!(out, "Passed: {}", passed_tests.to_string().green())?;
    writeln!(out, "Failed: {}", failed_tests.to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", success_rate(results))?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };

        writeln!(
            out,
            "{} {} (seed {})",
            status,
            result.scenario_name.bold(),
            result.seed
        )?;
        writeln!(
            out,
            "   Iterations: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(out, "   Average time: {:?}", result.average_duration)?;

        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
        writeln!(out)?;
    }

    let fastest = results.iter().min_by_key(|r| r.average_duration);
    let slowest = results.iter().max_by_key(|r| r.average_duration);
    if let (Some(fastest), Some(slowest)) = (fastest, slowest) {
        writeln!(out, "{}", "⚡ Performance Summary".bright_yellow().bold())?;
        writeln!(out, "{}", "=====================".yellow())?;
        writeln!(
            out,
            "Fastest: {} ({:?})",
            fastest.scenario_name.green(),
            fastest.average_duration
        )?;
        writeln!(
            out,
            "Slowest: {} ({:?})",
            slowest.scenario_name.yellow(),
            slowest.average_duration
        )?;
    }
    Ok(())
}

/// # Errors
///
/// Propagates serialization and write failures.
pub fn generate_json_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(results)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

/// # Errors
///
/// Propagates write failures.
pub fn generate_markdown_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    writeln!(out, "# Tablepager Test Results\n")?;

    let total_tests = results.len();
    let passed_tests = results.iter().filter(|r| r.passed).count();

    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total runs**: {total_tests}")?;
    writeln!(out, "- **Passed**: {passed_tests}")?;
    writeln!(out, "- **Failed**: {}", total_tests - passed_tests)?;
    writeln!(out, "- **Success rate**: {:.1}%\n", success_rate(results))?;

    writeln!(out, "## Detailed Results\n")?;
    writeln!(out, "| Scenario | Seed | Result | Iterations | Average time |")?;
    writeln!(out, "|---|---|---|---|---|")?;
    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(
            out,
            "| {} | {} | {} | {}/{} | {:?} |",
            result.scenario_name,
            result.seed,
            status,
            result.successful_iterations,
            result.iterations_run,
            result.average_duration
        )?;
    }

    let failed: Vec<&ScenarioResult> = results.iter().filter(|r| !r.passed).collect();
    if !failed.is_empty() {
        writeln!(out, "\n## Failures\n")?;
        for result in failed {
            writeln!(out, "### {} (seed {})\n", result.scenario_name, result.seed)?;
            for failure in &result.failures {
                writeln!(out, "- {failure}")?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(passed: bool) -> ScenarioResult {
        ScenarioResult {
            scenario_name: "Search".to_string(),
            seed: 42,
            passed,
            iterations_run: 3,
            successful_iterations: if passed { 3 } else { 2 },
            failures: if passed {
                Vec::new()
            } else {
                vec!["Iteration 2 (seed 43): search \"user\": 3 rows, expected 4".to_string()]
            },
            average_duration: Duration::from_micros(120),
            performance_data: vec![Duration::from_micros(120); 3],
        }
    }

    fn render(f: impl FnOnce(&mut dyn Write) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn console_report_lists_failures() {
        colored::control::set_override(false);
        let results = [sample(true), sample(false)];
        let text = render(|out| generate_console_report(out, &results, Duration::from_millis(5)));
        assert!(text.contains("Total runs: 2"));
        assert!(text.contains("Success rate: 50.0%"));
        assert!(text.contains("expected 4"));
        assert!(text.contains("Performance Summary"));
    }

    #[test]
    fn json_report_round_trips() {
        let results = [sample(true)];
        let text = render(|out| generate_json_report(out, &results));
        let parsed: Vec<ScenarioResult> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].average_duration, Duration::from_micros(120));
    }

    #[test]
    fn markdown_report_has_table_and_failure_section() {
        let results = [sample(true), sample(false)];
        let text = render(|out| generate_markdown_report(out, &results));
        assert!(text.contains("# Tablepager Test Results"));
        assert!(text.contains("| Search | 42 | ✅ | 3/3 |"));
        assert!(text.contains("## Failures"));
    }
}
