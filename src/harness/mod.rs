//! Solution harness
//!
//! Ties one solution to its test cases and drives the runner, the analyzer,
//! the variant benchmark and the time-limit sweep, printing a report for
//! each and handing the structured result back to the caller.

pub mod command;
pub mod session;

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::benchmark::guard::{self, SweepOutcome};
use crate::benchmark::metrics::benchmark_variants;
use crate::benchmark::{PerformanceAnalyzer, TestRunner, TimeLimitSweep};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{
    BenchmarkComparison, PerformanceMetrics, RunSummary, TestCase, TestResult, TestSuite,
};
use crate::report;
use crate::solutions::{Solution, test_case_file_name};

pub use command::Command;
pub use session::Session;

const NO_TEST_CASES: &str = "No test cases available";

/// Everything `run_all` produced
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub summary: Option<RunSummary>,
    pub results: Vec<TestResult>,
    pub metrics: Option<PerformanceMetrics>,
    pub benchmark: Option<BenchmarkComparison>,
}

/// Drives one solution through tests, analysis and benchmarks
pub struct SolutionHarness<W: Write = io::Stdout> {
    solution: Arc<dyn Solution>,
    test_cases: Vec<TestCase>,
    runner: TestRunner,
    analyzer: PerformanceAnalyzer,
    sweep: TimeLimitSweep,
    out: W,
}

impl SolutionHarness<io::Stdout> {
    /// Harness printing to stdout, starting from the built-in test cases
    pub fn new(solution: Arc<dyn Solution>, config: &Config) -> Self {
        Self::with_writer(solution, config, io::stdout())
    }
}

impl<W: Write> SolutionHarness<W> {
    pub fn with_writer(solution: Arc<dyn Solution>, config: &Config, out: W) -> Self {
        let test_cases = solution.default_test_cases();
        Self {
            solution,
            test_cases,
            runner: TestRunner::new(config.runner.clone()),
            analyzer: PerformanceAnalyzer::new(config.analyzer.clone()),
            sweep: TimeLimitSweep::new(config.analyzer.time_limits.clone()),
            out,
        }
    }

    pub fn solution(&self) -> &Arc<dyn Solution> {
        &self.solution
    }

    pub fn test_cases(&self) -> &[TestCase] {
        &self.test_cases
    }

    pub fn set_test_cases(&mut self, test_cases: Vec<TestCase>) {
        self.test_cases = test_cases;
    }

    /// Results of the latest test run
    pub fn results(&self) -> &[TestResult] {
        self.runner.results()
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    /// Load test cases from a TOML file
    ///
    /// Any load error falls back to the solution's built-in cases. Returns
    /// the number of cases now loaded.
    pub fn load_test_cases(&mut self, path: &Path) -> usize {
        match TestSuite::from_file(path) {
            Ok(suite) => {
                tracing::info!(
                    path = %path.display(),
                    count = suite.test_cases.len(),
                    "Using test cases from file"
                );
                self.test_cases = suite.test_cases;
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Could not load test cases, using built-in ones"
                );
                self.test_cases = self.solution.default_test_cases();
            }
        }
        self.test_cases.len()
    }

    /// Load `<dir>/<id>.<slug>.toml`
    pub fn load_from_dir(&mut self, dir: &Path) -> usize {
        let path = dir.join(test_case_file_name(self.solution.as_ref()));
        self.load_test_cases(&path)
    }

    /// Write the problem header
    pub fn print_header(&mut self) -> AppResult<()> {
        report::write_header(&mut self.out, &self.solution.info())?;
        Ok(())
    }

    /// Print every loaded case without running it
    pub fn list_test_cases(&mut self) -> AppResult<()> {
        if self.test_cases.is_empty() {
            writeln!(self.out, "{}", NO_TEST_CASES)?;
            return Ok(());
        }
        report::write_case_list(&mut self.out, &self.test_cases)?;
        Ok(())
    }

    /// Run every test case and print the per-case report and summary
    pub async fn run_tests(&mut self) -> AppResult<Option<RunSummary>> {
        if self.test_cases.is_empty() {
            writeln!(self.out, "{}", NO_TEST_CASES)?;
            return Ok(None);
        }

        let results = self
            .runner
            .run(Arc::clone(&self.solution), &self.test_cases)
            .await;
        let summary = self.runner.summary();

        report::write_results(&mut self.out, &results)?;
        report::write_summary(&mut self.out, &summary)?;
        Ok(Some(summary))
    }

    /// Run the case with the given 1-based number
    pub async fn run_single_test(&mut self, number: usize) -> AppResult<TestResult> {
        let case = number
            .checked_sub(1)
            .and_then(|i| self.test_cases.get(i))
            .ok_or_else(|| {
                AppError::InvalidInput(format!(
                    "Test case {} does not exist (have {})",
                    number,
                    self.test_cases.len()
                ))
            })?;

        let result = self.runner.run_single(Arc::clone(&self.solution), case).await;
        report::write_results(&mut self.out, std::slice::from_ref(&result))?;
        Ok(result)
    }

    /// Estimate complexity and profile the solution
    pub async fn run_performance_analysis(&mut self) -> AppResult<Option<PerformanceMetrics>> {
        if self.test_cases.is_empty() {
            writeln!(self.out, "{}", NO_TEST_CASES)?;
            return Ok(None);
        }

        let analyzer = self.analyzer.clone();
        let solution = Arc::clone(&self.solution);
        let cases = self.test_cases.clone();
        let metrics =
            guard::run_blocking(move || analyzer.analyze(solution.as_ref(), &cases)).await?;

        report::write_metrics(&mut self.out, &metrics)?;
        Ok(Some(metrics))
    }

    /// Time `solve` against `solve_optimized` over every case
    pub async fn run_benchmark(&mut self) -> AppResult<Option<BenchmarkComparison>> {
        if self.test_cases.is_empty() {
            writeln!(self.out, "{}", NO_TEST_CASES)?;
            return Ok(None);
        }

        let solution = Arc::clone(&self.solution);
        let cases = self.test_cases.clone();
        let comparison =
            guard::run_blocking(move || benchmark_variants(solution.as_ref(), &cases)).await?;

        if let Some(comparison) = &comparison {
            report::write_comparison(&mut self.out, comparison)?;
        }
        Ok(comparison)
    }

    /// Run every case under each configured time limit
    pub async fn run_time_limit_sweep(&mut self) -> AppResult<Vec<SweepOutcome>> {
        if self.test_cases.is_empty() {
            writeln!(self.out, "{}", NO_TEST_CASES)?;
            return Ok(Vec::new());
        }

        let outcomes = self
            .sweep
            .run(Arc::clone(&self.solution), &self.test_cases)
            .await;
        report::write_sweep(&mut self.out, &outcomes)?;
        Ok(outcomes)
    }

    /// Tests, then analysis, then the benchmark
    pub async fn run_all(&mut self) -> AppResult<RunReport> {
        self.print_header()?;

        let summary = self.run_tests().await?;
        writeln!(self.out)?;
        let metrics = self.run_performance_analysis().await?;
        writeln!(self.out)?;
        let benchmark = self.run_benchmark().await?;

        Ok(RunReport {
            summary,
            results: self.runner.results().to_vec(),
            metrics,
            benchmark,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyzerConfig;
    use crate::models::Input;
    use crate::solutions::{ThreeSum, TwoSum};
    use serde_json::{Value, json};
    use std::time::Duration;

    fn quick_config() -> Config {
        Config {
            analyzer: AnalyzerConfig {
                sizes: vec![10, 20, 40],
                time_limits: vec![Duration::from_millis(500)],
            },
            ..Config::default()
        }
    }

    fn output(harness: SolutionHarness<Vec<u8>>) -> String {
        String::from_utf8(harness.into_writer()).unwrap()
    }

    #[tokio::test]
    async fn test_run_tests_prints_summary() {
        let mut harness = SolutionHarness::with_writer(Arc::new(TwoSum), &quick_config(), Vec::new());

        let summary = harness.run_tests().await.unwrap().unwrap();

        assert!(summary.all_passed());
        assert_eq!(harness.results().len(), 5);
        assert!(output(harness).contains("Passed 5/5"));
    }

    #[tokio::test]
    async fn test_empty_case_list() {
        let mut harness = SolutionHarness::with_writer(Arc::new(TwoSum), &quick_config(), Vec::new());
        harness.set_test_cases(Vec::new());

        assert!(harness.run_tests().await.unwrap().is_none());
        assert!(harness.run_performance_analysis().await.unwrap().is_none());
        assert!(harness.run_benchmark().await.unwrap().is_none());
        assert!(harness.run_time_limit_sweep().await.unwrap().is_empty());

        let text = output(harness);
        assert_eq!(text.matches(NO_TEST_CASES).count(), 4);
    }

    #[tokio::test]
    async fn test_run_single_test_range() {
        let mut harness = SolutionHarness::with_writer(Arc::new(TwoSum), &quick_config(), Vec::new());

        let result = harness.run_single_test(2).await.unwrap();
        assert_eq!(result.test_case.description, "Pair in the middle");
        assert!(result.passed);

        assert!(matches!(
            harness.run_single_test(0).await,
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            harness.run_single_test(6).await,
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_load_test_cases_falls_back_on_error() {
        let mut harness = SolutionHarness::with_writer(Arc::new(TwoSum), &quick_config(), Vec::new());
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.toml");
        assert_eq!(harness.load_test_cases(&missing), 5);

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[[test_cases]]\nexpected = 1\n").unwrap();
        assert_eq!(harness.load_test_cases(&broken), 5);
        assert_eq!(harness.test_cases()[0].description, "Basic example");
    }

    #[test]
    fn test_load_from_dir_uses_file_name_convention() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("0001.two_sum.toml"),
            r#"
[[test_cases]]
description = "From file"
input = [1, 4]
target = 5
expected = [0, 1]
"#,
        )
        .unwrap();

        let mut harness = SolutionHarness::with_writer(Arc::new(TwoSum), &quick_config(), Vec::new());
        assert_eq!(harness.load_from_dir(dir.path()), 1);
        assert_eq!(
            harness.test_cases()[0].input,
            Input::Multiple(vec![json!([1, 4]), json!(5)])
        );
    }

    #[tokio::test]
    async fn test_run_all_collects_every_phase() {
        let mut harness =
            SolutionHarness::with_writer(Arc::new(ThreeSum), &quick_config(), Vec::new());

        let report = harness.run_all().await.unwrap();

        assert!(report.summary.as_ref().is_some_and(|s| s.all_passed()));
        assert_eq!(report.results.len(), 4);
        let metrics = report.metrics.unwrap();
        assert_eq!(metrics.size_timings.len(), 3);
        let benchmark = report.benchmark.unwrap();
        assert_eq!(benchmark.main.iterations, 4);
        assert!(benchmark.errors.is_empty());

        let json: Value = serde_json::to_value(&metrics).unwrap();
        assert!(json.get("time_complexity").is_some());

        let text = output(harness);
        assert!(text.contains("3Sum"));
        assert!(text.contains("Performance analysis"));
        assert!(text.contains("Benchmark: solve vs solve_optimized"));
    }

    #[tokio::test]
    async fn test_time_limit_sweep_report() {
        let mut harness = SolutionHarness::with_writer(Arc::new(TwoSum), &quick_config(), Vec::new());

        let outcomes = harness.run_time_limit_sweep().await.unwrap();

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].passed, 5);
        assert!(output(harness).contains("Time limit sweep"));
    }
}
