//! Test runner - executes a solution against its test cases
//!
//! Each case runs on a blocking worker under the resource monitor. By
//! default the timeout is checked after the call returns; with
//! `hard_deadline` set the call goes through the timeout guard and is
//! abandoned at its deadline.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::RunnerConfig;
use crate::constants::BYTES_PER_MB;
use crate::error::{AppError, AppResult};
use crate::models::{RunSummary, TestCase, TestResult, Verdict};
use crate::solutions::Solution;

use super::guard;
use super::monitor::{Measurement, ResourceMonitor};

/// How a single call ended
enum Execution {
    /// The call returned (or failed) and was measured
    Finished {
        measurement: Measurement,
        outcome: AppResult<Value>,
    },
    /// The deadline fired first and the call was abandoned
    Abandoned { deadline: Duration },
}

/// Runs test cases and keeps the results of the latest run
pub struct TestRunner {
    config: RunnerConfig,
    monitor: Arc<ResourceMonitor>,
    run_id: Uuid,
    started_at: DateTime<Utc>,
    results: Vec<TestResult>,
}

impl TestRunner {
    /// Create a new test runner
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            config,
            monitor: Arc::new(ResourceMonitor::new()),
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            results: Vec::new(),
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Results of the latest run, in test-case order
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    /// Run every case in order; previous results are discarded
    ///
    /// No fault inside the solution stops the batch.
    pub async fn run(&mut self, solution: Arc<dyn Solution>, cases: &[TestCase]) -> Vec<TestResult> {
        self.run_id = Uuid::new_v4();
        self.started_at = Utc::now();
        self.results.clear();

        let span = tracing::info_span!(
            "test_run",
            run_id = %self.run_id,
            solution = %solution.info().name
        );

        let results = async {
            tracing::info!(count = cases.len(), "Running test cases");

            let mut results = Vec::with_capacity(cases.len());
            for (i, case) in cases.iter().enumerate() {
                let result = self.run_single(Arc::clone(&solution), case).await;
                tracing::info!(
                    case = i + 1,
                    verdict = %result.verdict,
                    time_ms = result.execution_time.as_secs_f64() * 1000.0,
                    memory = result.memory_usage,
                    "{}",
                    case.description
                );
                results.push(result);
            }
            results
        }
        .instrument(span)
        .await;

        self.results = results.clone();
        results
    }

    /// Run one case and classify the outcome
    pub async fn run_single(&self, solution: Arc<dyn Solution>, case: &TestCase) -> TestResult {
        let timeout = self.effective_timeout(case);
        let execution = self.execute(solution, case, timeout).await;
        self.evaluate(case, timeout, execution)
    }

    /// Summary of the latest run
    pub fn summary(&self) -> RunSummary {
        RunSummary::from_results(self.run_id, self.started_at, &self.results)
    }

    fn effective_timeout(&self, case: &TestCase) -> Duration {
        case.timeout.unwrap_or(self.config.default_timeout)
    }

    async fn execute(
        &self,
        solution: Arc<dyn Solution>,
        case: &TestCase,
        timeout: Duration,
    ) -> Execution {
        let monitor = Arc::clone(&self.monitor);
        let input = case.input.clone();
        let call = move || monitor.measure(|| solution.solve(&input));

        let joined = if self.config.hard_deadline {
            guard::run_with_deadline(call, timeout).await
        } else {
            guard::run_blocking(call).await
        };

        match joined {
            Ok((measurement, outcome)) => Execution::Finished { measurement, outcome },
            Err(AppError::TimeLimitExceeded(deadline)) => Execution::Abandoned { deadline },
            // The worker itself failed; report it against a zero measurement
            Err(e) => Execution::Finished {
                measurement: Measurement {
                    duration: Duration::ZERO,
                    memory_before: 0,
                    memory_after: 0,
                    memory_delta: 0,
                },
                outcome: Err(e),
            },
        }
    }

    /// Classification order: runtime error, timeout, memory, answer
    fn evaluate(&self, case: &TestCase, timeout: Duration, execution: Execution) -> TestResult {
        let mut result = TestResult {
            test_case: case.clone(),
            passed: false,
            actual_output: None,
            expected_output: case.expected.clone(),
            execution_time: Duration::ZERO,
            memory_usage: 0,
            error_message: None,
            timeout_occurred: false,
            verdict: Verdict::RuntimeError,
        };

        let (measurement, outcome) = match execution {
            Execution::Abandoned { deadline } => {
                result.execution_time = deadline;
                result.timeout_occurred = true;
                result.error_message = Some(timeout_message(deadline, timeout));
                result.verdict = Verdict::TimeLimitExceeded;
                return result;
            }
            Execution::Finished { measurement, outcome } => (measurement, outcome),
        };

        result.execution_time = measurement.duration;
        result.memory_usage = measurement.memory_delta;

        let actual = match outcome {
            Ok(actual) => actual,
            Err(e) => {
                result.error_message = Some(e.to_string());
                return result;
            }
        };

        let mut problems = Vec::new();

        result.timeout_occurred = measurement.duration > timeout;
        if result.timeout_occurred {
            problems.push(timeout_message(measurement.duration, timeout));
        }

        let memory_exceeded = measurement.memory_delta > self.config.memory_limit_bytes as i64;
        if memory_exceeded {
            let message = format!(
                "Memory limit exceeded: {:.2}MB",
                measurement.memory_delta as f64 / BYTES_PER_MB
            );
            if self.config.fail_on_memory_limit {
                problems.push(message);
            } else {
                tracing::warn!("{}", message);
            }
        }

        result.verdict = if result.timeout_occurred {
            Verdict::TimeLimitExceeded
        } else if memory_exceeded && self.config.fail_on_memory_limit {
            Verdict::MemoryLimitExceeded
        } else if actual != case.expected {
            problems.push(format!("Expected: {}, Got: {}", case.expected, actual));
            Verdict::WrongAnswer
        } else {
            Verdict::Accepted
        };

        result.passed = result.verdict == Verdict::Accepted;
        result.actual_output = Some(actual);
        if !problems.is_empty() {
            result.error_message = Some(problems.join(" "));
        }

        result
    }
}

fn timeout_message(elapsed: Duration, timeout: Duration) -> String {
    format!(
        "Timeout exceeded: {:.3}s > {}s",
        elapsed.as_secs_f64(),
        timeout.as_secs_f64()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Input, ProblemInfo};
    use serde_json::json;

    /// Doubles its input; 13 is an error, 99 panics, 7 doubles wrongly,
    /// anything above 1000 sleeps that many microseconds first
    struct Doubler;

    impl Solution for Doubler {
        fn info(&self) -> ProblemInfo {
            ProblemInfo {
                name: "Doubler".into(),
                ..Default::default()
            }
        }

        fn slug(&self) -> &'static str {
            "doubler"
        }

        fn solve(&self, input: &Input) -> AppResult<Value> {
            let n: i64 = input.arg(0)?;
            match n {
                13 => Err(AppError::RuntimeError("unlucky".into())),
                99 => panic!("ninety-nine"),
                7 => Ok(json!(15)),
                n if n > 1000 => {
                    std::thread::sleep(Duration::from_micros(n as u64));
                    Ok(json!(n * 2))
                }
                n => Ok(json!(n * 2)),
            }
        }
    }

    fn case(n: i64, expected: i64) -> TestCase {
        TestCase::new(format!("double {}", n), Input::Single(json!(n)), json!(expected))
    }

    fn runner() -> TestRunner {
        TestRunner::new(RunnerConfig::default())
    }

    fn measured(millis: u64, memory_delta: i64) -> Measurement {
        Measurement {
            duration: Duration::from_millis(millis),
            memory_before: 0,
            memory_after: memory_delta.max(0) as u64,
            memory_delta,
        }
    }

    #[tokio::test]
    async fn test_all_cases_pass() {
        let mut runner = runner();
        let cases: Vec<TestCase> = (1..=5).map(|n| case(n, n * 2)).collect();

        let results = runner.run(Arc::new(Doubler), &cases).await;

        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|r| r.passed && r.verdict == Verdict::Accepted));
        assert!(results.iter().all(|r| r.error_message.is_none()));

        let summary = runner.summary();
        assert_eq!(summary.passed_count, 5);
        assert!(summary.all_passed());
    }

    #[tokio::test]
    async fn test_faults_do_not_stop_the_batch() {
        let mut runner = runner();
        let cases = vec![case(1, 2), case(13, 26), case(99, 198), case(7, 14), case(4, 8)];

        let results = runner.run(Arc::new(Doubler), &cases).await;
        assert_eq!(results.len(), 5);

        assert_eq!(results[1].verdict, Verdict::RuntimeError);
        assert_eq!(results[1].error_message.as_deref(), Some("Runtime error: unlucky"));
        assert!(results[1].actual_output.is_none());

        assert_eq!(results[2].verdict, Verdict::RuntimeError);
        assert!(results[2].error_message.as_deref().unwrap().contains("ninety-nine"));

        assert_eq!(results[3].verdict, Verdict::WrongAnswer);
        assert_eq!(results[3].error_message.as_deref(), Some("Expected: 14, Got: 15"));
        assert_eq!(results[3].actual_output, Some(json!(15)));

        assert!(results[4].passed);

        let summary = runner.summary();
        assert_eq!(summary.passed_count, 2);
        assert_eq!(summary.first_failure, Some(2));
        let failing: Vec<&str> = summary.failures.iter().map(|(_, d)| d.as_str()).collect();
        assert_eq!(failing, vec!["double 13", "double 99", "double 7"]);
    }

    #[tokio::test]
    async fn test_results_reset_between_runs() {
        let mut runner = runner();
        runner.run(Arc::new(Doubler), &[case(1, 2), case(2, 4)]).await;
        runner.run(Arc::new(Doubler), &[case(3, 6)]).await;

        assert_eq!(runner.results().len(), 1);
        assert_eq!(runner.summary().total_count, 1);
    }

    #[tokio::test]
    async fn test_post_hoc_timeout_keeps_output() {
        let runner = runner();
        let slow = case(30_000, 60_000).with_timeout(Duration::from_millis(5));

        let result = runner.run_single(Arc::new(Doubler), &slow).await;

        assert!(result.timeout_occurred);
        assert!(!result.passed);
        assert_eq!(result.verdict, Verdict::TimeLimitExceeded);
        assert_eq!(result.actual_output, Some(json!(60_000)));
        assert!(result.error_message.unwrap().starts_with("Timeout exceeded: "));
    }

    #[tokio::test]
    async fn test_hard_deadline_abandons_call() {
        let runner = TestRunner::new(RunnerConfig {
            hard_deadline: true,
            ..RunnerConfig::default()
        });
        let slow = case(400_000, 800_000).with_timeout(Duration::from_millis(20));

        let result = runner.run_single(Arc::new(Doubler), &slow).await;

        assert!(result.timeout_occurred);
        assert_eq!(result.verdict, Verdict::TimeLimitExceeded);
        assert!(result.actual_output.is_none());
        assert_eq!(result.execution_time, Duration::from_millis(20));
        assert_eq!(
            result.error_message.as_deref(),
            Some("Timeout exceeded: 0.020s > 0.02s")
        );
    }

    #[test]
    fn test_timeout_takes_precedence_over_memory_and_answer() {
        let runner = runner();
        let tc = case(1, 2).with_timeout(Duration::from_millis(10));
        let execution = Execution::Finished {
            measurement: measured(50, 600 * 1024 * 1024),
            outcome: Ok(json!(3)),
        };

        let result = runner.evaluate(&tc, Duration::from_millis(10), execution);

        assert_eq!(result.verdict, Verdict::TimeLimitExceeded);
        assert_eq!(
            result.error_message.as_deref(),
            Some("Timeout exceeded: 0.050s > 0.01s Memory limit exceeded: 600.00MB")
        );
    }

    #[test]
    fn test_memory_limit_fails_case() {
        let runner = runner();
        let tc = case(1, 2);
        let execution = Execution::Finished {
            measurement: measured(1, 513 * 1024 * 1024),
            outcome: Ok(json!(2)),
        };

        let result = runner.evaluate(&tc, Duration::from_secs(5), execution);

        assert!(!result.passed);
        assert_eq!(result.verdict, Verdict::MemoryLimitExceeded);
        assert_eq!(
            result.error_message.as_deref(),
            Some("Memory limit exceeded: 513.00MB")
        );
    }

    #[test]
    fn test_memory_limit_can_be_advisory() {
        let runner = TestRunner::new(RunnerConfig {
            fail_on_memory_limit: false,
            ..RunnerConfig::default()
        });
        let execution = Execution::Finished {
            measurement: measured(1, 513 * 1024 * 1024),
            outcome: Ok(json!(2)),
        };

        let result = runner.evaluate(&case(1, 2), Duration::from_secs(5), execution);

        assert!(result.passed);
        assert!(result.error_message.is_none());
    }

    #[test]
    fn test_runtime_error_wins_over_timeout() {
        let runner = runner();
        let execution = Execution::Finished {
            measurement: measured(500, 0),
            outcome: Err(AppError::RuntimeError("boom".into())),
        };

        let result = runner.evaluate(&case(1, 2), Duration::from_millis(10), execution);

        assert_eq!(result.verdict, Verdict::RuntimeError);
        assert!(!result.timeout_occurred);
        assert_eq!(result.error_message.as_deref(), Some("Runtime error: boom"));
        assert_eq!(result.execution_time, Duration::from_millis(500));
    }

    #[test]
    fn test_negative_memory_delta_is_recorded() {
        let runner = runner();
        let execution = Execution::Finished {
            measurement: measured(1, -4096),
            outcome: Ok(json!(2)),
        };

        let result = runner.evaluate(&case(1, 2), Duration::from_secs(5), execution);

        assert!(result.passed);
        assert_eq!(result.memory_usage, -4096);
    }
}
