//! Verdict types and test-run results

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::models::TestCase;

/// Verdict for a single test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// Output matched expected
    Accepted,
    /// Output does not match expected
    WrongAnswer,
    /// Exceeded the case's time limit
    TimeLimitExceeded,
    /// Exceeded the configured memory ceiling
    MemoryLimitExceeded,
    /// Solution returned an error or panicked
    RuntimeError,
}

impl Verdict {
    /// Get short code for verdict
    pub fn code(&self) -> &'static str {
        match self {
            Verdict::Accepted => "AC",
            Verdict::WrongAnswer => "WA",
            Verdict::TimeLimitExceeded => "TLE",
            Verdict::MemoryLimitExceeded => "MLE",
            Verdict::RuntimeError => "RE",
        }
    }

    /// Check if verdict is a failure (not accepted)
    pub fn is_failure(&self) -> bool {
        !matches!(self, Verdict::Accepted)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Result of executing a single test case
#[derive(Debug, Clone, Serialize)]
pub struct TestResult {
    /// The case that was executed
    pub test_case: TestCase,

    /// True only for an exact match with no timeout and no error
    pub passed: bool,

    /// What the solution returned, if it returned at all
    pub actual_output: Option<Value>,

    pub expected_output: Value,

    /// Wall-clock execution time
    #[serde(serialize_with = "serialize_secs")]
    pub execution_time: Duration,

    /// Resident memory delta in bytes (can be negative)
    pub memory_usage: i64,

    /// Error, timeout, memory or mismatch message
    pub error_message: Option<String>,

    pub timeout_occurred: bool,

    pub verdict: Verdict,
}

fn serialize_secs<S: serde::Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(d.as_secs_f64())
}

/// Aggregated result of one test run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Identifier of the run, also attached to its tracing span
    pub run_id: Uuid,

    pub started_at: DateTime<Utc>,

    /// Overall verdict (first failure, or accepted)
    pub verdict: Verdict,

    pub passed_count: usize,
    pub total_count: usize,

    /// 1-based number of the first failing case
    pub first_failure: Option<usize>,

    /// (1-based number, description) of every failing case, in order
    pub failures: Vec<(usize, String)>,

    #[serde(serialize_with = "serialize_secs")]
    pub max_time: Duration,
    #[serde(serialize_with = "serialize_secs")]
    pub min_time: Duration,
    #[serde(serialize_with = "serialize_secs")]
    pub avg_time: Duration,

    pub max_memory: i64,
    pub min_memory: i64,
    pub avg_memory: f64,

    /// Percentage of passed cases (0-100)
    pub score: f64,
}

impl RunSummary {
    /// Create a run summary from test results
    pub fn from_results(run_id: Uuid, started_at: DateTime<Utc>, results: &[TestResult]) -> Self {
        let total_count = results.len();
        let passed_count = results.iter().filter(|r| r.passed).count();

        let failures: Vec<(usize, String)> = results
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.passed)
            .map(|(i, r)| (i + 1, r.test_case.description.clone()))
            .collect();

        let verdict = results
            .iter()
            .find(|r| r.verdict.is_failure())
            .map(|r| r.verdict)
            .unwrap_or(Verdict::Accepted);

        let times = results.iter().map(|r| r.execution_time);
        let max_time = times.clone().max().unwrap_or_default();
        let min_time = times.clone().min().unwrap_or_default();
        let avg_time = if total_count > 0 {
            times.sum::<Duration>() / total_count as u32
        } else {
            Duration::ZERO
        };

        let memories = results.iter().map(|r| r.memory_usage);
        let max_memory = memories.clone().max().unwrap_or(0);
        let min_memory = memories.clone().min().unwrap_or(0);
        let avg_memory = if total_count > 0 {
            memories.sum::<i64>() as f64 / total_count as f64
        } else {
            0.0
        };

        let score = if total_count > 0 {
            (passed_count as f64 / total_count as f64) * 100.0
        } else {
            0.0
        };

        Self {
            run_id,
            started_at,
            verdict,
            passed_count,
            total_count,
            first_failure: failures.first().map(|(n, _)| *n),
            failures,
            max_time,
            min_time,
            avg_time,
            max_memory,
            min_memory,
            avg_memory,
            score,
        }
    }

    /// Whether every case passed
    pub fn all_passed(&self) -> bool {
        self.passed_count == self.total_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Input;
    use serde_json::json;

    fn result(description: &str, verdict: Verdict, millis: u64, memory: i64) -> TestResult {
        let passed = verdict == Verdict::Accepted;
        TestResult {
            test_case: TestCase::new(description, Input::Single(json!(1)), json!(1)),
            passed,
            actual_output: Some(json!(1)),
            expected_output: json!(1),
            execution_time: Duration::from_millis(millis),
            memory_usage: memory,
            error_message: None,
            timeout_occurred: verdict == Verdict::TimeLimitExceeded,
            verdict,
        }
    }

    #[test]
    fn test_summary_aggregation() {
        let results = vec![
            result("a", Verdict::Accepted, 10, 100),
            result("b", Verdict::WrongAnswer, 30, -50),
            result("c", Verdict::Accepted, 20, 0),
            result("d", Verdict::TimeLimitExceeded, 40, 10),
        ];

        let summary = RunSummary::from_results(Uuid::new_v4(), Utc::now(), &results);
        assert_eq!(summary.passed_count, 2);
        assert_eq!(summary.total_count, 4);
        assert_eq!(summary.verdict, Verdict::WrongAnswer);
        assert_eq!(summary.first_failure, Some(2));
        assert_eq!(
            summary.failures,
            vec![(2, "b".to_string()), (4, "d".to_string())]
        );
        assert_eq!(summary.max_time, Duration::from_millis(40));
        assert_eq!(summary.min_time, Duration::from_millis(10));
        assert_eq!(summary.avg_time, Duration::from_millis(25));
        assert_eq!(summary.max_memory, 100);
        assert_eq!(summary.min_memory, -50);
        assert_eq!(summary.score, 50.0);
        assert!(!summary.all_passed());
    }

    #[test]
    fn test_empty_summary() {
        let summary = RunSummary::from_results(Uuid::new_v4(), Utc::now(), &[]);
        assert_eq!(summary.verdict, Verdict::Accepted);
        assert_eq!(summary.total_count, 0);
        assert_eq!(summary.score, 0.0);
        assert_eq!(summary.avg_time, Duration::ZERO);
        assert!(summary.all_passed());
    }

    #[test]
    fn test_verdict_codes() {
        assert_eq!(Verdict::Accepted.to_string(), "AC");
        assert_eq!(Verdict::MemoryLimitExceeded.code(), "MLE");
        assert!(Verdict::RuntimeError.is_failure());
        assert!(!Verdict::Accepted.is_failure());
    }
}
