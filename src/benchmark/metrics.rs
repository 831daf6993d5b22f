//! Metrics collection for `solve` versus `solve_optimized`

use std::time::{Duration, Instant};

use serde_json::Value;

use crate::error::AppResult;
use crate::models::{BenchmarkComparison, Input, TestCase};
use crate::solutions::Solution;

use super::{Variant, invoke};

/// One timed call of a variant
#[derive(Debug)]
pub struct TimedCall {
    pub elapsed: Duration,
    pub outcome: AppResult<Value>,
}

/// Time a single call of `variant`
pub fn time_call(solution: &dyn Solution, variant: Variant, input: &Input) -> TimedCall {
    let start = Instant::now();
    let outcome = invoke(solution, variant, input);
    TimedCall {
        elapsed: start.elapsed(),
        outcome,
    }
}

/// Collects per-case timings of both variants
#[derive(Debug, Default)]
pub struct MetricsCollector {
    main: Vec<Duration>,
    optimized: Vec<Duration>,
    errors: Vec<(usize, String, String)>,
}

impl MetricsCollector {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one call; failed calls keep their timing and log the error
    pub fn record(&mut self, variant: Variant, case_number: usize, call: TimedCall) {
        if let Err(e) = &call.outcome {
            tracing::warn!(case = case_number, variant = variant.as_str(), error = %e, "Benchmark call failed");
            self.errors
                .push((case_number, variant.as_str().to_string(), e.to_string()));
        }

        match variant {
            Variant::Main => self.main.push(call.elapsed),
            Variant::Optimized => self.optimized.push(call.elapsed),
        }
    }

    /// Calculate the comparison, or `None` when nothing was recorded
    pub fn calculate_results(&self) -> Option<BenchmarkComparison> {
        if self.main.is_empty() && self.optimized.is_empty() {
            return None;
        }

        let mut comparison = BenchmarkComparison::compare(&self.main, &self.optimized);
        comparison.errors = self.errors.clone();
        Some(comparison)
    }

    /// Get number of recorded calls
    pub fn run_count(&self) -> usize {
        self.main.len() + self.optimized.len()
    }

    pub fn clear(&mut self) {
        self.main.clear();
        self.optimized.clear();
        self.errors.clear();
    }
}

/// Time every case with `solve`, then every case with `solve_optimized`
pub fn benchmark_variants(solution: &dyn Solution, cases: &[TestCase]) -> Option<BenchmarkComparison> {
    let mut collector = MetricsCollector::new();

    for variant in [Variant::Main, Variant::Optimized] {
        tracing::debug!(variant = variant.as_str(), count = cases.len(), "Timing variant");
        for (i, case) in cases.iter().enumerate() {
            collector.record(variant, i + 1, time_call(solution, variant, &case.input));
        }
    }

    collector.calculate_results()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{Faster, ProblemInfo};
    use serde_json::json;

    /// `solve` sleeps 20ms, `solve_optimized` returns at once and rejects 0
    struct SlowFast;

    impl Solution for SlowFast {
        fn info(&self) -> ProblemInfo {
            ProblemInfo::default()
        }

        fn slug(&self) -> &'static str {
            "slow_fast"
        }

        fn solve(&self, input: &Input) -> AppResult<Value> {
            std::thread::sleep(Duration::from_millis(20));
            Ok(input.args()[0].clone())
        }

        fn solve_optimized(&self, input: &Input) -> AppResult<Value> {
            let n: i64 = input.arg(0)?;
            if n == 0 {
                return Err(AppError::RuntimeError("zero".into()));
            }
            Ok(json!(n))
        }
    }

    fn cases(values: &[i64]) -> Vec<TestCase> {
        values
            .iter()
            .map(|v| TestCase::new(v.to_string(), Input::Single(json!(v)), json!(v)))
            .collect()
    }

    #[test]
    fn test_optimized_variant_is_faster() {
        let comparison = benchmark_variants(&SlowFast, &cases(&[1, 2, 3])).unwrap();

        assert_eq!(comparison.main_times.len(), 3);
        assert_eq!(comparison.optimized_times.len(), 3);
        assert!(comparison.main.avg_secs >= 0.02);
        assert_eq!(comparison.faster, Faster::Optimized);
        assert!(comparison.errors.is_empty());
    }

    #[test]
    fn test_errors_are_recorded_not_raised() {
        let comparison = benchmark_variants(&SlowFast, &cases(&[1, 0])).unwrap();

        assert_eq!(comparison.optimized_times.len(), 2);
        assert_eq!(
            comparison.errors,
            vec![(2, "optimized".to_string(), "Runtime error: zero".to_string())]
        );
    }

    #[test]
    fn test_collector() {
        let mut collector = MetricsCollector::new();
        assert!(collector.calculate_results().is_none());

        collector.record(
            Variant::Main,
            1,
            TimedCall {
                elapsed: Duration::from_millis(4),
                outcome: Ok(json!(1)),
            },
        );
        collector.record(
            Variant::Optimized,
            1,
            TimedCall {
                elapsed: Duration::from_millis(2),
                outcome: Ok(json!(1)),
            },
        );
        assert_eq!(collector.run_count(), 2);

        let comparison = collector.calculate_results().unwrap();
        assert!((comparison.speedup - 2.0).abs() < 1e-9);

        collector.clear();
        assert_eq!(collector.run_count(), 0);
    }

    #[test]
    fn test_no_cases() {
        assert!(benchmark_variants(&SlowFast, &[]).is_none());
    }
}
