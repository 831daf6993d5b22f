//! Performance analyzer
//!
//! Estimates time complexity by timing a solution on synthetic inputs of
//! growing size, estimates space complexity from the peak heap growth of one
//! call, profiles memory and CPU, and turns the findings into optimization
//! suggestions. Every phase records its own failure instead of aborting the
//! analysis.

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;

use crate::config::AnalyzerConfig;
use crate::constants::{
    BYTES_PER_MB, HIGH_CPU_DELTA_PERCENT, HIGH_PEAK_MEMORY_MB, LADDER_REPEATS,
};
use crate::error::AppResult;
use crate::models::{
    CpuProfile, Estimate, Input, MemoryProfile, PerformanceMetrics, Profile, SpaceComplexity,
    TestCase, TimeComplexity,
};
use crate::solutions::Solution;

use super::allocator::PeakScope;
use super::classifier::{classify_space, classify_time};
use super::monitor::ResourceMonitor;
use super::{Variant, invoke};

const NO_TEST_CASES: &str = "no test cases provided";

/// Complexity estimator and profiler
#[derive(Debug, Clone)]
pub struct PerformanceAnalyzer {
    config: AnalyzerConfig,
    monitor: Arc<ResourceMonitor>,
}

impl PerformanceAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            monitor: Arc::new(ResourceMonitor::new()),
        }
    }

    /// Run every analysis phase
    pub fn analyze(&self, solution: &dyn Solution, cases: &[TestCase]) -> PerformanceMetrics {
        let name = solution.info().name;
        tracing::info!(solution = %name, "Running performance analysis");

        let (time_complexity, size_timings) = self.analyze_time_complexity(solution, cases);
        let space_complexity = self.analyze_space_complexity(solution, cases);
        let memory_metrics = self.profile_memory(solution, cases);
        let cpu_metrics = self.profile_cpu(solution, cases);

        let optimization_suggestions =
            suggestions(&time_complexity, &space_complexity, &memory_metrics, &cpu_metrics);

        tracing::info!(
            solution = %name,
            time = %time_complexity,
            space = %space_complexity,
            suggestions = optimization_suggestions.len(),
            "Performance analysis finished"
        );

        PerformanceMetrics {
            time_complexity,
            space_complexity,
            memory_metrics,
            cpu_metrics,
            size_timings,
            optimization_suggestions,
        }
    }

    /// Time the solution over the size ladder, stopping at the first failure
    pub fn analyze_time_complexity(
        &self,
        solution: &dyn Solution,
        cases: &[TestCase],
    ) -> (Estimate<TimeComplexity>, Vec<(usize, f64)>) {
        let Some(base) = cases.first() else {
            return (Estimate::Unknown(NO_TEST_CASES.to_string()), Vec::new());
        };

        // Untimed warm-up
        if let Some(&first) = self.config.sizes.first() {
            let _ = invoke(solution, Variant::Main, &synthesize_input(&base.input, first));
        }

        let mut timings = Vec::with_capacity(self.config.sizes.len());
        for &size in &self.config.sizes {
            let input = synthesize_input(&base.input, size);

            match fastest_call(solution, &input, LADDER_REPEATS) {
                Ok(secs) => timings.push((size, secs)),
                Err(e) => {
                    tracing::warn!(size, error = %e, "Stopping size ladder");
                    break;
                }
            }
        }

        (classify_time(&timings), timings)
    }

    /// Classify peak heap bytes per input element of the first case
    pub fn analyze_space_complexity(
        &self,
        solution: &dyn Solution,
        cases: &[TestCase],
    ) -> Estimate<SpaceComplexity> {
        let Some(base) = cases.first() else {
            return Estimate::Unknown(NO_TEST_CASES.to_string());
        };

        let scope = PeakScope::start();
        let outcome = invoke(solution, Variant::Main, &base.input);
        let usage = scope.finish();

        match outcome {
            Ok(_) => classify_space(usage.peak, base.input.element_count()),
            Err(e) => Estimate::Error(e.to_string()),
        }
    }

    fn profile_memory(&self, solution: &dyn Solution, cases: &[TestCase]) -> Profile<MemoryProfile> {
        let Some(base) = cases.first() else {
            return Profile::Empty;
        };

        let scope = PeakScope::start();
        let outcome = invoke(solution, Variant::Main, &base.input);
        let usage = scope.finish();

        match outcome {
            Ok(_) => {
                let current_mb = usage.current as f64 / BYTES_PER_MB;
                let peak_mb = usage.peak as f64 / BYTES_PER_MB;
                Profile::Measured(MemoryProfile {
                    current_mb,
                    peak_mb,
                    delta_mb: peak_mb - current_mb,
                })
            }
            Err(e) => Profile::Error { error: e.to_string() },
        }
    }

    fn profile_cpu(&self, solution: &dyn Solution, cases: &[TestCase]) -> Profile<CpuProfile> {
        let Some(base) = cases.first() else {
            return Profile::Empty;
        };

        let start_percent = self.monitor.cpu_percent();
        match invoke(solution, Variant::Main, &base.input) {
            Ok(_) => {
                let end_percent = self.monitor.cpu_percent();
                Profile::Measured(CpuProfile {
                    start_percent,
                    end_percent,
                    delta: end_percent - start_percent,
                })
            }
            Err(e) => Profile::Error { error: e.to_string() },
        }
    }
}

/// Shortest wall-clock time of `repeats` calls, or the first error
fn fastest_call(solution: &dyn Solution, input: &Input, repeats: usize) -> AppResult<f64> {
    let mut fastest = f64::INFINITY;
    for _ in 0..repeats.max(1) {
        let start = Instant::now();
        invoke(solution, Variant::Main, input)?;
        fastest = fastest.min(start.elapsed().as_secs_f64());
    }
    Ok(fastest)
}

/// Build an input of the given size shaped like `base`
///
/// Arrays become `0..size`, strings become the decimal digits of `size`,
/// anything else is kept. Every argument of a multi-argument input is
/// scaled the same way.
pub fn synthesize_input(base: &Input, size: usize) -> Input {
    match base {
        Input::Single(value) => Input::Single(scale_value(value, size)),
        Input::Multiple(args) => {
            Input::Multiple(args.iter().map(|arg| scale_value(arg, size)).collect())
        }
    }
}

fn scale_value(value: &Value, size: usize) -> Value {
    match value {
        Value::Array(_) => Value::Array((0..size).map(Value::from).collect()),
        Value::String(_) => Value::String(size.to_string()),
        other => other.clone(),
    }
}

/// Optimization hints for the measured profile
pub fn suggestions(
    time: &Estimate<TimeComplexity>,
    space: &Estimate<SpaceComplexity>,
    memory: &Profile<MemoryProfile>,
    cpu: &Profile<CpuProfile>,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if matches!(
        time.known(),
        Some(TimeComplexity::Quadratic | TimeComplexity::HigherPolynomial)
    ) {
        suggestions.push("Consider using more efficient algorithms (e.g., sorting, hashing)".to_string());
        suggestions.push("Look for opportunities to reduce nested loops".to_string());
    }

    if space.known() == Some(&SpaceComplexity::QuadraticOrHigher) {
        suggestions.push("Consider in-place algorithms to reduce space usage".to_string());
        suggestions.push("Use iterative approaches instead of recursive when possible".to_string());
    }

    if memory.measured().is_some_and(|m| m.peak_mb > HIGH_PEAK_MEMORY_MB) {
        suggestions.push("High memory usage detected - consider optimizing data structures".to_string());
    }

    if cpu.measured().is_some_and(|c| c.delta > HIGH_CPU_DELTA_PERCENT) {
        suggestions.push("High CPU usage detected - consider algorithmic optimizations".to_string());
    }

    suggestions
}
