//! Benchmark result models

use std::time::Duration;

use serde::Serialize;

/// Timing statistics over a series of runs, in seconds
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimingStats {
    /// Number of samples
    pub iterations: usize,

    pub avg_secs: f64,
    pub median_secs: f64,
    pub min_secs: f64,
    pub max_secs: f64,
    pub stddev_secs: f64,

    /// Indices of samples outside the 1.5 IQR fences
    pub outliers: Vec<usize>,
}

impl TimingStats {
    /// Compute statistics from raw samples
    pub fn from_samples(samples: &[Duration]) -> Self {
        let iterations = samples.len();
        if iterations == 0 {
            return Self::default();
        }

        let times: Vec<f64> = samples.iter().map(Duration::as_secs_f64).collect();
        let avg_secs = times.iter().sum::<f64>() / iterations as f64;
        let min_secs = times.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_secs = times.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let mut sorted = times.clone();
        sorted.sort_by(f64::total_cmp);
        let median_secs = if iterations % 2 == 0 {
            (sorted[iterations / 2 - 1] + sorted[iterations / 2]) / 2.0
        } else {
            sorted[iterations / 2]
        };

        let variance = times.iter().map(|t| (t - avg_secs).powi(2)).sum::<f64>() / iterations as f64;

        Self {
            iterations,
            avg_secs,
            median_secs,
            min_secs,
            max_secs,
            stddev_secs: variance.sqrt(),
            outliers: detect_outliers(&times, &sorted),
        }
    }
}

/// Detect outliers using the IQR method (needs at least four samples)
fn detect_outliers(times: &[f64], sorted: &[f64]) -> Vec<usize> {
    let n = sorted.len();
    if n < 4 {
        return Vec::new();
    }

    let q1 = sorted[n / 4];
    let q3 = sorted[3 * n / 4];
    let iqr = q3 - q1;
    let lower_bound = q1 - 1.5 * iqr;
    let upper_bound = q3 + 1.5 * iqr;

    times
        .iter()
        .enumerate()
        .filter(|(_, t)| **t < lower_bound || **t > upper_bound)
        .map(|(i, _)| i)
        .collect()
}

/// Which variant ran faster on average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Faster {
    Main,
    Optimized,
    Equal,
}

/// `solve` versus `solve_optimized` over the same test cases
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkComparison {
    pub main: TimingStats,
    pub optimized: TimingStats,

    /// Raw per-case timings, in test-case order
    pub main_times: Vec<f64>,
    pub optimized_times: Vec<f64>,

    /// `main.avg / optimized.avg`, 0 when the optimized average is zero
    pub speedup: f64,

    /// Change of the optimized average relative to main, in percent
    pub time_diff_percent: f64,

    pub faster: Faster,

    /// (1-based case number, variant, message) for calls that failed
    pub errors: Vec<(usize, String, String)>,
}

impl BenchmarkComparison {
    /// Compare the two sample series
    pub fn compare(main_samples: &[Duration], optimized_samples: &[Duration]) -> Self {
        let main = TimingStats::from_samples(main_samples);
        let optimized = TimingStats::from_samples(optimized_samples);

        let speedup = if optimized.avg_secs > 0.0 {
            main.avg_secs / optimized.avg_secs
        } else {
            0.0
        };

        let time_diff_percent = if main.avg_secs > 0.0 {
            ((optimized.avg_secs - main.avg_secs) / main.avg_secs) * 100.0
        } else {
            0.0
        };

        let faster = if (main.avg_secs - optimized.avg_secs).abs() < 1e-9 {
            Faster::Equal
        } else if main.avg_secs < optimized.avg_secs {
            Faster::Main
        } else {
            Faster::Optimized
        };

        Self {
            main,
            optimized,
            main_times: main_samples.iter().map(Duration::as_secs_f64).collect(),
            optimized_times: optimized_samples.iter().map(Duration::as_secs_f64).collect(),
            speedup,
            time_diff_percent,
            faster,
            errors: Vec::new(),
        }
    }
}
