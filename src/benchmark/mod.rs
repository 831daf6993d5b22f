//! Measurement and execution engine
//!
//! The pieces build on each other:
//!
//! 1. **Allocator** (`allocator.rs`): per-thread heap accounting for
//!    peak-memory measurement, installed as the global allocator by the
//!    binary.
//! 2. **Monitor** (`monitor.rs`): wall-clock time and resident memory around
//!    one call, plus process CPU sampling.
//! 3. **Guard** (`guard.rs`): deadline-bounded execution and the time-limit
//!    sweep.
//! 4. **Runner** (`runner.rs`): runs test cases and assigns verdicts.
//! 5. **Analyzer** (`analyzer.rs`, `classifier.rs`): complexity estimation,
//!    profiling and suggestions.
//! 6. **Metrics** (`metrics.rs`): `solve` versus `solve_optimized` timings.

pub mod allocator;
pub mod analyzer;
pub mod classifier;
pub mod guard;
pub mod metrics;
pub mod monitor;
pub mod runner;

use std::panic::{self, AssertUnwindSafe};

use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::models::Input;
use crate::solutions::Solution;

pub use analyzer::PerformanceAnalyzer;
pub use guard::{TimeLimitSweep, run_with_deadline};
pub use metrics::MetricsCollector;
pub use monitor::ResourceMonitor;
pub use runner::TestRunner;

/// Which implementation of a solution to call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Main,
    Optimized,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Optimized => "optimized",
        }
    }
}

/// Call one variant, turning a panic into [`AppError::SolutionPanicked`]
pub fn invoke(solution: &dyn Solution, variant: Variant, input: &Input) -> AppResult<Value> {
    panic::catch_unwind(AssertUnwindSafe(|| match variant {
        Variant::Main => solution.solve(input),
        Variant::Optimized => solution.solve_optimized(input),
    }))
    .unwrap_or_else(|payload| Err(AppError::from_panic(payload)))
}
