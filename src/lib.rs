//! dsa-practice - test harness and performance analyzer for algorithm practice
//!
//! This library runs practice solutions against their test cases, estimates
//! their time and space complexity, benchmarks a reference implementation
//! against an optimized one and offers an interactive session for ad-hoc
//! input.
//!
//! # Features
//!
//! - Verdicts per test case (AC, WA, TLE, MLE, RE) with timing and memory
//! - Optional hard deadlines that abandon runaway calls
//! - Complexity estimation from synthetic inputs of growing size
//! - TOML test-case files with built-in fallbacks
//!
//! # Architecture
//!
//! - **Solutions**: problem implementations behind the `Solution` trait
//! - **Benchmark**: guard, monitor, runner, analyzer and metrics
//! - **Harness**: drives one solution and hosts the interactive session
//! - **Models**: inputs, test cases, results and metrics
//! - **Report**: plain-text rendering

pub mod benchmark;
pub mod config;
pub mod constants;
pub mod error;
pub mod harness;
pub mod models;
pub mod report;
pub mod solutions;
pub mod utils;

// Unit tests measure heap peaks; the binary installs its own
#[cfg(test)]
#[global_allocator]
static GLOBAL: benchmark::allocator::TrackingAllocator =
    benchmark::allocator::TrackingAllocator::new(std::alloc::System);

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use harness::SolutionHarness;
pub use models::{Input, TestCase};
pub use solutions::Solution;
