//! Application-wide constants
//!
//! Default values for the harness, grouped by the component that uses them.

// =============================================================================
// TEST RUNNER DEFAULTS
// =============================================================================

/// Default per-test timeout in seconds, used when a test case has none
pub const DEFAULT_TEST_TIMEOUT_SECS: f64 = 5.0;

/// Default memory ceiling in megabytes for a single test case
pub const DEFAULT_MEMORY_LIMIT_MB: u64 = 512;

/// Whether exceeding the memory ceiling fails the test case
pub const DEFAULT_FAIL_ON_MEMORY_LIMIT: bool = true;

/// Whether calls are abandoned at their deadline instead of awaited
pub const DEFAULT_HARD_DEADLINE: bool = false;

// =============================================================================
// PERFORMANCE ANALYZER DEFAULTS
// =============================================================================

/// Synthetic input sizes used for time complexity estimation
pub const DEFAULT_BENCHMARK_SIZES: &[usize] = &[10, 50, 100, 500, 1000, 5000, 10000];

/// Timed calls per ladder size; the fastest one is recorded
pub const LADDER_REPEATS: usize = 3;

/// Below this many bytes per input element, space is considered constant
pub const SPACE_CONSTANT_BYTES_PER_ELEMENT: f64 = 10.0;

/// Below this many bytes per input element, space is considered linear
pub const SPACE_LINEAR_BYTES_PER_ELEMENT: f64 = 1000.0;

/// Peak memory (MB) above which a data-structure review is suggested
pub const HIGH_PEAK_MEMORY_MB: f64 = 100.0;

/// CPU delta (percent) above which an algorithmic review is suggested
pub const HIGH_CPU_DELTA_PERCENT: f64 = 80.0;

// =============================================================================
// TIMEOUT SWEEP DEFAULTS
// =============================================================================

/// Time limits (seconds) tried by the timeout sweep
pub const DEFAULT_TIME_LIMITS_SECS: &[f64] = &[0.1, 0.5, 1.0, 2.0];

// =============================================================================
// STORAGE & LOGGING DEFAULTS
// =============================================================================

/// Directory holding `<id>.<slug>.toml` test-case files
pub const DEFAULT_TEST_CASES_DIR: &str = "data/test_cases";

/// Default tracing filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "warn";

// =============================================================================
// UNITS
// =============================================================================

pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

// =============================================================================
// SUPPORTED PLATFORMS
// =============================================================================

/// Platform identifiers used in `[problem]` sections
pub mod platforms {
    pub const LEETCODE: &str = "leetcode";
    pub const CODEFORCES: &str = "codeforces";
    pub const TOPCODER: &str = "topcoder";
    pub const CODECHEF: &str = "codechef";

    /// All supported platforms
    pub const ALL: &[&str] = &[LEETCODE, CODEFORCES, TOPCODER, CODECHEF];
}

/// Difficulty identifiers
pub mod difficulties {
    pub const EASY: &str = "easy";
    pub const MEDIUM: &str = "medium";
    pub const HARD: &str = "hard";
}
