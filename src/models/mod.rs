//! Domain models shared by the runner, analyzer and harness

pub mod benchmark;
pub mod input;
pub mod performance;
pub mod result;
pub mod test_case;

pub use benchmark::{BenchmarkComparison, Faster, TimingStats};
pub use input::Input;
pub use performance::{
    CpuProfile, Estimate, MemoryProfile, PerformanceMetrics, Profile, SpaceComplexity,
    TimeComplexity,
};
pub use result::{RunSummary, TestResult, Verdict};
pub use test_case::{ProblemInfo, TestCase, TestSuite};
