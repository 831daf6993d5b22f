//! Plain-text reports
//!
//! Every renderer writes to any `io::Write` so the harness can print to
//! stdout and tests can capture into a buffer.

use std::io::{self, Write};
use std::sync::Arc;

use crate::benchmark::guard::SweepOutcome;
use crate::models::{
    BenchmarkComparison, Faster, PerformanceMetrics, Profile, ProblemInfo, RunSummary, TestCase,
    TestResult, TimingStats,
};
use crate::solutions::Solution;
use crate::utils::{format_bytes, format_duration, format_secs};

const RULE: &str = "------------------------------------------------------------";
const PREVIEW_LEN: usize = 60;

pub fn write_header<W: Write>(w: &mut W, info: &ProblemInfo) -> io::Result<()> {
    writeln!(w, "{}", RULE)?;
    writeln!(
        w,
        "{} #{}: {} [{}]",
        info.platform, info.id, info.name, info.difficulty
    )?;
    if !info.description.is_empty() {
        writeln!(w, "{}", info.description)?;
    }
    writeln!(w, "{}", RULE)
}

/// One line per case, followed by the failure details
pub fn write_results<W: Write>(w: &mut W, results: &[TestResult]) -> io::Result<()> {
    for (i, result) in results.iter().enumerate() {
        let mark = if result.passed { "PASS" } else { "FAIL" };
        writeln!(
            w,
            "[{:>3}] {} {:<4} {:>12}  {}",
            i + 1,
            mark,
            result.verdict.code(),
            format_duration(result.execution_time),
            result.test_case.description
        )?;

        if !result.passed {
            writeln!(w, "      input:    {}", result.test_case.input_preview(PREVIEW_LEN))?;
            writeln!(w, "      expected: {}", result.test_case.expected_preview(PREVIEW_LEN))?;
            if let Some(message) = &result.error_message {
                writeln!(w, "      error:    {}", message)?;
            }
        }
    }
    Ok(())
}

/// Number, description, input and expected value of each case
pub fn write_case_list<W: Write>(w: &mut W, cases: &[TestCase]) -> io::Result<()> {
    writeln!(w, "Test cases:")?;
    for (i, case) in cases.iter().enumerate() {
        writeln!(w, "[{:>3}] {}", i + 1, case.description)?;
        writeln!(w, "      input:    {}", case.input_preview(PREVIEW_LEN))?;
        writeln!(w, "      expected: {}", case.expected_preview(PREVIEW_LEN))?;
    }
    Ok(())
}

pub fn write_summary<W: Write>(w: &mut W, summary: &RunSummary) -> io::Result<()> {
    writeln!(w, "{}", RULE)?;
    writeln!(
        w,
        "Passed {}/{} ({:.1}%)  verdict: {}",
        summary.passed_count, summary.total_count, summary.score, summary.verdict
    )?;
    writeln!(
        w,
        "Time   min {}  avg {}  max {}",
        format_duration(summary.min_time),
        format_duration(summary.avg_time),
        format_duration(summary.max_time)
    )?;
    writeln!(
        w,
        "Memory min {}  avg {}  max {}",
        format_bytes(summary.min_memory),
        format_bytes(summary.avg_memory as i64),
        format_bytes(summary.max_memory)
    )?;

    if !summary.failures.is_empty() {
        writeln!(w, "Failed cases:")?;
        for (number, description) in &summary.failures {
            writeln!(w, "  {:>3}. {}", number, description)?;
        }
    }
    Ok(())
}

pub fn write_metrics<W: Write>(w: &mut W, metrics: &PerformanceMetrics) -> io::Result<()> {
    writeln!(w, "Performance analysis")?;
    writeln!(w, "  Time complexity:  {}", metrics.time_complexity)?;
    writeln!(w, "  Space complexity: {}", metrics.space_complexity)?;

    if !metrics.size_timings.is_empty() {
        writeln!(w, "  Timings by input size:")?;
        for (size, secs) in &metrics.size_timings {
            writeln!(w, "    n = {:>6}  {}", size, format_secs(*secs))?;
        }
    }

    match &metrics.memory_metrics {
        Profile::Measured(memory) => writeln!(
            w,
            "  Memory: current {:.2}MB  peak {:.2}MB  delta {:.2}MB",
            memory.current_mb, memory.peak_mb, memory.delta_mb
        )?,
        Profile::Error { error } => writeln!(w, "  Memory: error - {}", error)?,
        Profile::Empty => {}
    }

    match &metrics.cpu_metrics {
        Profile::Measured(cpu) => writeln!(
            w,
            "  CPU: start {:.1}%  end {:.1}%  delta {:.1}%",
            cpu.start_percent, cpu.end_percent, cpu.delta
        )?,
        Profile::Error { error } => writeln!(w, "  CPU: error - {}", error)?,
        Profile::Empty => {}
    }

    if !metrics.optimization_suggestions.is_empty() {
        writeln!(w, "  Suggestions:")?;
        for suggestion in &metrics.optimization_suggestions {
            writeln!(w, "    - {}", suggestion)?;
        }
    }
    Ok(())
}

fn write_stats<W: Write>(w: &mut W, label: &str, stats: &TimingStats) -> io::Result<()> {
    writeln!(
        w,
        "  {:<10} avg {}  median {}  min {}  max {}  stddev {}",
        label,
        format_secs(stats.avg_secs),
        format_secs(stats.median_secs),
        format_secs(stats.min_secs),
        format_secs(stats.max_secs),
        format_secs(stats.stddev_secs)
    )
}

pub fn write_comparison<W: Write>(w: &mut W, comparison: &BenchmarkComparison) -> io::Result<()> {
    writeln!(w, "Benchmark: solve vs solve_optimized")?;
    write_stats(w, "main", &comparison.main)?;
    write_stats(w, "optimized", &comparison.optimized)?;

    match comparison.faster {
        Faster::Optimized => writeln!(
            w,
            "  Optimized is {:.2}x faster ({:+.1}%)",
            comparison.speedup, comparison.time_diff_percent
        )?,
        Faster::Main => writeln!(
            w,
            "  Main is faster; optimized changes time by {:+.1}%",
            comparison.time_diff_percent
        )?,
        Faster::Equal => writeln!(w, "  Both variants take the same time")?,
    }

    for (number, variant, message) in &comparison.errors {
        writeln!(w, "  case {} ({}) failed: {}", number, variant, message)?;
    }
    Ok(())
}

pub fn write_sweep<W: Write>(w: &mut W, outcomes: &[SweepOutcome]) -> io::Result<()> {
    writeln!(w, "Time limit sweep")?;
    for outcome in outcomes {
        write!(
            w,
            "  limit {:>6.3}s  passed {:>3}  failed {:>3}  timed out {:>3}  total {}",
            outcome.time_limit_secs,
            outcome.passed,
            outcome.failed,
            outcome.timed_out,
            format_secs(outcome.total_time_secs)
        )?;
        if outcome.timeout_cases.is_empty() {
            writeln!(w)?;
        } else {
            let cases: Vec<String> = outcome.timeout_cases.iter().map(|n| n.to_string()).collect();
            writeln!(w, "  (cases {})", cases.join(", "))?;
        }
    }
    Ok(())
}

pub fn write_solution_list<W: Write>(w: &mut W, solutions: &[Arc<dyn Solution>]) -> io::Result<()> {
    for solution in solutions {
        let info = solution.info();
        writeln!(
            w,
            "{:>5}  {:<22} {:<7} {}",
            info.id,
            solution.slug(),
            info.difficulty,
            info.name
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Estimate, Input, TimeComplexity, Verdict};
    use chrono::Utc;
    use serde_json::json;
    use std::time::Duration;
    use uuid::Uuid;

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn failed_result() -> TestResult {
        TestResult {
            test_case: TestCase::new("Edge", Input::Single(json!([1, 2])), json!(3)),
            passed: false,
            actual_output: Some(json!(4)),
            expected_output: json!(3),
            execution_time: Duration::from_micros(250),
            memory_usage: 0,
            error_message: Some("Expected: 3, Got: 4".to_string()),
            timeout_occurred: false,
            verdict: Verdict::WrongAnswer,
        }
    }

    #[test]
    fn test_failed_case_shows_details() {
        let results = vec![failed_result()];
        let text = render(|w| write_results(w, &results));

        assert!(text.contains("FAIL WA"));
        assert!(text.contains("250µs"));
        assert!(text.contains("expected: 3"));
        assert!(text.contains("error:    Expected: 3, Got: 4"));
    }

    #[test]
    fn test_case_list() {
        let cases = vec![
            TestCase::new("First", Input::Single(json!([1, 2])), json!(3)),
            TestCase::new("Second", Input::Single(json!("x".repeat(100))), json!(true)),
        ];
        let text = render(|w| write_case_list(w, &cases));

        assert!(text.contains("[  1] First"));
        assert!(text.contains("input:    [1,2]"));
        assert!(text.contains("expected: 3"));
        assert!(text.contains("[  2] Second"));
        assert!(text.contains("..."));
        assert!(text.contains("expected: true"));
    }

    #[test]
    fn test_summary_lists_failures() {
        let results = vec![failed_result()];
        let summary = RunSummary::from_results(Uuid::new_v4(), Utc::now(), &results);
        let text = render(|w| write_summary(w, &summary));

        assert!(text.contains("Passed 0/1 (0.0%)  verdict: WA"));
        assert!(text.contains("  1. Edge"));
    }

    #[test]
    fn test_metrics_with_unknown_estimates() {
        let metrics = PerformanceMetrics {
            time_complexity: Estimate::Known(TimeComplexity::Quadratic),
            space_complexity: Estimate::Unknown("cannot determine input size".to_string()),
            memory_metrics: Profile::Empty,
            cpu_metrics: Profile::Error {
                error: "boom".to_string(),
            },
            size_timings: vec![(10, 0.5)],
            optimization_suggestions: vec!["Use hashing".to_string()],
        };
        let text = render(|w| write_metrics(w, &metrics));

        assert!(text.contains("Time complexity:  O(n²) - Quadratic time"));
        assert!(text.contains("Unknown - cannot determine input size"));
        assert!(text.contains("n =     10  0.500000s"));
        assert!(text.contains("CPU: error - boom"));
        assert!(!text.contains("Memory:"));
        assert!(text.contains("- Use hashing"));
    }

    #[test]
    fn test_sweep_lists_timeout_cases() {
        let outcomes = vec![SweepOutcome {
            time_limit_secs: 0.1,
            passed: 1,
            failed: 0,
            timed_out: 2,
            total_time_secs: 0.01,
            timeout_cases: vec![2, 3],
        }];
        let text = render(|w| write_sweep(w, &outcomes));
        assert!(text.contains("timed out   2"));
        assert!(text.contains("(cases 2, 3)"));
    }
}
