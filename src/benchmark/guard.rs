//! Timeout guard
//!
//! Runs a blocking call on a worker and waits for it with a deadline. When
//! the deadline passes first the call is abandoned: the caller gets
//! [`AppError::TimeLimitExceeded`] immediately and whatever the worker
//! eventually produces is dropped. The worker thread itself keeps running
//! until the call returns; nothing preempts it.
//!
//! No process-wide state (signal handlers, alarms) is touched, so guards can
//! nest and run from any thread.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::oneshot;
use tokio::task::JoinError;

use crate::error::{AppError, AppResult};
use crate::models::TestCase;
use crate::solutions::Solution;

/// Run `f` on a detached worker thread, failing once `deadline` elapses
///
/// A panic inside `f` is reported as [`AppError::SolutionPanicked`].
pub async fn run_with_deadline<F, T>(f: F, deadline: Duration) -> AppResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let (tx, rx) = oneshot::channel();

    // A plain thread rather than `spawn_blocking`: an abandoned call must not
    // hold the runtime open at shutdown.
    std::thread::Builder::new()
        .name("guarded-call".to_string())
        .spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(f));
            // The receiver is gone when the deadline already fired
            let _ = tx.send(outcome);
        })
        .map_err(|e| anyhow::anyhow!("failed to spawn worker thread: {}", e))?;

    match tokio::time::timeout(deadline, rx).await {
        Ok(Ok(Ok(value))) => Ok(value),
        Ok(Ok(Err(payload))) => Err(AppError::from_panic(payload)),
        Ok(Err(_)) => Err(anyhow::anyhow!("worker thread exited without a result").into()),
        Err(_) => {
            tracing::debug!(deadline_ms = deadline.as_millis() as u64, "Deadline elapsed, abandoning call");
            Err(AppError::TimeLimitExceeded(deadline))
        }
    }
}

/// Run `f` on the blocking pool and wait for it without a deadline
pub async fn run_blocking<F, T>(f: F) -> AppResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(join_error)
}

fn join_error(e: JoinError) -> AppError {
    if e.is_panic() {
        AppError::from_panic(e.into_panic())
    } else {
        anyhow::anyhow!("worker task cancelled: {}", e).into()
    }
}

/// Outcome of running every test case under one time limit
#[derive(Debug, Clone, Serialize)]
pub struct SweepOutcome {
    pub time_limit_secs: f64,
    pub passed: usize,
    /// Wrong answers and runtime errors
    pub failed: usize,
    pub timed_out: usize,
    /// Time spent in calls that finished within the limit
    pub total_time_secs: f64,
    /// 1-based numbers of the cases that hit the limit
    pub timeout_cases: Vec<usize>,
}

/// Runs a solution's test cases under a series of time limits
///
/// Shows at which limit a slow solution starts to pass.
#[derive(Debug, Clone)]
pub struct TimeLimitSweep {
    limits: Vec<Duration>,
}

impl TimeLimitSweep {
    pub fn new(limits: Vec<Duration>) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &[Duration] {
        &self.limits
    }

    /// Run every case once per limit, in limit order
    pub async fn run(&self, solution: Arc<dyn Solution>, cases: &[TestCase]) -> Vec<SweepOutcome> {
        let mut outcomes = Vec::with_capacity(self.limits.len());

        for limit in &self.limits {
            outcomes.push(self.run_limit(Arc::clone(&solution), cases, *limit).await);
        }

        outcomes
    }

    async fn run_limit(
        &self,
        solution: Arc<dyn Solution>,
        cases: &[TestCase],
        limit: Duration,
    ) -> SweepOutcome {
        let mut outcome = SweepOutcome {
            time_limit_secs: limit.as_secs_f64(),
            passed: 0,
            failed: 0,
            timed_out: 0,
            total_time_secs: 0.0,
            timeout_cases: Vec::new(),
        };

        for (i, case) in cases.iter().enumerate() {
            let number = i + 1;
            let solution = Arc::clone(&solution);
            let input = case.input.clone();
            let start = Instant::now();

            let result = run_with_deadline(move || solution.solve(&input), limit)
                .await
                .and_then(|r| r);

            match result {
                Ok(actual) => {
                    outcome.total_time_secs += start.elapsed().as_secs_f64();
                    if actual == case.expected {
                        outcome.passed += 1;
                    } else {
                        tracing::debug!(case = number, "Wrong answer under sweep");
                        outcome.failed += 1;
                    }
                }
                Err(AppError::TimeLimitExceeded(_)) => {
                    outcome.timed_out += 1;
                    outcome.timeout_cases.push(number);
                }
                Err(e) => {
                    tracing::debug!(case = number, error = %e, "Case failed under sweep");
                    outcome.failed += 1;
                }
            }
        }

        tracing::info!(
            limit_secs = outcome.time_limit_secs,
            passed = outcome.passed,
            failed = outcome.failed,
            timed_out = outcome.timed_out,
            "Time limit sweep step finished"
        );

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Input, ProblemInfo};
    use serde_json::{Value, json};

    /// Sleeps for the number of milliseconds it is given and echoes it back
    struct Sleeper;

    impl Solution for Sleeper {
        fn info(&self) -> ProblemInfo {
            ProblemInfo {
                name: "Sleeper".into(),
                ..Default::default()
            }
        }

        fn slug(&self) -> &'static str {
            "sleeper"
        }

        fn solve(&self, input: &Input) -> AppResult<Value> {
            let millis: u64 = input.arg(0)?;
            std::thread::sleep(Duration::from_millis(millis));
            Ok(json!(millis))
        }
    }

    #[tokio::test]
    async fn test_fast_call_returns_value() {
        let value = run_with_deadline(|| 40 + 2, Duration::from_secs(1)).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_sub_second_deadline_fires() {
        let start = Instant::now();
        let result = run_with_deadline(
            || std::thread::sleep(Duration::from_millis(500)),
            Duration::from_millis(50),
        )
        .await;

        assert!(matches!(result, Err(AppError::TimeLimitExceeded(d)) if d == Duration::from_millis(50)));
        assert!(start.elapsed() < Duration::from_millis(400));
    }

    #[tokio::test]
    async fn test_panic_is_reported() {
        let result = run_with_deadline(|| -> i32 { panic!("boom") }, Duration::from_secs(1)).await;
        assert!(matches!(result, Err(AppError::SolutionPanicked(msg)) if msg == "boom"));
    }

    #[tokio::test]
    async fn test_guards_can_run_back_to_back() {
        let first = run_with_deadline(
            || std::thread::sleep(Duration::from_millis(200)),
            Duration::from_millis(20),
        )
        .await;
        assert!(first.is_err());

        let second = run_with_deadline(|| "ok", Duration::from_secs(1)).await.unwrap();
        assert_eq!(second, "ok");
    }

    #[tokio::test]
    async fn test_run_blocking() {
        assert_eq!(run_blocking(|| 7).await.unwrap(), 7);

        let result = run_blocking(|| -> i32 { panic!("blocking boom") }).await;
        assert!(matches!(result, Err(AppError::SolutionPanicked(_))));
    }

    #[tokio::test]
    async fn test_sweep_counts_timeouts_per_limit() {
        let cases = vec![
            TestCase::new("fast", Input::Single(json!(0)), json!(0)),
            TestCase::new("slow", Input::Single(json!(300)), json!(300)),
            TestCase::new("wrong", Input::Single(json!(0)), json!(1)),
        ];

        let sweep = TimeLimitSweep::new(vec![Duration::from_millis(50), Duration::from_secs(2)]);
        let outcomes = sweep.run(Arc::new(Sleeper), &cases).await;

        assert_eq!(outcomes.len(), 2);

        assert_eq!(outcomes[0].passed, 1);
        assert_eq!(outcomes[0].failed, 1);
        assert_eq!(outcomes[0].timed_out, 1);
        assert_eq!(outcomes[0].timeout_cases, vec![2]);

        assert_eq!(outcomes[1].passed, 2);
        assert_eq!(outcomes[1].failed, 1);
        assert_eq!(outcomes[1].timed_out, 0);
        assert!(outcomes[1].total_time_secs >= 0.3);
    }
}
