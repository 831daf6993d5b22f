//! Interactive session
//!
//! Reads commands line by line until `quit` or end of input. Lines that are
//! not commands are handed to the solution's input parser and run through
//! both variants.

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::benchmark::Variant;
use crate::benchmark::guard;
use crate::benchmark::metrics::{TimedCall, time_call};
use crate::error::{AppError, AppResult};
use crate::models::Input;
use crate::utils::format_duration;

use super::{Command, SolutionHarness};

pub const FAREWELL: &str = "Goodbye!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingCommand,
    Terminated,
}

pub struct Session<'h, R, W: Write> {
    harness: &'h mut SolutionHarness<W>,
    input: R,
    state: SessionState,
}

impl<'h, R: AsyncBufRead + Unpin, W: Write> Session<'h, R, W> {
    pub fn new(harness: &'h mut SolutionHarness<W>, input: R) -> Self {
        Self {
            harness,
            input,
            state: SessionState::AwaitingCommand,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Read and execute lines until the session terminates
    pub async fn run(&mut self) -> AppResult<()> {
        self.harness.print_header()?;
        self.print_help()?;

        while self.state == SessionState::AwaitingCommand {
            self.step().await?;
        }
        Ok(())
    }

    /// Handle one line of input
    pub async fn step(&mut self) -> AppResult<()> {
        write!(self.harness.writer(), "> ")?;
        self.harness.writer().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            writeln!(self.harness.writer())?;
            return self.terminate();
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(self.harness.writer(), "{}", message)?;
                return Ok(());
            }
        };
        tracing::debug!(?command, "Interactive command");

        match command {
            Command::Help => self.print_help()?,
            Command::List => self.harness.list_test_cases()?,
            Command::Test(number) => match self.harness.run_single_test(number).await {
                Ok(_) => {}
                Err(AppError::InvalidInput(message)) => {
                    writeln!(self.harness.writer(), "{}", message)?;
                }
                Err(e) => return Err(e),
            },
            Command::Run => {
                self.harness.run_tests().await?;
            }
            Command::Benchmark => {
                self.harness.run_benchmark().await?;
            }
            Command::Analyze => {
                self.harness.run_performance_analysis().await?;
            }
            Command::Quit => return self.terminate(),
            Command::Empty => {}
            Command::Input(raw) => self.run_input(&raw).await?,
        }

        Ok(())
    }

    fn terminate(&mut self) -> AppResult<()> {
        writeln!(self.harness.writer(), "{}", FAREWELL)?;
        self.state = SessionState::Terminated;
        Ok(())
    }

    fn print_help(&mut self) -> AppResult<()> {
        let hint = self.harness.solution().input_hint();
        let out = self.harness.writer();
        writeln!(out, "Commands:")?;
        writeln!(out, "  help, h, ?            show this help")?;
        writeln!(out, "  test, t               list the test cases")?;
        writeln!(out, "  test N, t N           run test case N")?;
        writeln!(out, "  run, r                run all test cases")?;
        writeln!(out, "  benchmark, bench, b   compare solve and solve_optimized")?;
        writeln!(out, "  analyze, a            estimate complexity")?;
        writeln!(out, "  quit, exit, q         leave")?;
        writeln!(out, "Anything else is solution input: {}", hint)?;
        Ok(())
    }

    async fn run_input(&mut self, raw: &str) -> AppResult<()> {
        let Some(input) = self.harness.solution().parse_interactive_input(raw) else {
            let hint = self.harness.solution().input_hint();
            writeln!(
                self.harness.writer(),
                "Invalid input format, expected {}",
                hint
            )?;
            return Ok(());
        };

        let solution = Arc::clone(self.harness.solution());
        let call_input = input.clone();
        let (main, optimized) = guard::run_blocking(move || {
            (
                time_call(solution.as_ref(), Variant::Main, &call_input),
                time_call(solution.as_ref(), Variant::Optimized, &call_input),
            )
        })
        .await?;

        self.print_calls(&input, &main, &optimized)
    }

    fn print_calls(&mut self, input: &Input, main: &TimedCall, optimized: &TimedCall) -> AppResult<()> {
        let out = self.harness.writer();
        writeln!(out, "Input: {}", input)?;

        for (label, call) in [("main", main), ("optimized", optimized)] {
            match &call.outcome {
                Ok(value) => writeln!(
                    out,
                    "  {:<10} {}  ({})",
                    label,
                    value,
                    format_duration(call.elapsed)
                )?,
                Err(e) => writeln!(out, "  {:<10} error: {}", label, e)?,
            }
        }

        match (&main.outcome, &optimized.outcome) {
            (Ok(a), Ok(b)) if a == b => writeln!(out, "  Outputs match")?,
            (Ok(_), Ok(_)) => writeln!(out, "  Outputs differ")?,
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::solutions::{Solution, TwoSum};
    use std::io::Cursor;
    use tokio::io::{AsyncWriteExt, BufReader};

    async fn session_output(script: &str) -> (String, SessionState) {
        let mut harness = SolutionHarness::with_writer(Arc::new(TwoSum), &Config::default(), Vec::new());
        let state = {
            let mut session = Session::new(&mut harness, Cursor::new(script.to_string()));
            session.run().await.unwrap();
            session.state()
        };
        (String::from_utf8(harness.into_writer()).unwrap(), state)
    }

    #[tokio::test]
    async fn test_quit_terminates() {
        let (text, state) = session_output("help\nquit\nt\n").await;
        assert_eq!(state, SessionState::Terminated);
        assert!(text.ends_with("Goodbye!\n"));
        assert!(!text.contains("Passed"));
    }

    #[tokio::test]
    async fn test_end_of_input_says_goodbye() {
        let (text, state) = session_output("").await;
        assert_eq!(state, SessionState::Terminated);
        assert!(text.contains(FAREWELL));
    }

    #[tokio::test]
    async fn test_ad_hoc_input_runs_both_variants() {
        let (text, _) = session_output("2,7,11,15 9\n").await;
        assert!(text.contains("Input: ([2,7,11,15], 9)"));
        assert!(text.contains("main       [0,1]"));
        assert!(text.contains("optimized  [0,1]"));
        assert!(text.contains("Outputs match"));
    }

    #[tokio::test]
    async fn test_bad_input_keeps_session_alive() {
        let (text, _) = session_output("not numbers\n\nt 2\nt 99\ntest x\nq\n").await;
        assert!(text.contains(&format!("Invalid input format, expected {}", TwoSum.input_hint())));
        assert!(text.contains("Pair in the middle"));
        assert!(text.contains("Test case 99 does not exist (have 5)"));
        assert!(text.contains("Invalid test number: x"));
        assert!(text.ends_with("Goodbye!\n"));
    }

    #[tokio::test]
    async fn test_tests_lists_cases_without_running_them() {
        let (text, _) = session_output("tests\nq\n").await;
        assert!(text.contains("Test cases:"));
        assert!(text.contains("[  1] Basic example"));
        assert!(text.contains("input:    ([2,7,11,15], 9)"));
        assert!(text.contains("expected: [0,1]"));
        assert!(text.contains("[  5] No solution"));
        assert!(!text.contains("PASS"));
        assert!(!text.contains("Passed 5/5"));
    }

    #[tokio::test]
    async fn test_run_and_benchmark_commands() {
        let (text, _) = session_output("r\nb\n").await;
        assert!(text.contains("Passed 5/5"));
        assert!(!text.contains("Performance analysis"));
        assert!(text.contains("Benchmark: solve vs solve_optimized"));
    }

    #[tokio::test]
    async fn test_waits_for_input_without_blocking_the_runtime() {
        let (mut tx, rx) = tokio::io::duplex(64);
        let typist = tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            tx.write_all(b"t 1\nquit\n").await.unwrap();
        });

        let mut harness = SolutionHarness::with_writer(Arc::new(TwoSum), &Config::default(), Vec::new());
        let state = {
            let mut session = Session::new(&mut harness, BufReader::new(rx));
            session.run().await.unwrap();
            session.state()
        };
        typist.await.unwrap();

        let text = String::from_utf8(harness.into_writer()).unwrap();
        assert_eq!(state, SessionState::Terminated);
        assert!(text.contains("PASS AC"));
        assert!(text.ends_with("Goodbye!\n"));
    }
}
