//! Practice solutions
//!
//! Every problem implements [`Solution`]: a reference `solve`, an optional
//! `solve_optimized`, a parser for interactive input and a set of built-in
//! test cases used when no test-case file is available.

mod add_two_numbers;
mod longest_substring;
mod palindrome_pairs;
mod product_except_self;
mod substring_concat;
mod three_sum;
mod trapping_rain_water;
mod two_sum;

use std::sync::Arc;

use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::models::{Input, ProblemInfo, TestCase};

pub use add_two_numbers::AddTwoNumbers;
pub use longest_substring::LongestSubstring;
pub use palindrome_pairs::PalindromePairs;
pub use product_except_self::ProductExceptSelf;
pub use substring_concat::SubstringConcat;
pub use three_sum::ThreeSum;
pub use trapping_rain_water::TrappingRainWater;
pub use two_sum::TwoSum;

/// A problem solution that the harness can test, analyze and benchmark
pub trait Solution: Send + Sync {
    /// Problem metadata
    fn info(&self) -> ProblemInfo;

    /// Short snake_case name, used for the test-case file name
    fn slug(&self) -> &'static str;

    /// Reference implementation
    fn solve(&self, input: &Input) -> AppResult<Value>;

    /// Faster implementation; defaults to [`Solution::solve`]
    fn solve_optimized(&self, input: &Input) -> AppResult<Value> {
        self.solve(input)
    }

    /// Turn a line typed in interactive mode into an input
    ///
    /// The default accepts a single JSON value.
    fn parse_interactive_input(&self, line: &str) -> Option<Input> {
        serde_json::from_str(line).ok().map(Input::Single)
    }

    /// Example of what `parse_interactive_input` accepts
    fn input_hint(&self) -> &'static str {
        "a JSON value, e.g. [1, 2, 3]"
    }

    /// Test cases used when no test-case file can be loaded
    fn default_test_cases(&self) -> Vec<TestCase> {
        Vec::new()
    }
}

/// File name of a solution's test cases, e.g. `0001.two_sum.toml`
pub fn test_case_file_name(solution: &dyn Solution) -> String {
    format!("{:04}.{}.toml", solution.info().id, solution.slug())
}

/// All built-in solutions, ordered by problem id
pub fn registry() -> Vec<Arc<dyn Solution>> {
    vec![
        Arc::new(TwoSum),
        Arc::new(AddTwoNumbers),
        Arc::new(LongestSubstring),
        Arc::new(ThreeSum),
        Arc::new(SubstringConcat),
        Arc::new(TrappingRainWater),
        Arc::new(ProductExceptSelf),
        Arc::new(PalindromePairs),
    ]
}

/// Look a solution up by problem id (`1`, `0001`) or slug (`two_sum`)
pub fn find(key: &str) -> AppResult<Arc<dyn Solution>> {
    let key = key.trim();
    let id: Option<u32> = key.parse().ok();

    registry()
        .into_iter()
        .find(|s| match id {
            Some(id) => s.info().id == id,
            None => s.slug().eq_ignore_ascii_case(key),
        })
        .ok_or_else(|| AppError::UnknownSolution(key.to_string()))
}

/// Parse `1,2,3`, `1 2 3` or `[1, 2, 3]` into integers
pub(crate) fn parse_int_list(raw: &str) -> Option<Vec<i64>> {
    let raw = raw.trim().trim_start_matches('[').trim_end_matches(']');
    if raw.trim().is_empty() {
        return Some(Vec::new());
    }

    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().ok())
        .collect()
}

/// Parse `a,b,c` or `["a", "b"]` into words
pub(crate) fn parse_word_list(raw: &str) -> Option<Vec<String>> {
    let raw = raw.trim();
    if raw.starts_with('[') {
        return serde_json::from_str(raw).ok();
    }

    let words: Vec<String> = raw
        .split(',')
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty())
        .collect();
    (!words.is_empty()).then_some(words)
}

/// Serialize a solution's answer
pub(crate) fn to_value<T: serde::Serialize>(answer: T) -> AppResult<Value> {
    Ok(serde_json::to_value(answer)?)
}
