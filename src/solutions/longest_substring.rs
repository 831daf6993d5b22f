//! LeetCode 3: Longest Substring Without Repeating Characters

use std::collections::{HashMap, HashSet};

use serde_json::{Value, json};

use crate::constants::{difficulties, platforms};
use crate::error::AppResult;
use crate::models::{Input, ProblemInfo, TestCase};

use super::{Solution, to_value};

#[derive(Debug, Clone, Copy, Default)]
pub struct LongestSubstring;

impl LongestSubstring {
    /// Grow a window from every start until a character repeats
    pub fn expand_from_each_start(s: &str) -> usize {
        let chars: Vec<char> = s.chars().collect();
        let mut best = 0;

        for start in 0..chars.len() {
            let mut seen = HashSet::new();
            for &c in &chars[start..] {
                if !seen.insert(c) {
                    break;
                }
            }
            best = best.max(seen.len());
        }

        best
    }

    /// Sliding window that jumps past the previous occurrence - O(n)
    pub fn sliding_window(s: &str) -> usize {
        let mut last_seen: HashMap<char, usize> = HashMap::new();
        let mut start = 0;
        let mut best = 0;

        for (i, c) in s.chars().enumerate() {
            if let Some(&prev) = last_seen.get(&c) {
                start = start.max(prev + 1);
            }
            last_seen.insert(c, i);
            best = best.max(i + 1 - start);
        }

        best
    }
}

impl Solution for LongestSubstring {
    fn info(&self) -> ProblemInfo {
        ProblemInfo {
            name: "Longest Substring Without Repeating Characters".to_string(),
            description: "Length of the longest substring without repeated characters".to_string(),
            difficulty: difficulties::MEDIUM.to_string(),
            platform: platforms::LEETCODE.to_string(),
            id: 3,
        }
    }

    fn slug(&self) -> &'static str {
        "longest_substring"
    }

    fn solve(&self, input: &Input) -> AppResult<Value> {
        let s: String = input.arg(0)?;
        to_value(Self::expand_from_each_start(&s))
    }

    fn solve_optimized(&self, input: &Input) -> AppResult<Value> {
        let s: String = input.arg(0)?;
        to_value(Self::sliding_window(&s))
    }

    /// The line itself; surrounding double quotes are stripped
    fn parse_interactive_input(&self, line: &str) -> Option<Input> {
        let s = line
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap_or(line);
        Some(Input::Single(json!(s)))
    }

    fn input_hint(&self) -> &'static str {
        "a string, e.g. abcabcbb"
    }

    fn default_test_cases(&self) -> Vec<TestCase> {
        vec![
            TestCase::new("Basic example", Input::Single(json!("abcabcbb")), json!(3)),
            TestCase::new("All the same", Input::Single(json!("bbbbb")), json!(1)),
            TestCase::new("Answer inside", Input::Single(json!("pwwkew")), json!(3)),
            TestCase::new("Empty string", Input::Single(json!("")), json!(0)),
            TestCase::new("Window jumps back", Input::Single(json!("abba")), json!(2)),
        ]
    }
}
