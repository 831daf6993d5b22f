//! LeetCode 30: Substring with Concatenation of All Words
//!
//! Starting indices of every window of `s` that is a concatenation of all
//! `words` (equal length, any order, each used once).

use std::collections::HashMap;

use serde_json::{Value, json};

use crate::args;
use crate::constants::{difficulties, platforms};
use crate::error::AppResult;
use crate::models::{Input, ProblemInfo, TestCase};

use super::{Solution, parse_word_list, to_value};

#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringConcat;

fn word_counts(words: &[String]) -> HashMap<&[u8], usize> {
    let mut counts = HashMap::new();
    for word in words {
        *counts.entry(word.as_bytes()).or_insert(0) += 1;
    }
    counts
}

impl SubstringConcat {
    /// Recount the words of every window - O(n · m) for m words
    pub fn check_every_window(s: &str, words: &[String]) -> Vec<usize> {
        let Some(word_len) = words.first().map(String::len).filter(|len| *len > 0) else {
            return Vec::new();
        };
        let s = s.as_bytes();
        let window = word_len * words.len();
        if s.len() < window {
            return Vec::new();
        }

        let expected = word_counts(words);
        (0..=s.len() - window)
            .filter(|&start| {
                let mut remaining = expected.clone();
                s[start..start + window].chunks(word_len).all(|chunk| {
                    match remaining.get_mut(chunk) {
                        Some(count) if *count > 0 => {
                            *count -= 1;
                            true
                        }
                        _ => false,
                    }
                })
            })
            .collect()
    }

    /// One sliding window per offset within a word - O(n) word comparisons
    pub fn sliding_window(s: &str, words: &[String]) -> Vec<usize> {
        let Some(word_len) = words.first().map(String::len).filter(|len| *len > 0) else {
            return Vec::new();
        };
        let s = s.as_bytes();
        let word_count = words.len();
        let expected = word_counts(words);
        let mut result = Vec::new();

        for offset in 0..word_len {
            let mut seen: HashMap<&[u8], usize> = HashMap::new();
            let mut used = 0;
            let mut left = offset;
            let mut right = offset;

            while right + word_len <= s.len() {
                let word = &s[right..right + word_len];
                right += word_len;

                let Some(&limit) = expected.get(word) else {
                    seen.clear();
                    used = 0;
                    left = right;
                    continue;
                };

                *seen.entry(word).or_insert(0) += 1;
                used += 1;

                while seen[word] > limit {
                    let first = &s[left..left + word_len];
                    if let Some(count) = seen.get_mut(first) {
                        *count -= 1;
                    }
                    used -= 1;
                    left += word_len;
                }

                if used == word_count {
                    result.push(left);
                }
            }
        }

        result.sort_unstable();
        result
    }
}

impl Solution for SubstringConcat {
    fn info(&self) -> ProblemInfo {
        ProblemInfo {
            name: "Substring with Concatenation of All Words".to_string(),
            description: "Start indices of windows that concatenate every word".to_string(),
            difficulty: difficulties::HARD.to_string(),
            platform: platforms::LEETCODE.to_string(),
            id: 30,
        }
    }

    fn slug(&self) -> &'static str {
        "substring_concat"
    }

    fn solve(&self, input: &Input) -> AppResult<Value> {
        let s: String = input.arg(0)?;
        let words: Vec<String> = input.arg(1)?;
        to_value(Self::check_every_window(&s, &words))
    }

    fn solve_optimized(&self, input: &Input) -> AppResult<Value> {
        let s: String = input.arg(0)?;
        let words: Vec<String> = input.arg(1)?;
        to_value(Self::sliding_window(&s, &words))
    }

    /// `barfoothefoobarman foo,bar` → s, words
    fn parse_interactive_input(&self, line: &str) -> Option<Input> {
        let (s, words) = line.trim().split_once(char::is_whitespace)?;
        let words = parse_word_list(words)?;
        Some(args!(s, words))
    }

    fn input_hint(&self) -> &'static str {
        "s words, e.g. barfoothefoobarman foo,bar"
    }

    fn default_test_cases(&self) -> Vec<TestCase> {
        vec![
            TestCase::new(
                "Basic example",
                args!("barfoothefoobarman", ["foo", "bar"]),
                json!([0, 9]),
            ),
            TestCase::new(
                "Repeated word not available",
                args!("wordgoodgoodgoodbestword", ["word", "good", "best", "word"]),
                json!([]),
            ),
            TestCase::new(
                "Overlapping windows",
                args!("barfoofoobarthefoobarman", ["bar", "foo", "the"]),
                json!([6, 9, 12]),
            ),
            TestCase::new(
                "Duplicate words",
                args!("wordgoodgoodgoodbestword", ["word", "good", "best", "good"]),
                json!([8]),
            ),
            TestCase::new("Window longer than s", args!("ab", ["abc"]), json!([])),
        ]
    }
}
