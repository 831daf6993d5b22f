//! LeetCode 1: Two Sum
//!
//! Return the indices of the two numbers that add up to `target`, or an
//! empty list when no pair does.

use std::collections::HashMap;

use serde_json::{Value, json};

use crate::args;
use crate::constants::{difficulties, platforms};
use crate::error::AppResult;
use crate::models::{Input, ProblemInfo, TestCase};

use super::{Solution, parse_int_list, to_value};

#[derive(Debug, Clone, Copy, Default)]
pub struct TwoSum;

impl TwoSum {
    /// Check every pair - O(n²) time, O(1) space
    ///
    /// Pairs whose sum overflows `i64` cannot match and are skipped.
    pub fn brute_force(nums: &[i64], target: i64) -> Vec<usize> {
        for i in 0..nums.len() {
            for j in i + 1..nums.len() {
                if nums[i].checked_add(nums[j]) == Some(target) {
                    return vec![i, j];
                }
            }
        }
        Vec::new()
    }

    /// Complement lookup - O(n) time, O(n) space
    pub fn hash_map(nums: &[i64], target: i64) -> Vec<usize> {
        let mut seen: HashMap<i64, usize> = HashMap::with_capacity(nums.len());
        for (i, &num) in nums.iter().enumerate() {
            let complement = target.checked_sub(num);
            if let Some(&j) = complement.and_then(|c| seen.get(&c)) {
                return vec![j, i];
            }
            seen.insert(num, i);
        }
        Vec::new()
    }
}

impl Solution for TwoSum {
    fn info(&self) -> ProblemInfo {
        ProblemInfo {
            name: "Two Sum".to_string(),
            description: "Find two indices whose values add up to target".to_string(),
            difficulty: difficulties::EASY.to_string(),
            platform: platforms::LEETCODE.to_string(),
            id: 1,
        }
    }

    fn slug(&self) -> &'static str {
        "two_sum"
    }

    fn solve(&self, input: &Input) -> AppResult<Value> {
        let nums: Vec<i64> = input.arg(0)?;
        let target: i64 = input.arg(1)?;
        to_value(Self::brute_force(&nums, target))
    }

    fn solve_optimized(&self, input: &Input) -> AppResult<Value> {
        let nums: Vec<i64> = input.arg(0)?;
        let target: i64 = input.arg(1)?;
        to_value(Self::hash_map(&nums, target))
    }

    /// `2,7,11,15 9` → nums = [2, 7, 11, 15], target = 9
    fn parse_interactive_input(&self, line: &str) -> Option<Input> {
        let mut parts = line.split_whitespace();
        let (nums, target, None) = (parts.next()?, parts.next()?, parts.next()) else {
            return None;
        };

        let nums = parse_int_list(nums)?;
        let target: i64 = target.parse().ok()?;
        Some(args!(nums, target))
    }

    fn input_hint(&self) -> &'static str {
        "nums target, e.g. 2,7,11,15 9"
    }

    fn default_test_cases(&self) -> Vec<TestCase> {
        vec![
            TestCase::new("Basic example", args!([2, 7, 11, 15], 9), json!([0, 1])),
            TestCase::new("Pair in the middle", args!([3, 2, 4], 6), json!([1, 2])),
            TestCase::new("Duplicate values", args!([3, 3], 6), json!([0, 1])),
            TestCase::new("Negative numbers", args!([-1, -2, -3, -4, -5], -8), json!([2, 4])),
            TestCase::new("No solution", args!([1, 2, 3, 4, 5], 10), json!([])),
        ]
    }
}
