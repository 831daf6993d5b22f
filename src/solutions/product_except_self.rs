//! LeetCode 238: Product of Array Except Self
//!
//! Products wrap on overflow so large synthetic inputs stay well defined.

use serde_json::{Value, json};

use crate::constants::{difficulties, platforms};
use crate::error::AppResult;
use crate::models::{Input, ProblemInfo, TestCase};

use super::{Solution, parse_int_list, to_value};

#[derive(Debug, Clone, Copy, Default)]
pub struct ProductExceptSelf;

impl ProductExceptSelf {
    /// Multiply everything but `i` for each `i` - O(n²)
    pub fn brute_force(nums: &[i64]) -> Vec<i64> {
        (0..nums.len())
            .map(|i| {
                nums.iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .fold(1i64, |acc, (_, &n)| acc.wrapping_mul(n))
            })
            .collect()
    }

    /// Prefix pass into the output, then a running suffix product - O(n)
    pub fn prefix_suffix(nums: &[i64]) -> Vec<i64> {
        let mut result = vec![1i64; nums.len()];

        for i in 1..nums.len() {
            result[i] = result[i - 1].wrapping_mul(nums[i - 1]);
        }

        let mut suffix = 1i64;
        for i in (0..nums.len()).rev() {
            result[i] = result[i].wrapping_mul(suffix);
            suffix = suffix.wrapping_mul(nums[i]);
        }

        result
    }
}

impl Solution for ProductExceptSelf {
    fn info(&self) -> ProblemInfo {
        ProblemInfo {
            name: "Product of Array Except Self".to_string(),
            description: "Product of every other element, without division".to_string(),
            difficulty: difficulties::MEDIUM.to_string(),
            platform: platforms::LEETCODE.to_string(),
            id: 238,
        }
    }

    fn slug(&self) -> &'static str {
        "product_except_self"
    }

    fn solve(&self, input: &Input) -> AppResult<Value> {
        let nums: Vec<i64> = input.arg(0)?;
        to_value(Self::brute_force(&nums))
    }

    fn solve_optimized(&self, input: &Input) -> AppResult<Value> {
        let nums: Vec<i64> = input.arg(0)?;
        to_value(Self::prefix_suffix(&nums))
    }

    fn parse_interactive_input(&self, line: &str) -> Option<Input> {
        parse_int_list(line).map(|nums| Input::Single(json!(nums)))
    }

    fn input_hint(&self) -> &'static str {
        "nums, e.g. 1,2,3,4"
    }

    fn default_test_cases(&self) -> Vec<TestCase> {
        vec![
            TestCase::new("Basic example", Input::Single(json!([1, 2, 3, 4])), json!([24, 12, 8, 6])),
            TestCase::new(
                "Single zero",
                Input::Single(json!([-1, 1, 0, -3, 3])),
                json!([0, 0, 9, 0, 0]),
            ),
            TestCase::new("Two zeros", Input::Single(json!([0, 4, 0])), json!([0, 0, 0])),
            TestCase::new("Pair", Input::Single(json!([2, 3])), json!([3, 2])),
        ]
    }
}
