//! LeetCode 15: 3Sum
//!
//! All unique triplets that sum to zero, each sorted ascending, listed in
//! ascending order.

use std::collections::{BTreeSet, HashSet};

use serde_json::{Value, json};

use crate::constants::{difficulties, platforms};
use crate::error::AppResult;
use crate::models::{Input, ProblemInfo, TestCase};

use super::{Solution, parse_int_list, to_value};

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreeSum;

impl ThreeSum {
    /// Fix the first element and look the third up in a set - O(n²) time, O(n) space
    pub fn hash_set(nums: &[i64]) -> Vec<[i64; 3]> {
        let mut triplets = BTreeSet::new();

        for i in 0..nums.len() {
            let mut seen = HashSet::new();
            for &b in &nums[i + 1..] {
                let c = -nums[i] - b;
                if seen.contains(&c) {
                    let mut triplet = [nums[i], b, c];
                    triplet.sort_unstable();
                    triplets.insert(triplet);
                }
                seen.insert(b);
            }
        }

        triplets.into_iter().collect()
    }

    /// Sort, then close in with two pointers - O(n²) time, O(1) extra space
    pub fn two_pointers(nums: &[i64]) -> Vec<[i64; 3]> {
        let mut nums = nums.to_vec();
        nums.sort_unstable();
        let n = nums.len();
        let mut result = Vec::new();

        for i in 0..n.saturating_sub(2) {
            if i > 0 && nums[i] == nums[i - 1] {
                continue;
            }

            let (mut left, mut right) = (i + 1, n - 1);
            while left < right {
                let total = nums[i] + nums[left] + nums[right];
                if total == 0 {
                    result.push([nums[i], nums[left], nums[right]]);
                    while left < right && nums[left] == nums[left + 1] {
                        left += 1;
                    }
                    while left < right && nums[right] == nums[right - 1] {
                        right -= 1;
                    }
                    left += 1;
                    right -= 1;
                } else if total < 0 {
                    left += 1;
                } else {
                    right -= 1;
                }
            }
        }

        result
    }
}

impl Solution for ThreeSum {
    fn info(&self) -> ProblemInfo {
        ProblemInfo {
            name: "3Sum".to_string(),
            description: "All unique triplets that sum to zero".to_string(),
            difficulty: difficulties::MEDIUM.to_string(),
            platform: platforms::LEETCODE.to_string(),
            id: 15,
        }
    }

    fn slug(&self) -> &'static str {
        "three_sum"
    }

    fn solve(&self, input: &Input) -> AppResult<Value> {
        let nums: Vec<i64> = input.arg(0)?;
        to_value(Self::hash_set(&nums))
    }

    fn solve_optimized(&self, input: &Input) -> AppResult<Value> {
        let nums: Vec<i64> = input.arg(0)?;
        to_value(Self::two_pointers(&nums))
    }

    fn parse_interactive_input(&self, line: &str) -> Option<Input> {
        parse_int_list(line).map(|nums| Input::Single(json!(nums)))
    }

    fn input_hint(&self) -> &'static str {
        "nums, e.g. -1,0,1,2,-1,-4"
    }

    fn default_test_cases(&self) -> Vec<TestCase> {
        vec![
            TestCase::new(
                "Basic example",
                Input::Single(json!([-1, 0, 1, 2, -1, -4])),
                json!([[-1, -1, 2], [-1, 0, 1]]),
            ),
            TestCase::new("No triplet", Input::Single(json!([0, 1, 1])), json!([])),
            TestCase::new("All zeros", Input::Single(json!([0, 0, 0, 0])), json!([[0, 0, 0]])),
            TestCase::new("Too short", Input::Single(json!([1, -1])), json!([])),
        ]
    }
}
