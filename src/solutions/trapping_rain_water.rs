//! LeetCode 42: Trapping Rain Water

use serde_json::{Value, json};

use crate::constants::{difficulties, platforms};
use crate::error::AppResult;
use crate::models::{Input, ProblemInfo, TestCase};

use super::{Solution, parse_int_list, to_value};

#[derive(Debug, Clone, Copy, Default)]
pub struct TrappingRainWater;

impl TrappingRainWater {
    /// Scan left and right of every bar for its walls - O(n²)
    pub fn scan_each_bar(height: &[i64]) -> i64 {
        (0..height.len())
            .map(|i| {
                let left = height[..=i].iter().copied().max().unwrap_or(0);
                let right = height[i..].iter().copied().max().unwrap_or(0);
                left.min(right) - height[i]
            })
            .sum()
    }

    /// Close in from both ends, always moving the lower wall - O(n) time, O(1) space
    pub fn two_pointers(height: &[i64]) -> i64 {
        if height.is_empty() {
            return 0;
        }

        let (mut left, mut right) = (0, height.len() - 1);
        let (mut left_max, mut right_max) = (0, 0);
        let mut water = 0;

        while left < right {
            if height[left] < height[right] {
                left_max = left_max.max(height[left]);
                water += left_max - height[left];
                left += 1;
            } else {
                right_max = right_max.max(height[right]);
                water += right_max - height[right];
                right -= 1;
            }
        }

        water
    }
}

impl Solution for TrappingRainWater {
    fn info(&self) -> ProblemInfo {
        ProblemInfo {
            name: "Trapping Rain Water".to_string(),
            description: "Units of water trapped between elevation bars".to_string(),
            difficulty: difficulties::HARD.to_string(),
            platform: platforms::LEETCODE.to_string(),
            id: 42,
        }
    }

    fn slug(&self) -> &'static str {
        "trapping_rain_water"
    }

    fn solve(&self, input: &Input) -> AppResult<Value> {
        let height: Vec<i64> = input.arg(0)?;
        to_value(Self::scan_each_bar(&height))
    }

    fn solve_optimized(&self, input: &Input) -> AppResult<Value> {
        let height: Vec<i64> = input.arg(0)?;
        to_value(Self::two_pointers(&height))
    }

    fn parse_interactive_input(&self, line: &str) -> Option<Input> {
        parse_int_list(line).map(|height| Input::Single(json!(height)))
    }

    fn input_hint(&self) -> &'static str {
        "heights, e.g. 0,1,0,2,1,0,1,3,2,1,2,1"
    }

    fn default_test_cases(&self) -> Vec<TestCase> {
        vec![
            TestCase::new(
                "Basic example",
                Input::Single(json!([0, 1, 0, 2, 1, 0, 1, 3, 2, 1, 2, 1])),
                json!(6),
            ),
            TestCase::new("Deep basin", Input::Single(json!([4, 2, 0, 3, 2, 5])), json!(9)),
            TestCase::new("Empty elevation map", Input::Single(json!([])), json!(0)),
            TestCase::new("Ascending", Input::Single(json!([1, 2, 3, 4])), json!(0)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants_agree() {
        let maps: [&[i64]; 4] = [&[5, 0, 5], &[2, 0, 2, 0, 1], &[3], &[5, 4, 1, 2]];
        for height in maps {
            assert_eq!(
                TrappingRainWater::scan_each_bar(height),
                TrappingRainWater::two_pointers(height),
                "{:?}",
                height
            );
        }
        assert_eq!(TrappingRainWater::two_pointers(&[2, 0, 2, 0, 1]), 3);
    }
}
