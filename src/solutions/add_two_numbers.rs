//! LeetCode 2: Add Two Numbers
//!
//! Two non-negative integers are given as digit lists in reverse order
//! (`[2, 4, 3]` is 342). Return their sum in the same form.

use serde_json::{Value, json};

use crate::args;
use crate::constants::{difficulties, platforms};
use crate::error::AppResult;
use crate::models::{Input, ProblemInfo, TestCase};

use super::{Solution, parse_int_list, to_value};

#[derive(Debug, Clone, Copy, Default)]
pub struct AddTwoNumbers;

/// Singly linked list node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNode {
    pub val: i64,
    pub next: Option<Box<ListNode>>,
}

impl ListNode {
    fn from_digits(digits: &[i64]) -> Option<Box<ListNode>> {
        digits
            .iter()
            .rev()
            .fold(None, |next, &val| Some(Box::new(ListNode { val, next })))
    }

    fn into_digits(mut list: Option<Box<ListNode>>) -> Vec<i64> {
        let mut digits = Vec::new();
        while let Some(node) = list {
            digits.push(node.val);
            list = node.next;
        }
        digits
    }
}

impl AddTwoNumbers {
    /// Digit-by-digit addition over slices - O(max(m, n))
    pub fn add_digits(l1: &[i64], l2: &[i64]) -> Vec<i64> {
        let mut result = Vec::with_capacity(l1.len().max(l2.len()) + 1);
        let mut carry = 0;
        let mut i = 0;

        while i < l1.len() || i < l2.len() || carry != 0 {
            let total = l1.get(i).copied().unwrap_or(0) + l2.get(i).copied().unwrap_or(0) + carry;
            carry = total / 10;
            result.push(total % 10);
            i += 1;
        }

        result
    }

    /// The same addition over linked lists, building the result in place
    pub fn add_lists(
        mut l1: Option<Box<ListNode>>,
        mut l2: Option<Box<ListNode>>,
    ) -> Option<Box<ListNode>> {
        let mut head = None;
        let mut tail = &mut head;
        let mut carry = 0;

        while l1.is_some() || l2.is_some() || carry != 0 {
            let mut total = carry;
            if let Some(node) = l1 {
                total += node.val;
                l1 = node.next;
            }
            if let Some(node) = l2 {
                total += node.val;
                l2 = node.next;
            }

            carry = total / 10;
            let node = tail.insert(Box::new(ListNode {
                val: total % 10,
                next: None,
            }));
            tail = &mut node.next;
        }

        head
    }
}

impl Solution for AddTwoNumbers {
    fn info(&self) -> ProblemInfo {
        ProblemInfo {
            name: "Add Two Numbers".to_string(),
            description: "Add two numbers stored as reversed digit lists".to_string(),
            difficulty: difficulties::MEDIUM.to_string(),
            platform: platforms::LEETCODE.to_string(),
            id: 2,
        }
    }

    fn slug(&self) -> &'static str {
        "add_two_numbers"
    }

    fn solve(&self, input: &Input) -> AppResult<Value> {
        let l1: Vec<i64> = input.arg(0)?;
        let l2: Vec<i64> = input.arg(1)?;
        to_value(Self::add_digits(&l1, &l2))
    }

    fn solve_optimized(&self, input: &Input) -> AppResult<Value> {
        let l1: Vec<i64> = input.arg(0)?;
        let l2: Vec<i64> = input.arg(1)?;
        let sum = Self::add_lists(ListNode::from_digits(&l1), ListNode::from_digits(&l2));
        to_value(ListNode::into_digits(sum))
    }

    /// `2,4,3|5,6,4` → l1 = [2, 4, 3], l2 = [5, 6, 4]
    fn parse_interactive_input(&self, line: &str) -> Option<Input> {
        let (l1, l2) = line.split_once('|')?;
        let l1 = parse_int_list(l1)?;
        let l2 = parse_int_list(l2)?;
        Some(args!(l1, l2))
    }

    fn input_hint(&self) -> &'static str {
        "l1|l2, e.g. 2,4,3|5,6,4"
    }

    fn default_test_cases(&self) -> Vec<TestCase> {
        vec![
            TestCase::new("Basic example", args!([2, 4, 3], [5, 6, 4]), json!([7, 0, 8])),
            TestCase::new("Zeros", args!([0], [0]), json!([0])),
            TestCase::new(
                "Carry past the end",
                args!([9, 9, 9, 9, 9, 9, 9], [9, 9, 9, 9]),
                json!([8, 9, 9, 9, 0, 0, 0, 1]),
            ),
            TestCase::new("Different lengths", args!([1, 8], [0]), json!([1, 8])),
        ]
    }
}
