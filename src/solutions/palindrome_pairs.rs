//! LeetCode 336: Palindrome Pairs
//!
//! Every ordered pair `[i, j]` (`i != j`) whose concatenation
//! `words[i] + words[j]` is a palindrome, sorted ascending.

use std::collections::HashMap;

use serde_json::{Value, json};

use crate::constants::{difficulties, platforms};
use crate::error::AppResult;
use crate::models::{Input, ProblemInfo, TestCase};

use super::{Solution, parse_word_list, to_value};

#[derive(Debug, Clone, Copy, Default)]
pub struct PalindromePairs;

fn is_palindrome(word: &[u8], mut lo: usize, mut hi: usize) -> bool {
    while lo < hi {
        if word[lo] != word[hi] {
            return false;
        }
        lo += 1;
        hi -= 1;
    }
    true
}

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<u8, usize>,
    /// Index of the word ending here (words are inserted reversed)
    word_end: Option<usize>,
    /// Words passing through here whose unread rest is a palindrome
    palindrome_suffixes: Vec<usize>,
}

/// Trie of reversed words, stored as an arena
#[derive(Debug)]
struct ReversedTrie {
    nodes: Vec<TrieNode>,
}

impl ReversedTrie {
    fn build(words: &[String]) -> Self {
        let mut trie = Self {
            nodes: vec![TrieNode::default()],
        };
        for (index, word) in words.iter().enumerate() {
            trie.insert(index, word.as_bytes());
        }
        trie
    }

    fn insert(&mut self, index: usize, word: &[u8]) {
        let mut node = 0;

        for i in (0..word.len()).rev() {
            if is_palindrome(word, 0, i) {
                self.nodes[node].palindrome_suffixes.push(index);
            }
            node = match self.nodes[node].children.get(&word[i]) {
                Some(&child) => child,
                None => {
                    self.nodes.push(TrieNode::default());
                    let child = self.nodes.len() - 1;
                    self.nodes[node].children.insert(word[i], child);
                    child
                }
            };
        }

        self.nodes[node].palindrome_suffixes.push(index);
        self.nodes[node].word_end = Some(index);
    }

    fn search(&self, index: usize, word: &[u8], pairs: &mut Vec<[usize; 2]>) {
        let mut node = 0;

        for j in 0..word.len() {
            if let Some(end) = self.nodes[node].word_end {
                if end != index && is_palindrome(word, j, word.len() - 1) {
                    pairs.push([index, end]);
                }
            }
            match self.nodes[node].children.get(&word[j]) {
                Some(&child) => node = child,
                None => return,
            }
        }

        pairs.extend(
            self.nodes[node]
                .palindrome_suffixes
                .iter()
                .filter(|&&k| k != index)
                .map(|&k| [index, k]),
        );
    }
}

impl PalindromePairs {
    /// Test every ordered pair - O(n² · k)
    pub fn brute_force(words: &[String]) -> Vec<[usize; 2]> {
        let mut pairs = Vec::new();
        for (i, a) in words.iter().enumerate() {
            for (j, b) in words.iter().enumerate() {
                if i == j {
                    continue;
                }
                let joined = [a.as_bytes(), b.as_bytes()].concat();
                if joined.is_empty() || is_palindrome(&joined, 0, joined.len() - 1) {
                    pairs.push([i, j]);
                }
            }
        }
        pairs
    }

    /// Walk each word through a trie of reversed words - O(n · k²)
    pub fn trie(words: &[String]) -> Vec<[usize; 2]> {
        let trie = ReversedTrie::build(words);
        let mut pairs = Vec::new();
        for (index, word) in words.iter().enumerate() {
            trie.search(index, word.as_bytes(), &mut pairs);
        }
        pairs.sort_unstable();
        pairs
    }
}

impl Solution for PalindromePairs {
    fn info(&self) -> ProblemInfo {
        ProblemInfo {
            name: "Palindrome Pairs".to_string(),
            description: "Ordered pairs of words whose concatenation is a palindrome".to_string(),
            difficulty: difficulties::HARD.to_string(),
            platform: platforms::LEETCODE.to_string(),
            id: 336,
        }
    }

    fn slug(&self) -> &'static str {
        "palindrome_pairs"
    }

    fn solve(&self, input: &Input) -> AppResult<Value> {
        let words: Vec<String> = input.arg(0)?;
        to_value(Self::brute_force(&words))
    }

    fn solve_optimized(&self, input: &Input) -> AppResult<Value> {
        let words: Vec<String> = input.arg(0)?;
        to_value(Self::trie(&words))
    }

    fn parse_interactive_input(&self, line: &str) -> Option<Input> {
        parse_word_list(line).map(|words| Input::Single(json!(words)))
    }

    fn input_hint(&self) -> &'static str {
        "words, e.g. abcd,dcba,lls,s,sssll"
    }

    fn default_test_cases(&self) -> Vec<TestCase> {
        vec![
            TestCase::new(
                "Basic example",
                Input::Single(json!(["abcd", "dcba", "lls", "s", "sssll"])),
                json!([[0, 1], [1, 0], [2, 4], [3, 2]]),
            ),
            TestCase::new(
                "Reversed pair",
                Input::Single(json!(["bat", "tab", "cat"])),
                json!([[0, 1], [1, 0]]),
            ),
            TestCase::new(
                "Empty word",
                Input::Single(json!(["a", ""])),
                json!([[0, 1], [1, 0]]),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_is_palindrome() {
        assert!(is_palindrome(b"racecar", 0, 6));
        assert!(is_palindrome(b"abba", 1, 2));
        assert!(!is_palindrome(b"abca", 0, 3));
        assert!(is_palindrome(b"x", 0, 0));
    }

    #[test]
    fn test_trie_matches_brute_force() {
        let cases = [
            words(&["a", "abc", "aba", ""]),
            words(&["abc", "cba", "b", "bb", "ab", "ba"]),
            words(&["race", "car", "ecar", "x"]),
        ];
        for list in &cases {
            assert_eq!(
                PalindromePairs::trie(list),
                PalindromePairs::brute_force(list),
                "{:?}",
                list
            );
        }
    }
}
