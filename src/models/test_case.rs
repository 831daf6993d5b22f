//! Test case model and TOML test-case files

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::platforms;
use crate::error::{AppError, AppResult};
use crate::models::Input;

/// A single input/expected pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestCase {
    pub input: Input,
    pub expected: Value,
    pub description: String,
    /// Per-case deadline; the runner default applies when absent
    #[serde(with = "duration_secs_opt")]
    pub timeout: Option<Duration>,
}

impl TestCase {
    /// Create a test case without a timeout of its own
    pub fn new(description: impl Into<String>, input: Input, expected: Value) -> Self {
        Self {
            input,
            expected,
            description: description.into(),
            timeout: None,
        }
    }

    /// Attach a per-case timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Get a preview of the input (truncated)
    pub fn input_preview(&self, max_len: usize) -> String {
        truncate(&self.input.to_string(), max_len)
    }

    /// Get a preview of the expected output (truncated)
    pub fn expected_preview(&self, max_len: usize) -> String {
        truncate(&self.expected.to_string(), max_len)
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len).collect();
        format!("{}...", head)
    }
}

/// `[problem]` section of a test-case file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProblemInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub id: u32,
}

/// A parsed test-case file
#[derive(Debug, Clone, PartialEq)]
pub struct TestSuite {
    pub problem: Option<ProblemInfo>,
    pub test_cases: Vec<TestCase>,
}

#[derive(Debug, Deserialize)]
struct RawSuite {
    problem: Option<ProblemInfo>,
    #[serde(default)]
    test_cases: Vec<RawTestCase>,
}

#[derive(Debug, Deserialize)]
struct RawTestCase {
    #[serde(default)]
    description: String,
    input: Option<Value>,
    expected: Value,
    timeout: Option<f64>,
    target: Option<Value>,
    l1: Option<Value>,
    l2: Option<Value>,
    args: Option<Vec<Value>>,
}

impl RawTestCase {
    fn into_test_case(self, number: usize) -> AppResult<TestCase> {
        let input = match (self.args, self.target, self.l1, self.l2, self.input) {
            (Some(args), _, _, _, _) => Input::Multiple(args),
            (None, Some(target), _, _, Some(input)) => Input::Multiple(vec![input, target]),
            (None, None, Some(l1), Some(l2), _) => Input::Multiple(vec![l1, l2]),
            (None, None, _, _, Some(input)) => Input::Single(input),
            _ => {
                return Err(AppError::InvalidTestCase(format!(
                    "test case {} has no usable input (expected `input`, `l1`/`l2` or `args`)",
                    number
                )));
            }
        };

        let timeout = match self.timeout {
            Some(secs) if secs.is_finite() && secs > 0.0 => Some(Duration::from_secs_f64(secs)),
            Some(secs) => {
                return Err(AppError::InvalidTestCase(format!(
                    "test case {} has non-positive timeout {}",
                    number, secs
                )));
            }
            None => None,
        };

        Ok(TestCase {
            input,
            expected: self.expected,
            description: self.description,
            timeout,
        })
    }
}

impl TestSuite {
    /// Parse a test-case file from TOML text
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let raw: RawSuite = toml::from_str(content)?;

        if let Some(problem) = &raw.problem {
            if !problem.platform.is_empty() && !platforms::ALL.contains(&problem.platform.as_str()) {
                tracing::warn!(platform = %problem.platform, "Unknown platform in test-case file");
            }
        }

        let test_cases = raw
            .test_cases
            .into_iter()
            .enumerate()
            .map(|(i, tc)| tc.into_test_case(i + 1))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self {
            problem: raw.problem,
            test_cases,
        })
    }

    /// Load a test-case file from disk
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let suite = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            count = suite.test_cases.len(),
            "Loaded test cases"
        );
        Ok(suite)
    }
}

mod duration_secs_opt {
    use std::time::Duration;

    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => serializer.serialize_some(&d.as_secs_f64()),
            None => serializer.serialize_none(),
        }
    }
}
