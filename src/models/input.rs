//! Solution input model
//!
//! A solution receives either one value or an ordered list of positional
//! arguments. Values are kept as `serde_json::Value` so test-case files,
//! synthetic benchmark inputs and interactive input share one representation;
//! each solution decodes its arguments into concrete types with [`Input::arg`].

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Input passed to `Solution::solve`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Input {
    /// A single argument
    Single(Value),
    /// Positional arguments, in call order
    Multiple(Vec<Value>),
}

impl Input {
    /// Number of positional arguments
    pub fn arity(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multiple(args) => args.len(),
        }
    }

    /// Positional arguments as a slice
    pub fn args(&self) -> &[Value] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Multiple(args) => args,
        }
    }

    /// Decode the argument at `index` into `T`
    pub fn arg<T: DeserializeOwned>(&self, index: usize) -> AppResult<T> {
        let value = self.args().get(index).ok_or_else(|| {
            AppError::InvalidInput(format!(
                "expected at least {} argument(s), got {}",
                index + 1,
                self.arity()
            ))
        })?;

        serde_json::from_value(value.clone())
            .map_err(|e| AppError::InvalidInput(format!("argument {}: {}", index, e)))
    }

    /// Approximate element count, used to normalise peak memory
    ///
    /// Arrays and strings count their length, numbers count their value,
    /// anything else counts as one. Multiple arguments add up.
    pub fn element_count(&self) -> usize {
        self.args().iter().map(value_element_count).sum()
    }
}

fn value_element_count(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.len(),
        Value::String(s) => s.chars().count(),
        Value::Number(n) => n
            .as_u64()
            .map(|v| v as usize)
            .or_else(|| n.as_i64().map(|v| v.unsigned_abs() as usize))
            .or_else(|| n.as_f64().map(|v| v.abs() as usize))
            .unwrap_or(0),
        _ => 1,
    }
}

/// Build a `Input::Multiple` from a list of serializable values
#[macro_export]
macro_rules! args {
    ($($arg:expr),+ $(,)?) => {
        $crate::models::Input::Multiple(vec![$(::serde_json::json!($arg)),+])
    };
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(value) => write!(f, "{}", value),
            Self::Multiple(args) => {
                let rendered: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                write!(f, "({})", rendered.join(", "))
            }
        }
    }
}
