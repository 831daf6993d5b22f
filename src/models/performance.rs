//! Performance analysis models

use std::fmt;

use serde::Serialize;

/// Qualitative time complexity label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeComplexity {
    Constant,
    Logarithmic,
    Linear,
    Linearithmic,
    Quadratic,
    HigherPolynomial,
}

impl TimeComplexity {
    pub fn notation(&self) -> &'static str {
        match self {
            Self::Constant => "O(1)",
            Self::Logarithmic => "O(log n)",
            Self::Linear => "O(n)",
            Self::Linearithmic => "O(n log n)",
            Self::Quadratic => "O(n²)",
            Self::HigherPolynomial => "O(n^k), k > 2",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Constant => "Constant time",
            Self::Logarithmic => "Logarithmic time",
            Self::Linear => "Linear time",
            Self::Linearithmic => "Linearithmic time",
            Self::Quadratic => "Quadratic time",
            Self::HigherPolynomial => "Higher order polynomial",
        }
    }
}

impl fmt::Display for TimeComplexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.notation(), self.description())
    }
}

/// Qualitative space complexity label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceComplexity {
    Constant,
    Linear,
    QuadraticOrHigher,
}

impl fmt::Display for SpaceComplexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant => write!(f, "O(1)"),
            Self::Linear => write!(f, "O(n)"),
            Self::QuadraticOrHigher => write!(f, "O(n²) or higher"),
        }
    }
}

/// Outcome of one estimation phase
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Estimate<T> {
    Known(T),
    /// Not enough information to decide
    Unknown(String),
    /// The phase failed; the message replaces the result
    Error(String),
}

impl<T> Estimate<T> {
    pub fn known(&self) -> Option<&T> {
        match self {
            Self::Known(value) => Some(value),
            _ => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Estimate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(value) => write!(f, "{}", value),
            Self::Unknown(reason) => write!(f, "Unknown - {}", reason),
            Self::Error(message) => write!(f, "Error - {}", message),
        }
    }
}

/// Heap usage of one profiled call, in megabytes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MemoryProfile {
    /// Heap still held above the baseline after the call
    pub current_mb: f64,
    /// Peak heap above the baseline during the call
    pub peak_mb: f64,
    /// Peak minus current
    pub delta_mb: f64,
}

/// Process CPU usage around one profiled call, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CpuProfile {
    pub start_percent: f64,
    pub end_percent: f64,
    pub delta: f64,
}

/// A profiling phase result, or the error that replaced it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Profile<T> {
    Measured(T),
    Error { error: String },
    /// Nothing to profile (no test cases)
    Empty,
}

impl<T> Profile<T> {
    pub fn measured(&self) -> Option<&T> {
        match self {
            Self::Measured(value) => Some(value),
            _ => None,
        }
    }
}

/// Result of one `PerformanceAnalyzer::analyze` call
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceMetrics {
    pub time_complexity: Estimate<TimeComplexity>,
    pub space_complexity: Estimate<SpaceComplexity>,
    pub memory_metrics: Profile<MemoryProfile>,
    pub cpu_metrics: Profile<CpuProfile>,
    /// (size, seconds) pairs that fed the time estimate
    pub size_timings: Vec<(usize, f64)>,
    pub optimization_suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(TimeComplexity::Linear.to_string(), "O(n) - Linear time");
        assert_eq!(SpaceComplexity::QuadraticOrHigher.to_string(), "O(n²) or higher");
        assert!(TimeComplexity::Quadratic > TimeComplexity::Linear);
    }

    #[test]
    fn test_estimate_display() {
        let known: Estimate<TimeComplexity> = Estimate::Known(TimeComplexity::Constant);
        assert_eq!(known.to_string(), "O(1) - Constant time");
        assert_eq!(known.known(), Some(&TimeComplexity::Constant));

        let unknown: Estimate<TimeComplexity> = Estimate::Unknown("insufficient data".into());
        assert_eq!(unknown.to_string(), "Unknown - insufficient data");
        assert!(unknown.known().is_none());
    }
}
