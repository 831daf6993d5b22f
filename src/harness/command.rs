//! Interactive command parsing

/// One line typed at the interactive prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    /// Show the loaded cases without running them
    List,
    /// Run the given 1-based case
    Test(usize),
    /// Run every case
    Run,
    Benchmark,
    Analyze,
    Quit,
    /// Blank line
    Empty,
    /// Anything else: solution input
    Input(String),
}

impl Command {
    /// Parse a line; the only error is a malformed `test N`
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let mut words = line.split_whitespace();

        let Some(first) = words.next() else {
            return Ok(Self::Empty);
        };
        let second = words.next();
        if words.next().is_some() {
            return Ok(Self::Input(line.to_string()));
        }

        let keyword = first.to_ascii_lowercase();
        let command = match (keyword.as_str(), second) {
            ("help" | "h" | "?", None) => Self::Help,
            ("test" | "tests" | "t", None) => Self::List,
            ("test" | "t", Some(n)) => match n.parse::<usize>() {
                Ok(n) if n > 0 => Self::Test(n),
                _ => return Err(format!("Invalid test number: {}", n)),
            },
            ("run" | "r", None) => Self::Run,
            ("benchmark" | "bench" | "b", None) => Self::Benchmark,
            ("analyze" | "analysis" | "a", None) => Self::Analyze,
            ("quit" | "exit" | "q", None) => Self::Quit,
            _ => Self::Input(line.to_string()),
        };

        Ok(command)
    }
}
