//! Time and size formatting for reports

use std::time::Duration;

use crate::constants::BYTES_PER_MB;

/// Format a duration with a unit that keeps a few significant digits
pub fn format_duration(duration: Duration) -> String {
    let micros = duration.as_micros();

    if micros < 1_000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.3}ms", micros as f64 / 1_000.0)
    } else {
        format_milliseconds(duration.as_millis() as i64)
    }
}

/// Format fractional seconds the way timings are printed (`0.250000s`)
pub fn format_secs(secs: f64) -> String {
    format!("{:.6}s", secs)
}

/// Format milliseconds as a human-readable string
pub fn format_milliseconds(ms: i64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let seconds = ms / 1000;
        let minutes = seconds / 60;
        let remaining_seconds = seconds % 60;
        format!("{}m {}s", minutes, remaining_seconds)
    }
}

/// Format a byte count (possibly negative) in megabytes
pub fn format_bytes(bytes: i64) -> String {
    format!("{:.2}MB", bytes as f64 / BYTES_PER_MB)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_micros(42)), "42µs");
        assert_eq!(format_duration(Duration::from_micros(1_500)), "1.500ms");
        assert_eq!(format_duration(Duration::from_millis(2_500)), "2.50s");
        assert_eq!(format_duration(Duration::from_secs(65)), "1m 5s");
    }

    #[test]
    fn test_format_milliseconds() {
        assert_eq!(format_milliseconds(500), "500ms");
        assert_eq!(format_milliseconds(1500), "1.50s");
        assert_eq!(format_milliseconds(65000), "1m 5s");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(1024 * 1024), "1.00MB");
        assert_eq!(format_bytes(-512 * 1024), "-0.50MB");
        assert_eq!(format_secs(0.25), "0.250000s");
    }
}
