//! Utility functions

pub mod time;

pub use time::{format_bytes, format_duration, format_milliseconds, format_secs};
