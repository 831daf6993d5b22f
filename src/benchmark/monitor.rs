//! Resource monitor
//!
//! Measures wall-clock time and process resident memory around a single
//! call. The measurement is always produced, even when the call returns an
//! error or panics; the fault is handed back to the caller next to it.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::error::{AppError, AppResult};

/// Time and memory observed around one call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub duration: Duration,
    /// Resident memory before the call, in bytes
    pub memory_before: u64,
    /// Resident memory after the call, in bytes
    pub memory_after: u64,
    /// `memory_after - memory_before`; negative when memory was released
    pub memory_delta: i64,
}

/// Process-level resource sampler backed by `sysinfo`
pub struct ResourceMonitor {
    system: Mutex<System>,
    pid: Option<Pid>,
}

impl ResourceMonitor {
    /// Create a monitor for the current process
    pub fn new() -> Self {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                tracing::warn!("Process metrics unavailable: {}", e);
                None
            }
        };

        let monitor = Self {
            system: Mutex::new(System::new()),
            pid,
        };
        // Prime the CPU counters; the first sample is always zero
        monitor.sample(|_| ());
        monitor
    }

    /// Refresh the process entry and read from it
    fn sample<T: Default>(&self, read: impl FnOnce(&sysinfo::Process) -> T) -> T {
        let Some(pid) = self.pid else {
            return T::default();
        };

        match self.system.lock() {
            Ok(mut system) => {
                system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
                system.process(pid).map(read).unwrap_or_default()
            }
            Err(_) => T::default(),
        }
    }

    /// Resident set size of the process in bytes, 0 when unavailable
    pub fn resident_bytes(&self) -> u64 {
        self.sample(|p| p.memory())
    }

    /// Process CPU usage in percent since the previous sample
    pub fn cpu_percent(&self) -> f64 {
        self.sample(|p| f64::from(p.cpu_usage()))
    }

    /// Run `f`, returning its measurement and its outcome
    ///
    /// Panics inside `f` are caught and reported as
    /// [`AppError::SolutionPanicked`].
    pub fn measure<R, F>(&self, f: F) -> (Measurement, AppResult<R>)
    where
        F: FnOnce() -> AppResult<R>,
    {
        let memory_before = self.resident_bytes();
        let start = Instant::now();

        let outcome = panic::catch_unwind(AssertUnwindSafe(f))
            .unwrap_or_else(|payload| Err(AppError::from_panic(payload)));

        let duration = start.elapsed();
        let memory_after = self.resident_bytes();

        let measurement = Measurement {
            duration,
            memory_before,
            memory_after,
            memory_delta: memory_after as i64 - memory_before as i64,
        };

        (measurement, outcome)
    }
}

impl Default for ResourceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ResourceMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceMonitor").field("pid", &self.pid).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_success() {
        let monitor = ResourceMonitor::new();
        let (measurement, outcome) = monitor.measure(|| {
            std::thread::sleep(Duration::from_millis(20));
            Ok(42)
        });

        assert_eq!(outcome.unwrap(), 42);
        assert!(measurement.duration >= Duration::from_millis(20));
        assert_eq!(
            measurement.memory_delta,
            measurement.memory_after as i64 - measurement.memory_before as i64
        );
    }

    #[test]
    fn test_measure_keeps_error() {
        let monitor = ResourceMonitor::new();
        let (_, outcome) =
            monitor.measure::<(), _>(|| Err(AppError::RuntimeError("division by zero".into())));

        assert!(matches!(outcome, Err(AppError::RuntimeError(msg)) if msg == "division by zero"));
    }

    #[test]
    fn test_measure_catches_panic() {
        let monitor = ResourceMonitor::new();
        let (measurement, outcome) = monitor.measure::<i32, _>(|| {
            let v: Vec<i32> = Vec::new();
            Ok(v[3])
        });

        assert!(matches!(outcome, Err(AppError::SolutionPanicked(_))));
        assert!(measurement.duration < Duration::from_secs(5));
    }

    #[test]
    fn test_resident_bytes_is_reported() {
        let monitor = ResourceMonitor::new();
        if monitor.pid.is_some() {
            assert!(monitor.resident_bytes() > 0);
        }
        assert!(monitor.cpu_percent() >= 0.0);
    }
}
