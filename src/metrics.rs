//! Process metrics providers for health evaluation.
//!
//! The health handler never reads process state directly; it goes through the
//! `ProcessMetrics` trait so tests can substitute a deterministic provider
//! without mutating real environment variables or memory.

use std::time::Instant;

use sysinfo::{ProcessesToUpdate, System};

/// A single instantaneous memory sample for the running process.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemorySample {
    /// Resident memory used by this process, in bytes
    pub used_bytes: u64,
    /// Total memory available to the process, in bytes
    pub total_bytes: u64,
}

impl MemorySample {
    /// Memory usage as a percentage of the total.
    ///
    /// A zero total is treated as fully used rather than dividing by zero;
    /// it only occurs when the platform reports no memory figures at all.
    pub fn percent_used(&self) -> f64 {
        if self.total_bytes == 0 {
            return 100.0;
        }
        (self.used_bytes as f64 / self.total_bytes as f64) * 100.0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("Failed to resolve current process id: {0}")]
    Pid(String),

    #[error("Current process not found in process table")]
    ProcessNotFound,
}

/// Read-only process state consumed by the health checks.
///
/// All methods sample fresh state on every call; implementations must not
/// cache across invocations.
pub trait ProcessMetrics: Send + Sync {
    /// Current memory usage of the process.
    fn memory(&self) -> Result<MemorySample, MetricsError>;

    /// Seconds since the process started.
    fn uptime_seconds(&self) -> u64;

    /// Look up an environment variable, `None` if unset.
    fn env_var(&self, name: &str) -> Option<String>;
}

/// `ProcessMetrics` backed by the real process.
///
/// Memory figures come from the OS process table (resident set size against
/// total machine memory) as a coarse pressure signal. Uptime is measured from
/// provider construction, which happens once at startup.
pub struct SystemMetrics {
    started_at: Instant,
}

impl SystemMetrics {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }
}

impl Default for SystemMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessMetrics for SystemMetrics {
    fn memory(&self) -> Result<MemorySample, MetricsError> {
        let pid = sysinfo::get_current_pid().map_err(|e| MetricsError::Pid(e.to_string()))?;

        // Fresh System per sample: refreshing only memory and our own process
        // entry is cheap, and keeps the provider free of shared mutable state.
        let mut system = System::new();
        system.refresh_memory();
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

        let process = system.process(pid).ok_or(MetricsError::ProcessNotFound)?;

        Ok(MemorySample {
            used_bytes: process.memory(),
            total_bytes: system.total_memory(),
        })
    }

    fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    fn env_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}
