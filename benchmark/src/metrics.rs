// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Result types for a benchmark run.
//!
//! A [`BenchmarkResult`] is one adapter's block of output; a
//! [`BenchmarkReport`] is the whole run as written to JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use sysinfo::System;

/// Measurements for one adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Registered adapter name
    pub name: String,
    /// Library version, when the adapter reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Encoded size of one fixture record, including out-of-band bytes
    pub size_bytes: usize,
    /// Number of timed encode+decode iterations
    pub iterations: u64,
    /// Wall-clock time for the whole loop in nanoseconds
    pub elapsed_ns: u64,
    /// Mean nanoseconds per round trip (0 when no iterations ran)
    pub ns_per_iteration: f64,
}

impl BenchmarkResult {
    pub fn new(
        name: impl Into<String>,
        version: Option<&str>,
        size_bytes: usize,
        iterations: u64,
        elapsed: Duration,
    ) -> Self {
        let elapsed_ns = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        let ns_per_iteration = if iterations == 0 {
            0.0
        } else {
            elapsed_ns as f64 / iterations as f64
        };
        Self {
            name: name.into(),
            version: version.map(str::to_string),
            size_bytes,
            iterations,
            elapsed_ns,
            ns_per_iteration,
        }
    }

    /// Whole milliseconds, truncated, as printed in the text output.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }
}

/// Host the run was measured on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub os_version: String,
    pub kernel_version: Option<String>,
    pub cpu_model: String,
    pub cpu_cores: usize,
    /// Total system memory in bytes
    pub memory_bytes: u64,
}

impl SystemInfo {
    /// Collect current system information.
    pub fn collect() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu();
        sys.refresh_memory();

        Self {
            os: System::name().unwrap_or_else(|| "Unknown".to_string()),
            os_version: System::os_version().unwrap_or_else(|| "Unknown".to_string()),
            kernel_version: System::kernel_version(),
            cpu_model: sys
                .cpus()
                .first()
                .map(|cpu| cpu.brand().to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            cpu_cores: sys.cpus().len(),
            memory_bytes: sys.total_memory(),
        }
    }
}

/// A complete run, as saved by the JSON reporter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Suite identifier
    pub benchmark_suite: String,
    /// Harness version
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub system_info: SystemInfo,
    /// Iteration count requested on the command line
    pub iterations: u64,
    /// Per-adapter results in run order
    pub results: Vec<BenchmarkResult>,
}

impl BenchmarkReport {
    pub fn new(iterations: u64) -> Self {
        Self {
            benchmark_suite: "wirebench-serialization".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            system_info: SystemInfo::collect(),
            iterations,
            results: Vec::new(),
        }
    }

    pub fn add_result(&mut self, result: BenchmarkResult) {
        self.results.push(result);
    }
}
