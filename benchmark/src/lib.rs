// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! wirebench benchmark driver
//!
//! Runs each selected adapter from `wirebench-core` through a checked
//! round trip and a timed encode+decode loop, then reports size, version
//! and elapsed time.
//!
//! # Output
//!
//! Results are written line by line to any `io::Write` (stdout for the
//! `wirebench` binary). A run can also be saved as a timestamped JSON file.

pub mod error;
pub mod harness;
pub mod metrics;
pub mod reporter;
pub mod session;

pub use error::{HarnessError, HarnessResult};
pub use harness::{parse_iterations, usage, BenchmarkHarness, Selection};
pub use metrics::{BenchmarkReport, BenchmarkResult, SystemInfo};
pub use reporter::{JsonReporter, ReporterError, TextReporter};
pub use session::Session;
