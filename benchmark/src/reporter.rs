// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Output sinks for benchmark results.
//!
//! [`TextReporter`] writes the line-oriented result stream; [`JsonReporter`]
//! saves a whole run to a timestamped JSON file.

use crate::metrics::{BenchmarkReport, BenchmarkResult};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReporterError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Line-oriented result writer.
pub struct TextReporter;

impl TextReporter {
    /// `performing <N> iterations`, then a blank line.
    pub fn header(out: &mut dyn Write, iterations: u64) -> io::Result<()> {
        writeln!(out, "performing {} iterations", iterations)?;
        writeln!(out)
    }

    /// Version (when known) and size lines, written before timing starts.
    pub fn identity(
        out: &mut dyn Write,
        name: &str,
        version: Option<&str>,
        size_bytes: usize,
    ) -> io::Result<()> {
        if let Some(version) = version {
            writeln!(out, "{}: version = {}", name, version)?;
        }
        writeln!(out, "{}: size = {} bytes", name, size_bytes)
    }

    /// Time line closing an adapter's block, then a blank line.
    pub fn timing(out: &mut dyn Write, result: &BenchmarkResult) -> io::Result<()> {
        writeln!(out, "{}: time = {} milliseconds", result.name, result.elapsed_ms())?;
        writeln!(out)
    }
}

/// JSON reporter for benchmark runs.
pub struct JsonReporter {
    /// Output directory for benchmark data
    output_dir: PathBuf,
}

impl JsonReporter {
    /// Create a reporter, creating `output_dir` if needed.
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self, ReporterError> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    /// Save a run to `serialization_<timestamp>.json` and return its path.
    pub fn save(&self, report: &BenchmarkReport) -> Result<PathBuf, ReporterError> {
        let timestamp = report.timestamp.format("%Y-%m-%dT%H-%M-%S%.3fZ");
        let filepath = self
            .output_dir
            .join(format!("serialization_{}.json", timestamp));

        let file = File::create(&filepath)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, report)?;
        writer.flush()?;

        tracing::info!(path = %filepath.display(), "Benchmark report saved");
        Ok(filepath)
    }

    /// Load a saved report.
    pub fn load(path: impl AsRef<Path>) -> Result<BenchmarkReport, ReporterError> {
        let file = File::open(path)?;
        let report = serde_json::from_reader(file)?;
        Ok(report)
    }
}
