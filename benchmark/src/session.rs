// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Scoped owner of once-per-process setup.
//!
//! A [`Session`] builds the adapter registry and the report sink when it is
//! opened and logs teardown when dropped, whichever way the run ends.

use std::io::Write;
use std::path::PathBuf;

use wirebench_core::{HarnessConfig, Registry};

use crate::error::HarnessResult;
use crate::harness::{BenchmarkHarness, Selection};
use crate::metrics::{BenchmarkReport, BenchmarkResult};
use crate::reporter::{JsonReporter, TextReporter};

pub struct Session {
    registry: Registry,
    reporter: Option<JsonReporter>,
    completed: usize,
}

impl Session {
    /// Build every adapter and, if configured, the JSON report directory.
    pub fn open(config: &HarnessConfig) -> HarnessResult<Self> {
        let registry = Registry::with_defaults(config.codec_options())?;
        Self::with_registry(config, registry)
    }

    /// Open a session over a caller-built registry.
    pub fn with_registry(config: &HarnessConfig, registry: Registry) -> HarnessResult<Self> {
        let reporter = config
            .report_dir
            .as_ref()
            .map(JsonReporter::new)
            .transpose()?;

        tracing::debug!(
            adapters = registry.len(),
            report_dir = ?config.report_dir,
            "Session opened"
        );

        Ok(Self {
            registry,
            reporter,
            completed: 0,
        })
    }

    /// Run every selected adapter in registration order.
    ///
    /// Stops at the first failure; blocks already written stay written and
    /// no JSON report is saved. Returns the results and, when a report
    /// directory is configured, the saved report's path.
    pub fn run(
        &mut self,
        selection: &Selection,
        iterations: u64,
        out: &mut dyn Write,
    ) -> HarnessResult<(Vec<BenchmarkResult>, Option<PathBuf>)> {
        TextReporter::header(out, iterations)?;

        let harness = BenchmarkHarness::new(iterations);
        let mut results = Vec::new();

        for codec in self.registry.iter_mut() {
            if !selection.contains(codec.name()) {
                tracing::trace!(adapter = codec.name(), "Skipped by filter");
                continue;
            }
            let result = harness.run(codec, out)?;
            out.flush()?;
            self.completed += 1;
            results.push(result);
        }

        let saved = match &self.reporter {
            Some(reporter) => {
                let mut report = BenchmarkReport::new(iterations);
                for result in &results {
                    report.add_result(result.clone());
                }
                Some(reporter.save(&report)?)
            }
            None => None,
        };

        Ok((results, saved))
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        tracing::debug!(completed = self.completed, "Session closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HarnessError;
    use tempfile::TempDir;
    use wirebench_core::codec::{BincodeCodec, CborCodec, PostcardCodec};
    use wirebench_core::{Codec, CodecResult, Record};

    /// Returns an empty record from every decode.
    struct Forgetful;

    impl Codec for Forgetful {
        fn name(&self) -> &'static str {
            "forgetful"
        }

        fn encode(&mut self, _record: &Record, out: &mut Vec<u8>) -> CodecResult<()> {
            out.clear();
            out.push(0);
            Ok(())
        }

        fn decode(&mut self, _bytes: &[u8]) -> CodecResult<Record> {
            Ok(Record::default())
        }
    }

    fn registry_with_broken_middle() -> Registry {
        let mut registry = Registry::empty();
        registry.register(Box::new(BincodeCodec));
        registry.register(Box::new(Forgetful));
        registry.register(Box::new(CborCodec));
        registry
    }

    #[test]
    fn test_runs_in_registration_order() {
        let mut registry = Registry::empty();
        registry.register(Box::new(CborCodec));
        registry.register(Box::new(PostcardCodec));
        let mut session = Session::with_registry(&HarnessConfig::default(), registry).unwrap();

        let mut out = Vec::new();
        let selection = Selection::from_names(["postcard", "cbor"]);
        let (results, saved) = session.run(&selection, 1, &mut out).unwrap();

        let names: Vec<_> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["cbor", "postcard"]);
        assert!(saved.is_none());

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("performing 1 iterations\n\n"));
        let cbor = text.find("cbor: size").unwrap();
        let postcard = text.find("postcard: size").unwrap();
        assert!(cbor < postcard);
    }

    #[test]
    fn test_mismatch_stops_run() {
        let mut session =
            Session::with_registry(&HarnessConfig::default(), registry_with_broken_middle())
                .unwrap();

        let mut out = Vec::new();
        let err = session.run(&Selection::all(), 2, &mut out).unwrap_err();
        assert!(matches!(
            err,
            HarnessError::RoundTripMismatch { ref adapter } if adapter == "forgetful"
        ));

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("bincode: time = "));
        assert!(!text.contains("forgetful:"));
        assert!(!text.contains("cbor:"));
    }

    #[test]
    fn test_filter_skips_broken_adapter() {
        let mut session =
            Session::with_registry(&HarnessConfig::default(), registry_with_broken_middle())
                .unwrap();
        let mut out = Vec::new();
        let (results, _) = session
            .run(&Selection::from_names(["cbor"]), 1, &mut out)
            .unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_unknown_names_run_nothing() {
        let mut session = Session::open(&HarnessConfig::default()).unwrap();
        let mut out = Vec::new();
        let (results, _) = session
            .run(&Selection::from_names(["nonexistent-name"]), 100, &mut out)
            .unwrap();
        assert!(results.is_empty());
        assert_eq!(String::from_utf8(out).unwrap(), "performing 100 iterations\n\n");
    }

    #[test]
    fn test_report_written_on_success() {
        let temp_dir = TempDir::new().unwrap();
        let config = HarnessConfig {
            report_dir: Some(temp_dir.path().join("reports")),
            ..HarnessConfig::default()
        };
        let mut session = Session::open(&config).unwrap();

        let mut out = Vec::new();
        let selection = Selection::from_names(["protobuf", "mpi-pack"]);
        let (results, saved) = session.run(&selection, 0, &mut out).unwrap();

        let path = saved.unwrap();
        let report = JsonReporter::load(&path).unwrap();
        assert_eq!(report.iterations, 0);
        assert_eq!(report.results, results);
    }

    #[test]
    fn test_no_report_on_failure() {
        let temp_dir = TempDir::new().unwrap();
        let config = HarnessConfig {
            report_dir: Some(temp_dir.path().to_path_buf()),
            ..HarnessConfig::default()
        };
        let mut session = Session::with_registry(&config, registry_with_broken_middle()).unwrap();

        let mut out = Vec::new();
        assert!(session.run(&Selection::all(), 1, &mut out).is_err());
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }
}
