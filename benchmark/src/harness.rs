// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Round-trip driver.
//!
//! For one adapter: encode the fixture, decode it back, require equality,
//! report size and version, then time N encode+decode iterations.

use std::io::Write;
use std::time::{Duration, Instant};

use wirebench_core::codec::NAMES;
use wirebench_core::{Codec, Record};

use crate::error::{HarnessError, HarnessResult};
use crate::metrics::BenchmarkResult;
use crate::reporter::TextReporter;

/// Times the encode+decode loop for one adapter at a time.
pub struct BenchmarkHarness {
    /// Number of timed round trips
    iterations: u64,
    record: Record,
}

impl BenchmarkHarness {
    /// Create a harness over the fixture record.
    pub fn new(iterations: u64) -> Self {
        Self::with_record(iterations, Record::from_fixture())
    }

    /// Create a harness over an arbitrary record.
    pub fn with_record(iterations: u64, record: Record) -> Self {
        Self { iterations, record }
    }

    /// Run one adapter's block.
    ///
    /// The version and size lines are written before timing starts, so they
    /// stay in the output even if the loop fails. A round-trip mismatch
    /// is returned as [`HarnessError::RoundTripMismatch`]; adapter errors
    /// pass through unchanged.
    pub fn run(
        &self,
        codec: &mut dyn Codec,
        out: &mut dyn Write,
    ) -> HarnessResult<BenchmarkResult> {
        let name = codec.name();
        let mut serialized = Vec::new();

        codec.encode(&self.record, &mut serialized)?;
        let size_bytes = serialized.len() + codec.out_of_band_len();
        let decoded = codec.decode(&serialized)?;

        if decoded != self.record {
            tracing::error!(adapter = name, "Decoded record differs from the input");
            return Err(HarnessError::RoundTripMismatch {
                adapter: name.to_string(),
            });
        }

        TextReporter::identity(out, name, codec.version(), size_bytes)?;

        let elapsed = self.time_loop(codec, &mut serialized)?;
        let result = BenchmarkResult::new(
            name,
            codec.version(),
            size_bytes,
            self.iterations,
            elapsed,
        );

        tracing::debug!(
            adapter = name,
            iterations = self.iterations,
            size_bytes,
            elapsed_ms = result.elapsed_ms(),
            "Adapter finished"
        );
        TextReporter::timing(out, &result)?;
        Ok(result)
    }

    fn time_loop(&self, codec: &mut dyn Codec, buf: &mut Vec<u8>) -> HarnessResult<Duration> {
        let timer = Timer::start();
        for _ in 0..self.iterations {
            codec.encode(&self.record, buf)?;
            std::hint::black_box(codec.decode(buf)?);
        }
        Ok(timer.elapsed())
    }
}

/// Timer for measuring individual operations.
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Stop the timer and return elapsed duration.
    pub fn elapsed(self) -> Duration {
        self.start.elapsed()
    }
}

/// Allow-list of adapter names. Empty means every adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    names: Vec<String>,
}

impl Selection {
    /// Select every adapter.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Unknown names never match, so they are ignored without error.
    pub fn contains(&self, name: &str) -> bool {
        self.names.is_empty() || self.names.iter().any(|n| n == name)
    }
}

/// Parse the iteration count argument.
pub fn parse_iterations(value: &str) -> HarnessResult<u64> {
    value
        .parse::<u64>()
        .map_err(|e| HarnessError::ArgumentParse {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Usage text listing every adapter in run order.
pub fn usage() -> String {
    let mut text = String::from(
        "usage: wirebench [OPTIONS] N [NAME ...]\n\n\
         arguments:\n \
         N     -- number of iterations\n \
         NAME  -- adapters to run (all when omitted)\n\n\
         adapters:\n",
    );
    for name in NAMES {
        text.push_str("  ");
        text.push_str(name);
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use wirebench_core::codec::BincodeCodec;
    use wirebench_core::CodecResult;

    /// Decodes to a record with the first id changed.
    struct Corrupting(BincodeCodec);

    impl Codec for Corrupting {
        fn name(&self) -> &'static str {
            "corrupting"
        }

        fn encode(&mut self, record: &Record, out: &mut Vec<u8>) -> CodecResult<()> {
            self.0.encode(record, out)
        }

        fn decode(&mut self, bytes: &[u8]) -> CodecResult<Record> {
            let mut record = self.0.decode(bytes)?;
            if let Some(first) = record.ids.first_mut() {
                *first = first.wrapping_add(1);
            }
            Ok(record)
        }
    }

    /// Counts decode calls.
    struct Counting {
        inner: BincodeCodec,
        decodes: u64,
    }

    impl Codec for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn encode(&mut self, record: &Record, out: &mut Vec<u8>) -> CodecResult<()> {
            self.inner.encode(record, out)
        }

        fn decode(&mut self, bytes: &[u8]) -> CodecResult<Record> {
            self.decodes += 1;
            self.inner.decode(bytes)
        }
    }

    fn output(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_block_output() {
        let harness = BenchmarkHarness::new(3);
        let mut out = Vec::new();
        let result = harness.run(&mut BincodeCodec, &mut out).unwrap();

        let text = output(out);
        assert!(text.contains(&format!("bincode: size = {} bytes\n", result.size_bytes)));
        assert!(text.contains("bincode: time = "));
        assert!(text.ends_with(" milliseconds\n\n"));
        assert_eq!(result.iterations, 3);
    }

    #[test]
    fn test_zero_iterations_still_checks() {
        let harness = BenchmarkHarness::new(0);
        let mut out = Vec::new();
        let result = harness.run(&mut BincodeCodec, &mut out).unwrap();
        assert_eq!(result.iterations, 0);
        assert!(result.size_bytes > 0);

        let mut out = Vec::new();
        let err = harness
            .run(&mut Corrupting(BincodeCodec), &mut out)
            .unwrap_err();
        assert!(matches!(err, HarnessError::RoundTripMismatch { .. }));
    }

    #[test]
    fn test_mismatch_names_adapter_and_prints_nothing() {
        let harness = BenchmarkHarness::new(10);
        let mut out = Vec::new();
        let err = harness
            .run(&mut Corrupting(BincodeCodec), &mut out)
            .unwrap_err();
        assert_eq!(err.to_string(), "corrupting's case: deserialization failed");
        assert!(out.is_empty());
    }

    #[test]
    fn test_every_iteration_decodes() {
        let harness = BenchmarkHarness::new(25);
        let mut codec = Counting {
            inner: BincodeCodec,
            decodes: 0,
        };
        let mut out = Vec::new();
        harness.run(&mut codec, &mut out).unwrap();
        // One check decode, then one per timed iteration.
        assert_eq!(codec.decodes, 26);
    }

    #[test]
    fn test_empty_record_round_trips() {
        let harness = BenchmarkHarness::with_record(1, Record::default());
        let mut out = Vec::new();
        let result = harness.run(&mut BincodeCodec, &mut out).unwrap();
        assert_eq!(result.size_bytes, 16);
    }

    #[test]
    fn test_selection() {
        let all = Selection::all();
        assert!(all.contains("protobuf"));

        let some = Selection::from_names(["avro", "nonexistent-name"]);
        assert!(some.contains("avro"));
        assert!(!some.contains("protobuf"));
    }

    #[test]
    fn test_parse_iterations() {
        assert_eq!(parse_iterations("0").unwrap(), 0);
        assert_eq!(parse_iterations("1000").unwrap(), 1000);
        assert!(matches!(
            parse_iterations("abc"),
            Err(HarnessError::ArgumentParse { .. })
        ));
        assert!(parse_iterations("-5").is_err());
        assert!(parse_iterations("").is_err());
    }

    #[test]
    fn test_usage_lists_every_adapter() {
        let text = usage();
        assert!(text.contains("N     -- number of iterations"));
        for name in NAMES {
            assert!(text.contains(name), "{} missing from usage", name);
        }
    }

    #[test]
    fn test_timer() {
        let timer = Timer::start();
        std::thread::sleep(Duration::from_millis(5));
        assert!(timer.elapsed() >= Duration::from_millis(5));
    }
}
