// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! rkyv zero-copy archives.
//!
//! The archived form is read in place after validation; decoding to an owned
//! `Record` is only needed to satisfy the round-trip check.

use rkyv::rancor::Error as RancorError;
use rkyv::util::AlignedVec;

use super::Codec;
use crate::error::CodecResult;
use crate::record::{ArchivedRecord, Record};

/// rkyv adapter.
pub struct RkyvCodec {
    /// Archives must be read from aligned memory; incoming bytes are copied
    /// here first.
    aligned: AlignedVec,
}

impl RkyvCodec {
    pub fn new() -> Self {
        Self {
            aligned: AlignedVec::new(),
        }
    }

    /// Validate `bytes` and return the archived view without deserializing.
    pub fn access<'a>(&'a mut self, bytes: &[u8]) -> CodecResult<&'a ArchivedRecord> {
        self.aligned.clear();
        self.aligned.extend_from_slice(bytes);
        Ok(rkyv::access::<ArchivedRecord, RancorError>(&self.aligned)?)
    }
}

impl Default for RkyvCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for RkyvCodec {
    fn name(&self) -> &'static str {
        "rkyv"
    }

    fn version(&self) -> Option<&'static str> {
        option_env!("WIREBENCH_RKYV_VERSION")
    }

    fn encode(&mut self, record: &Record, out: &mut Vec<u8>) -> CodecResult<()> {
        let bytes = rkyv::to_bytes::<RancorError>(record)?;
        out.clear();
        out.extend_from_slice(&bytes);
        Ok(())
    }

    fn decode(&mut self, bytes: &[u8]) -> CodecResult<Record> {
        let archived = self.access(bytes)?;
        Ok(rkyv::deserialize::<Record, RancorError>(archived)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut codec = RkyvCodec::new();
        let record = Record::from_fixture();
        let mut buf = Vec::new();
        codec.encode(&record, &mut buf).unwrap();
        assert_eq!(codec.decode(&buf).unwrap(), record);
    }

    #[test]
    fn test_access_reads_in_place() {
        let mut codec = RkyvCodec::new();
        let record = Record::new(vec![-5, 9], vec!["hello".into()]);
        let mut buf = Vec::new();
        codec.encode(&record, &mut buf).unwrap();

        let archived = codec.access(&buf).unwrap();
        assert_eq!(archived.ids.len(), 2);
        assert_eq!(archived.ids[0].to_native(), -5);
        assert_eq!(archived.strings[0].as_str(), "hello");
    }

    #[test]
    fn test_garbage_rejected() {
        let mut codec = RkyvCodec::new();
        assert!(codec.decode(&[0xFF; 3]).is_err());
    }
}
