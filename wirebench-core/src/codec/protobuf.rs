// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Protocol Buffers via prost.
//!
//! `Record` implements `prost::Message` directly, field for field what
//! prost-build emits for:
//!
//! ```proto
//! syntax = "proto3";
//! message Record {
//!     repeated int64  ids     = 1;
//!     repeated string strings = 2;
//! }
//! ```

use prost::bytes::{Buf, BufMut};
use prost::encoding::{self, DecodeContext, WireType};
use prost::{DecodeError, Message};

use super::Codec;
use crate::error::CodecResult;
use crate::record::Record;

const IDS_TAG: u32 = 1;
const STRINGS_TAG: u32 = 2;

impl Message for Record {
    fn encode_raw<B>(&self, buf: &mut B)
    where
        B: BufMut,
    {
        encoding::int64::encode_packed(IDS_TAG, &self.ids, buf);
        encoding::string::encode_repeated(STRINGS_TAG, &self.strings, buf);
    }

    fn merge_field<B>(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut B,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError>
    where
        B: Buf,
    {
        match tag {
            IDS_TAG => encoding::int64::merge_repeated(wire_type, &mut self.ids, buf, ctx).map_err(
                |mut error| {
                    error.push("Record", "ids");
                    error
                },
            ),
            STRINGS_TAG => encoding::string::merge_repeated(wire_type, &mut self.strings, buf, ctx)
                .map_err(|mut error| {
                    error.push("Record", "strings");
                    error
                }),
            _ => encoding::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        encoding::int64::encoded_len_packed(IDS_TAG, &self.ids)
            + encoding::string::encoded_len_repeated(STRINGS_TAG, &self.strings)
    }

    fn clear(&mut self) {
        self.ids.clear();
        self.strings.clear();
    }
}

/// Protocol Buffers adapter.
#[derive(Debug, Default)]
pub struct ProtobufCodec;

impl ProtobufCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Codec for ProtobufCodec {
    fn name(&self) -> &'static str {
        "protobuf"
    }

    fn version(&self) -> Option<&'static str> {
        option_env!("WIREBENCH_PROST_VERSION")
    }

    fn encode(&mut self, record: &Record, out: &mut Vec<u8>) -> CodecResult<()> {
        out.clear();
        out.reserve(record.encoded_len());
        Message::encode(record, out)?;
        Ok(())
    }

    fn decode(&mut self, bytes: &[u8]) -> CodecResult<Record> {
        Ok(<Record as Message>::decode(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut codec = ProtobufCodec::new();
        let record = Record::from_fixture();
        let mut buf = Vec::new();
        codec.encode(&record, &mut buf).unwrap();
        assert_eq!(codec.decode(&buf).unwrap(), record);
    }

    #[test]
    fn test_encoded_len_matches_output() {
        let record = Record::from_fixture();
        let mut buf = Vec::new();
        ProtobufCodec::new().encode(&record, &mut buf).unwrap();
        assert_eq!(buf.len(), record.encoded_len());
    }

    #[test]
    fn test_empty_record_encodes_to_nothing() {
        let mut buf = vec![0xFF];
        ProtobufCodec::new()
            .encode(&Record::default(), &mut buf)
            .unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_unknown_field_skipped() {
        let record = Record::new(vec![7], vec!["x".into()]);
        let mut buf = Vec::new();
        ProtobufCodec::new().encode(&record, &mut buf).unwrap();
        // field 15, varint, value 1
        buf.extend_from_slice(&[0x78, 0x01]);
        assert_eq!(ProtobufCodec::new().decode(&buf).unwrap(), record);
    }
}
