// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Serde-driven formats: bincode, MessagePack, postcard and CBOR.
//!
//! All four bind through `Record`'s serde derive, so the adapters only differ
//! in which entry points they call.

use super::Codec;
use crate::error::CodecResult;
use crate::record::Record;

/// bincode (fixed-width integers, u64 length prefixes).
#[derive(Debug, Default)]
pub struct BincodeCodec;

impl Codec for BincodeCodec {
    fn name(&self) -> &'static str {
        "bincode"
    }

    fn version(&self) -> Option<&'static str> {
        option_env!("WIREBENCH_BINCODE_VERSION")
    }

    fn encode(&mut self, record: &Record, out: &mut Vec<u8>) -> CodecResult<()> {
        out.clear();
        bincode::serialize_into(&mut *out, record)?;
        Ok(())
    }

    fn decode(&mut self, bytes: &[u8]) -> CodecResult<Record> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// MessagePack; structs are written as arrays.
#[derive(Debug, Default)]
pub struct MsgpackCodec;

impl Codec for MsgpackCodec {
    fn name(&self) -> &'static str {
        "msgpack"
    }

    fn version(&self) -> Option<&'static str> {
        option_env!("WIREBENCH_RMP_SERDE_VERSION")
    }

    fn encode(&mut self, record: &Record, out: &mut Vec<u8>) -> CodecResult<()> {
        out.clear();
        rmp_serde::encode::write(out, record)?;
        Ok(())
    }

    fn decode(&mut self, bytes: &[u8]) -> CodecResult<Record> {
        Ok(rmp_serde::from_slice(bytes)?)
    }
}

/// postcard (varint integers, no field tags).
#[derive(Debug, Default)]
pub struct PostcardCodec;

impl Codec for PostcardCodec {
    fn name(&self) -> &'static str {
        "postcard"
    }

    fn version(&self) -> Option<&'static str> {
        option_env!("WIREBENCH_POSTCARD_VERSION")
    }

    fn encode(&mut self, record: &Record, out: &mut Vec<u8>) -> CodecResult<()> {
        let mut buf = std::mem::take(out);
        buf.clear();
        *out = postcard::to_extend(record, buf)?;
        Ok(())
    }

    fn decode(&mut self, bytes: &[u8]) -> CodecResult<Record> {
        Ok(postcard::from_bytes(bytes)?)
    }
}

/// CBOR (RFC 8949), structs as string-keyed maps.
#[derive(Debug, Default)]
pub struct CborCodec;

impl Codec for CborCodec {
    fn name(&self) -> &'static str {
        "cbor"
    }

    fn version(&self) -> Option<&'static str> {
        option_env!("WIREBENCH_SERDE_CBOR_VERSION")
    }

    fn encode(&mut self, record: &Record, out: &mut Vec<u8>) -> CodecResult<()> {
        out.clear();
        serde_cbor::to_writer(&mut *out, record)?;
        Ok(())
    }

    fn decode(&mut self, bytes: &[u8]) -> CodecResult<Record> {
        Ok(serde_cbor::from_slice(bytes)?)
    }
}
