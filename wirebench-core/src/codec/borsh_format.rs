// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Borsh: deterministic little-endian binary archives.

use std::io::{Read, Write};

use borsh::{BorshDeserialize, BorshSerialize};

use super::Codec;
use crate::error::{CodecError, CodecResult};
use crate::record::Record;

impl BorshSerialize for Record {
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        BorshSerialize::serialize(&self.ids, writer)?;
        BorshSerialize::serialize(&self.strings, writer)
    }
}

impl BorshDeserialize for Record {
    fn deserialize_reader<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        Ok(Self {
            ids: Vec::deserialize_reader(reader)?,
            strings: Vec::deserialize_reader(reader)?,
        })
    }
}

/// Borsh adapter.
#[derive(Debug, Default)]
pub struct BorshCodec;

impl Codec for BorshCodec {
    fn name(&self) -> &'static str {
        "borsh"
    }

    fn version(&self) -> Option<&'static str> {
        option_env!("WIREBENCH_BORSH_VERSION")
    }

    fn encode(&mut self, record: &Record, out: &mut Vec<u8>) -> CodecResult<()> {
        out.clear();
        BorshSerialize::serialize(record, out).map_err(CodecError::Borsh)
    }

    fn decode(&mut self, bytes: &[u8]) -> CodecResult<Record> {
        borsh::from_slice::<Record>(bytes).map_err(CodecError::Borsh)
    }
}
