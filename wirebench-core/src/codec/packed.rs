// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Message-passing style packing into a caller-sized buffer.
//!
//! Packing is two-phase: [`pack_size`] reports the exact byte count, the
//! caller sizes a buffer, then [`pack`] fills it. Counts are 32-bit signed
//! integers and ids are 64-bit, all in native byte order.
//!
//! ```text
//! i32 ids_count
//! ids_count x i64
//! i32 strings_count
//! strings_count x { i32 byte_len, utf8 bytes }
//! ```

use byteorder::{ByteOrder, NativeEndian};

use super::Codec;
use crate::error::{CodecError, CodecResult};
use crate::record::Record;

const COUNT_SIZE: usize = 4;
const ID_SIZE: usize = 8;

/// Exact number of bytes [`pack`] writes for `record`.
pub fn pack_size(record: &Record) -> usize {
    let ids = COUNT_SIZE + ID_SIZE * record.ids.len();
    let strings: usize = record
        .strings
        .iter()
        .map(|s| COUNT_SIZE + s.len())
        .sum();
    ids + COUNT_SIZE + strings
}

/// Pack `record` into the front of `buf` and return the bytes written.
///
/// Fails before writing anything if `buf` is smaller than [`pack_size`].
pub fn pack(record: &Record, buf: &mut [u8]) -> CodecResult<usize> {
    let required = pack_size(record);
    if buf.len() < required {
        return Err(CodecError::BufferOverflow {
            required,
            available: buf.len(),
        });
    }

    let mut pos = 0;
    put_count(buf, &mut pos, record.ids.len())?;
    let ids_end = pos + ID_SIZE * record.ids.len();
    NativeEndian::write_i64_into(&record.ids, &mut buf[pos..ids_end]);
    pos = ids_end;

    put_count(buf, &mut pos, record.strings.len())?;
    for s in &record.strings {
        put_count(buf, &mut pos, s.len())?;
        buf[pos..pos + s.len()].copy_from_slice(s.as_bytes());
        pos += s.len();
    }

    Ok(pos)
}

/// Unpack a record written by [`pack`].
pub fn unpack(buf: &[u8]) -> CodecResult<Record> {
    let mut pos = 0;

    let ids_count = take_count(buf, &mut pos)?;
    let ids_len = ids_count * ID_SIZE;
    ensure(buf, pos, ids_len)?;
    let mut ids = vec![0i64; ids_count];
    NativeEndian::read_i64_into(&buf[pos..pos + ids_len], &mut ids);
    pos += ids_len;

    let strings_count = take_count(buf, &mut pos)?;
    // Each string needs at least its length field.
    ensure(buf, pos, strings_count * COUNT_SIZE)?;
    let mut strings = Vec::with_capacity(strings_count);
    for _ in 0..strings_count {
        let len = take_count(buf, &mut pos)?;
        ensure(buf, pos, len)?;
        let s = std::str::from_utf8(&buf[pos..pos + len]).map_err(|e| CodecError::Malformed {
            reason: format!("string is not utf-8: {}", e),
        })?;
        strings.push(s.to_owned());
        pos += len;
    }

    Ok(Record { ids, strings })
}

fn put_count(buf: &mut [u8], pos: &mut usize, count: usize) -> CodecResult<()> {
    let value = i32::try_from(count).map_err(|_| CodecError::CountOverflow { count, width: 32 })?;
    NativeEndian::write_i32(&mut buf[*pos..*pos + COUNT_SIZE], value);
    *pos += COUNT_SIZE;
    Ok(())
}

fn take_count(buf: &[u8], pos: &mut usize) -> CodecResult<usize> {
    ensure(buf, *pos, COUNT_SIZE)?;
    let value = NativeEndian::read_i32(&buf[*pos..*pos + COUNT_SIZE]);
    *pos += COUNT_SIZE;
    usize::try_from(value).map_err(|_| CodecError::Malformed {
        reason: format!("negative count {}", value),
    })
}

fn ensure(buf: &[u8], pos: usize, needed: usize) -> CodecResult<()> {
    let remaining = buf.len().saturating_sub(pos);
    if remaining < needed {
        return Err(CodecError::Truncated { needed, remaining });
    }
    Ok(())
}

/// Two-phase pack adapter.
#[derive(Debug, Default)]
pub struct PackedCodec;

impl PackedCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Codec for PackedCodec {
    fn name(&self) -> &'static str {
        "mpi-pack"
    }

    fn version(&self) -> Option<&'static str> {
        option_env!("WIREBENCH_BYTEORDER_VERSION")
    }

    fn encode(&mut self, record: &Record, out: &mut Vec<u8>) -> CodecResult<()> {
        out.resize(pack_size(record), 0);
        let written = pack(record, out)?;
        out.truncate(written);
        Ok(())
    }

    fn decode(&mut self, bytes: &[u8]) -> CodecResult<Record> {
        unpack(bytes)
    }
}
