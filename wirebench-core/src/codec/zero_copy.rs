// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Chunked archive with out-of-band arrays.
//!
//! Saving a sequence is two phases: the element count goes into the main
//! stream, then the raw array. Raw arrays at or above the threshold are not
//! copied into the stream; they become chunks and the stream only carries a
//! descriptor (chunk index). Loading mirrors this exactly.
//!
//! Stream layout (little-endian):
//!
//! ```text
//! u64 ids_count
//! array(ids as native-endian i64 bytes)
//! u64 strings_count
//! strings_count x { u64 byte_len, array(utf8 bytes) }
//!
//! array := 0x00 raw bytes            (inline)
//!        | 0x01 u32 chunk_index      (out-of-band)
//! ```
//!
//! The chunk table belongs to the adapter instance and is rebuilt on every
//! encode, so a decode only accepts the stream from this instance's last
//! encode.

use byteorder::{ByteOrder, NativeEndian};
use bytes::{Buf, BufMut, Bytes};

use super::Codec;
use crate::error::{CodecError, CodecResult};
use crate::record::Record;

const TAG_INLINE: u8 = 0;
const TAG_CHUNK: u8 = 1;

const I64_SIZE: usize = std::mem::size_of::<i64>();

/// Zero-copy archive adapter.
pub struct ZeroCopyCodec {
    threshold: usize,
    chunks: Vec<Bytes>,
}

impl ZeroCopyCodec {
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            chunks: Vec::new(),
        }
    }

    /// Chunks produced by the last encode.
    pub fn chunks(&self) -> &[Bytes] {
        &self.chunks
    }

    fn push_chunk(&mut self, out: &mut Vec<u8>, chunk: Bytes) -> CodecResult<()> {
        let index = u32::try_from(self.chunks.len()).map_err(|_| CodecError::CountOverflow {
            count: self.chunks.len(),
            width: 32,
        })?;
        self.chunks.push(chunk);
        out.put_u8(TAG_CHUNK);
        out.put_u32_le(index);
        Ok(())
    }

    fn save_ids(&mut self, out: &mut Vec<u8>, ids: &[i64]) -> CodecResult<()> {
        let len = ids.len() * I64_SIZE;
        if len >= self.threshold {
            let mut raw = vec![0u8; len];
            NativeEndian::write_i64_into(ids, &mut raw);
            return self.push_chunk(out, Bytes::from(raw));
        }
        out.put_u8(TAG_INLINE);
        let start = out.len();
        out.resize(start + len, 0);
        NativeEndian::write_i64_into(ids, &mut out[start..]);
        Ok(())
    }

    fn save_bytes(&mut self, out: &mut Vec<u8>, raw: &[u8]) -> CodecResult<()> {
        if raw.len() >= self.threshold {
            return self.push_chunk(out, Bytes::copy_from_slice(raw));
        }
        out.put_u8(TAG_INLINE);
        out.put_slice(raw);
        Ok(())
    }

    fn load_array<'o, 's: 'o, 'b: 'o>(
        &'s self,
        stream: &mut &'b [u8],
        len: usize,
    ) -> CodecResult<&'o [u8]> {
        match take_u8(stream)? {
            TAG_INLINE => {
                let current: &'b [u8] = *stream;
                ensure_remaining(current, len)?;
                let (head, tail) = current.split_at(len);
                *stream = tail;
                Ok(head)
            }
            TAG_CHUNK => {
                let index = take_u32(stream)? as usize;
                let chunk = self.chunks.get(index).ok_or_else(|| CodecError::Malformed {
                    reason: format!("chunk {} not in table of {}", index, self.chunks.len()),
                })?;
                if chunk.len() != len {
                    return Err(CodecError::Malformed {
                        reason: format!(
                            "chunk {} holds {} bytes, expected {}",
                            index,
                            chunk.len(),
                            len
                        ),
                    });
                }
                Ok(chunk)
            }
            tag => Err(CodecError::Malformed {
                reason: format!("unknown array tag {:#04x}", tag),
            }),
        }
    }
}

impl Codec for ZeroCopyCodec {
    fn name(&self) -> &'static str {
        "zero-copy"
    }

    fn version(&self) -> Option<&'static str> {
        option_env!("WIREBENCH_BYTES_VERSION")
    }

    fn encode(&mut self, record: &Record, out: &mut Vec<u8>) -> CodecResult<()> {
        out.clear();
        self.chunks.clear();

        out.put_u64_le(record.ids.len() as u64);
        self.save_ids(out, &record.ids)?;

        out.put_u64_le(record.strings.len() as u64);
        for s in &record.strings {
            out.put_u64_le(s.len() as u64);
            self.save_bytes(out, s.as_bytes())?;
        }

        Ok(())
    }

    fn decode(&mut self, bytes: &[u8]) -> CodecResult<Record> {
        let mut stream = bytes;

        let ids_count = take_len(&mut stream)?;
        let ids_len = ids_count
            .checked_mul(I64_SIZE)
            .ok_or_else(|| CodecError::Malformed {
                reason: format!("ids count {} overflows", ids_count),
            })?;
        let raw = self.load_array(&mut stream, ids_len)?;
        let mut ids = vec![0i64; ids_count];
        NativeEndian::read_i64_into(raw, &mut ids);

        let strings_count = take_len(&mut stream)?;
        // Every string costs at least its length prefix and tag.
        ensure_remaining(&stream, strings_count.saturating_mul(9))?;
        let mut strings = Vec::with_capacity(strings_count);
        for _ in 0..strings_count {
            let len = take_len(&mut stream)?;
            let raw = self.load_array(&mut stream, len)?;
            let s = std::str::from_utf8(raw).map_err(|e| CodecError::Malformed {
                reason: format!("string is not utf-8: {}", e),
            })?;
            strings.push(s.to_owned());
        }

        if stream.has_remaining() {
            return Err(CodecError::Malformed {
                reason: format!("{} trailing bytes", stream.remaining()),
            });
        }

        Ok(Record { ids, strings })
    }

    fn out_of_band_len(&self) -> usize {
        self.chunks.iter().map(Bytes::len).sum()
    }
}

fn ensure_remaining(stream: &[u8], needed: usize) -> CodecResult<()> {
    if stream.remaining() < needed {
        return Err(CodecError::Truncated {
            needed,
            remaining: stream.remaining(),
        });
    }
    Ok(())
}

fn take_u8(stream: &mut &[u8]) -> CodecResult<u8> {
    ensure_remaining(stream, 1)?;
    Ok(stream.get_u8())
}

fn take_u32(stream: &mut &[u8]) -> CodecResult<u32> {
    ensure_remaining(stream, 4)?;
    Ok(stream.get_u32_le())
}

fn take_len(stream: &mut &[u8]) -> CodecResult<usize> {
    ensure_remaining(stream, 8)?;
    let len = stream.get_u64_le();
    usize::try_from(len).map_err(|_| CodecError::Malformed {
        reason: format!("length {} exceeds address space", len),
    })
}
