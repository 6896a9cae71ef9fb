// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Wire-format adapters.
//!
//! One [`Codec`] per library binding. Library-specific schema and typing
//! live inside each adapter module; the harness only sees [`Record`].
//!
//! # Adapters
//!
//! | name             | library        |
//! |------------------|----------------|
//! | `thrift-binary`  | thrift         |
//! | `thrift-compact` | thrift         |
//! | `protobuf`       | prost          |
//! | `rkyv`           | rkyv           |
//! | `bincode`        | bincode        |
//! | `msgpack`        | rmp-serde      |
//! | `postcard`       | postcard       |
//! | `avro`           | apache-avro    |
//! | `borsh`          | borsh          |
//! | `zero-copy`      | bytes          |
//! | `mpi-pack`       | byteorder      |
//! | `cbor`           | serde_cbor     |
//! | `flatbuffers`    | flatbuffers    |

mod avro;
mod borsh_format;
mod flatbuf;
mod packed;
mod protobuf;
mod rkyv_format;
mod serde_formats;
mod thrift_rpc;
mod zero_copy;

pub use avro::AvroCodec;
pub use borsh_format::BorshCodec;
pub use flatbuf::FlatbuffersCodec;
pub use packed::{pack, pack_size, unpack, PackedCodec};
pub use protobuf::ProtobufCodec;
pub use rkyv_format::RkyvCodec;
pub use serde_formats::{BincodeCodec, CborCodec, MsgpackCodec, PostcardCodec};
pub use thrift_rpc::{ThriftCodec, ThriftProtocol};
pub use zero_copy::ZeroCopyCodec;

use crate::config::DEFAULT_ZERO_COPY_THRESHOLD;
use crate::error::CodecResult;
use crate::record::Record;

/// Registered adapter names, in run order.
pub const NAMES: [&str; 13] = [
    "thrift-binary",
    "thrift-compact",
    "protobuf",
    "rkyv",
    "bincode",
    "msgpack",
    "postcard",
    "avro",
    "borsh",
    "zero-copy",
    "mpi-pack",
    "cbor",
    "flatbuffers",
];

/// A wire-format binding for the canonical record.
///
/// Adapters may keep scratch buffers between calls; `decode` is only
/// guaranteed to accept the output of this same instance's last `encode`.
pub trait Codec {
    /// Registered identifier used for filtering and output.
    fn name(&self) -> &'static str;

    /// Version of the underlying library, when known.
    fn version(&self) -> Option<&'static str> {
        None
    }

    /// Encode `record`, replacing the contents of `out`.
    fn encode(&mut self, record: &Record, out: &mut Vec<u8>) -> CodecResult<()>;

    /// Decode a record from bytes produced by [`Codec::encode`].
    fn decode(&mut self, bytes: &[u8]) -> CodecResult<Record>;

    /// Bytes of the last encoding that travelled outside `out`.
    fn out_of_band_len(&self) -> usize {
        0
    }
}

/// Construction options shared by the adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    pub zero_copy_threshold: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            zero_copy_threshold: DEFAULT_ZERO_COPY_THRESHOLD,
        }
    }
}

/// Adapters in fixed registration order.
pub struct Registry {
    codecs: Vec<Box<dyn Codec>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn empty() -> Self {
        Self { codecs: Vec::new() }
    }

    /// Build every built-in adapter, in [`NAMES`] order.
    ///
    /// Fails if a library's one-time setup (e.g. schema parsing) fails.
    pub fn with_defaults(options: CodecOptions) -> CodecResult<Self> {
        let mut registry = Self::empty();
        registry.register(Box::new(ThriftCodec::new(ThriftProtocol::Binary)));
        registry.register(Box::new(ThriftCodec::new(ThriftProtocol::Compact)));
        registry.register(Box::new(ProtobufCodec::new()));
        registry.register(Box::new(RkyvCodec::new()));
        registry.register(Box::new(BincodeCodec));
        registry.register(Box::new(MsgpackCodec));
        registry.register(Box::new(PostcardCodec));
        registry.register(Box::new(AvroCodec::new()?));
        registry.register(Box::new(BorshCodec));
        registry.register(Box::new(ZeroCopyCodec::new(options.zero_copy_threshold)));
        registry.register(Box::new(PackedCodec::new()));
        registry.register(Box::new(CborCodec));
        registry.register(Box::new(FlatbuffersCodec::new()));

        tracing::debug!(adapters = registry.len(), "Adapter registry built");
        Ok(registry)
    }

    /// Append an adapter; it runs after every adapter registered before it.
    pub fn register(&mut self, codec: Box<dyn Codec>) {
        self.codecs.push(codec);
    }

    /// Names in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.codecs.iter().map(|c| c.name()).collect()
    }

    /// Look up an adapter by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn Codec + 'static)> {
        self.codecs
            .iter_mut()
            .find(|c| c.name() == name)
            .map(|c| c.as_mut())
    }

    /// Iterate adapters in registration order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut (dyn Codec + 'static)> {
        self.codecs.iter_mut().map(|c| c.as_mut())
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}
