//! Custom error types for wirebench.
//!
//! Every library failure is an explicit variant wrapping that library's own
//! error type. Nothing is stringly typed except the in-repo archive checks.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a wire-format adapter.
///
/// Library errors are carried verbatim; the harness never retries.
#[derive(Debug, Error)]
pub enum CodecError {
    // =========================================================================
    // Third-party library errors
    // =========================================================================
    #[error("thrift error: {0}")]
    Thrift(#[from] thrift::Error),

    #[error("protobuf encode error: {0}")]
    ProtobufEncode(#[from] prost::EncodeError),

    #[error("protobuf decode error: {0}")]
    ProtobufDecode(#[from] prost::DecodeError),

    #[error("rkyv error: {0}")]
    Rkyv(#[from] rkyv::rancor::Error),

    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("msgpack encode error: {0}")]
    MsgpackEncode(#[from] rmp_serde::encode::Error),

    #[error("msgpack decode error: {0}")]
    MsgpackDecode(#[from] rmp_serde::decode::Error),

    #[error("postcard error: {0}")]
    Postcard(#[from] postcard::Error),

    #[error("avro error: {0}")]
    Avro(#[from] apache_avro::Error),

    #[error("borsh error: {0}")]
    Borsh(#[source] std::io::Error),

    #[error("cbor error: {0}")]
    Cbor(#[from] serde_cbor::Error),

    #[error("flatbuffers verification failed: {0}")]
    Flatbuffers(#[from] flatbuffers::InvalidFlatbuffer),

    // =========================================================================
    // In-repo archive errors (zero-copy, manual packing)
    // =========================================================================
    #[error("Buffer overflow: packing needs {required} bytes, buffer holds {available}")]
    BufferOverflow { required: usize, available: usize },

    #[error("Truncated input: needed {needed} more bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("Count {count} does not fit the {width}-bit count field")]
    CountOverflow { count: usize, width: u32 },

    #[error("Malformed input: {reason}")]
    Malformed { reason: String },
}

/// Configuration errors. Any of these prevents the run from starting.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Configuration parse error: {message}")]
    Parse { message: String },

    #[error("Invalid field value: {field} = {value} - {reason}")]
    InvalidFieldValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("IO error: {context} - {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using CodecError.
pub type CodecResult<T> = Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_overflow_display() {
        let err = CodecError::BufferOverflow {
            required: 64,
            available: 16,
        };
        let message = err.to_string();
        assert!(message.contains("64"));
        assert!(message.contains("16"));
    }

    #[test]
    fn test_library_error_chain() {
        let decode_err = prost::DecodeError::new("bad varint");
        let codec_err: CodecError = decode_err.into();
        assert!(matches!(codec_err, CodecError::ProtobufDecode(_)));
    }

    #[test]
    fn test_invalid_field_display() {
        let err = ConfigError::InvalidFieldValue {
            field: "zero_copy_threshold",
            value: "0".to_string(),
            reason: "must be positive".to_string(),
        };
        assert!(err.to_string().contains("zero_copy_threshold"));
    }
}
