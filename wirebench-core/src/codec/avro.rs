// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Apache Avro binary datums.
//!
//! The schema is parsed once, when the adapter is constructed. Datums carry
//! no schema or header; the writer schema is reused to read them back.

use apache_avro::{from_avro_datum, from_value, to_avro_datum, to_value, Schema};

use super::Codec;
use crate::error::CodecResult;
use crate::record::Record;

const RECORD_SCHEMA: &str = r#"
{
    "type": "record",
    "name": "Record",
    "fields": [
        {"name": "ids", "type": {"type": "array", "items": "long"}},
        {"name": "strings", "type": {"type": "array", "items": "string"}}
    ]
}
"#;

/// Avro adapter.
pub struct AvroCodec {
    schema: Schema,
}

impl AvroCodec {
    /// Parse the record schema.
    pub fn new() -> CodecResult<Self> {
        let schema = Schema::parse_str(RECORD_SCHEMA)?;
        Ok(Self { schema })
    }
}

impl Codec for AvroCodec {
    fn name(&self) -> &'static str {
        "avro"
    }

    fn version(&self) -> Option<&'static str> {
        option_env!("WIREBENCH_APACHE_AVRO_VERSION")
    }

    fn encode(&mut self, record: &Record, out: &mut Vec<u8>) -> CodecResult<()> {
        let value = to_value(record)?;
        let datum = to_avro_datum(&self.schema, value)?;
        out.clear();
        out.extend_from_slice(&datum);
        Ok(())
    }

    fn decode(&mut self, bytes: &[u8]) -> CodecResult<Record> {
        let mut reader = bytes;
        let value = from_avro_datum(&self.schema, &mut reader, None)?;
        Ok(from_value::<Record>(&value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut codec = AvroCodec::new().unwrap();
        let record = Record::from_fixture();
        let mut buf = Vec::new();
        codec.encode(&record, &mut buf).unwrap();
        assert_eq!(codec.decode(&buf).unwrap(), record);
    }

    #[test]
    fn test_empty_arrays_are_two_zero_blocks() {
        let mut codec = AvroCodec::new().unwrap();
        let mut buf = Vec::new();
        codec.encode(&Record::default(), &mut buf).unwrap();
        assert_eq!(buf, vec![0, 0]);
    }
}
