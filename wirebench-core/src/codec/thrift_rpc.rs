// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Thrift binary and compact protocols.
//!
//! The struct I/O below is what the Thrift compiler would generate for:
//!
//! ```thrift
//! struct Record {
//!     1: required list<i64>    ids,
//!     2: required list<string> strings,
//! }
//! ```

use thrift::protocol::{
    verify_required_field_exists, TBinaryInputProtocol, TBinaryOutputProtocol,
    TCompactInputProtocol, TCompactOutputProtocol, TFieldIdentifier, TInputProtocol,
    TListIdentifier, TOutputProtocol, TStructIdentifier, TType,
};
use thrift::{ProtocolError, ProtocolErrorKind};

use super::Codec;
use crate::error::CodecResult;
use crate::record::Record;

/// Which Thrift protocol frames the struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThriftProtocol {
    Binary,
    Compact,
}

/// Thrift adapter over an in-memory transport.
pub struct ThriftCodec {
    protocol: ThriftProtocol,
}

impl ThriftCodec {
    pub fn new(protocol: ThriftProtocol) -> Self {
        Self { protocol }
    }
}

impl Codec for ThriftCodec {
    fn name(&self) -> &'static str {
        match self.protocol {
            ThriftProtocol::Binary => "thrift-binary",
            ThriftProtocol::Compact => "thrift-compact",
        }
    }

    fn version(&self) -> Option<&'static str> {
        option_env!("WIREBENCH_THRIFT_VERSION")
    }

    fn encode(&mut self, record: &Record, out: &mut Vec<u8>) -> CodecResult<()> {
        out.clear();
        match self.protocol {
            ThriftProtocol::Binary => {
                let mut o_prot = TBinaryOutputProtocol::new(out, true);
                write_record(record, &mut o_prot)?;
            }
            ThriftProtocol::Compact => {
                let mut o_prot = TCompactOutputProtocol::new(out);
                write_record(record, &mut o_prot)?;
            }
        }
        Ok(())
    }

    fn decode(&mut self, bytes: &[u8]) -> CodecResult<Record> {
        let record = match self.protocol {
            ThriftProtocol::Binary => {
                let mut i_prot = TBinaryInputProtocol::new(bytes, true);
                read_record(&mut i_prot)?
            }
            ThriftProtocol::Compact => {
                let mut i_prot = TCompactInputProtocol::new(bytes);
                read_record(&mut i_prot)?
            }
        };
        Ok(record)
    }
}

fn list_size(len: usize) -> thrift::Result<i32> {
    i32::try_from(len).map_err(|_| {
        thrift::Error::Protocol(ProtocolError::new(
            ProtocolErrorKind::SizeLimit,
            format!("list of {} elements exceeds i32::MAX", len),
        ))
    })
}

fn list_len(size: i32) -> thrift::Result<usize> {
    usize::try_from(size).map_err(|_| {
        thrift::Error::Protocol(ProtocolError::new(
            ProtocolErrorKind::NegativeSize,
            format!("negative list size {}", size),
        ))
    })
}

fn write_record(record: &Record, o_prot: &mut dyn TOutputProtocol) -> thrift::Result<()> {
    o_prot.write_struct_begin(&TStructIdentifier::new("Record"))?;

    o_prot.write_field_begin(&TFieldIdentifier::new("ids", TType::List, 1))?;
    o_prot.write_list_begin(&TListIdentifier::new(
        TType::I64,
        list_size(record.ids.len())?,
    ))?;
    for id in &record.ids {
        o_prot.write_i64(*id)?;
    }
    o_prot.write_list_end()?;
    o_prot.write_field_end()?;

    o_prot.write_field_begin(&TFieldIdentifier::new("strings", TType::List, 2))?;
    o_prot.write_list_begin(&TListIdentifier::new(
        TType::String,
        list_size(record.strings.len())?,
    ))?;
    for s in &record.strings {
        o_prot.write_string(s)?;
    }
    o_prot.write_list_end()?;
    o_prot.write_field_end()?;

    o_prot.write_field_stop()?;
    o_prot.write_struct_end()?;
    o_prot.flush()
}

fn read_record(i_prot: &mut dyn TInputProtocol) -> thrift::Result<Record> {
    i_prot.read_struct_begin()?;
    let mut ids: Option<Vec<i64>> = None;
    let mut strings: Option<Vec<String>> = None;

    loop {
        let field_ident = i_prot.read_field_begin()?;
        if field_ident.field_type == TType::Stop {
            break;
        }
        match field_ident.id {
            Some(1) => {
                let list_ident = i_prot.read_list_begin()?;
                let len = list_len(list_ident.size)?;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(i_prot.read_i64()?);
                }
                i_prot.read_list_end()?;
                ids = Some(values);
            }
            Some(2) => {
                let list_ident = i_prot.read_list_begin()?;
                let len = list_len(list_ident.size)?;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(i_prot.read_string()?);
                }
                i_prot.read_list_end()?;
                strings = Some(values);
            }
            _ => {
                i_prot.skip(field_ident.field_type)?;
            }
        }
        i_prot.read_field_end()?;
    }
    i_prot.read_struct_end()?;

    verify_required_field_exists("Record.ids", &ids)?;
    verify_required_field_exists("Record.strings", &strings)?;

    Ok(Record {
        ids: ids.unwrap_or_default(),
        strings: strings.unwrap_or_default(),
    })
}
