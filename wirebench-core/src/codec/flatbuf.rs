// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! FlatBuffers tables, written by hand in the shape `flatc` emits for:
//!
//! ```text
//! table Record {
//!   ids: [long];
//!   strings: [string];
//! }
//! root_type Record;
//! ```

use flatbuffers::{
    FlatBufferBuilder, Follow, ForwardsUOffset, InvalidFlatbuffer, Table, VOffsetT, Vector,
    Verifiable, Verifier, WIPOffset,
};

use super::Codec;
use crate::error::CodecResult;
use crate::record::Record;

/// Read-only view over a finished `Record` table.
#[derive(Clone, Copy, Debug)]
pub struct RecordTable<'a> {
    tab: Table<'a>,
}

impl<'a> Follow<'a> for RecordTable<'a> {
    type Inner = RecordTable<'a>;

    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        Self {
            tab: Table::new(buf, loc),
        }
    }
}

impl<'a> RecordTable<'a> {
    pub const VT_IDS: VOffsetT = 4;
    pub const VT_STRINGS: VOffsetT = 6;

    pub fn ids(&self) -> Option<Vector<'a, i64>> {
        // SAFETY: the buffer was checked by `Verifiable::run_verifier` in `root`.
        unsafe {
            self.tab
                .get::<ForwardsUOffset<Vector<'a, i64>>>(Self::VT_IDS, None)
        }
    }

    pub fn strings(&self) -> Option<Vector<'a, ForwardsUOffset<&'a str>>> {
        // SAFETY: as above.
        unsafe {
            self.tab
                .get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<&'a str>>>>(
                    Self::VT_STRINGS,
                    None,
                )
        }
    }

    /// Copy the table out into an owned record. Absent fields read as empty.
    pub fn to_record(&self) -> Record {
        let ids = self
            .ids()
            .map(|v| v.iter().collect())
            .unwrap_or_default();
        let strings = self
            .strings()
            .map(|v| v.iter().map(str::to_owned).collect())
            .unwrap_or_default();
        Record { ids, strings }
    }
}

impl Verifiable for RecordTable<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<Vector<'_, i64>>>("ids", Self::VT_IDS, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<&'_ str>>>>(
                "strings",
                Self::VT_STRINGS,
                false,
            )?
            .finish();
        Ok(())
    }
}

/// FlatBuffers adapter. The builder is reset and reused on every encode.
pub struct FlatbuffersCodec {
    builder: FlatBufferBuilder<'static>,
    offsets: Vec<WIPOffset<&'static str>>,
}

impl FlatbuffersCodec {
    pub fn new() -> Self {
        Self {
            builder: FlatBufferBuilder::with_capacity(1024),
            offsets: Vec::new(),
        }
    }
}

impl Default for FlatbuffersCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for FlatbuffersCodec {
    fn name(&self) -> &'static str {
        "flatbuffers"
    }

    fn version(&self) -> Option<&'static str> {
        option_env!("WIREBENCH_FLATBUFFERS_VERSION")
    }

    fn encode(&mut self, record: &Record, out: &mut Vec<u8>) -> CodecResult<()> {
        self.builder.reset();
        self.offsets.clear();

        for s in &record.strings {
            let offset = self.builder.create_string(s);
            self.offsets.push(offset);
        }
        let strings = self.builder.create_vector(&self.offsets);
        let ids = self.builder.create_vector(&record.ids);

        let start = self.builder.start_table();
        self.builder.push_slot_always(RecordTable::VT_STRINGS, strings);
        self.builder.push_slot_always(RecordTable::VT_IDS, ids);
        let table = self.builder.end_table(start);
        let root: WIPOffset<RecordTable<'static>> = WIPOffset::new(table.value());
        self.builder.finish(root, None);

        out.clear();
        out.extend_from_slice(self.builder.finished_data());
        Ok(())
    }

    fn decode(&mut self, bytes: &[u8]) -> CodecResult<Record> {
        let table = flatbuffers::root::<RecordTable>(bytes)?;
        Ok(table.to_record())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    #[test]
    fn test_round_trip() {
        let mut codec = FlatbuffersCodec::new();
        let record = Record::from_fixture();
        let mut buf = Vec::new();
        codec.encode(&record, &mut buf).unwrap();
        assert_eq!(codec.decode(&buf).unwrap(), record);
    }

    #[test]
    fn test_table_view_reads_in_place() {
        let mut codec = FlatbuffersCodec::new();
        let mut buf = Vec::new();
        codec
            .encode(&Record::new(vec![i64::MIN, 0], vec!["fb".into()]), &mut buf)
            .unwrap();

        let table = flatbuffers::root::<RecordTable>(&buf).unwrap();
        let ids = table.ids().unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids.get(0), i64::MIN);
        assert_eq!(table.strings().unwrap().get(0), "fb");
    }

    #[test]
    fn test_builder_reuse() {
        let mut codec = FlatbuffersCodec::new();
        let mut first = Vec::new();
        let mut second = Vec::new();
        codec.encode(&Record::from_fixture(), &mut first).unwrap();
        codec.encode(&Record::from_fixture(), &mut second).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_garbage_rejected() {
        let mut codec = FlatbuffersCodec::new();
        assert!(matches!(
            codec.decode(&[0xFF; 6]),
            Err(CodecError::Flatbuffers(_))
        ));
    }
}
