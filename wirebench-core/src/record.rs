// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! The canonical benchmark record.

use serde::{Deserialize, Serialize};

use crate::fixture::{INTEGERS, STRINGS_COUNT, STRING_VALUE};

/// Two ordered sequences. Equality is structural and order-sensitive.
///
/// Serde covers the generic formats; the rkyv derive lives here because its
/// archived layout has to be generated from the type definition itself.
/// Every other library binds to this type from inside its adapter module.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    rkyv::Archive,
    rkyv::Serialize,
    rkyv::Deserialize,
)]
pub struct Record {
    pub ids: Vec<i64>,
    pub strings: Vec<String>,
}

impl Record {
    /// Create a record from its two sequences.
    pub fn new(ids: Vec<i64>, strings: Vec<String>) -> Self {
        Self { ids, strings }
    }

    /// Create a record holding `count` copies of `value`.
    pub fn repeated(ids: &[i64], value: &str, count: usize) -> Self {
        Self {
            ids: ids.to_vec(),
            strings: vec![value.to_string(); count],
        }
    }

    /// Build the benchmark record from the fixture.
    pub fn from_fixture() -> Self {
        Self::repeated(&INTEGERS, STRING_VALUE, STRINGS_COUNT)
    }

    /// Payload bytes before any encoding overhead.
    pub fn raw_len(&self) -> usize {
        self.ids.len() * std::mem::size_of::<i64>()
            + self.strings.iter().map(String::len).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::INTEGERS_COUNT;

    #[test]
    fn test_from_fixture_shape() {
        let record = Record::from_fixture();
        assert_eq!(record.ids.len(), INTEGERS_COUNT);
        assert_eq!(record.strings.len(), STRINGS_COUNT);
        assert!(record.strings.iter().all(|s| s == STRING_VALUE));
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let a = Record::new(vec![1, 2], vec!["a".into(), "b".into()]);
        let b = Record::new(vec![2, 1], vec!["a".into(), "b".into()]);
        let c = Record::new(vec![1, 2], vec!["b".into(), "a".into()]);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_raw_len() {
        let record = Record::repeated(&[1, 2, 3], "abcd", 2);
        assert_eq!(record.raw_len(), 3 * 8 + 2 * 4);
    }
}
