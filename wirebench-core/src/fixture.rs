// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Fixed benchmark input.
//!
//! Every adapter encodes the same data. All strings are identical so that
//! the measurement reflects per-element encoding overhead, not content.

/// Number of integers in the fixture.
pub const INTEGERS_COUNT: usize = 1000;

/// The string repeated [`STRINGS_COUNT`] times.
pub const STRING_VALUE: &str =
    "shgfkghsdfjhgsfjhfgjhfgjsffghgsfdhgsfdfkdjhfioukjhkfdljgdfkgvjafdhasgdfwurtjkghfsdjkfg";

/// How many copies of [`STRING_VALUE`] the record carries.
pub const STRINGS_COUNT: usize = 100;

/// Values sitting on varint width boundaries, so formats with variable-length
/// integers pay for every encoded width.
const MAGNITUDES: [i64; 10] = [
    0,
    1,
    127,
    128,
    16_383,
    16_384,
    2_097_151,
    268_435_455,
    34_359_738_367,
    i64::MAX,
];

/// The integer sequence. Each pass over [`MAGNITUDES`] alternates sign;
/// negatives are `-m - 1` so `i64::MAX` maps onto `i64::MIN`.
pub static INTEGERS: [i64; INTEGERS_COUNT] = integers();

const fn integers() -> [i64; INTEGERS_COUNT] {
    let mut out = [0i64; INTEGERS_COUNT];
    let mut i = 0;
    while i < INTEGERS_COUNT {
        let magnitude = MAGNITUDES[i % MAGNITUDES.len()];
        out[i] = if (i / MAGNITUDES.len()) % 2 == 0 {
            magnitude
        } else {
            -magnitude - 1
        };
        i += 1;
    }
    out
}
