// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! wirebench core library
//!
//! Canonical benchmark record, the fixed fixture it is built from, and one
//! adapter per wire-format library. Each adapter keeps its library-specific
//! types private; callers only see [`Record`] and the [`Codec`] trait.

pub mod codec;
pub mod config;
pub mod error;
pub mod fixture;
pub mod record;

#[cfg(test)]
#[path = "../build/lockfile.rs"]
mod lockfile;

// Re-export commonly used types
pub use codec::{Codec, CodecOptions, Registry};
pub use config::{ConfigLoader, HarnessConfig};
pub use error::{CodecError, CodecResult, ConfigError};
pub use record::Record;
