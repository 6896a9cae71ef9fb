// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Exposes resolved versions of the wire-format crates as compile-time
//! environment variables (`WIREBENCH_<CRATE>_VERSION`), read back with
//! `option_env!` by each adapter.

use std::path::PathBuf;

#[path = "build/lockfile.rs"]
mod lockfile;

use lockfile::Lockfile;

/// Lockfile package names whose versions are reported.
const TRACKED: &[&str] = &[
    "thrift",
    "prost",
    "rkyv",
    "bincode",
    "rmp-serde",
    "postcard",
    "apache-avro",
    "borsh",
    "serde_cbor",
    "flatbuffers",
    "bytes",
    "byteorder",
];

fn main() {
    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap_or_default());
    let lockfile = manifest_dir.join("..").join("Cargo.lock");
    println!("cargo:rerun-if-changed={}", lockfile.display());
    println!("cargo:rerun-if-changed=build/lockfile.rs");

    // No lockfile (e.g. packaged build): adapters report no version.
    let Ok(content) = std::fs::read_to_string(&lockfile) else {
        return;
    };

    let lock = match Lockfile::parse(&content) {
        Ok(lock) => lock,
        Err(e) => {
            println!("cargo:warning=Cargo.lock not readable, versions omitted: {}", e);
            return;
        }
    };

    let root = std::env::var("CARGO_PKG_NAME").unwrap_or_else(|_| "wirebench-core".to_string());
    for (package, version) in lock.direct_dependencies(&root) {
        if TRACKED.contains(&package.as_str()) {
            let key = package.replace('-', "_").to_uppercase();
            println!("cargo:rustc-env=WIREBENCH_{}_VERSION={}", key, version);
        }
    }
}
