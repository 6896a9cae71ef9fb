// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `Cargo.lock` reader for the build script.
//!
//! Versions are resolved through the root package's own dependency list, so
//! a crate locked at several versions reports the one the root links.

use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Lockfile {
    #[serde(default)]
    package: Vec<Package>,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    version: String,
    #[serde(default)]
    dependencies: Vec<String>,
}

impl Lockfile {
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Locked versions of `root`'s direct dependencies, keyed by name.
    ///
    /// Entries are `name` when only one version is locked, otherwise
    /// `name version` (older lockfiles append a source in parentheses).
    pub fn direct_dependencies(&self, root: &str) -> BTreeMap<String, String> {
        let mut resolved = BTreeMap::new();
        let Some(package) = self.package.iter().find(|p| p.name == root) else {
            return resolved;
        };

        for entry in &package.dependencies {
            let mut parts = entry.split_whitespace();
            let Some(name) = parts.next() else {
                continue;
            };
            let version = match parts.next() {
                Some(version) => Some(version.to_string()),
                None => self.only_version(name),
            };
            if let Some(version) = version {
                resolved.insert(name.to_string(), version);
            }
        }
        resolved
    }

    fn only_version(&self, name: &str) -> Option<String> {
        let mut matches = self.package.iter().filter(|p| p.name == name);
        let first = matches.next()?;
        if matches.next().is_some() {
            return None;
        }
        Some(first.version.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCK: &str = r#"
version = 3

[[package]]
name = "bytes"
version = "1.5.0"

[[package]]
name = "bytes"
version = "1.12.1"

[[package]]
name = "byteorder"
version = "1.5.0"

[[package]]
name = "itoa"
version = "1.0.11"

[[package]]
name = "wirebench-core"
version = "1.0.0"
dependencies = [
 "byteorder",
 "bytes 1.12.1",
 "thrift 0.17.0 (registry+https://github.com/rust-lang/crates.io-index)",
]
"#;

    #[test]
    fn test_duplicate_resolves_to_linked_version() {
        let lock = Lockfile::parse(LOCK).unwrap();
        let deps = lock.direct_dependencies("wirebench-core");
        assert_eq!(deps.get("bytes").map(String::as_str), Some("1.12.1"));
    }

    #[test]
    fn test_single_version_by_name() {
        let lock = Lockfile::parse(LOCK).unwrap();
        let deps = lock.direct_dependencies("wirebench-core");
        assert_eq!(deps.get("byteorder").map(String::as_str), Some("1.5.0"));
    }

    #[test]
    fn test_legacy_source_suffix() {
        let lock = Lockfile::parse(LOCK).unwrap();
        let deps = lock.direct_dependencies("wirebench-core");
        assert_eq!(deps.get("thrift").map(String::as_str), Some("0.17.0"));
    }

    #[test]
    fn test_only_direct_dependencies() {
        let lock = Lockfile::parse(LOCK).unwrap();
        let deps = lock.direct_dependencies("wirebench-core");
        assert!(!deps.contains_key("itoa"));
        assert_eq!(deps.len(), 3);
    }

    #[test]
    fn test_unknown_root() {
        let lock = Lockfile::parse(LOCK).unwrap();
        assert!(lock.direct_dependencies("missing").is_empty());
    }

    #[test]
    fn test_malformed_lockfile() {
        assert!(Lockfile::parse("[[package]]\nname = 3").is_err());
    }
}
