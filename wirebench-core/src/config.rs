// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! YAML configuration parser with strict validation.
//!
//! The configuration is optional; without a file every field takes its
//! default. Any invalid field is reported before a single adapter runs.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::codec::CodecOptions;
use crate::error::ConfigError;

/// Arrays at or above this many bytes go to out-of-band chunks.
pub const DEFAULT_ZERO_COPY_THRESHOLD: usize = 128;

/// Upper bound on the zero-copy threshold (64 MiB).
const MAX_ZERO_COPY_THRESHOLD: usize = 64 * 1024 * 1024;

/// Raw configuration as parsed from YAML (before validation).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawHarnessConfig {
    #[serde(default)]
    report_dir: Option<String>,
    #[serde(default = "default_zero_copy_threshold")]
    zero_copy_threshold: usize,
}

fn default_zero_copy_threshold() -> usize {
    DEFAULT_ZERO_COPY_THRESHOLD
}

/// Validated harness configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Directory for JSON reports. No report is written when unset.
    pub report_dir: Option<PathBuf>,
    pub zero_copy_threshold: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            report_dir: None,
            zero_copy_threshold: DEFAULT_ZERO_COPY_THRESHOLD,
        }
    }
}

impl HarnessConfig {
    /// Adapter construction options derived from this configuration.
    pub fn codec_options(&self) -> CodecOptions {
        CodecOptions {
            zero_copy_threshold: self.zero_copy_threshold,
        }
    }
}

/// Configuration loader with strict validation.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a YAML file.
    pub fn load_file(path: impl AsRef<Path>) -> Result<HarnessConfig, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            context: "reading config file",
            source: e,
        })?;

        Self::load_string(&content)
    }

    /// Load and validate configuration from a YAML string.
    pub fn load_string(content: &str) -> Result<HarnessConfig, ConfigError> {
        let raw: RawHarnessConfig =
            serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
                message: format!("YAML parse error: {}", e),
            })?;

        Self::validate(raw)
    }

    /// Validate raw configuration and convert to validated types.
    fn validate(raw: RawHarnessConfig) -> Result<HarnessConfig, ConfigError> {
        if raw.zero_copy_threshold == 0 || raw.zero_copy_threshold > MAX_ZERO_COPY_THRESHOLD {
            return Err(ConfigError::InvalidFieldValue {
                field: "zero_copy_threshold",
                value: raw.zero_copy_threshold.to_string(),
                reason: format!("Must be between 1 and {} bytes", MAX_ZERO_COPY_THRESHOLD),
            });
        }

        let report_dir = match raw.report_dir {
            Some(dir) if dir.trim().is_empty() => {
                return Err(ConfigError::InvalidFieldValue {
                    field: "report_dir",
                    value: dir,
                    reason: "Report directory cannot be empty".to_string(),
                });
            }
            Some(dir) => Some(PathBuf::from(dir)),
            None => None,
        };

        Ok(HarnessConfig {
            report_dir,
            zero_copy_threshold: raw.zero_copy_threshold,
        })
    }
}
