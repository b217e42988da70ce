// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for purpl-deps.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, PathsConfig, Vars, Aliases, [DependencySpec]
//! Vars:    placeholder name → value (<glew_version>)
//! Aliases: alias name → [dependency patterns]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Default log file used by `--debug`.
pub const DEFAULT_LOG_FILE: &str = "deps/setup.log";

/// Global configuration options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log actions instead of performing them.
    pub dry: bool,
    /// Keep the temporary source tree after collection.
    pub keep_src: bool,
    /// Reuse the existing sources instead of fetching them.
    pub skip_download: bool,
    /// Overwrite an existing output tree without asking.
    pub assume_yes: bool,
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to the log file. No file log when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Platform tag override (`<os>-<arch>`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Build parallelism passed as `<jobs>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            keep_src: false,
            skip_download: false,
            assume_yes: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
            platform: None,
            jobs: None,
        }
    }
}

impl GlobalConfig {
    /// Configured parallelism, or the CPU count plus two.
    #[must_use]
    pub fn jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get) + 2
        })
    }
}

/// Dependency aliases mapping alias names to dependency patterns.
pub type Aliases = BTreeMap<String, Vec<String>>;

/// User placeholders substituted as `<name>` in step arguments.
pub type Vars = BTreeMap<String, String>;
