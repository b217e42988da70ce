// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --ini FILE          <- additional config files (can repeat)
//! --dry / --dry-run   <- log actions instead of performing them
//! -l N / -v / -q      <- console verbosity (0-6)
//! --silent            <- console off
//! --file-log-level N  <- file verbosity
//! --debug             <- file log at TRACE, deps/setup.log by default
//! --platform TAG      <- global.platform override
//! --set KEY=VAL       <- direct config override
//!
//! Precedence: flags > --set > env > --ini > purpl-deps.toml > builtin
//! ```

use std::path::PathBuf;

use clap::Args;

use crate::config::types::DEFAULT_LOG_FILE;
use crate::logging::LogLevel;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'i', long = "ini", value_name = "FILE", action = clap::ArgAction::Append)]
    pub inis: Vec<PathBuf>,

    /// Logs every filesystem and process action instead of performing it.
    #[arg(long, visible_alias = "dry-run")]
    pub dry: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// Shows debug output on the console, including process output.
    #[arg(short = 'v', long, conflicts_with_all = ["quiet", "silent"])]
    pub verbose: bool,

    /// Only shows warnings and errors on the console.
    #[arg(short = 'q', long, conflicts_with = "silent")]
    pub quiet: bool,

    /// Shows nothing on the console.
    #[arg(long)]
    pub silent: bool,

    /// File log level.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Writes a trace log, to deps/setup.log unless --log-file is given.
    #[arg(long)]
    pub debug: bool,

    /// Overrides the detected platform tag, e.g. 'win-x64' or 'mac-arm64'.
    #[arg(long, value_name = "TAG")]
    pub platform: Option<String>,

    /// Sets an option, such as 'vars/glew_version=2.2.0' or 'paths/root=out'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "OPTION", action = clap::ArgAction::Append)]
    pub options: Vec<String>,

    /// Disables auto loading of purpl-deps.toml, only uses --ini.
    #[arg(long = "no-default-inis")]
    pub no_default_inis: bool,
}

impl GlobalOptions {
    /// Console level selected by -l, -v, -q or --silent, if any.
    #[must_use]
    pub fn console_level(&self) -> Option<u8> {
        if self.silent {
            Some(LogLevel::SILENT.as_u8())
        } else if self.quiet {
            Some(LogLevel::WARN.as_u8())
        } else if self.verbose {
            Some(LogLevel::DEBUG.as_u8())
        } else {
            self.log_level
        }
    }

    /// Converts command-line options to configuration overrides.
    ///
    /// `--set` comes first so the dedicated flags win.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = self.options.clone();

        if let Some(level) = self.console_level() {
            overrides.push(format!("global/output_log_level={level}"));
        }

        let file_level = self
            .file_log_level
            .or_else(|| self.debug.then_some(LogLevel::TRACE.as_u8()));
        if let Some(level) = file_level {
            overrides.push(format!("global/file_log_level={level}"));
        }

        match (&self.log_file, self.debug) {
            (Some(path), _) => overrides.push(format!("global/log_file={}", path.display())),
            (None, true) => overrides.push(format!("global/log_file={DEFAULT_LOG_FILE}")),
            (None, false) => {}
        }

        if self.dry {
            overrides.push("global/dry=true".to_string());
        }

        if let Some(ref platform) = self.platform {
            overrides.push(format!("global/platform={platform}"));
        }

        overrides
    }
}
