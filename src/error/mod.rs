// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              DepsError (~24 bytes)
//!                     |
//!   +-------+------+------+------+------+------+------+
//!   |       |      |      |      |      |      |      |
//!   v       v      v      v      v      v      v      v
//! Bail   Stage    Net    Cfg   Proc    Fs   Export Io
//! Box<str>  Box    Box    Box   Box    Box    Box   Box
//!
//! Sub-errors (unboxed internally):
//!   Stage   Failed{dep, stage}, CleanupFailed, Interrupted, MissingSources
//!   Network Reqwest, HttpError, Interrupted
//!   Config  MissingKey, InvalidValue, DuplicateDependency
//!   Process ExecutableNotFound, SpawnFailed, NonZeroExit, Timeout
//!   Fs      NotFound, IoError
//!   Export  MissingHeader, NoSymbols, UnsupportedFormat
//!
//! All variants boxed => DepsError fits in 24 bytes.
//! ```
//!
//! Every failure of the pipeline ends up as a [`StageError`] naming the
//! dependency and the stage (`fetch`, `setup[i]`, `build`, `copy`), or
//! the temporary tree for cleanup. `main` is the single reporter that
//! turns any error into exit code 1.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`DepsError`].
pub type DepsResult<T> = std::result::Result<T, DepsError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
/// The boxed error is part of the message, not a `source`, so `{:#}`
/// prints it once.
#[derive(Debug, Error)]
pub enum DepsError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// A pipeline stage failed.
    #[error("stage error: {0}")]
    Stage(Box<StageError>),

    /// Network operation failed.
    #[error("network error: {0}")]
    Network(Box<NetworkError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(Box<ProcessError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(Box<FsError>),

    /// Export table dumping error.
    #[error("export error: {0}")]
    Export(Box<ExportError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

/// Create a fatal [`DepsError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> DepsError {
    DepsError::Bailed(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for DepsError {
                fn from(err: $error) -> Self {
                    DepsError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    StageError => Stage,
    NetworkError => Network,
    ConfigError => Config,
    ProcessError => Process,
    FsError => Fs,
    ExportError => Export,
    std::io::Error => Io,
}

// --- Stage Errors ---

/// Pipeline stage failures.
///
/// `stage` is the display name of the failing stage, e.g. `fetch`,
/// `setup[1]`, `build` or `copy`.
#[derive(Debug, Error)]
pub enum StageError {
    /// A stage of a dependency failed.
    #[error("dependency '{dependency}' failed during {stage}: {message}")]
    Failed {
        dependency: String,
        stage: String,
        message: String,
    },

    /// The run was interrupted (Ctrl+C).
    #[error("interrupted before dependency '{0}'")]
    Interrupted(String),

    /// The temporary tree could not be removed after collection.
    #[error("cleanup of '{path}' failed: {message}")]
    CleanupFailed { path: String, message: String },

    /// `--skip-download` was given but there is no source tree to build from.
    #[error("no sources to build from at '{path}' (run once without --skip-download)")]
    MissingSources { path: String },
}

// --- Network Errors ---

/// Network operation errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Download failed.
    #[error("download failed: {url} - {message}")]
    DownloadFailed { url: String, message: String },

    /// Download was interrupted by user or signal.
    #[error("download interrupted")]
    Interrupted,

    /// HTTP error response.
    #[error("http error {status}: {url}")]
    HttpError { status: u16, url: String },

    /// Error from reqwest library.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Two `[[deps]]` entries share a name.
    #[error("dependency '{0}' is defined more than once")]
    DuplicateDependency(String),

    /// A step of a dependency is malformed.
    #[error("dependency '{dependency}' has an invalid {stage} step: {message}")]
    InvalidStep {
        dependency: String,
        stage: String,
        message: String,
    },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },

    /// Process timed out.
    #[error("process '{command}' timed out after {timeout_secs} seconds")]
    Timeout { command: String, timeout_secs: u64 },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Export Errors ---

/// Export table dumping errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The binary to dump does not exist.
    #[error("file \"{0}\" doesn't exist")]
    MissingBinary(String),

    /// The dump tool output lacks an expected marker line.
    #[error("{tool} output is missing the '{marker}' line")]
    MissingHeader { tool: String, marker: String },

    /// No exported functions were found.
    #[error("no exported functions found in {0}")]
    NoSymbols(String),

    /// The requested format is not known.
    #[error("unsupported export format '{0}' (expected auto, pe or posix)")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests;
