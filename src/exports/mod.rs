// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Export table dumping.
//!
//! ```text
//! dump_exports(binary, output, format)
//!   pe     dumpbin /exports BINARY --> dumpbin::parse_exports
//!   posix  nm -g BINARY            --> nm::parse_symbols
//!       --> codegen::render (function pointers + init_<lib>_ptrs)
//!       --> write_atomic(output)
//! ```
//!
//! The generated C fragment lets engine code bind a shared library at
//! runtime without an import library.

pub mod codegen;
pub mod dumpbin;
pub mod nm;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::info;

use crate::core::process::builder::ProcessBuilder;
use crate::error::{DepsError, ExportError, Result};
use crate::utility::fs::write::write_atomic;

/// Which export table dialect to read and generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// `dumpbin /exports`, `GetProcAddress`.
    Pe,
    /// `nm -g`, `dlsym`.
    Posix,
}

impl ExportFormat {
    /// The dialect native to the host.
    #[must_use]
    pub const fn host() -> Self {
        if cfg!(windows) { Self::Pe } else { Self::Posix }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pe => "pe",
            Self::Posix => "posix",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::host()),
            "pe" | "dumpbin" => Ok(Self::Pe),
            "posix" | "nm" => Ok(Self::Posix),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns a binary's file name into a C identifier fragment.
///
/// `libSDL2-2.0.so` becomes `libSDL2_2_0_so`.
#[must_use]
pub fn library_ident(binary: &Path) -> String {
    binary
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default()
        .replace(['-', '.'], "_")
}

/// Parses the raw output of the dump tool for `format`.
///
/// # Errors
///
/// Returns [`ExportError::MissingHeader`] for dumpbin output without an
/// export table.
pub fn parse_tool_output(
    format: ExportFormat,
    stdout: &str,
) -> std::result::Result<Vec<String>, ExportError> {
    match format {
        ExportFormat::Pe => dumpbin::parse_exports(stdout),
        ExportFormat::Posix => Ok(nm::parse_symbols(stdout, cfg!(target_os = "macos"))),
    }
}

/// Dumps the exports of `binary` into a C source fragment at `output`.
///
/// Returns the number of functions written.
///
/// # Errors
///
/// Returns an error if the binary is missing, the dump tool cannot be run
/// or fails, its output is malformed, no function is exported, or the
/// output cannot be written.
pub async fn dump_exports(binary: &Path, output: &Path, format: ExportFormat) -> Result<usize> {
    if !binary.is_file() {
        return Err(DepsError::from(ExportError::MissingBinary(
            binary.display().to_string(),
        ))
        .into());
    }

    let process = match format {
        ExportFormat::Pe => ProcessBuilder::which("dumpbin")?
            .arg("/exports")
            .arg(binary),
        ExportFormat::Posix => ProcessBuilder::which("nm")?.arg("-g").arg(binary),
    };
    let dump = process.capture_stdout().run().await?;

    let names = parse_tool_output(format, dump.stdout()).map_err(DepsError::from)?;
    if names.is_empty() {
        return Err(DepsError::from(ExportError::NoSymbols(binary.display().to_string())).into());
    }

    let lib = library_ident(binary);
    let source = codegen::render(format, &lib, &names);
    write_atomic(output, source.as_bytes())?;

    info!(
        binary = %binary.display(),
        output = %output.display(),
        count = names.len(),
        "Include the generated file and call init_{lib}_ptrs() after loading the library"
    );
    Ok(names.len())
}
