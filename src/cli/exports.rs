// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Exports command arguments.

use std::path::PathBuf;

use clap::Args;

/// Arguments for the `exports` command.
#[derive(Debug, Clone, Args)]
pub struct ExportsArgs {
    /// Shared library to read the export table of.
    #[arg(value_name = "BINARY")]
    pub binary: PathBuf,

    /// C source file to write.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Export table dialect: 'pe' (dumpbin), 'posix' (nm) or 'auto' for the host's.
    #[arg(long, value_name = "FORMAT", default_value = "auto")]
    pub format: String,
}
