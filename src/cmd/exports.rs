// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Exports command implementation for purpl-deps.

use tracing::info;

use crate::cli::exports::ExportsArgs;
use crate::error::{DepsError, Result};
use crate::exports::{ExportFormat, dump_exports};

/// Main handler for exports command.
///
/// # Errors
///
/// Returns an error for an unknown format or a failed dump.
pub async fn run_exports_command(args: &ExportsArgs) -> Result<()> {
    let format: ExportFormat = args.format.parse().map_err(DepsError::from)?;
    let count = dump_exports(&args.binary, &args.output, format).await?;
    info!(
        format = %format,
        count,
        "Wrote {}",
        args.output.display()
    );
    Ok(())
}
