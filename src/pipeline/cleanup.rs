// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Removal of the temporary source tree.

use tracing::info;

use super::ToolContext;
use crate::config::paths::DepsLayout;
use crate::error::{DepsError, Result, StageError};
use crate::utility::fs::remove::remove_dir_all_forced;

/// Deletes `tmp/`, clearing read-only `.git` files if the first try fails.
///
/// # Errors
///
/// Returns a [`StageError::CleanupFailed`] if the tree cannot be removed.
pub async fn remove_sources(layout: &DepsLayout, ctx: &ToolContext) -> Result<()> {
    let tmp = layout.tmp();
    if ctx.is_dry_run() {
        info!("[dry-run] Would remove {}", tmp.display());
        return Ok(());
    }

    info!(path = %tmp.display(), "Removing sources");
    remove_dir_all_forced(tmp).await.map_err(|e| {
        DepsError::from(StageError::CleanupFailed {
            path: tmp.display().to_string(),
            message: format!("{e:#}"),
        })
    })?;
    Ok(())
}
