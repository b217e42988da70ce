// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Directory removal that copes with read-only VCS metadata.
//!
//! ```text
//! remove_dir_all_forced(path)
//!        |
//!   remove_dir_all --ok--> done
//!        | err
//!        v
//!   find_vcs_files() --> clear read-only on each
//!        |
//!   remove_dir_all (once more) --err--> FsError::IoError
//! ```

use std::path::Path;

use tokio::fs;
use tracing::{debug, warn};

use super::walk::find_vcs_files;
use crate::error::{FsError, Result};

/// Removes a directory tree, retrying once after making `.git` contents
/// writable. Missing directories are not an error.
///
/// # Errors
///
/// Returns a [`FsError::IoError`] if the second attempt fails too.
pub async fn remove_dir_all_forced(path: &Path) -> Result<()> {
    let first = match fs::remove_dir_all(path).await {
        Ok(()) => return Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => e,
    };
    debug!(path = %path.display(), error = %first, "removal failed, clearing read-only VCS files");

    let owned = path.to_path_buf();
    let cleared = tokio::task::spawn_blocking(move || clear_vcs_readonly(&owned)).await??;
    debug!(count = cleared, "cleared read-only attributes");

    fs::remove_dir_all(path)
        .await
        .map_err(|source| FsError::IoError {
            path: path.display().to_string(),
            source,
        })?;
    Ok(())
}

/// Makes every file below a `.git` directory writable. Returns the count.
///
/// # Errors
///
/// Returns an error if the directory cannot be walked.
pub fn clear_vcs_readonly(root: &Path) -> Result<usize> {
    let mut cleared = 0;
    for file in find_vcs_files(root)? {
        match make_writable(&file) {
            Ok(true) => cleared += 1,
            Ok(false) => {}
            Err(e) => warn!(path = %file.display(), error = %e, "cannot clear read-only"),
        }
    }
    Ok(cleared)
}

#[cfg_attr(not(unix), allow(clippy::permissions_set_readonly_false))]
fn make_writable(path: &Path) -> std::io::Result<bool> {
    let meta = std::fs::symlink_metadata(path)?;
    if meta.file_type().is_symlink() || !meta.permissions().readonly() {
        return Ok(false);
    }

    let mut perms = meta.permissions();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        perms.set_mode(perms.mode() | 0o200);
    }
    #[cfg(not(unix))]
    perms.set_readonly(false);
    std::fs::set_permissions(path, perms)?;
    Ok(true)
}
