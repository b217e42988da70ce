// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::Write as _;
use std::path::Path;

use anyhow::Context;

use crate::error::Result;

/// Writes `contents` to `path` through a temporary file in the same directory.
///
/// Readers never observe a partially written file.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created, written or
/// renamed over `path`.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory {}", dir.display()))?;

    let mut temp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
    temp.write_all(contents)
        .and_then(|()| temp.flush())
        .with_context(|| format!("failed to write {}", temp.path().display()))?;
    temp.persist(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
