// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use anyhow::Context;
use std::path::Path;
use tokio::fs;

/// Recursively copies all contents from src directory to dst directory.
///
/// Creates dst if it doesn't exist. Symlinked entries are copied as the
/// files or directories they point to.
///
/// # Example
/// ```no_run
/// use purpl_deps::utility::fs::copy::copy_dir_contents_async;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// copy_dir_contents_async(Path::new("deps/tmp/sdl2/include/SDL2"), Path::new("deps/include/SDL2")).await?;
/// # Ok(())
/// # }
/// ```
/// # Errors
///
/// Returns an error if any IO operation fails (creating directory, reading, copying).
pub async fn copy_dir_contents_async(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)
        .await
        .with_context(|| format!("failed to create directory {}", dst.display()))?;

    let mut entries = fs::read_dir(src)
        .await
        .with_context(|| format!("failed to read directory {}", src.display()))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("failed to read entry from {}", src.display()))?
    {
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if fs::metadata(&src_path).await.is_ok_and(|m| m.is_dir()) {
            Box::pin(copy_dir_contents_async(&src_path, &dst_path)).await?;
        } else {
            fs::copy(&src_path, &dst_path).await.with_context(|| {
                format!(
                    "failed to copy {} to {}",
                    src_path.display(),
                    dst_path.display()
                )
            })?;
        }
    }

    Ok(())
}

/// Copies the top-level files of src whose extension is in `extensions`.
///
/// Does not recurse. Returns the number of files copied.
///
/// # Errors
///
/// Returns an error if any IO operation fails (creating directory, reading, copying).
pub async fn copy_files_with_extensions_async(
    src: &Path,
    dst: &Path,
    extensions: &[&str],
) -> Result<usize> {
    fs::create_dir_all(dst)
        .await
        .with_context(|| format!("failed to create directory {}", dst.display()))?;

    let mut entries = fs::read_dir(src)
        .await
        .with_context(|| format!("failed to read directory {}", src.display()))?;

    let mut copied = 0;
    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("failed to read entry from {}", src.display()))?
    {
        let src_path = entry.path();
        let matches = src_path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| extensions.contains(&e));
        if !matches || !fs::metadata(&src_path).await.is_ok_and(|m| m.is_file()) {
            continue;
        }

        let dst_path = dst.join(entry.file_name());
        fs::copy(&src_path, &dst_path).await.with_context(|| {
            format!(
                "failed to copy {} to {}",
                src_path.display(),
                dst_path.display()
            )
        })?;
        copied += 1;
    }

    Ok(copied)
}

/// Copies a single file, creating the destination's parent directory.
///
/// With `follow_symlinks` a symlink source is dereferenced and its target's
/// content written. Without it the link itself is recreated at `dst`.
///
/// # Errors
///
/// Returns an error if the source is missing or any IO operation fails.
pub async fn copy_file_async(src: &Path, dst: &Path, follow_symlinks: bool) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let meta = fs::symlink_metadata(src)
        .await
        .with_context(|| format!("failed to stat {}", src.display()))?;

    if !follow_symlinks && meta.file_type().is_symlink() {
        let target = fs::read_link(src)
            .await
            .with_context(|| format!("failed to read link {}", src.display()))?;
        if fs::symlink_metadata(dst).await.is_ok() {
            fs::remove_file(dst)
                .await
                .with_context(|| format!("failed to replace {}", dst.display()))?;
        }
        symlink(&target, dst)
            .await
            .with_context(|| format!("failed to link {} -> {}", dst.display(), target.display()))?;
        return Ok(());
    }

    fs::copy(src, dst).await.with_context(|| {
        format!("failed to copy {} to {}", src.display(), dst.display())
    })?;
    Ok(())
}

#[cfg(unix)]
async fn symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    fs::symlink(target, link).await
}

#[cfg(windows)]
async fn symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    fs::symlink_file(target, link).await
}
