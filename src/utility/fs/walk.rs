// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use bon::Builder;
use flume::unbounded;
use ignore::WalkBuilder;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::warn;

/// Options for parallel directory traversal.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Maximum depth to traverse (None = unlimited)
    #[builder(setters(name = with_max_depth))]
    max_depth: Option<usize>,
    /// Include hidden files/directories
    #[builder(setters(name = with_include_hidden), default = false)]
    include_hidden: bool,
    /// Respect .gitignore files
    #[builder(setters(name = with_respect_gitignore), default = true)]
    respect_gitignore: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    #[must_use]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    #[must_use]
    pub const fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    #[must_use]
    pub const fn respect_gitignore(&self) -> bool {
        self.respect_gitignore
    }

    /// Every entry of a source checkout: hidden files included, ignore
    /// files disregarded.
    #[must_use]
    pub fn everything() -> Self {
        Self::builder()
            .with_include_hidden(true)
            .with_respect_gitignore(false)
            .build()
    }
}

/// Result of a parallel walk operation.
#[derive(Debug)]
pub struct WalkResult {
    files: Vec<PathBuf>,
    directories: Vec<PathBuf>,
    error_count: usize,
}

impl WalkResult {
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    #[must_use]
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.error_count
    }
}

fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    if let Some(depth) = options.max_depth() {
        builder.max_depth(Some(depth));
    }

    builder.follow_links(false);
    builder.hidden(!options.include_hidden());

    builder.ignore(options.respect_gitignore());
    builder.parents(options.respect_gitignore());
    builder.git_ignore(options.respect_gitignore());
    builder.git_global(options.respect_gitignore());
    builder.git_exclude(options.respect_gitignore());

    builder
}

/// Performs parallel directory traversal using `ignore::WalkParallel`.
///
/// Results are collected through flume channels. The channels are unbounded
/// because the receivers only drain once the walk has finished.
///
/// # Errors
///
/// Returns an error if the root directory does not exist.
///
/// # Example
/// ```no_run
/// use purpl_deps::utility::fs::walk::{parallel_walk, WalkOptions};
///
/// let result = parallel_walk("deps/linux-x64/tmp", &WalkOptions::everything())?;
/// println!("Found {} files", result.files().len());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn parallel_walk<P: AsRef<Path>>(root: P, options: &WalkOptions) -> Result<WalkResult> {
    let root = root.as_ref();

    if !root.exists() {
        anyhow::bail!("root directory does not exist: {}", root.display());
    }

    let (file_tx, file_rx) = unbounded::<PathBuf>();
    let (dir_tx, dir_rx) = unbounded::<PathBuf>();
    let error_count = Arc::new(AtomicUsize::new(0));

    let parallel = build_walker(root, options).build_parallel();

    parallel.run(|| {
        let file_tx = file_tx.clone();
        let dir_tx = dir_tx.clone();
        let error_count = Arc::clone(&error_count);

        Box::new(move |entry_result| {
            match entry_result {
                Ok(entry) => {
                    let path = entry.path().to_path_buf();
                    if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                        let _ = dir_tx.send(path);
                    } else {
                        let _ = file_tx.send(path);
                    }
                }
                Err(e) => {
                    warn!(error = %e, "walk error");
                    error_count.fetch_add(1, Ordering::Relaxed);
                }
            }
            ignore::WalkState::Continue
        })
    });

    drop(file_tx);
    drop(dir_tx);

    Ok(WalkResult {
        files: file_rx.iter().collect(),
        directories: dir_rx.iter().collect(),
        error_count: error_count.load(Ordering::Relaxed),
    })
}

/// Finds every file (or link) somewhere below a `.git` directory.
///
/// # Errors
///
/// Returns an error if the root directory does not exist.
pub fn find_vcs_files<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    let result = parallel_walk(root, &WalkOptions::everything())?;

    Ok(result
        .files()
        .iter()
        .filter(|path| {
            path.strip_prefix(root).is_ok_and(|rel| {
                rel.components()
                    .any(|c| matches!(c, Component::Normal(name) if name == ".git"))
            })
        })
        .cloned()
        .collect())
}
