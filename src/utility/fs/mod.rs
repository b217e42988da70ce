// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities with parallel traversal and async copy.
//!
//! ```text
//! walk:   parallel_walk()           ignore::WalkParallel (multi-core)
//!         find_vcs_files()          files below .git directories
//! copy:   copy_dir_contents_async() recursive directory copy
//!         copy_files_with_extensions_async()  top-level headers
//!         copy_file_async()         single file, symlink aware
//! remove: remove_dir_all_forced()   retry after clearing .git read-only
//! write:  write_atomic()            tempfile + persist
//! ```

pub mod copy;
pub mod remove;
pub mod walk;
pub mod write;

#[cfg(test)]
mod tests;
