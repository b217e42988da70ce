// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! encoding
//!   Encoding, decode_line()  child output to UTF-8
//! fs
//!   walk:    parallel_walk(), find_vcs_files(), WalkOptions
//!   copy:    copy_dir_contents_async(), copy_file_async()
//!   remove:  remove_dir_all_forced()
//!   write:   write_atomic()
//! prompt
//!   confirm()  [y/N] on the terminal, --yes skips it
//! ```

pub mod encoding;
pub mod fs;
pub mod prompt;
