// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path configuration.
//!
//! ```text
//! root/                 (paths.root, default "deps")
//!   <platform>/
//!     bin/              output rules
//!     include/          include rules
//!     tmp/              <deps>, removed unless keep_src
//!       build/
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::platform::Platform;
use crate::error::{FsError, Result};

/// Output tree configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Root of all per-platform trees.
    pub root: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("deps"),
        }
    }
}

impl PathsConfig {
    /// Resolves the per-platform layout with absolute paths.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn layout(&self, platform: &Platform) -> Result<DepsLayout> {
        let root = std::path::absolute(&self.root).map_err(|source| FsError::IoError {
            path: self.root.display().to_string(),
            source,
        })?;
        Ok(DepsLayout::new(root.join(platform.tag())))
    }
}

/// Concrete directories of one platform tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepsLayout {
    root: PathBuf,
    bin: PathBuf,
    include: PathBuf,
    tmp: PathBuf,
    tmp_build: PathBuf,
}

impl DepsLayout {
    /// Creates the layout below `root` (`deps/<platform>`).
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        let tmp = root.join("tmp");
        Self {
            bin: root.join("bin"),
            include: root.join("include"),
            tmp_build: tmp.join("build"),
            tmp,
            root,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn bin(&self) -> &Path {
        &self.bin
    }

    #[must_use]
    pub fn include(&self) -> &Path {
        &self.include
    }

    /// The temporary working directory, substituted for `<deps>`.
    #[must_use]
    pub fn tmp(&self) -> &Path {
        &self.tmp
    }

    #[must_use]
    pub fn tmp_build(&self) -> &Path {
        &self.tmp_build
    }
}
