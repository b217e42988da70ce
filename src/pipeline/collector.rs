// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Artifact collection into `include/` and `bin/`.
//!
//! ```text
//! include rule  dir/*.h, dir/*.inl      --> include/
//!               dir/<sub>/ (unless one_level) --> include/<sub>/
//! output rule   from --> bin/<to>
//!               from ends in a digit: dereference symlink
//!               otherwise:            keep symlink
//! missing source: optional --> warn, skip
//!                 required --> StageError::Failed { stage: "copy" }
//! ```

use std::path::Path;

use anyhow::Context;
use tracing::{debug, info, warn};

use super::runner::stage_failed;
use super::templater::Templater;
use super::{COPY_STAGE, ToolContext};
use crate::config::manifest::{DependencySpec, IncludeRule, OutputRule, matches_platform};
use crate::config::paths::DepsLayout;
use crate::error::{FsError, Result};
use crate::utility::fs::copy::{
    copy_dir_contents_async, copy_file_async, copy_files_with_extensions_async,
};

/// File extensions treated as headers.
pub const HEADER_EXTENSIONS: &[&str] = &["h", "inl"];

/// Copies the include and output rules of dependencies into the tree.
pub struct ArtifactCollector<'a> {
    templater: &'a Templater,
    layout: &'a DepsLayout,
    platform_tag: &'a str,
}

impl<'a> ArtifactCollector<'a> {
    #[must_use]
    pub const fn new(
        templater: &'a Templater,
        layout: &'a DepsLayout,
        platform_tag: &'a str,
    ) -> Self {
        Self {
            templater,
            layout,
            platform_tag,
        }
    }

    /// Applies every rule of `dep` that matches the platform.
    ///
    /// # Errors
    ///
    /// Returns a `copy` [`StageError::Failed`](crate::error::StageError)
    /// for a missing required source or a failed copy.
    pub async fn collect(&self, dep: &DependencySpec, ctx: &ToolContext) -> Result<()> {
        for rule in dep
            .include
            .iter()
            .filter(|rule| matches_platform(&rule.platforms, self.platform_tag))
        {
            self.collect_include(rule, ctx)
                .await
                .map_err(|e| stage_failed(&dep.name, COPY_STAGE, &e))?;
        }

        for rule in dep
            .output
            .iter()
            .filter(|rule| matches_platform(&rule.platforms, self.platform_tag))
        {
            self.collect_output(rule, ctx)
                .await
                .map_err(|e| stage_failed(&dep.name, COPY_STAGE, &e))?;
        }

        Ok(())
    }

    async fn collect_include(&self, rule: &IncludeRule, ctx: &ToolContext) -> Result<()> {
        let dir = self.templater.render_path(&rule.dir);
        let dest = self.layout.include();

        if ctx.is_dry_run() {
            info!(
                "[dry-run] Would copy headers from {} to {}",
                dir.display(),
                dest.display()
            );
            return Ok(());
        }

        if !dir.is_dir() {
            return missing(&dir, rule.optional);
        }

        let headers = copy_files_with_extensions_async(&dir, dest, HEADER_EXTENSIONS).await?;
        debug!(dir = %dir.display(), count = headers, "copied headers");

        if !rule.one_level {
            let mut entries = tokio::fs::read_dir(&dir)
                .await
                .with_context(|| format!("failed to read directory {}", dir.display()))?;
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                if path.is_dir() {
                    copy_dir_contents_async(&path, &dest.join(entry.file_name())).await?;
                }
            }
        }
        Ok(())
    }

    async fn collect_output(&self, rule: &OutputRule, ctx: &ToolContext) -> Result<()> {
        let from = self.templater.render_path(&rule.from);
        let to = self.layout.bin().join(self.templater.render(&rule.to));
        let follow = rule.follows_symlinks();

        if ctx.is_dry_run() {
            info!(
                "[dry-run] Would copy {} to {}",
                from.display(),
                to.display()
            );
            return Ok(());
        }

        // a dangling link still exists when it is copied as a link
        let exists = if follow {
            from.exists()
        } else {
            from.symlink_metadata().is_ok()
        };
        if !exists {
            return missing(&from, rule.optional);
        }

        copy_file_async(&from, &to, follow).await
    }
}

fn missing(path: &Path, optional: bool) -> Result<()> {
    if optional {
        warn!(path = %path.display(), "Optional artifact not found, skipping");
        Ok(())
    } else {
        Err(FsError::NotFound(path.display().to_string()).into())
    }
}
