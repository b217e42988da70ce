// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pipeline orchestration.
//!
//! ```text
//! Pipeline::new(config).with_selection(deps)
//!   .run().await
//!       plan      platform, layout, selected dependencies
//!       prepare   deps/<tag> exists? ask --> remove | decline (exit 0)
//!                 skip_download: reuse tmp/, recreate bin/ include/
//!       run       DependencyRunner per dependency, sequential
//!       collect   ArtifactCollector per dependency
//!       cleanup   remove tmp/ unless keep_src
//! ```

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::ToolContext;
use super::cleanup::remove_sources;
use super::collector::ArtifactCollector;
use super::registry::DependencyRegistry;
use super::runner::DependencyRunner;
use super::templater::Templater;
use crate::config::Config;
use crate::config::paths::DepsLayout;
use crate::core::platform::Platform;
use crate::error::{DepsError, Result, StageError};
use crate::utility::fs::remove::remove_dir_all_forced;
use crate::utility::prompt;

/// What the pipeline resolved before touching the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPlan {
    pub platform: Platform,
    pub layout: DepsLayout,
    /// Selected dependency names, in manifest order.
    pub dependencies: Vec<String>,
}

/// How a run ended without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every selected dependency was built and collected.
    Completed { dependencies: Vec<String> },
    /// The user chose to keep the existing output tree.
    Declined,
}

/// Runs the whole pipeline for one invocation.
pub struct Pipeline {
    config: Arc<Config>,

    /// Names, globs or aliases; empty selects every platform dependency.
    selection: Vec<String>,

    cancel_token: CancellationToken,
}

impl Pipeline {
    #[must_use]
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            selection: Vec::new(),
            cancel_token: CancellationToken::new(),
        }
    }

    /// Restricts the run to the given names, globs or aliases.
    #[must_use]
    pub fn with_selection(mut self, selection: Vec<String>) -> Self {
        self.selection = selection;
        self
    }

    /// Returns the cancellation token for sharing with signal handlers.
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Signals the running step to stop.
    pub fn interrupt(&self) {
        info!("Interrupting pipeline");
        self.cancel_token.cancel();
    }

    /// Resolves the platform, the output layout and the selection.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed platform tag, an unresolvable
    /// output root or a selection that matches nothing.
    pub fn plan(&self) -> Result<BuildPlan> {
        let platform = self.config.platform()?;
        let layout = self.config.paths.layout(&platform)?;

        let mut registry = DependencyRegistry::new(self.config.aliases.clone());
        registry.register_all(
            self.config
                .dependencies_for(&platform)
                .map(|dep| dep.name.clone()),
        );
        let dependencies = registry.resolve(&self.selection)?;

        Ok(BuildPlan {
            platform,
            layout,
            dependencies,
        })
    }

    /// Runs the pipeline, asking on the terminal before overwriting.
    ///
    /// # Errors
    ///
    /// See [`run_with`](Self::run_with).
    pub async fn run(&self) -> Result<RunOutcome> {
        let assume_yes = self.config.global.assume_yes;
        self.run_with(|question| prompt::confirm(question, assume_yes))
            .await
    }

    /// Runs the pipeline with a custom overwrite confirmation.
    ///
    /// # Errors
    ///
    /// Returns the first [`StageError`] of any dependency, a
    /// [`StageError::MissingSources`] when `skip_download` has nothing to
    /// build from, or an error from planning or confirmation.
    pub async fn run_with<F>(&self, confirm: F) -> Result<RunOutcome>
    where
        F: FnOnce(&str) -> Result<bool>,
    {
        let plan = self.plan()?;
        let global = &self.config.global;
        let ctx = ToolContext::new(
            Arc::clone(&self.config),
            self.cancel_token.clone(),
            global.dry,
        );

        if plan.dependencies.is_empty() {
            warn!(platform = %plan.platform, "No dependencies to build");
            return Ok(RunOutcome::Completed {
                dependencies: Vec::new(),
            });
        }

        info!(
            platform = %plan.platform,
            dependencies = ?plan.dependencies,
            "Starting dependency build"
        );

        if !self.prepare(&plan.layout, &ctx, confirm).await? {
            info!(path = %plan.layout.root().display(), "Keeping existing output tree");
            return Ok(RunOutcome::Declined);
        }

        let tag = plan.platform.tag();
        let templater = Templater::new(
            plan.layout.tmp(),
            &plan.platform,
            global.jobs(),
            &self.config.vars,
        );
        let deps: Vec<_> = plan
            .dependencies
            .iter()
            .filter_map(|name| self.config.dependency(name))
            .collect();

        let runner =
            DependencyRunner::new(&templater, &tag).with_skip_download(global.skip_download);
        for (i, dep) in deps.iter().enumerate() {
            if ctx.is_cancelled() {
                return Err(DepsError::from(StageError::Interrupted(dep.name.clone())).into());
            }
            info!(
                dependency = %dep.name,
                index = i + 1,
                total = deps.len(),
                "Building dependency"
            );
            runner.run(dep, &ctx).await?;
        }

        let collector = ArtifactCollector::new(&templater, &plan.layout, &tag);
        for dep in &deps {
            collector.collect(dep, &ctx).await?;
        }

        if global.keep_src {
            info!(path = %plan.layout.tmp().display(), "Keeping sources");
        } else {
            remove_sources(&plan.layout, &ctx).await?;
        }

        info!(count = deps.len(), "All dependencies built");
        Ok(RunOutcome::Completed {
            dependencies: plan.dependencies,
        })
    }

    /// Readies the output tree. Returns `false` if the user declined.
    async fn prepare<F>(&self, layout: &DepsLayout, ctx: &ToolContext, confirm: F) -> Result<bool>
    where
        F: FnOnce(&str) -> Result<bool>,
    {
        let root = layout.root();

        if self.config.global.skip_download {
            if !layout.tmp().is_dir() {
                return Err(DepsError::from(StageError::MissingSources {
                    path: layout.tmp().display().to_string(),
                })
                .into());
            }
            for dir in [layout.bin(), layout.include()] {
                remove_tree(dir, ctx).await?;
            }
        } else if root.exists() {
            if ctx.is_dry_run() {
                info!("[dry-run] Would ask to overwrite {}", root.display());
            } else if !confirm(&format!("{} already exists, overwrite?", root.display()))? {
                return Ok(false);
            }
            remove_tree(root, ctx).await?;
        }

        for dir in [layout.bin(), layout.include(), layout.tmp_build()] {
            if ctx.is_dry_run() {
                info!("[dry-run] Would create {}", dir.display());
                continue;
            }
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        Ok(true)
    }
}

async fn remove_tree(path: &Path, ctx: &ToolContext) -> Result<()> {
    if ctx.is_dry_run() {
        info!("[dry-run] Would remove {}", path.display());
        return Ok(());
    }
    remove_dir_all_forced(path).await
}
