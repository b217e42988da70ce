// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Runs the steps of one dependency.
//!
//! ```text
//! fetch (unless skip_download) --> setup[0] --> ... --> build
//!   creates exists?  --> skip step
//!   tool fails       --> StageError::Failed { dependency, stage, message }
//! ```

use tracing::info;

use super::steps::tool_for;
use super::templater::Templater;
use super::ToolContext;
use crate::config::manifest::DependencySpec;
use crate::error::{DepsError, Result, StageError};

/// Wraps a failure of `stage` into the typed stage error.
pub(crate) fn stage_failed(dependency: &str, stage: &str, error: &anyhow::Error) -> anyhow::Error {
    DepsError::from(StageError::Failed {
        dependency: dependency.to_string(),
        stage: stage.to_string(),
        message: format!("{error:#}"),
    })
    .into()
}

/// Executes the steps of a single dependency in order.
pub struct DependencyRunner<'a> {
    templater: &'a Templater,
    platform_tag: &'a str,
    skip_download: bool,
}

impl<'a> DependencyRunner<'a> {
    #[must_use]
    pub const fn new(templater: &'a Templater, platform_tag: &'a str) -> Self {
        Self {
            templater,
            platform_tag,
            skip_download: false,
        }
    }

    /// Skip the fetch step, building from existing sources.
    #[must_use]
    pub const fn with_skip_download(mut self, skip: bool) -> Self {
        self.skip_download = skip;
        self
    }

    /// Runs fetch, setup and build, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns a [`StageError::Failed`] naming the failing stage, or
    /// [`StageError::Interrupted`] if the token was cancelled.
    pub async fn run(&self, dep: &DependencySpec, ctx: &ToolContext) -> Result<()> {
        for (stage, step) in dep.steps_for(self.platform_tag) {
            if self.skip_download && stage == "fetch" {
                info!(dependency = %dep.name, "Skipping fetch");
                continue;
            }
            if ctx.is_cancelled() {
                return Err(DepsError::from(StageError::Interrupted(dep.name.clone())).into());
            }

            if let Some(creates) = &step.creates {
                let path = self.templater.render_path(creates);
                if path.exists() {
                    info!(
                        dependency = %dep.name,
                        stage = %stage,
                        "Skipping step, {} exists",
                        path.display()
                    );
                    continue;
                }
            }

            let tool = tool_for(&dep.name, &stage, step, self.templater)
                .map_err(|e| stage_failed(&dep.name, &stage, &e))?;
            info!(dependency = %dep.name, stage = %stage, tool = %tool.name(), "Running step");

            if let Err(e) = tool.run(ctx).await {
                if ctx.is_cancelled() {
                    return Err(DepsError::from(StageError::Interrupted(dep.name.clone())).into());
                }
                return Err(stage_failed(&dep.name, &stage, &e));
            }
        }
        Ok(())
    }
}
