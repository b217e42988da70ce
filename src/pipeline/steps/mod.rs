// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Step tools: the concrete actions behind a manifest step.
//!
//! ```text
//! StepSpec --tool_for(templater)--> Box<dyn Tool>
//!   run = ["<move>", a, b]   --> MoveTool      tokio::fs::rename
//!   run = [program, ...]     --> CommandTool   ProcessBuilder (argv, no shell)
//!   download + to            --> DownloadTool  net::Downloader
//! ```
//!
//! A program containing a path separator is spawned as given; a bare name
//! is looked up in PATH first so a missing tool is reported by name.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use tracing::{debug, info};

use super::templater::{MOVE_TOKEN, Templater};
use super::{Tool, ToolContext};
use crate::config::manifest::{StepAction, StepSpec};
use crate::core::process::builder::ProcessBuilder;
use crate::error::{ConfigError, Result};
use crate::net::Downloader;
use crate::utility::encoding::Encoding;
use futures_util::future::BoxFuture;

/// Builds the tool for a step, rendering every templated field.
///
/// # Errors
///
/// Returns a [`ConfigError::InvalidStep`] if the step has no action or a
/// `<move>` step does not have exactly two operands.
pub fn tool_for(
    dependency: &str,
    stage: &str,
    step: &StepSpec,
    templater: &Templater,
) -> Result<Box<dyn Tool>> {
    let invalid = |message: &str| ConfigError::InvalidStep {
        dependency: dependency.to_string(),
        stage: stage.to_string(),
        message: message.to_string(),
    };

    let tool: Box<dyn Tool> = match step.action().ok_or_else(|| invalid("no action"))? {
        StepAction::Download { url, to } => Box::new(DownloadTool::new(
            templater.render(url),
            templater.render_path(to),
        )),
        StepAction::Run([program, operands @ ..]) if program == MOVE_TOKEN => {
            let [from, to] = operands else {
                return Err(invalid("'<move>' takes a source and a destination").into());
            };
            Box::new(MoveTool::new(
                templater.render_path(from),
                templater.render_path(to),
            ))
        }
        StepAction::Run(argv) => {
            let mut tool = CommandTool::new(templater.render_argv(argv))
                .envs(
                    step.env
                        .iter()
                        .map(|(k, v)| (k.clone(), templater.render(v))),
                )
                .timeout(step.timeout_secs.map(Duration::from_secs))
                .encoding(step.encoding.unwrap_or_default());
            if let Some(cwd) = &step.cwd {
                tool = tool.cwd(templater.render_path(cwd));
            }
            Box::new(tool)
        }
    };
    Ok(tool)
}

/// Runs a program with arguments.
#[derive(Debug, Clone)]
pub struct CommandTool {
    argv: Vec<String>,
    cwd: Option<PathBuf>,
    env: BTreeMap<String, String>,
    timeout: Option<Duration>,
    encoding: Encoding,
}

impl CommandTool {
    /// Creates a tool for `argv[0]` with the remaining arguments.
    #[must_use]
    pub fn new(argv: Vec<String>) -> Self {
        Self {
            argv,
            cwd: None,
            env: BTreeMap::new(),
            timeout: None,
            encoding: Encoding::Utf8,
        }
    }

    #[must_use]
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    #[must_use]
    pub fn envs(mut self, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        self.env.extend(vars);
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    fn program(&self) -> &str {
        self.argv.first().map_or("", String::as_str)
    }

    fn process(&self) -> Result<ProcessBuilder> {
        let program = self.program();
        let mut builder = if program.contains(['/', '\\']) {
            ProcessBuilder::new(program)
        } else {
            ProcessBuilder::which(program)?
        };

        builder = builder
            .args(self.argv.iter().skip(1))
            .envs(self.env.clone())
            .encoding(self.encoding);
        if let Some(cwd) = &self.cwd {
            builder = builder.cwd(cwd);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder)
    }

    async fn execute(&self, ctx: &ToolContext) -> Result<()> {
        if ctx.is_dry_run() {
            let cwd = self
                .cwd
                .as_ref()
                .map(|dir| format!(" in {}", dir.display()))
                .unwrap_or_default();
            info!("[dry-run] Would run: {}{cwd}", self.argv.join(" "));
            return Ok(());
        }

        let output = self
            .process()?
            .run_with_cancellation(ctx.cancel_token().clone())
            .await?;
        if output.is_interrupted() {
            anyhow::bail!("'{}' was interrupted", self.program());
        }
        Ok(())
    }
}

impl Tool for CommandTool {
    fn name(&self) -> &str {
        self.program()
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.execute(ctx))
    }
}

/// Downloads a URL to a file with a progress bar.
#[derive(Debug, Clone)]
pub struct DownloadTool {
    url: String,
    output_file: PathBuf,
}

impl DownloadTool {
    #[must_use]
    pub fn new(url: impl Into<String>, output_file: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            output_file: output_file.into(),
        }
    }

    async fn execute(&self, ctx: &ToolContext) -> Result<()> {
        if ctx.is_dry_run() {
            info!(
                "[dry-run] Would download {} to {}",
                self.url,
                self.output_file.display()
            );
            return Ok(());
        }

        let mut downloader = Downloader::new()
            .url(&self.url)
            .file(&self.output_file)
            .cancel_token(ctx.cancel_token().clone());
        // the bar would fight with a quiet console
        if !ctx.config().global.output_log_level.shows_info() {
            downloader = downloader.silent();
        }

        downloader.download().await?;
        debug!(url = %self.url, file = %self.output_file.display(), "download completed");
        Ok(())
    }
}

impl Tool for DownloadTool {
    fn name(&self) -> &str {
        "download"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.execute(ctx))
    }
}

/// Built-in rename standing in for the host `move`/`mv` command.
#[derive(Debug, Clone)]
pub struct MoveTool {
    from: PathBuf,
    to: PathBuf,
}

impl MoveTool {
    #[must_use]
    pub fn new(from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    async fn execute(&self, ctx: &ToolContext) -> Result<()> {
        if ctx.is_dry_run() {
            info!(
                "[dry-run] Would move {} to {}",
                self.from.display(),
                self.to.display()
            );
            return Ok(());
        }

        if let Some(parent) = self.to.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        tokio::fs::rename(&self.from, &self.to)
            .await
            .with_context(|| {
                format!(
                    "failed to move {} to {}",
                    self.from.display(),
                    self.to.display()
                )
            })?;
        debug!(from = %self.from.display(), to = %self.to.display(), "moved");
        Ok(())
    }
}

impl Tool for MoveTool {
    fn name(&self) -> &str {
        "move"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.execute(ctx))
    }
}
