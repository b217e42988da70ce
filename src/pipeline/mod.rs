// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! The dependency pipeline.
//!
//! ```text
//! Pipeline::new(config)
//!   platform    Config::platform() --> deps/<tag>/
//!   selection   DependencyRegistry  names, globs, aliases
//!   prepare     overwrite prompt / --skip-download reuse
//!      |
//!      v
//!   per dependency (manifest order, sequential)
//!      runner     fetch --> setup[0..n] --> build
//!                 StepSpec --Templater--> Tool (command, download, move)
//!      |
//!      v
//!   collector   include rules --> include/   output rules --> bin/
//!      |
//!      v
//!   cleanup     remove tmp/ unless keep_src
//! ```
//!
//! The first failing step stops the whole run with a
//! [`StageError`](crate::error::StageError). Ctrl+C cancels the shared
//! token, which kills the running child.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::Result;

pub mod cleanup;
pub mod collector;
pub mod manager;
pub mod registry;
pub mod runner;
pub mod steps;
pub mod templater;

/// Stage name used for artifact collection failures.
pub const COPY_STAGE: &str = "copy";

/// Context provided to tools during execution.
#[derive(Clone)]
pub struct ToolContext {
    /// Cancellation token for cooperative cancellation.
    cancel_token: CancellationToken,

    /// When true, tools log what they would do without making changes.
    dry_run: bool,

    config: Arc<Config>,
}

impl ToolContext {
    /// Creates a new `ToolContext`.
    #[must_use]
    pub const fn new(config: Arc<Config>, cancel_token: CancellationToken, dry_run: bool) -> Self {
        Self {
            cancel_token,
            dry_run,
            config,
        }
    }

    /// Returns a reference to the configuration.
    #[must_use]
    pub const fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Returns a reference to the cancellation token.
    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }

    /// Returns whether this is a dry-run execution.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Checks if cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

/// A single executable step of a dependency.
///
/// Tools hold fully templated arguments. They must honor
/// [`ToolContext::is_dry_run`] and stop when the token is cancelled.
pub trait Tool: Send + Sync {
    /// Short name for logs (program name, `download`, `move`).
    fn name(&self) -> &str;

    /// Executes the step.
    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>>;
}

#[cfg(test)]
mod test_utils;
