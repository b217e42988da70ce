// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build command implementation for purpl-deps.

use std::sync::Arc;

use tracing::{info, warn};

use crate::cli::build::BuildArgs;
use crate::config::Config;
use crate::error::Result;
use crate::pipeline::manager::{Pipeline, RunOutcome};

/// Main handler for build command.
///
/// Flags of `args` are already part of `config`; only the selection is
/// read here.
///
/// # Errors
///
/// Returns an error if planning fails or any dependency fails a stage.
pub async fn run_build_command(args: &BuildArgs, config: Config) -> Result<()> {
    let pipeline = Arc::new(Pipeline::new(Arc::new(config)).with_selection(args.deps.clone()));

    let handle = Arc::clone(&pipeline);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received Ctrl+C, interrupting the current step...");
            handle.interrupt();
        }
    });

    match pipeline.run().await? {
        RunOutcome::Completed { dependencies } => {
            info!(count = dependencies.len(), "Build completed successfully");
        }
        RunOutcome::Declined => info!("Nothing done"),
    }
    Ok(())
}
