// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! List command implementation for purpl-deps.

use std::sync::Arc;

use serde::Serialize;

use crate::cli::build::ListArgs;
use crate::config::Config;
use crate::config::manifest::matches_platform;
use crate::error::Result;
use crate::pipeline::manager::Pipeline;

/// One dependency as shown by `list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyEntry {
    pub name: String,
    /// Steps that run on the platform, fetch included.
    pub steps: usize,
    pub includes: usize,
    pub outputs: usize,
}

/// Resolves what `list` shows, in manifest order.
///
/// # Errors
///
/// Returns an error for a malformed platform or a selection that matches
/// nothing.
pub fn list_entries(args: &ListArgs, config: &Config) -> Result<Vec<DependencyEntry>> {
    let plan = Pipeline::new(Arc::new(config.clone()))
        .with_selection(args.deps.clone())
        .plan()?;
    let tag = plan.platform.tag();

    Ok(plan
        .dependencies
        .iter()
        .filter_map(|name| config.dependency(name))
        .map(|dep| DependencyEntry {
            name: dep.name.clone(),
            steps: dep.steps_for(&tag).count(),
            includes: dep
                .include
                .iter()
                .filter(|rule| matches_platform(&rule.platforms, &tag))
                .count(),
            outputs: dep
                .output
                .iter()
                .filter(|rule| matches_platform(&rule.platforms, &tag))
                .count(),
        })
        .collect())
}

/// Main handler for list command.
///
/// # Errors
///
/// Returns an error if dependency resolution or JSON encoding fails.
pub fn run_list_command(args: &ListArgs, config: &Config) -> Result<()> {
    if args.aliases {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&config.aliases)?);
        } else if config.aliases.is_empty() {
            println!("No aliases defined");
        } else {
            for (name, targets) in &config.aliases {
                println!("{} = {}", name, targets.join(", "));
            }
        }
        return Ok(());
    }

    let entries = list_entries(args, config)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if entries.is_empty() {
        println!("No dependencies for {}", config.platform()?);
    } else {
        let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
        for entry in &entries {
            println!(
                "{:<width$}  {} steps, {} include, {} output",
                entry.name, entry.steps, entry.includes, entry.outputs
            );
        }
    }
    Ok(())
}
