// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build and list command arguments.
//!
//! # Flag Effects
//!
//! ```text
//! --keep-src       global.keep_src       tmp/ survives the run
//! --skip-download  global.skip_download  reuse tmp/, skip fetch steps
//! -y / --yes       global.assume_yes     overwrite deps/<platform> silently
//! ```

use clap::Args;

/// Arguments for the `build` command.
#[derive(Debug, Clone, Default, Args)]
pub struct BuildArgs {
    /// Keeps the downloaded and built sources in deps/<platform>/tmp.
    #[arg(long = "keep-src")]
    pub keep_src: bool,

    /// Reuses the sources of a previous --keep-src run instead of fetching.
    #[arg(long = "skip-download")]
    pub skip_download: bool,

    /// Overwrites an existing output tree without asking.
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,

    /// Dependencies to build. Globs like 's*' and aliases are supported.
    /// Builds every dependency of the platform when empty.
    #[arg(value_name = "DEP")]
    pub deps: Vec<String>,
}

impl BuildArgs {
    /// Converts build arguments to configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        [
            (self.keep_src, "global/keep_src=true"),
            (self.skip_download, "global/skip_download=true"),
            (self.yes, "global/assume_yes=true"),
        ]
        .into_iter()
        .filter(|(cond, _)| *cond)
        .map(|(_, key)| key.to_string())
        .collect()
    }
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Shows only aliases.
    #[arg(short = 'a', long)]
    pub aliases: bool,

    /// Prints machine-readable JSON.
    #[arg(long)]
    pub json: bool,

    /// When given, acts like the dependencies given to `build` and
    /// shows only the ones that would run.
    #[arg(value_name = "DEP")]
    pub deps: Vec<String>,
}
