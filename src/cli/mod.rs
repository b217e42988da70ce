// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for purpl-deps using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! purpl-deps [global options] [command]
//! build [deps...]          (default)
//! list [-a] [--json] [deps...]
//! platform
//! options
//! inis
//! exports BINARY OUTPUT [--format auto|pe|posix]
//! version
//! ```

pub mod build;
pub mod exports;
pub mod global;


use clap::{Parser, Subcommand};

use crate::cli::build::{BuildArgs, ListArgs};
use crate::cli::exports::ExportsArgs;
use crate::cli::global::GlobalOptions;

/// Purpl Engine dependency builder
///
/// Fetches, builds and collects the third-party libraries of the engine.
#[derive(Debug, Parser)]
#[command(
    name = "purpl-deps",
    author,
    version,
    about = "Purpl Engine dependency builder",
    long_about = "purpl-deps Copyright (C) 2026 Purpl Engine Developers\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Fetches, builds and collects the third-party libraries of the\n\
                  Purpl Engine into deps/<platform>/{bin,include}.\n\n\
                  Invoking `purpl-deps` builds every dependency of the platform. Do\n\
                  `purpl-deps build <dep>...` to build specific dependencies. See\n\
                  `purpl-deps <command> --help` for more information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  The dependency manifest is compiled in. A `purpl-deps.toml` in the\n\
                  current directory is layered on top of it, followed by every\n\
                  --ini in order, PURPL_DEPS_SECTION__KEY environment variables and\n\
                  finally --set and flag overrides. Use --no-default-inis to skip\n\
                  `purpl-deps.toml`."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute; `build` when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the config files used.
    Inis,

    /// Prints the resolved platform tag.
    Platform,

    /// Fetches, builds and collects dependencies.
    Build(BuildArgs),

    /// Lists the dependencies available for the platform.
    List(ListArgs),

    /// Writes a C loader for the exports of a shared library.
    Exports(ExportsArgs),
}

impl Cli {
    /// The command to run, defaulting to a full `build`.
    #[must_use]
    pub fn command_or_default(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Build(BuildArgs::default()))
    }

    /// All config overrides from global and command flags, lowest first.
    #[must_use]
    pub fn config_overrides(&self) -> Vec<String> {
        let mut overrides = self.global.to_config_overrides();
        if let Some(Command::Build(args)) = &self.command {
            overrides.extend(args.to_config_overrides());
        }
        overrides
    }
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
