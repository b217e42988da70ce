// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for purpl-deps.

use crate::cli::Cli;
use crate::config::Config;
use crate::config::loader::ConfigLoader;
use crate::error::Result;

/// Config file read from the current directory unless `--no-default-inis`.
pub const DEFAULT_CONFIG_FILE: &str = "purpl-deps.toml";

/// Prefix of `PURPL_DEPS_SECTION__KEY` environment overrides.
pub const ENV_PREFIX: &str = "PURPL_DEPS";

/// Stacks every config layer the command line asks for.
///
/// # Errors
///
/// Returns an error if a `--set` override is malformed.
pub fn config_loader(cli: &Cli) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().with_builtin_manifest();
    if !cli.global.no_default_inis {
        loader = loader.add_toml_file_optional(DEFAULT_CONFIG_FILE);
    }
    for ini_path in &cli.global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);

    cli.config_overrides()
        .iter()
        .try_fold(loader, |loader, raw| loader.apply_override(raw))
}

/// Display current configuration options.
pub fn run_options_command(config: &Config) {
    for line in config.format_options() {
        println!("{line}");
    }
}

/// Display loaded configuration files.
pub fn run_inis_command(config_files: &[String]) {
    if config_files.is_empty() {
        println!("No configuration files loaded");
    } else {
        for line in config_files {
            println!("{line}");
        }
    }
}

/// Print the platform tag dependencies are built for.
///
/// # Errors
///
/// Returns an error if the `global.platform` override is malformed.
pub fn run_platform_command(config: &Config) -> Result<()> {
    println!("{}", config.platform()?.tag());
    Ok(())
}
