// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> config layers --> Logging --> Command Dispatch
//!   Build (default) | List | Platform | Options | Inis | Exports | Version
//! ```

use std::process::ExitCode;

use purpl_deps::cli::{self, Command};
use purpl_deps::cmd::build::run_build_command;
use purpl_deps::cmd::config::{
    config_loader, run_inis_command, run_options_command, run_platform_command,
};
use purpl_deps::cmd::exports::run_exports_command;
use purpl_deps::cmd::list::run_list_command;
use purpl_deps::config::Config;
use purpl_deps::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();
    let command = cli.command_or_default();

    if matches!(command, Command::Version) {
        handle_version_command();
        return ExitCode::SUCCESS;
    }

    let loader = match config_loader(&cli) {
        Ok(loader) => loader,
        Err(e) => return report(&e),
    };
    let loaded_files = loader.format_loaded_files();
    let config = match loader.build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config");
            return report(&e);
        }
    };

    let _log_guard = match init_logging(&build_log_config(&config)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match command {
        Command::Version => Ok(()),
        Command::Options => {
            run_options_command(&config);
            Ok(())
        }
        Command::Inis => {
            run_inis_command(&loaded_files);
            Ok(())
        }
        Command::Platform => run_platform_command(&config),
        Command::Build(args) => run_build_command(&args, config).await,
        Command::List(args) => run_list_command(&args, &config),
        Command::Exports(args) => run_exports_command(&args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

fn report(e: &anyhow::Error) -> ExitCode {
    eprintln!("Error: {e:#}");
    ExitCode::FAILURE
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_log_config(config: &Config) -> LogConfig {
    let global = &config.global;
    LogConfig::builder()
        .with_console_level(global.output_log_level)
        .with_file_level(global.file_log_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}
