// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning and management.
//!
//! ```text
//! ProcessBuilder::new("cmake")
//!   .args() .cwd() .env() .capture_stdout()
//!   .run() / .run_with_cancellation()
//!       --> tokio::process::Command (argv, no shell)
//!           stream stdout/stderr to the log
//!       --> ProcessOutput { exit_code, stdout, stderr }
//! ```

pub mod builder;
mod io;
mod runner;
#[cfg(test)]
mod tests;
