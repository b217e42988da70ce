// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and lifecycle management.
//!
//! ```text
//! run() / run_with_cancellation(token)
//!              |
//!              v
//!     build_command()
//!     args, cwd, env, stdio
//!              |
//!              v
//!          spawn() ---------> SpawnFailed
//!              |
//!              v
//!        io::supervise()
//!              |
//!      +-------+--------+
//!      v       v        v
//!   exited  cancelled  timed out --> Timeout
//!      |       |
//!      v       v
//!  validate   ProcessOutput { interrupted }
//!  exit code (skip if ALLOW_FAILURE) --> NonZeroExit
//! ```

use std::fmt::Write as _;
use std::process::Stdio;

use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace};

use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput, StreamFlags};
use super::io;
use crate::error::{ProcessError, Result};

impl ProcessBuilder {
    /// Returns the display name for this process.
    fn display_name(&self) -> String {
        self.name_override().map_or_else(
            || {
                self.program().file_stem().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            String::from,
        )
    }

    /// Returns the full command line as a string (for logging).
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut cmd = self.program().display().to_string();
        for arg in self.args_slice() {
            if arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Spawns and runs the process, waiting for completion.
    ///
    /// # Errors
    ///
    /// Same as [`run_with_cancellation`](Self::run_with_cancellation).
    pub async fn run(self) -> Result<ProcessOutput> {
        self.run_with_cancellation(CancellationToken::new()).await
    }

    /// Spawns and runs the process with cancellation support.
    ///
    /// When the token is cancelled the child is killed and the output is
    /// returned with `interrupted = true`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProcessError`] if:
    /// - Spawning the child process fails.
    /// - The process exits with a non-zero status (and `ALLOW_FAILURE` is not set).
    /// - The configured timeout elapses.
    pub async fn run_with_cancellation(self, token: CancellationToken) -> Result<ProcessOutput> {
        let name = self.display_name();
        let cmd_line = self.command_line();

        if token.is_cancelled() {
            return Ok(ProcessOutput::new(-1, String::new(), String::new(), true));
        }

        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        let mut child = self
            .build_command()
            .spawn()
            .map_err(|source| ProcessError::SpawnFailed {
                command: cmd_line.clone(),
                source,
            })?;
        trace!(process = %name, pid = ?child.id(), "spawned");

        let (finished, lines) = io::supervise(
            &name,
            &mut child,
            self.stdout_flags(),
            self.stderr_flags(),
            self.output_encoding(),
            self.timeout_duration(),
            &token,
        )
        .await?;

        if finished.timed_out {
            return Err(ProcessError::Timeout {
                command: cmd_line,
                timeout_secs: self.timeout_duration().map_or(0, |d| d.as_secs()),
            }
            .into());
        }

        let exit_code = finished.status.code().unwrap_or(-1);
        if !finished.interrupted
            && exit_code != 0
            && !self.process_flags().contains(ProcessFlags::ALLOW_FAILURE)
        {
            let tail = if lines.stderr.is_empty() {
                &lines.stdout
            } else {
                &lines.stderr
            };
            for line in tail {
                error!(process = %name, "{line}");
            }
            return Err(ProcessError::NonZeroExit {
                command: name,
                code: exit_code,
            }
            .into());
        }

        trace!(
            process = %name,
            exit_code,
            interrupted = finished.interrupted,
            "completed"
        );

        let keep = |flags: StreamFlags, lines: Vec<String>| {
            if flags.contains(StreamFlags::KEEP_IN_STRING) {
                lines.join("\n")
            } else {
                String::new()
            }
        };
        Ok(ProcessOutput::new(
            exit_code,
            keep(self.stdout_flags(), lines.stdout),
            keep(self.stderr_flags(), lines.stderr),
            finished.interrupted,
        ))
    }

    /// Builds the tokio Command from this builder's configuration.
    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());
        command.args(self.args_slice());

        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }
        command.envs(self.extra_env());

        command.stdin(Stdio::null());
        command.stdout(Self::stdio_from_flags(self.stdout_flags()));
        command.stderr(Self::stdio_from_flags(self.stderr_flags()));
        command.kill_on_drop(true);

        command
    }

    fn stdio_from_flags(flags: StreamFlags) -> Stdio {
        if flags.contains(StreamFlags::BIT_BUCKET) {
            Stdio::null()
        } else {
            Stdio::piped()
        }
    }
}
