// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Output streaming and child supervision.
//!
//! ```text
//! supervise()
//!   stdout/stderr reader tasks  read_until(LF) + decode_line(encoding)
//!                               --> Vec<String> (captured or tail)
//!   select! { wait | cancelled | timeout }
//!   --> Finished { status, interrupted, timed_out }, StreamLines
//! ```
//!
//! Forwarded lines go to the log at DEBUG, so `--verbose` shows the
//! build tools' output. The last few lines of each stream are kept so a
//! failure can be reported without the verbose flag.

use std::collections::VecDeque;
use std::process::ExitStatus;
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::builder::StreamFlags;
use crate::error::Result;
use crate::utility::encoding::{Encoding, decode_line};

/// Lines kept per stream for failure reports.
const TAIL_LINES: usize = 20;

/// How a supervised child ended.
pub(super) struct Finished {
    pub(super) status: ExitStatus,
    pub(super) interrupted: bool,
    pub(super) timed_out: bool,
}

/// Lines read from the child's streams.
pub(super) struct StreamLines {
    pub(super) stdout: Vec<String>,
    pub(super) stderr: Vec<String>,
}

fn spawn_reader<R>(
    reader: Option<R>,
    flags: StreamFlags,
    encoding: Encoding,
    process: &str,
    stream: &'static str,
) -> Option<JoinHandle<Vec<String>>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    if flags.contains(StreamFlags::BIT_BUCKET) {
        return None;
    }
    let process = process.to_string();
    reader.map(|reader| tokio::spawn(read_stream(reader, flags, encoding, process, stream)))
}

/// Drains a stream to EOF, decoding each line.
///
/// Lines are read as raw bytes and decoded, so bytes that are not valid
/// in `encoding` never end the read before the child closes the pipe.
async fn read_stream<R>(
    reader: R,
    flags: StreamFlags,
    encoding: Encoding,
    process: String,
    stream: &'static str,
) -> Vec<String>
where
    R: AsyncRead + Unpin,
{
    let keep_all = flags.contains(StreamFlags::KEEP_IN_STRING);
    let mut kept = VecDeque::new();
    let mut reader = BufReader::new(reader);
    let mut raw = Vec::new();

    loop {
        raw.clear();
        match reader.read_until(b'\n', &mut raw).await {
            Ok(0) => break,
            Ok(_) => {
                let line = decode_line(encoding, &raw);
                if flags.contains(StreamFlags::FORWARD_TO_LOG) {
                    debug!(process = %process, stream, "{line}");
                }
                if !keep_all && kept.len() == TAIL_LINES {
                    kept.pop_front();
                }
                kept.push_back(line);
            }
            Err(e) => {
                warn!(process = %process, stream, error = %e, "error reading stream");
                break;
            }
        }
    }

    kept.into()
}

async fn join_reader(handle: Option<JoinHandle<Vec<String>>>) -> Vec<String> {
    match handle {
        Some(handle) => handle.await.unwrap_or_default(),
        None => Vec::new(),
    }
}

/// Waits for the child while streaming its output.
///
/// Cancellation and timeout both kill the child; the caller decides how
/// to report each.
pub(super) async fn supervise(
    name: &str,
    child: &mut Child,
    stdout_flags: StreamFlags,
    stderr_flags: StreamFlags,
    encoding: Encoding,
    timeout: Option<Duration>,
    token: &CancellationToken,
) -> Result<(Finished, StreamLines)> {
    let stdout = spawn_reader(child.stdout.take(), stdout_flags, encoding, name, "stdout");
    let stderr = spawn_reader(child.stderr.take(), stderr_flags, encoding, name, "stderr");

    let deadline = async {
        match timeout {
            Some(duration) => tokio::time::sleep(duration).await,
            None => std::future::pending().await,
        }
    };

    let (interrupted, timed_out) = tokio::select! {
        status = child.wait() => {
            let status = status.with_context(|| format!("failed waiting for {name}"))?;
            let lines = StreamLines {
                stdout: join_reader(stdout).await,
                stderr: join_reader(stderr).await,
            };
            return Ok((Finished { status, interrupted: false, timed_out: false }, lines));
        }
        () = token.cancelled() => {
            warn!(process = %name, "Cancellation requested, terminating process");
            (true, false)
        }
        () = deadline => {
            warn!(process = %name, timeout = ?timeout, "Process timed out");
            (false, true)
        }
    };

    child.kill().await.ok();
    let status = child
        .wait()
        .await
        .with_context(|| format!("failed waiting for process {name} to exit"))?;

    let lines = StreamLines {
        stdout: join_reader(stdout).await,
        stderr: join_reader(stderr).await,
    };
    Ok((
        Finished {
            status,
            interrupted,
            timed_out,
        },
        lines,
    ))
}
