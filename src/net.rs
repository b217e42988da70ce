// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Network module with async downloads.
//!
//! ```text
//! Downloader::new()
//!   .url() .file()
//!   .silent() .cancel_token()
//!        |
//!        v
//!    download()
//!        |
//!        v
//!   Progress display
//!     Bar     [=====>     ] 50MB/100MB
//!     Spinner * 50MB @ 5MB/s
//!     Silent  (none)
//!
//! Global client:  OnceLock, connection pool, keep-alive
//! Cancellation:   token cancelled -> remove partial file -> Interrupted
//! ```

use crate::error::{DepsResult, NetworkError};
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use std::path::PathBuf;
use std::sync::OnceLock;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;

/// RAII guard that removes a partial download file on Drop unless explicitly kept.
///
/// Deletion is blocking; it only runs on error paths and finishes before the
/// function returns.
struct PartialFileGuard {
    path: PathBuf,
    keep: bool,
}

impl PartialFileGuard {
    const fn new(path: PathBuf) -> Self {
        Self { path, keep: false }
    }

    /// Mark the download as complete - file will NOT be deleted on drop.
    const fn keep(&mut self) {
        self.keep = true;
    }
}

impl Drop for PartialFileGuard {
    fn drop(&mut self) {
        if !self.keep {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

/// Global HTTP client - initialized once, reused across all downloads.
/// Falls back to a basic client if custom configuration fails.
fn global_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(format!("purpl-deps/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// Pre-validated progress bar style for known file sizes.
fn bar_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} @ {binary_bytes_per_sec} ({eta})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
        })
        .clone()
}

/// Pre-validated spinner style for unknown file sizes.
fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] {bytes} @ {binary_bytes_per_sec}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        })
        .clone()
}

/// Progress display style for downloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ProgressDisplay {
    /// Bar with speed and ETA, or a spinner when the size is unknown
    #[default]
    Bar,
    /// No visual progress (silent mode)
    Silent,
}

/// Async HTTP downloader with builder pattern.
///
/// # Example
/// ```no_run
/// use purpl_deps::net::Downloader;
///
/// # async fn example() -> anyhow::Result<()> {
/// Downloader::new()
///     .url("https://github.com/nigels-com/glew/releases/download/glew-2.2.0/glew-2.2.0.tgz")
///     .file("deps/linux-x64/tmp/glew.tar.gz")
///     .download()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct Downloader {
    client: Client,
    url: Option<String>,
    output_file: Option<PathBuf>,
    cancel_token: CancellationToken,
    progress_display: ProgressDisplay,
}

impl Default for Downloader {
    fn default() -> Self {
        Self::new()
    }
}

impl Downloader {
    /// Create a new downloader with default settings.
    /// User-Agent is set to "purpl-deps/VERSION".
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: global_client().clone(),
            url: None,
            output_file: None,
            cancel_token: CancellationToken::new(),
            progress_display: ProgressDisplay::default(),
        }
    }

    /// Set the URL to download from.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the output file path.
    #[must_use]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// Disable progress display (silent mode).
    #[must_use]
    pub const fn silent(mut self) -> Self {
        self.progress_display = ProgressDisplay::Silent;
        self
    }

    /// Abort the download when this token is cancelled.
    #[must_use]
    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    fn create_progress_bar(&self, total_size: u64) -> Option<ProgressBar> {
        match self.progress_display {
            ProgressDisplay::Silent => None,
            ProgressDisplay::Bar if total_size > 0 => {
                let pb = ProgressBar::new(total_size);
                pb.set_style(bar_style());
                Some(pb)
            }
            ProgressDisplay::Bar => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(spinner_style());
                Some(pb)
            }
        }
    }

    /// Download to the configured file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No URL or output file is configured.
    /// - The network request fails or returns a non-success status code.
    /// - Parent directories cannot be created.
    /// - The output file cannot be created or written to.
    /// - The cancellation token fires.
    pub async fn download(&self) -> DepsResult<()> {
        let url = self
            .url
            .as_ref()
            .ok_or_else(|| NetworkError::DownloadFailed {
                url: String::new(),
                message: "no URL provided".to_string(),
            })?;
        let output = self
            .output_file
            .as_ref()
            .ok_or_else(|| NetworkError::DownloadFailed {
                url: url.clone(),
                message: "no output file specified".to_string(),
            })?;

        let response = tokio::select! {
            () = self.cancel_token.cancelled() => return Err(NetworkError::Interrupted.into()),
            response = self.client.get(url).send() => response.map_err(NetworkError::Reqwest)?,
        };

        if !response.status().is_success() {
            return Err(NetworkError::HttpError {
                status: response.status().as_u16(),
                url: url.clone(),
            }
            .into());
        }

        let total_size = response.content_length().unwrap_or(0);
        let progress_bar = self.create_progress_bar(total_size);

        if let Some(parent) = output.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| NetworkError::DownloadFailed {
                    url: url.clone(),
                    message: format!(
                        "failed to create parent directory {}: {}",
                        parent.display(),
                        e
                    ),
                })?;
        }

        let mut file =
            tokio::fs::File::create(output)
                .await
                .map_err(|e| NetworkError::DownloadFailed {
                    url: url.clone(),
                    message: format!("failed to create output file {}: {}", output.display(), e),
                })?;

        let mut guard = PartialFileGuard::new(output.clone());

        let mut stream = response.bytes_stream();

        loop {
            let chunk = tokio::select! {
                () = self.cancel_token.cancelled() => {
                    if let Some(pb) = &progress_bar {
                        pb.abandon_with_message("interrupted");
                    }
                    return Err(NetworkError::Interrupted.into());
                }
                chunk = stream.next() => chunk,
            };
            let Some(chunk) = chunk else { break };

            let chunk = chunk.map_err(NetworkError::Reqwest)?;
            file.write_all(&chunk)
                .await
                .map_err(|e| NetworkError::DownloadFailed {
                    url: url.clone(),
                    message: format!("failed to write to {}: {}", output.display(), e),
                })?;

            if let Some(pb) = &progress_bar {
                pb.inc(chunk.len() as u64);
            }
        }

        file.flush()
            .await
            .map_err(|e| NetworkError::DownloadFailed {
                url: url.clone(),
                message: format!("failed to flush {}: {}", output.display(), e),
            })?;

        guard.keep();

        if let Some(pb) = progress_bar {
            pb.finish_with_message("done");
        }

        Ok(())
    }
}
