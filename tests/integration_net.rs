// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for network module using wiremock.
//!
//! Tests the Downloader with HTTP mocking, covering:
//! - File downloads
//! - HTTP errors
//! - Missing parameters
//! - Cancellation

use purpl_deps::error::{DepsError, NetworkError};
use purpl_deps::net::Downloader;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

async fn serve(route: &str, response: ResponseTemplate) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(&mock_server)
        .await;
    mock_server
}

// =============================================================================
// download (file) tests
// =============================================================================

#[tokio::test]
async fn test_download_file_success() {
    let body = "#pragma once\nint stb_dummy(void);\n";
    let mock_server = serve("/stb.h", ResponseTemplate::new(200).set_body_string(body)).await;

    let temp_dir = temp_dir();
    let output_file = temp_dir.path().join("stb.h");

    let url = format!("{}/stb.h", mock_server.uri());
    let result = Downloader::new()
        .url(&url)
        .file(&output_file)
        .silent()
        .download()
        .await;

    assert!(result.is_ok(), "Download failed: {:?}", result.err());
    assert_eq!(std::fs::read_to_string(&output_file).unwrap(), body);
}

#[tokio::test]
async fn test_download_file_creates_parent_dirs() {
    let mock_server = serve(
        "/glew-2.2.0.tgz",
        ResponseTemplate::new(200).set_body_bytes(vec![0x1f, 0x8b, 0x08, 0x00]),
    )
    .await;

    let temp_dir = temp_dir();
    let output_file = temp_dir
        .path()
        .join("deps")
        .join("linux-x64")
        .join("tmp")
        .join("glew.tar.gz");
    assert!(!output_file.parent().unwrap().exists());

    let url = format!("{}/glew-2.2.0.tgz", mock_server.uri());
    Downloader::new()
        .url(&url)
        .file(&output_file)
        .silent()
        .download()
        .await
        .unwrap();

    assert_eq!(std::fs::read(&output_file).unwrap(), [0x1f, 0x8b, 0x08, 0x00]);
}

// =============================================================================
// Error handling tests
// =============================================================================

#[tokio::test]
async fn test_download_file_http_errors() {
    for status in [404, 500] {
        let mock_server = serve("/vulkan-sdk.exe", ResponseTemplate::new(status)).await;

        let temp_dir = temp_dir();
        let output_file = temp_dir.path().join("vulkan-sdk.exe");
        let url = format!("{}/vulkan-sdk.exe", mock_server.uri());

        let err = Downloader::new()
            .url(&url)
            .file(&output_file)
            .silent()
            .download()
            .await
            .unwrap_err();

        match err {
            DepsError::Network(boxed) => match *boxed {
                NetworkError::HttpError {
                    status: actual_status,
                    ..
                } => assert_eq!(actual_status, status),
                other => panic!("Expected NetworkError::HttpError for {status}, got {other:?}"),
            },
            other => panic!("Expected DepsError::Network for {status}, got {other:?}"),
        }
        assert!(!output_file.exists());
    }
}

#[tokio::test]
async fn test_download_missing_parameters() {
    let err = Downloader::new().silent().download().await.unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"network error: download failed:  - no URL provided"
    );

    let err = Downloader::new()
        .url("http://127.0.0.1:9/never")
        .silent()
        .download()
        .await
        .unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"network error: download failed: http://127.0.0.1:9/never - no output file specified"
    );
}

#[tokio::test]
async fn test_download_cancelled_before_start() {
    let mock_server = serve("/SDL2.zip", ResponseTemplate::new(200).set_body_string("zip")).await;

    let temp_dir = temp_dir();
    let output_file = temp_dir.path().join("SDL2.zip");
    let token = CancellationToken::new();
    token.cancel();

    let err = Downloader::new()
        .url(format!("{}/SDL2.zip", mock_server.uri()))
        .file(&output_file)
        .silent()
        .cancel_token(token)
        .download()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DepsError::Network(ref boxed) if matches!(**boxed, NetworkError::Interrupted)
    ));
    assert!(!output_file.exists());
}
