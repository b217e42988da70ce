// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use super::builder::{ProcessBuilder, ProcessFlags};
use crate::error::ProcessError;
use crate::utility::encoding::Encoding;

#[test]
fn test_executable_lookup_found() {
    // cargo is always on PATH while the test suite runs
    let builder = ProcessBuilder::which("cargo").expect("cargo should be found in PATH");
    assert!(builder.program().exists());
    assert!(ProcessBuilder::exists("cargo"));

    let path = ProcessBuilder::find("cargo").expect("cargo should be found");
    assert!(path.exists());
    // second lookup comes from the cache
    assert_eq!(ProcessBuilder::find("cargo"), Some(path));
}

#[test]
fn test_executable_lookup_not_found() {
    let program = "nonexistent_program_12345";

    let err = ProcessBuilder::which(program).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"executable not found: 'nonexistent_program_12345' (not in PATH)");
    assert!(!ProcessBuilder::exists(program));
    assert!(ProcessBuilder::find(program).is_none());
}

#[test]
fn test_command_line_quotes_spaces() {
    let builder = ProcessBuilder::new("cmake")
        .args(["-S", "deps/my dir"])
        .arg("-GNinja");
    assert_eq!(builder.command_line(), "cmake -S \"deps/my dir\" -GNinja");
}

#[tokio::test]
async fn test_process_spawn_failure() {
    let err = ProcessBuilder::new("nonexistent_program_12345")
        .run()
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ProcessError>(),
        Some(ProcessError::SpawnFailed { .. })
    ));
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_echo() {
    let output = ProcessBuilder::new("echo")
        .arg("hello")
        .capture_stdout()
        .run()
        .await
        .expect("echo should succeed");

    assert!(output.success());
    insta::assert_snapshot!(output.stdout().trim(), @"hello");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_quiet_discards_output() {
    let output = ProcessBuilder::new("echo")
        .arg("hello")
        .capture_stdout()
        .quiet()
        .run()
        .await
        .expect("echo should succeed");

    assert!(output.success());
    assert!(output.stdout().is_empty());
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_non_zero_exit() {
    let err = ProcessBuilder::new("false").run().await.unwrap_err();
    match err.downcast_ref::<ProcessError>() {
        Some(ProcessError::NonZeroExit { command, code }) => {
            assert_eq!(command, "false");
            assert_eq!(*code, 1);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_allow_failure() {
    let output = ProcessBuilder::new("false")
        .flag(ProcessFlags::ALLOW_FAILURE)
        .run()
        .await
        .expect("failure is allowed");
    assert_eq!(output.exit_code(), 1);
    assert!(!output.success());
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_env_and_cwd() {
    let temp = tempfile::tempdir().unwrap();

    let output = ProcessBuilder::new("sh")
        .args(["-c", "echo \"$PURPL_TEST_VAR\" && pwd"])
        .env("PURPL_TEST_VAR", "test_value")
        .cwd(temp.path())
        .capture_stdout()
        .run()
        .await
        .expect("process should succeed");

    let mut lines = output.stdout().lines();
    assert_eq!(lines.next(), Some("test_value"));
    let cwd = std::path::PathBuf::from(lines.next().unwrap());
    assert_eq!(
        cwd.canonicalize().unwrap(),
        temp.path().canonicalize().unwrap()
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_captures_long_output() {
    let output = ProcessBuilder::new("seq")
        .arg("500")
        .capture_stdout()
        .run()
        .await
        .expect("seq should succeed");
    assert_eq!(output.stdout().lines().count(), 500);
    assert_eq!(output.stdout().lines().last(), Some("500"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_non_utf8_output_is_drained() {
    // a Windows-1252 line followed by more output than a pipe buffer holds
    let output = ProcessBuilder::new("/bin/sh")
        .arg("-c")
        .arg("printf 'caf\\351\\n'; head -c 300000 /dev/zero | tr '\\0' a; exit 0")
        .timeout(std::time::Duration::from_secs(5))
        .run()
        .await
        .expect("a non-UTF-8 line must not break the stream");
    assert_eq!(output.exit_code(), 0);
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_decodes_output_encoding() {
    let script = "printf 'caf\\351\\r\\nok\\n'";

    let lossy = ProcessBuilder::new("/bin/sh")
        .args(["-c", script])
        .capture_stdout()
        .run()
        .await
        .unwrap();
    assert_eq!(lossy.stdout(), "caf\u{fffd}\nok");

    let acp = ProcessBuilder::new("/bin/sh")
        .args(["-c", script])
        .capture_stdout()
        .encoding(Encoding::Acp)
        .run()
        .await
        .unwrap();
    assert_eq!(acp.stdout(), "café\nok");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_timeout() {
    let err = ProcessBuilder::new("sleep")
        .arg("5")
        .timeout(std::time::Duration::from_millis(100))
        .run()
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ProcessError>(),
        Some(ProcessError::Timeout { .. })
    ));
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_cancellation() {
    let token = tokio_util::sync::CancellationToken::new();
    let cancel = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        cancel.cancel();
    });

    let output = ProcessBuilder::new("sleep")
        .arg("5")
        .run_with_cancellation(token)
        .await
        .expect("cancellation is not an error");
    assert!(output.is_interrupted());
    assert!(!output.success());
}
