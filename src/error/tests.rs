// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigError, DepsError, DepsResult, ExportError, StageError, bail_out};

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        section: "paths".to_string(),
        key: "root".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"missing required config key 'root' in section '[paths]'");
}

#[test]
fn test_stage_error_display() {
    let err = StageError::Failed {
        dependency: "glew".to_string(),
        stage: "setup[1]".to_string(),
        message: "mv exited with code 1".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"dependency 'glew' failed during setup[1]: mv exited with code 1");
}

#[test]
fn test_stage_error_boxes_into_deps_error() {
    let err: DepsError = StageError::Interrupted("sdl2".to_string()).into();
    assert!(matches!(err, DepsError::Stage(_)));
    insta::assert_snapshot!(err.to_string(), @"stage error: interrupted before dependency 'sdl2'");
}

#[test]
fn test_export_error_display() {
    let err = ExportError::MissingHeader {
        tool: "dumpbin".to_string(),
        marker: "ordinal hint RVA".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"dumpbin output is missing the 'ordinal hint RVA' line");
}

#[test]
fn test_bail_out() {
    let err = bail_out("giving up");
    insta::assert_snapshot!(err.to_string(), @"fatal error: giving up");
}

#[test]
fn test_deps_error_size() {
    // Box<str> (Bailed) is 16 bytes (fat pointer: ptr + len)
    // With discriminant + alignment = 24 bytes
    let size = std::mem::size_of::<DepsError>();
    assert!(size <= 24, "DepsError is {size} bytes, expected <= 24");
}

#[test]
fn test_deps_result_size() {
    let size = std::mem::size_of::<DepsResult<()>>();
    assert!(size <= 24, "DepsResult<()> is {size} bytes, expected <= 24");
}

#[test]
fn test_stage_error_chain_printed_once() {
    let err: anyhow::Error = DepsError::from(StageError::CleanupFailed {
        path: "deps/linux-x64/tmp".to_string(),
        message: "permission denied".to_string(),
    })
    .into();
    insta::assert_snapshot!(
        format!("{err:#}"),
        @"stage error: cleanup of 'deps/linux-x64/tmp' failed: permission denied"
    );
}
