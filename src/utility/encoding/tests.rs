// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use super::*;

#[test]
fn test_decode_utf8_is_lossy() {
    assert_eq!(Encoding::Utf8.decode("café".as_bytes()), "café");
    assert_eq!(Encoding::Utf8.decode(b"caf\xe9"), "caf\u{fffd}");
}

#[test]
fn test_decode_code_pages() {
    // "café" in Windows-1252
    assert_eq!(Encoding::Acp.decode(b"caf\xe9"), "café");
    // "Привет" in IBM866
    assert_eq!(
        Encoding::Oem.decode(b"\x8f\xe0\xa8\xa2\xa5\xe2"),
        "Привет"
    );
    assert_eq!(Encoding::Oem.decode(b"cl.exe"), "cl.exe");
}

#[test]
fn test_decode_line_strips_line_endings() {
    assert_eq!(decode_line(Encoding::Utf8, b"warning C4996\r\n"), "warning C4996");
    assert_eq!(decode_line(Encoding::Utf8, b"done\n"), "done");
    assert_eq!(decode_line(Encoding::Acp, b"no newline"), "no newline");
    assert_eq!(decode_line(Encoding::Utf8, b"\n"), "");
}

#[test]
fn test_encoding_names() {
    #[derive(serde::Deserialize)]
    struct Step {
        encoding: Encoding,
    }

    assert_eq!(Encoding::default(), Encoding::Utf8);
    assert_eq!(Encoding::Oem.to_string(), "oem");

    let step: Step = serde_json::from_str(r#"{"encoding":"acp"}"#).unwrap();
    assert_eq!(step.encoding, Encoding::Acp);
}
