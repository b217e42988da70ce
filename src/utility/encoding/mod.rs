// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Decoding of child process output.
//!
//! ```text
//! raw line bytes --decode_line(encoding)--> String
//!   utf8  lossy, invalid sequences become U+FFFD
//!   acp   Windows-1252
//!   oem   IBM866
//! ```
//!
//! Localized compilers and MSVC tools print in the console code page, so a
//! step can name the encoding of its output. Decoding never fails.

use encoding_rs::{IBM866, WINDOWS_1252};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Encoding of a child's stdout/stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// UTF-8, lossy
    #[default]
    Utf8,
    /// Active code page (Windows-1252)
    Acp,
    /// OEM code page (IBM866)
    Oem,
}

impl Encoding {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Acp => "acp",
            Self::Oem => "oem",
        }
    }

    /// Converts bytes in this encoding to UTF-8.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> Cow<'_, str> {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes),
            Self::Acp => WINDOWS_1252.decode_without_bom_handling(bytes).0,
            Self::Oem => IBM866.decode_without_bom_handling(bytes).0,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decodes one line read with `read_until(b'\n')`, dropping the LF or CRLF.
#[must_use]
pub fn decode_line(encoding: Encoding, raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    encoding.decode(raw).into_owned()
}

#[cfg(test)]
mod tests;
