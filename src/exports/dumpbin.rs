// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! `dumpbin /exports` parsing.
//!
//! ```text
//!     ordinal hint RVA      name
//!
//!           1    0 00001000 EngineInit
//!           2    1          Forwarded (forwarded to NTDLL.RtlFoo)
//!           3      00001020 [NONAME]
//!
//!   Summary
//! ```

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ExportError;

/// Header line of the export table, as dumpbin prints it.
pub const TABLE_HEADER: &str = "ordinal hint RVA      name";

/// First line after the export table.
pub const TABLE_END: &str = "Summary";

fn row_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(\d+)\s+([0-9A-Fa-f]+)\s+(?:([0-9A-Fa-f]{8})\s+)?(\S+)")
            .expect("invalid dumpbin row regex")
    })
}

fn is_header(line: &str) -> bool {
    line.split_whitespace()
        .eq(TABLE_HEADER.split_whitespace())
}

/// Extracts exported names from dumpbin output, in table order.
///
/// Ordinal-only exports (`[NONAME]`) are skipped.
///
/// # Errors
///
/// Returns [`ExportError::MissingHeader`] if the output has no export
/// table header.
pub fn parse_exports(stdout: &str) -> Result<Vec<String>, ExportError> {
    let mut lines = stdout.lines();
    if !lines.by_ref().any(is_header) {
        return Err(ExportError::MissingHeader {
            tool: "dumpbin".to_string(),
            marker: TABLE_HEADER.to_string(),
        });
    }

    let names = lines
        .take_while(|line| line.trim() != TABLE_END)
        .filter_map(|line| row_regex().captures(line))
        .filter_map(|caps| caps.get(4))
        .map(|name| name.as_str())
        .filter(|name| !name.starts_with('['))
        .map(str::to_string)
        .collect();
    Ok(names)
}
