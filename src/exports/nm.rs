// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! `nm -g` parsing.

/// Extracts the names of defined text symbols (`T`) from `nm -g` output.
///
/// Mach-O prefixes C symbols with `_`; pass `strip_underscore` to get the
/// name `dlsym` expects.
#[must_use]
pub fn parse_symbols(stdout: &str, strip_underscore: bool) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let (_address, kind, name) = (fields.next()?, fields.next()?, fields.next()?);
            (kind == "T").then_some(name)
        })
        .map(|name| {
            let name = if strip_underscore {
                name.strip_prefix('_').unwrap_or(name)
            } else {
                name
            };
            name.to_string()
        })
        .collect()
}
