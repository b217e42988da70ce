// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Yes/no confirmation on the terminal.

use std::io::{self, BufRead, IsTerminal, Write};

use crate::error::{Result, bail_out};

/// Asks a yes/no question on stderr and reads the answer from stdin.
///
/// `assume_yes` answers without asking.
///
/// # Errors
///
/// Returns an error when stdin or stderr is not a terminal and
/// `assume_yes` is not set, or when reading the answer fails.
pub fn confirm(message: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }

    if !io::stdin().is_terminal() || !io::stderr().is_terminal() {
        return Err(bail_out(
            "cannot ask for confirmation in non-interactive mode, use --yes to proceed",
        )
        .into());
    }

    confirm_with(&mut io::stdin().lock(), &mut io::stderr(), message)
}

/// Writes `"{message} [y/N] "` and reads one line. `y`/`yes` mean yes.
///
/// # Errors
///
/// Returns an error if writing the question or reading the answer fails.
pub fn confirm_with<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<bool> {
    write!(output, "{message} [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

