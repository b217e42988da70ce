// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Placeholder substitution for step arguments.
//!
//! ```text
//! "<deps>/glew-<glew_version>"   -->  "/work/deps/linux-x64/tmp/glew-2.2.0"
//! "-j<jobs>"                     -->  "-j18"
//! "<move>"                       -->  "mv" | "move"
//! "<platform>"                   -->  "linux-x64"
//! ```
//!
//! Substitution is a single pass, so a value is never expanded again.
//! Unknown `<...>` tokens are left alone. Arguments that contain `<deps>`
//! are paths and get the host separator throughout.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::config::types::Vars;
use crate::core::platform::Platform;

/// Placeholder for the temporary working directory.
pub const DEPS_TOKEN: &str = "<deps>";

/// Placeholder for the host move command.
pub const MOVE_TOKEN: &str = "<move>";

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<([A-Za-z_][A-Za-z0-9_]*)>").expect("invalid token regex"))
}

/// Path separator and move command of the machine running the steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostConvention {
    separator: char,
    move_command: &'static str,
}

impl HostConvention {
    pub const WINDOWS: Self = Self {
        separator: '\\',
        move_command: "move",
    };

    pub const POSIX: Self = Self {
        separator: '/',
        move_command: "mv",
    };

    /// The convention of the machine this binary runs on.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(windows) {
            Self::WINDOWS
        } else {
            Self::POSIX
        }
    }

    #[must_use]
    pub const fn move_command(&self) -> &'static str {
        self.move_command
    }
}

/// Substitutes `<deps>`, `<move>`, `<jobs>`, `<platform>` and `[vars]`.
#[derive(Debug, Clone)]
pub struct Templater {
    values: BTreeMap<String, String>,
    host: HostConvention,
}

impl Templater {
    /// Creates a templater for the host convention.
    #[must_use]
    pub fn new(deps_dir: &Path, platform: &Platform, jobs: usize, vars: &Vars) -> Self {
        Self::with_host(deps_dir, platform, jobs, vars, HostConvention::current())
    }

    /// Creates a templater for an explicit convention.
    #[must_use]
    pub fn with_host(
        deps_dir: &Path,
        platform: &Platform,
        jobs: usize,
        vars: &Vars,
        host: HostConvention,
    ) -> Self {
        // built-in tokens win over [vars] of the same name
        let mut values = vars.clone();
        values.insert("deps".into(), deps_dir.display().to_string());
        values.insert("move".into(), host.move_command.to_string());
        values.insert("jobs".into(), jobs.to_string());
        values.insert("platform".into(), platform.tag());
        Self { values, host }
    }

    /// Renders one argument.
    #[must_use]
    pub fn render(&self, arg: &str) -> String {
        let rendered = token_regex().replace_all(arg, |caps: &Captures<'_>| {
            self.values
                .get(&caps[1])
                .map_or_else(|| caps[0].to_string(), Clone::clone)
        });

        if arg.contains(DEPS_TOKEN) {
            self.normalize_separators(&rendered)
        } else {
            rendered.into_owned()
        }
    }

    /// Renders an argument that names a path.
    #[must_use]
    pub fn render_path(&self, arg: &str) -> PathBuf {
        PathBuf::from(self.render(arg))
    }

    /// Renders a whole argument vector.
    #[must_use]
    pub fn render_argv(&self, argv: &[String]) -> Vec<String> {
        argv.iter().map(|arg| self.render(arg)).collect()
    }

    fn normalize_separators(&self, value: &str) -> String {
        value
            .chars()
            .map(|c| {
                if c == '/' || c == '\\' {
                    self.host.separator
                } else {
                    c
                }
            })
            .collect()
    }
}
