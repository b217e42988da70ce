// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Platform tag resolution.
//!
//! ```text
//! (system, machine)          tag
//! ("Windows", "AMD64")   --> win-x64
//! ("Linux",   "x86_64")  --> linux-x64
//! ("Darwin",  "arm64")   --> mac-arm64
//! ("Linux",   "aarch64") --> linux-arm64
//! ```
//!
//! The tag namespaces the output tree (`deps/<tag>/...`) and is what the
//! `platforms` globs of the manifest are matched against.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Normalized host platform, displayed as `<os>-<arch>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform {
    os: String,
    arch: String,
}

impl Platform {
    /// Builds a platform from raw OS and machine names, normalizing both.
    #[must_use]
    pub fn from_parts(system: &str, machine: &str) -> Self {
        Self {
            os: normalize_os(system),
            arch: normalize_arch(machine),
        }
    }

    /// Detects the platform this binary was built for.
    #[must_use]
    pub fn current() -> Self {
        Self::from_parts(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Resolves the platform from an optional override tag.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` if the override is malformed.
    pub fn resolve(override_tag: Option<&str>) -> Result<Self, ConfigError> {
        match override_tag {
            Some(tag) if !tag.trim().is_empty() => tag.parse(),
            _ => Ok(Self::current()),
        }
    }

    /// Operating system part (`win`, `linux`, `mac`, ...).
    #[must_use]
    pub fn os(&self) -> &str {
        &self.os
    }

    /// Architecture part (`x64`, `arm64`, ...).
    #[must_use]
    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// The full tag, e.g. `linux-x64`.
    #[must_use]
    pub fn tag(&self) -> String {
        format!("{}-{}", self.os, self.arch)
    }

    /// Whether the tag names a Windows platform.
    #[must_use]
    pub fn is_windows(&self) -> bool {
        self.os == "win"
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

impl FromStr for Platform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidValue {
            section: "global".to_string(),
            key: "platform".to_string(),
            message: format!("expected '<os>-<arch>', got '{s}'"),
        };

        let (os, arch) = s.trim().split_once('-').ok_or_else(invalid)?;
        if os.is_empty() || arch.is_empty() {
            return Err(invalid());
        }

        // the tag becomes a directory name under the deps root
        let platform = Self::from_parts(os, arch);
        if !is_tag_part(&platform.os) || !is_tag_part(&platform.arch) {
            return Err(ConfigError::InvalidValue {
                section: "global".to_string(),
                key: "platform".to_string(),
                message: format!("'{s}' may only contain letters, digits and '_'"),
            });
        }
        Ok(platform)
    }
}

fn is_tag_part(part: &str) -> bool {
    part.bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}

fn normalize_os(system: &str) -> String {
    let system = system.trim().to_lowercase();
    match system.as_str() {
        "windows" | "win32" | "win64" => "win".to_string(),
        "darwin" | "macos" | "osx" => "mac".to_string(),
        _ => system,
    }
}

fn normalize_arch(machine: &str) -> String {
    let machine = machine.trim().to_lowercase();
    match machine.as_str() {
        "x86_64" | "amd64" => "x64".to_string(),
        "aarch64" => "arm64".to_string(),
        "i386" | "i686" => "x86".to_string(),
        _ => machine,
    }
}
