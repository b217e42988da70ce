// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Dependency manifest types (`[[deps]]` tables).
//!
//! ```toml
//! [[deps]]
//! name = "glew"
//! platforms = ["*"]
//! fetch = { download = "https://.../glew-<glew_version>.tgz", to = "<deps>/glew.tar.gz" }
//! setup = [
//!   { run = ["tar", "xf", "<deps>/glew.tar.gz", "-C", "<deps>"] },
//!   { run = ["<move>", "<deps>/glew-<glew_version>", "<deps>/glew"] },
//! ]
//! build = { run = ["cmake", "--build", "<deps>/build/glew", "-j<jobs>"] }
//!
//! [[deps.include]]
//! dir = "<deps>/glew/include"
//!
//! [[deps.output]]
//! from = "<deps>/build/glew/lib/libGLEW.so.2.2"
//! to = "libGLEW.so.2.2"
//! platforms = ["linux-*"]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wax::{Glob, Program as _};

use crate::error::ConfigError;
use crate::utility::encoding::Encoding;

fn all_platforms() -> Vec<String> {
    vec!["*".to_string()]
}

/// Returns whether any of the platform globs matches the tag.
///
/// Invalid globs never match; [`DependencySpec::validate`] reports them.
#[must_use]
pub fn matches_platform(patterns: &[String], tag: &str) -> bool {
    patterns.iter().any(|pattern| {
        pattern == tag || Glob::new(pattern).is_ok_and(|glob| glob.is_match(tag))
    })
}

/// One external library: how to fetch, set up and build it, and what to keep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DependencySpec {
    /// Unique name, used for selection and in error reports.
    pub name: String,
    /// Platform tag globs this dependency applies to.
    pub platforms: Vec<String>,
    /// Fetch step, skipped by `--skip-download`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch: Option<StepSpec>,
    /// Setup steps, run in order after the fetch.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub setup: Vec<StepSpec>,
    /// Build step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<StepSpec>,
    /// Header directories collected into `include/`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<IncludeRule>,
    /// Built artifacts collected into `bin/`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub output: Vec<OutputRule>,
}

impl Default for DependencySpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            platforms: all_platforms(),
            fetch: None,
            setup: Vec::new(),
            build: None,
            include: Vec::new(),
            output: Vec::new(),
        }
    }
}

impl DependencySpec {
    /// Whether this dependency applies to the platform tag.
    #[must_use]
    pub fn supports(&self, tag: &str) -> bool {
        matches_platform(&self.platforms, tag)
    }

    /// Steps that run on the platform tag, with their stage names.
    ///
    /// Setup indices are manifest indices, so a filtered step leaves a gap.
    pub fn steps_for<'a>(
        &'a self,
        tag: &str,
    ) -> impl Iterator<Item = (String, &'a StepSpec)> + use<'a> {
        let tag = tag.to_string();
        self.steps()
            .filter(move |(_, step)| matches_platform(&step.platforms, &tag))
    }

    /// Iterates over the steps with their stage names, in execution order.
    pub fn steps(&self) -> impl Iterator<Item = (String, &StepSpec)> {
        let fetch = self.fetch.iter().map(|s| ("fetch".to_string(), s));
        let setup = self
            .setup
            .iter()
            .enumerate()
            .map(|(i, s)| (format!("setup[{i}]"), s));
        let build = self.build.iter().map(|s| ("build".to_string(), s));
        fetch.chain(setup).chain(build)
    }

    /// Checks names, platform globs and every step.
    ///
    /// # Errors
    ///
    /// Returns the first problem found as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::MissingKey {
                section: "deps".to_string(),
                key: "name".to_string(),
            });
        }

        let globs = self
            .platforms
            .iter()
            .chain(self.include.iter().flat_map(|r| &r.platforms))
            .chain(self.output.iter().flat_map(|r| &r.platforms))
            .chain(self.steps().flat_map(|(_, s)| &s.platforms));
        for pattern in globs {
            Glob::new(pattern).map_err(|e| ConfigError::InvalidValue {
                section: format!("deps.{}", self.name),
                key: "platforms".to_string(),
                message: format!("invalid glob '{pattern}': {e}"),
            })?;
        }

        for (stage, step) in self.steps() {
            step.validate().map_err(|message| ConfigError::InvalidStep {
                dependency: self.name.clone(),
                stage,
                message,
            })?;
        }

        Ok(())
    }
}

/// What a step does once validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction<'a> {
    /// Run a program with arguments (argv, no shell).
    Run(&'a [String]),
    /// Download a URL to a file.
    Download { url: &'a str, to: &'a str },
}

/// A single fetch/setup/build step.
///
/// Exactly one of `run` or `download` must be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StepSpec {
    /// Program and arguments. `<move>` as the program is the built-in rename.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub run: Vec<String>,
    /// URL to download.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download: Option<String>,
    /// Destination of a download.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Working directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
    /// Extra environment variables.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    /// Skip the step when this path exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creates: Option<String>,
    /// Kill the step after this many seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Encoding of the program's console output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<Encoding>,
    /// Platform tag globs this step runs on.
    pub platforms: Vec<String>,
}

impl Default for StepSpec {
    fn default() -> Self {
        Self {
            run: Vec::new(),
            download: None,
            to: None,
            cwd: None,
            env: BTreeMap::new(),
            creates: None,
            timeout_secs: None,
            encoding: None,
            platforms: all_platforms(),
        }
    }
}

impl StepSpec {
    /// Creates a `run` step from an argument vector.
    pub fn run<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            run: argv.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Creates a `download` step.
    pub fn download(url: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            download: Some(url.into()),
            to: Some(to.into()),
            ..Self::default()
        }
    }

    /// Returns the action, or `None` if the step is malformed.
    #[must_use]
    pub fn action(&self) -> Option<StepAction<'_>> {
        match (&self.download, &self.to) {
            (Some(url), Some(to)) if self.run.is_empty() => Some(StepAction::Download { url, to }),
            (None, _) if !self.run.is_empty() => Some(StepAction::Run(&self.run)),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), String> {
        match (&self.download, self.run.is_empty()) {
            (Some(_), false) => Err("'run' and 'download' are mutually exclusive".to_string()),
            (Some(_), true) if self.to.is_none() => Err("'download' requires 'to'".to_string()),
            (None, true) => Err("expected 'run' or 'download'".to_string()),
            (None, false) if self.run[0].trim().is_empty() => {
                Err("'run' has an empty program".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// Header directory copied into `include/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IncludeRule {
    /// Source directory (templated).
    pub dir: String,
    /// Copy only the headers directly inside `dir`, no subdirectories.
    #[serde(default)]
    pub one_level: bool,
    /// Skip with a warning instead of failing when `dir` is missing.
    #[serde(default)]
    pub optional: bool,
    /// Platform tag globs this rule applies to.
    #[serde(default = "all_platforms")]
    pub platforms: Vec<String>,
}

impl IncludeRule {
    #[must_use]
    pub fn new(dir: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            one_level: false,
            optional: false,
            platforms: all_platforms(),
        }
    }

    #[must_use]
    pub const fn one_level(mut self, one_level: bool) -> Self {
        self.one_level = one_level;
        self
    }

    #[must_use]
    pub const fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }
}

/// Built artifact copied into `bin/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputRule {
    /// Source file (templated).
    pub from: String,
    /// Destination, relative to `bin/`.
    pub to: String,
    /// Overrides the trailing-digit symlink heuristic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_symlinks: Option<bool>,
    /// Skip with a warning instead of failing when `from` is missing.
    #[serde(default)]
    pub optional: bool,
    /// Platform tag globs this rule applies to.
    #[serde(default = "all_platforms")]
    pub platforms: Vec<String>,
}

impl OutputRule {
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            follow_symlinks: None,
            optional: false,
            platforms: all_platforms(),
        }
    }

    #[must_use]
    pub const fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = Some(follow);
        self
    }

    #[must_use]
    pub const fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Whether copying dereferences a symlink source.
    ///
    /// Versioned shared-library names (`libfoo.so.0`) end in a digit and
    /// are followed; anything else keeps the link.
    #[must_use]
    pub fn follows_symlinks(&self) -> bool {
        self.follow_symlinks
            .unwrap_or_else(|| self.from.ends_with(|c: char| c.is_ascii_digit()))
    }
}
