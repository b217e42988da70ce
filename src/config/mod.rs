// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for purpl-deps.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. embedded deps.toml (dependency manifest)
//! 2. purpl-deps.toml (cwd, unless --no-default-inis)
//! 3. --ini FILE (repeatable)
//! 4. PURPL_DEPS_* env vars
//! 5. --set section/key=value and flag overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! PURPL_DEPS_GLOBAL__DRY=true         → global.dry = true
//! PURPL_DEPS_GLOBAL__KEEP_SRC=true    → global.keep_src = true
//! PURPL_DEPS_PATHS__ROOT=/out         → paths.root = "/out"
//! ```
//!
//! Arrays are replaced, not merged: a layer that declares `[[deps]]`
//! replaces the whole embedded manifest.

pub mod loader;
pub mod manifest;
pub mod paths;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::core::platform::Platform;
use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use manifest::DependencySpec;
use paths::PathsConfig;
use types::{Aliases, GlobalConfig, Vars};

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Output tree location.
    pub paths: PathsConfig,
    /// Template variables.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub vars: Vars,
    /// Dependency aliases.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub aliases: Aliases,
    /// Dependency manifest, in execution order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deps: Vec<DependencySpec>,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use purpl_deps::config::Config;
    ///
    /// let config = Config::builder()
    ///     .with_builtin_manifest()
    ///     .add_toml_file_optional("purpl-deps.toml")
    ///     .with_env_prefix("PURPL_DEPS")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML, does not match the
    /// `Config` structure, or fails validation.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Resolves the platform from `global.platform` or the host.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured tag is malformed.
    pub fn platform(&self) -> Result<Platform> {
        Ok(Platform::resolve(self.global.platform.as_deref())?)
    }

    /// Dependencies whose platform filter matches the tag, in manifest order.
    pub fn dependencies_for<'a>(
        &'a self,
        platform: &Platform,
    ) -> impl Iterator<Item = &'a DependencySpec> + use<'a> {
        let tag = platform.tag();
        self.deps.iter().filter(move |dep| dep.supports(&tag))
    }

    /// Looks up a dependency by exact name.
    #[must_use]
    pub fn dependency(&self, name: &str) -> Option<&DependencySpec> {
        self.deps.iter().find(|dep| dep.name == name)
    }

    /// Validate the merged configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for duplicate dependency names, malformed
    /// steps, invalid globs, a malformed platform tag or `jobs = 0`.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for dep in &self.deps {
            dep.validate()?;
            if !seen.insert(dep.name.as_str()) {
                return Err(ConfigError::DuplicateDependency(dep.name.clone()).into());
            }
        }

        if self.global.jobs == Some(0) {
            return Err(ConfigError::InvalidValue {
                section: "global".to_string(),
                key: "jobs".to_string(),
                message: "must be at least 1".to_string(),
            }
            .into());
        }

        if let Some(tag) = &self.global.platform {
            tag.parse::<Platform>()?;
        }

        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        options.insert("paths.root".into(), self.paths.root.display().to_string());
        for (name, value) in &self.vars {
            options.insert(format!("vars.{name}"), value.clone());
        }
        for (name, targets) in &self.aliases {
            options.insert(format!("aliases.{name}"), targets.join(", "));
        }
        options.insert(
            "deps".into(),
            self.deps
                .iter()
                .map(|dep| dep.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        );

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        let global = &self.global;
        options.insert("global.dry".into(), global.dry.to_string());
        options.insert("global.keep_src".into(), global.keep_src.to_string());
        options.insert(
            "global.skip_download".into(),
            global.skip_download.to_string(),
        );
        options.insert("global.assume_yes".into(), global.assume_yes.to_string());
        options.insert(
            "global.output_log_level".into(),
            global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert(
            "global.platform".into(),
            global.platform.clone().unwrap_or_default(),
        );
        options.insert("global.jobs".into(), global.jobs().to_string());
    }
}
