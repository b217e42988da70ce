// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Dependency selection by name, glob or alias.
//!
//! ```text
//! input ["graphics", "s*"]
//!   resolve_aliases: "graphics" --> [bgfx, glew, sdl2, vulkan]
//!   match_pattern:   "s*"       --> [sdl2, stb]
//!   dedupe, manifest order
//! ```
//!
//! Only dependencies registered for the current platform take part, so an
//! alias naming a Windows-only dependency silently skips it elsewhere.

use std::collections::BTreeSet;

use anyhow::Context;
use wax::{Glob, Program};

use crate::config::types::Aliases;
use crate::error::{ConfigError, Result};

/// Registry for looking up dependencies by name or pattern.
pub struct DependencyRegistry {
    /// Available dependency names, in manifest order.
    names: Vec<String>,

    /// Aliases mapping names to dependency patterns.
    aliases: Aliases,
}

impl DependencyRegistry {
    /// Creates a new `DependencyRegistry`.
    #[must_use]
    pub const fn new(aliases: Aliases) -> Self {
        Self {
            names: Vec::new(),
            aliases,
        }
    }

    /// Registers a dependency name. Duplicates are ignored.
    pub fn register(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.names.contains(&name) {
            self.names.push(name);
        }
    }

    /// Registers multiple dependency names.
    pub fn register_all(&mut self, names: impl IntoIterator<Item = impl Into<String>>) {
        for name in names {
            self.register(name);
        }
    }

    /// Returns all registered names in manifest order.
    #[must_use]
    pub fn all(&self) -> &[String] {
        &self.names
    }

    /// Expands aliases, recursively. A cyclic alias expands once.
    #[must_use]
    pub fn resolve_aliases(&self, patterns: &[String]) -> Vec<String> {
        let mut result = Vec::new();
        self.expand_into(patterns, &mut Vec::new(), &mut result);
        result
    }

    fn expand_into<'a>(
        &'a self,
        patterns: &'a [String],
        stack: &mut Vec<&'a str>,
        result: &mut Vec<String>,
    ) {
        for pattern in patterns {
            match self.aliases.get(pattern) {
                Some(targets) if !stack.contains(&pattern.as_str()) => {
                    stack.push(pattern);
                    self.expand_into(targets, stack, result);
                    stack.pop();
                }
                Some(_) => tracing::warn!(alias = %pattern, "Ignoring cyclic alias"),
                None => result.push(pattern.clone()),
            }
        }
    }

    /// Matches a name or glob against registered dependencies.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is not a valid glob.
    pub fn match_pattern(&self, pattern: &str) -> Result<Vec<String>> {
        if self.names.iter().any(|name| name == pattern) {
            return Ok(vec![pattern.to_string()]);
        }

        let glob =
            Glob::new(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))?;

        Ok(self
            .names
            .iter()
            .filter(|name| glob.is_match(name.as_str()))
            .cloned()
            .collect())
    }

    /// Resolves a selection to concrete dependency names.
    ///
    /// An empty selection selects everything. The result is deduplicated
    /// and in manifest order.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError::InvalidValue`] if a pattern matches no
    /// dependency, or an error for an invalid glob.
    pub fn resolve(&self, specs: &[String]) -> Result<Vec<String>> {
        if specs.is_empty() {
            return Ok(self.names.clone());
        }

        let mut selected = BTreeSet::new();
        for spec in specs {
            let is_alias = self.aliases.contains_key(spec);
            for pattern in self.resolve_aliases(std::slice::from_ref(spec)) {
                let matches = self.match_pattern(&pattern)?;
                if matches.is_empty() {
                    if !is_alias {
                        return Err(ConfigError::InvalidValue {
                            section: "deps".to_string(),
                            key: pattern,
                            message: "matches no dependency for this platform".to_string(),
                        }
                        .into());
                    }
                    tracing::debug!(
                        alias = %spec,
                        pattern = %pattern,
                        "Alias target not available"
                    );
                }
                selected.extend(matches);
            }
        }

        Ok(self
            .names
            .iter()
            .filter(|name| selected.contains(*name))
            .cloned()
            .collect())
    }
}
