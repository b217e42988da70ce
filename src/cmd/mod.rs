// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   build, list, platform/options/inis (config), exports
//! ```

pub mod build;
pub mod config;
pub mod exports;
pub mod list;
