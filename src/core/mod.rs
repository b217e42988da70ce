// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for host detection and process management.
//!
//! ```text
//!         core
//!          |
//!     +----+-----+
//!     v          v
//!  platform   process
//!     |          |
//!  os-arch    Builder
//!  tag        Output
//! ```

pub mod platform;
pub mod process;
