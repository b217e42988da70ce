// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |        build / list / exports
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  deps.toml + TOML layers  |
//!              '--+---------------------+--'
//!                 |                     |
//!                 v                     v
//!             pipeline               exports
//!      registry -> runner ->      dumpbin / nm
//!      collector -> cleanup         -> C loader
//!                 |
//!            steps (tools)
//!       command / download / move
//!                 |
//!                 v
//!                net
//!
//!   +-----------------------------------------+
//!   |  core   process, platform               |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod exports;
pub mod logging;
pub mod net;
pub mod pipeline;
pub mod utility;
