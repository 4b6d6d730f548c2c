// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Native engine module lifecycle
//!
//! Resolves the platform-specific engine binary for this process. An explicit
//! override path is used as is. Otherwise the embedded binary for the
//! detected platform is extracted into a fresh per-process directory that is
//! marked with a lock file. Directories left behind by earlier processes are
//! reclaimed by a low-priority background sweep once their lock files no
//! longer name a live process running the same command.

pub mod config;
pub mod embedded;
pub mod error;
pub mod lock;
pub mod module;
pub mod platform;
pub mod probe;
pub mod shutdown;
pub mod sweep;
#[cfg(test)]
mod testing;

pub use config::NativeModuleConfig;
pub use embedded::EmbeddedModules;
pub use error::{NativeError, Result};
pub use lock::LockFile;
pub use module::{ModuleOrigin, NativeModule};
pub use platform::{Architecture, OperatingSystem, Platform};
pub use probe::{ProcessProbe, ProcessStatus, SystemProbe};
pub use shutdown::ShutdownHooks;
pub use sweep::{SweepReport, Sweeper};
