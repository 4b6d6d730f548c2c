// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{env, path::PathBuf, time::Duration};

/// Environment variable naming an explicit native module file
pub const LIBRARY_OVERRIDE_ENV: &str = "SYSPRO_TM_LIBRARY";

/// Name prefix of every per-process extraction directory
pub const TEMP_DIR_PREFIX: &str = "SysPro.TM.Rust-";

const DEFAULT_SWEEP_GRACE: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct NativeModuleConfig {
	/// Use this file instead of extracting the embedded module
	pub library_override: Option<PathBuf>,
	/// Directory extraction directories are created in
	pub temp_root: PathBuf,
	/// Directories modified more recently than this are never swept
	pub sweep_grace: Duration,
}

impl Default for NativeModuleConfig {
	fn default() -> Self {
		Self {
			library_override: None,
			temp_root: env::temp_dir(),
			sweep_grace: DEFAULT_SWEEP_GRACE,
		}
	}
}

impl NativeModuleConfig {
	pub fn new() -> Self {
		Self::default()
	}

	/// Defaults, with the override taken from `SYSPRO_TM_LIBRARY` when set and non-empty
	pub fn from_env() -> Self {
		let library_override = env::var_os(LIBRARY_OVERRIDE_ENV).filter(|v| !v.is_empty()).map(PathBuf::from);
		Self {
			library_override,
			..Self::default()
		}
	}

	pub fn with_library_override(mut self, path: impl Into<PathBuf>) -> Self {
		self.library_override = Some(path.into());
		self
	}

	pub fn with_temp_root(mut self, path: impl Into<PathBuf>) -> Self {
		self.temp_root = path.into();
		self
	}

	pub fn with_sweep_grace(mut self, grace: Duration) -> Self {
		self.sweep_grace = grace;
		self
	}
}
