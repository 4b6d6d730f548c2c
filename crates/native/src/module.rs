// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fs,
	path::{Path, PathBuf},
	sync::Arc,
	thread::JoinHandle,
};

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
	EmbeddedModules, NativeError, NativeModuleConfig, Platform, Result,
	config::TEMP_DIR_PREFIX,
	lock::LockFile,
	probe::{ProcessProbe, current_command_line},
	shutdown::ShutdownHooks,
	sweep::{SweepReport, Sweeper},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleOrigin {
	/// Taken from the configured override, nothing was extracted
	Configured,
	Extracted {
		directory: PathBuf,
		lock: LockFile,
	},
}

/// Native engine binary resolved for this process
#[derive(Debug)]
pub struct NativeModule {
	path: PathBuf,
	origin: ModuleOrigin,
}

impl NativeModule {
	/// Resolve the module for the platform this process runs on
	pub fn resolve(
		config: &NativeModuleConfig,
		embedded: &EmbeddedModules,
		probe: &dyn ProcessProbe,
	) -> Result<NativeModule> {
		if let Some(module) = Self::configured(config)? {
			return Ok(module);
		}
		Self::extract(config, embedded, probe, Platform::current()?)
	}

	fn configured(config: &NativeModuleConfig) -> Result<Option<NativeModule>> {
		let Some(path) = &config.library_override else {
			return Ok(None);
		};
		if !path.exists() {
			return Err(NativeError::MissingOverride(path.clone()));
		}
		info!(path = %path.display(), "using configured native module");
		Ok(Some(NativeModule {
			path: path.clone(),
			origin: ModuleOrigin::Configured,
		}))
	}

	/// Extract the embedded binary for `platform` into a fresh directory and lock it
	#[instrument(name = "native::extract", level = "debug", skip(config, embedded, probe))]
	pub fn extract(
		config: &NativeModuleConfig,
		embedded: &EmbeddedModules,
		probe: &dyn ProcessProbe,
		platform: Platform,
	) -> Result<NativeModule> {
		let bytes = embedded.require(platform)?;

		let directory = config.temp_root.join(format!("{TEMP_DIR_PREFIX}{}", Uuid::new_v4().simple()));
		fs::create_dir_all(&directory).map_err(NativeError::io(format!("creating {}", directory.display())))?;

		let lock = LockFile::create(&directory, std::process::id(), &current_command_line(probe))?;

		let path = directory.join(platform.library_file_name());
		if !path.exists() {
			fs::write(&path, bytes.as_ref()).map_err(NativeError::io(format!("writing {}", path.display())))?;
		}
		debug!(path = %path.display(), %platform, "extracted native module");

		Ok(NativeModule {
			path,
			origin: ModuleOrigin::Extracted {
				directory,
				lock,
			},
		})
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn origin(&self) -> &ModuleOrigin {
		&self.origin
	}

	pub fn directory(&self) -> Option<&Path> {
		match &self.origin {
			ModuleOrigin::Configured => None,
			ModuleOrigin::Extracted {
				directory,
				..
			} => Some(directory),
		}
	}

	/// Release the lock file on shutdown and sweep stale sibling directories in the background
	///
	/// Configured modules need neither.
	pub fn register_cleanup(
		&self,
		config: &NativeModuleConfig,
		hooks: &ShutdownHooks,
		probe: Arc<dyn ProcessProbe>,
	) -> Option<JoinHandle<SweepReport>> {
		let ModuleOrigin::Extracted {
			directory,
			lock,
		} = &self.origin
		else {
			return None;
		};

		let lock = lock.clone();
		hooks.register("native module lock", move || {
			let _ = lock.release();
		});

		let sweeper = Sweeper::new(&config.temp_root, TEMP_DIR_PREFIX, probe)
			.exclude(directory.clone())
			.grace(config.sweep_grace);
		match sweeper.spawn() {
			Ok(handle) => Some(handle),
			Err(e) => {
				warn!(?e, "failed to start native module sweep");
				None
			}
		}
	}
}
