// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Process-wide bridge backed by the embedded native engine

use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use syspro_native::{EmbeddedModules, NativeModule, NativeModuleConfig, ShutdownHooks, SystemProbe};
use tracing::{error, info, instrument};

use crate::{Bridge, BridgeError, BridgeScope, Result, engine::Engine, fatal::FATAL_EXIT_CODE};

/// Scope of the process-wide bridge
pub struct Global;

static GLOBAL: OnceLock<Bridge> = OnceLock::new();
static INIT: Mutex<()> = Mutex::new(());

impl BridgeScope for Global {
	fn cell() -> &'static OnceLock<Bridge> {
		&GLOBAL
	}
}

#[derive(Debug, Clone, Default)]
pub struct BridgeConfig {
	pub native: NativeModuleConfig,
	pub embedded: EmbeddedModules,
}

impl BridgeConfig {
	pub fn new() -> Self {
		Self::default()
	}

	/// Native module settings taken from the environment
	pub fn from_env() -> Self {
		Self {
			native: NativeModuleConfig::from_env(),
			embedded: EmbeddedModules::new(),
		}
	}

	pub fn with_native(mut self, native: NativeModuleConfig) -> Self {
		self.native = native;
		self
	}

	pub fn with_embedded(mut self, embedded: EmbeddedModules) -> Self {
		self.embedded = embedded;
		self
	}
}

/// Resolve and load the native engine, then install the process-wide bridge
///
/// Succeeds once per process.
#[instrument(name = "bridge::init", level = "debug", skip_all)]
pub fn init(config: BridgeConfig) -> Result<&'static Bridge> {
	let _guard = INIT.lock();
	if Global::bridge().is_some() {
		return Err(BridgeError::AlreadyInitialized);
	}

	let probe = Arc::new(SystemProbe);
	let module = NativeModule::resolve(&config.native, &config.embedded, probe.as_ref())?;
	// the sweep runs detached, nothing waits for it
	let _ = module.register_cleanup(&config.native, ShutdownHooks::global(), probe);

	let engine = Engine::load(module.path())?;
	info!(path = %module.path().display(), "native engine ready");
	Global::install(Bridge::new::<Global>(engine))
}

/// The process-wide bridge, initialized from the environment on first use
///
/// Terminates the process when the engine cannot be loaded.
pub fn global() -> &'static Bridge {
	if let Some(bridge) = Global::bridge() {
		return bridge;
	}
	match init(BridgeConfig::from_env()) {
		Ok(bridge) => bridge,
		Err(e) => match Global::bridge() {
			Some(bridge) => bridge,
			None => startup_failure(&e),
		},
	}
}

fn startup_failure(e: &BridgeError) -> ! {
	error!(error = %e, "failed to start the native engine");
	eprintln!("Failed to start the native engine: {e}");
	std::process::exit(FATAL_EXIT_CODE)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_init_without_module_fails() {
		let config = BridgeConfig::new().with_native(
			NativeModuleConfig::new().with_library_override(std::env::temp_dir().join("syspro-bridge-missing.so")),
		);
		let err = init(config).unwrap_err();
		assert!(matches!(err, BridgeError::Native(syspro_native::NativeError::MissingOverride(_))));
		assert!(Global::bridge().is_none());
	}
}
