// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{ffi::CStr, path::Path};

use libloading::Library;
use syspro_abi::{
	AddTestFilterFn, ClearTestFiltersFn, HandleFFI, RegisterObjectResultFn, RegisterRegistrarFn,
	RegisterTask1SolutionFn, RegisterTask2SolutionFn, RegisterTask3SolutionFn, RegistrarFFI, RequestFFI,
	StartWebServerFn, StopWebServerFn, WaitForWebServerExitFn, WaitForWebServerExitWithTimeoutFn, symbols,
};
use tracing::{debug, instrument};

use crate::{BridgeError, Result};

/// Entry points exported by the native engine
#[derive(Debug, Clone, Copy)]
pub struct EngineVTable {
	pub register_registrar: RegisterRegistrarFn,
	pub register_object_result: RegisterObjectResultFn,
	pub register_task1_solution: RegisterTask1SolutionFn,
	pub register_task2_solution: RegisterTask2SolutionFn,
	pub register_task3_solution: RegisterTask3SolutionFn,
	pub add_test_filter: AddTestFilterFn,
	pub clear_test_filters: ClearTestFiltersFn,
	pub start_web_server: StartWebServerFn,
	pub stop_web_server: StopWebServerFn,
	pub wait_for_web_server_exit: WaitForWebServerExitFn,
	pub wait_for_web_server_exit_with_timeout: WaitForWebServerExitWithTimeoutFn,
}

/// Loaded native engine
///
/// Every entry point is resolved when the module is loaded, a module that
/// lacks one is rejected up front.
pub struct Engine {
	vtable: EngineVTable,
	// keeps the vtable's code mapped
	_library: Option<Library>,
}

fn symbol<T: Copy>(library: &Library, name: &'static [u8]) -> Result<T> {
	let symbol = unsafe { library.get::<T>(name) }.map_err(|source| BridgeError::MissingSymbol {
		name: String::from_utf8_lossy(name.strip_suffix(b"\0").unwrap_or(name)).into_owned(),
		source,
	})?;
	Ok(*symbol)
}

impl Engine {
	#[instrument(name = "engine::load", level = "debug", skip_all, fields(path = %path.display()))]
	pub fn load(path: &Path) -> Result<Engine> {
		let library = unsafe { Library::new(path) }.map_err(|source| BridgeError::Load {
			path: path.to_path_buf(),
			source,
		})?;

		let vtable = EngineVTable {
			register_registrar: symbol(&library, symbols::REGISTER_REGISTRAR)?,
			register_object_result: symbol(&library, symbols::REGISTER_OBJECT_RESULT)?,
			register_task1_solution: symbol(&library, symbols::REGISTER_TASK1_SOLUTION)?,
			register_task2_solution: symbol(&library, symbols::REGISTER_TASK2_SOLUTION)?,
			register_task3_solution: symbol(&library, symbols::REGISTER_TASK3_SOLUTION)?,
			add_test_filter: symbol(&library, symbols::ADD_TEST_FILTER)?,
			clear_test_filters: symbol(&library, symbols::CLEAR_TEST_FILTERS)?,
			start_web_server: symbol(&library, symbols::START_WEB_SERVER)?,
			stop_web_server: symbol(&library, symbols::STOP_WEB_SERVER)?,
			wait_for_web_server_exit: symbol(&library, symbols::WAIT_FOR_WEB_SERVER_EXIT)?,
			wait_for_web_server_exit_with_timeout: symbol(&library, symbols::WAIT_FOR_WEB_SERVER_EXIT_WITH_TIMEOUT)?,
		};
		debug!("native engine loaded");

		Ok(Engine {
			vtable,
			_library: Some(library),
		})
	}

	/// Engine backed by in-process entry points instead of a loaded module
	pub fn from_vtable(vtable: EngineVTable) -> Engine {
		Engine {
			vtable,
			_library: None,
		}
	}

	pub fn vtable(&self) -> &EngineVTable {
		&self.vtable
	}

	pub(crate) fn register_registrar(&self, registrar: RegistrarFFI) {
		unsafe { (self.vtable.register_registrar)(registrar) }
	}

	/// `array` only needs to outlive the call
	pub(crate) fn register_object_result(&self, request: RequestFFI, array: *const u8) {
		unsafe { (self.vtable.register_object_result)(request, array) }
	}

	pub(crate) fn register_task1_solution(&self, lexer: HandleFFI, mode: i32) {
		unsafe { (self.vtable.register_task1_solution)(lexer, mode) }
	}

	pub(crate) fn register_task2_solution(&self, parser: HandleFFI) {
		unsafe { (self.vtable.register_task2_solution)(parser) }
	}

	pub(crate) fn register_task3_solution(&self, language_server: HandleFFI) {
		unsafe { (self.vtable.register_task3_solution)(language_server) }
	}

	pub(crate) fn add_test_filter(&self, pattern: &CStr, kind: i32) {
		unsafe { (self.vtable.add_test_filter)(pattern.as_ptr(), kind) }
	}

	pub(crate) fn clear_test_filters(&self) {
		unsafe { (self.vtable.clear_test_filters)() }
	}

	pub(crate) fn start_web_server(&self, port: i32) {
		unsafe { (self.vtable.start_web_server)(port) }
	}

	pub(crate) fn stop_web_server(&self) {
		unsafe { (self.vtable.stop_web_server)() }
	}

	pub(crate) fn wait_for_web_server_exit(&self) {
		unsafe { (self.vtable.wait_for_web_server_exit)() }
	}

	pub(crate) fn wait_for_web_server_exit_with_timeout(&self, timeout_millis: i64) {
		unsafe { (self.vtable.wait_for_web_server_exit_with_timeout)(timeout_millis) }
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use syspro_abi::StringFFI;

	use super::*;

	unsafe extern "C" fn noop_registrar(_: RegistrarFFI) {}
	unsafe extern "C" fn noop_result(_: RequestFFI, _: *const u8) {}
	unsafe extern "C" fn noop_task1(_: HandleFFI, _: i32) {}
	unsafe extern "C" fn noop_handle(_: HandleFFI) {}
	unsafe extern "C" fn noop_filter(_: StringFFI, _: i32) {}
	unsafe extern "C" fn noop() {}
	unsafe extern "C" fn noop_port(_: i32) {}
	unsafe extern "C" fn noop_timeout(_: i64) {}

	pub(crate) fn noop_vtable() -> EngineVTable {
		EngineVTable {
			register_registrar: noop_registrar,
			register_object_result: noop_result,
			register_task1_solution: noop_task1,
			register_task2_solution: noop_handle,
			register_task3_solution: noop_handle,
			add_test_filter: noop_filter,
			clear_test_filters: noop,
			start_web_server: noop_port,
			stop_web_server: noop,
			wait_for_web_server_exit: noop,
			wait_for_web_server_exit_with_timeout: noop_timeout,
		}
	}

	#[test]
	fn test_load_missing_module_fails() {
		let path = std::env::temp_dir().join("syspro-bridge-no-such-module.so");
		let Err(err) = Engine::load(&path) else {
			panic!("expected load failure");
		};
		assert!(matches!(err, BridgeError::Load { .. }));
		assert!(err.to_string().contains("syspro-bridge-no-such-module"));
	}
}
