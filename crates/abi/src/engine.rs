// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Entry points exported by the native engine
//!
//! The host resolves these by name from the loaded module.

use crate::{
	capability::RegistrarFFI,
	handle::{HandleFFI, RequestFFI, StringFFI},
};

pub type RegisterRegistrarFn = unsafe extern "C" fn(registrar: RegistrarFFI);

/// Answers a registrar request with a flat array living until the call returns
pub type RegisterObjectResultFn = unsafe extern "C" fn(request: RequestFFI, array: *const u8);

pub type RegisterTask1SolutionFn = unsafe extern "C" fn(lexer: HandleFFI, mode: i32);

pub type RegisterTask2SolutionFn = unsafe extern "C" fn(parser: HandleFFI);

pub type RegisterTask3SolutionFn = unsafe extern "C" fn(language_server: HandleFFI);

pub type AddTestFilterFn = unsafe extern "C" fn(pattern: StringFFI, kind: i32);

pub type ClearTestFiltersFn = unsafe extern "C" fn();

pub type StartWebServerFn = unsafe extern "C" fn(port: i32);

pub type StopWebServerFn = unsafe extern "C" fn();

pub type WaitForWebServerExitFn = unsafe extern "C" fn();

pub type WaitForWebServerExitWithTimeoutFn = unsafe extern "C" fn(timeout_millis: i64);

/// Exported symbol names, NUL-terminated for symbol lookup
pub mod symbols {
	pub const REGISTER_REGISTRAR: &[u8] = b"RegisterRegistrar\0";
	pub const REGISTER_OBJECT_RESULT: &[u8] = b"RegisterObjectResult\0";
	pub const REGISTER_TASK1_SOLUTION: &[u8] = b"RegisterTask1Solution\0";
	pub const REGISTER_TASK2_SOLUTION: &[u8] = b"RegisterTask2Solution\0";
	pub const REGISTER_TASK3_SOLUTION: &[u8] = b"RegisterTask3Solution\0";
	pub const ADD_TEST_FILTER: &[u8] = b"AddTestFilter\0";
	pub const CLEAR_TEST_FILTERS: &[u8] = b"ClearTestFilters\0";
	pub const START_WEB_SERVER: &[u8] = b"StartWebServer\0";
	pub const STOP_WEB_SERVER: &[u8] = b"StopWebServer\0";
	pub const WAIT_FOR_WEB_SERVER_EXIT: &[u8] = b"WaitForWebServerExit\0";
	pub const WAIT_FOR_WEB_SERVER_EXIT_WITH_TIMEOUT: &[u8] = b"WaitForWebServerExitWithTimeout\0";
}
