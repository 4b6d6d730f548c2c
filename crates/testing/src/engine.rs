// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! In-process stand-in for the native engine
//!
//! Entry points record what they are called with in thread-local state, so
//! every test observes only its own calls. A test installs its own
//! [`BridgeScope`] on its own thread and talks to it through [`request`].

use std::{
	cell::{Cell, RefCell},
	ffi::{CStr, c_char},
	rc::Rc,
};

use syspro_abi::{FLAT_ARRAY_ALIGN, FLAT_ARRAY_HEADER_SIZE, HandleFFI, ListFFI, RegistrarFFI, RequestFFI, StringFFI};
use syspro_bridge::{Bridge, BridgeScope, DescriptorKind, Engine, EngineVTable};
use syspro_native::ShutdownHooks;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
	RegisterRegistrar,
	RegisterObjectResult {
		request: RequestFFI,
		count: i64,
	},
	RegisterTask1Solution {
		lexer: HandleFFI,
		mode: i32,
	},
	RegisterTask2Solution {
		parser: HandleFFI,
	},
	RegisterTask3Solution {
		language_server: HandleFFI,
	},
	AddTestFilter {
		pattern: String,
		kind: i32,
	},
	ClearTestFilters,
	StartWebServer {
		port: i32,
	},
	StopWebServer,
	WaitForWebServerExit,
	WaitForWebServerExitWithTimeout {
		timeout_millis: i64,
	},
}

type Pending = (RequestFFI, Box<dyn FnOnce(*const u8)>);

thread_local! {
	static CALLS: RefCell<Vec<EngineCall>> = const { RefCell::new(Vec::new()) };
	static REGISTRAR: Cell<Option<RegistrarFFI>> = const { Cell::new(None) };
	static PENDING: RefCell<Option<Pending>> = const { RefCell::new(None) };
	static EXIT_CODE: Cell<Option<i32>> = const { Cell::new(None) };
}

fn record(call: EngineCall) {
	CALLS.with(|calls| calls.borrow_mut().push(call));
}

/// Calls recorded on this thread so far
pub fn calls() -> Vec<EngineCall> {
	CALLS.with(|calls| calls.borrow().clone())
}

pub fn take_calls() -> Vec<EngineCall> {
	CALLS.with(|calls| std::mem::take(&mut *calls.borrow_mut()))
}

/// Exit code passed to the terminator of a bridge from [`fake_bridge`], if it fired on this thread
pub fn exit_code() -> Option<i32> {
	EXIT_CODE.with(Cell::get)
}

pub fn registrar() -> Option<RegistrarFFI> {
	REGISTRAR.with(Cell::get)
}

/// Answer requests issued from this thread with `registrar`
///
/// The engine learns the registrar on the thread that installed the bridge;
/// other threads have to be handed it.
pub fn attach_registrar(registrar: RegistrarFFI) {
	REGISTRAR.with(|slot| slot.set(Some(registrar)));
}

/// Ask the host for the contents of `handles` the way the engine does
///
/// `decode` runs while the flat array is still alive. Returns `None` when the
/// host did not answer, which happens when the request failed.
pub fn request<T: 'static>(
	request: RequestFFI,
	kind: DescriptorKind,
	handles: &[HandleFFI],
	decode: impl FnOnce(*const u8) -> T + 'static,
) -> Option<T> {
	request_raw(request, kind.index(), handles, decode)
}

/// Like [`request`] with an unchecked descriptor index
pub fn request_raw<T: 'static>(
	request: RequestFFI,
	kind: i32,
	handles: &[HandleFFI],
	decode: impl FnOnce(*const u8) -> T + 'static,
) -> Option<T> {
	let registrar = registrar().expect("no registrar registered on this thread");
	let result = Rc::new(RefCell::new(None));
	let slot = result.clone();
	PENDING.with(|pending| {
		*pending.borrow_mut() = Some((request, Box::new(move |array| *slot.borrow_mut() = Some(decode(array)))));
	});

	registrar(request, kind, handles.len() as i32, handles.as_ptr());

	PENDING.with(|pending| pending.borrow_mut().take());
	result.borrow_mut().take()
}

unsafe extern "C" fn register_registrar(registrar: RegistrarFFI) {
	REGISTRAR.with(|slot| slot.set(Some(registrar)));
	record(EngineCall::RegisterRegistrar);
}

unsafe extern "C" fn register_object_result(request: RequestFFI, array: *const u8) {
	let count = unsafe { array_len(array) };
	let pending = PENDING.with(|pending| pending.borrow_mut().take());
	match pending {
		Some((expected, decode)) if expected == request => decode(array),
		Some(other) => PENDING.with(|pending| *pending.borrow_mut() = Some(other)),
		None => {}
	}
	record(EngineCall::RegisterObjectResult {
		request,
		count,
	});
}

unsafe extern "C" fn register_task1_solution(lexer: HandleFFI, mode: i32) {
	record(EngineCall::RegisterTask1Solution {
		lexer,
		mode,
	});
}

unsafe extern "C" fn register_task2_solution(parser: HandleFFI) {
	record(EngineCall::RegisterTask2Solution {
		parser,
	});
}

unsafe extern "C" fn register_task3_solution(language_server: HandleFFI) {
	record(EngineCall::RegisterTask3Solution {
		language_server,
	});
}

unsafe extern "C" fn add_test_filter(pattern: StringFFI, kind: i32) {
	record(EngineCall::AddTestFilter {
		pattern: unsafe { read_c_string(pattern) }.unwrap_or_default(),
		kind,
	});
}

unsafe extern "C" fn clear_test_filters() {
	record(EngineCall::ClearTestFilters);
}

unsafe extern "C" fn start_web_server(port: i32) {
	record(EngineCall::StartWebServer {
		port,
	});
}

unsafe extern "C" fn stop_web_server() {
	record(EngineCall::StopWebServer);
}

unsafe extern "C" fn wait_for_web_server_exit() {
	record(EngineCall::WaitForWebServerExit);
}

unsafe extern "C" fn wait_for_web_server_exit_with_timeout(timeout_millis: i64) {
	record(EngineCall::WaitForWebServerExitWithTimeout {
		timeout_millis,
	});
}

pub fn fake_vtable() -> EngineVTable {
	EngineVTable {
		register_registrar,
		register_object_result,
		register_task1_solution,
		register_task2_solution,
		register_task3_solution,
		add_test_filter,
		clear_test_filters,
		start_web_server,
		stop_web_server,
		wait_for_web_server_exit,
		wait_for_web_server_exit_with_timeout,
	}
}

pub fn fake_engine() -> Engine {
	Engine::from_vtable(fake_vtable())
}

/// Install a bridge over the fake engine into scope `S`
///
/// The bridge records its exit code instead of terminating the process and
/// keeps its shutdown hooks to itself.
pub fn fake_bridge<S: BridgeScope>() -> &'static Bridge {
	let hooks: &'static ShutdownHooks = Box::leak(Box::new(ShutdownHooks::new()));
	let bridge = Bridge::new::<S>(fake_engine())
		.with_shutdown_hooks(hooks)
		.with_terminator(|code| EXIT_CODE.with(|slot| slot.set(Some(code))));
	S::install(bridge).expect("scope already has a bridge")
}

/// Number of entries in a flat array
///
/// # Safety
/// `array` must point to a flat array.
pub unsafe fn array_len(array: *const u8) -> i64 {
	unsafe { array.cast::<i64>().read() }
}

/// Copy the entries of a flat array of `T`
///
/// # Safety
/// `array` must point to a flat array whose slots hold `T`.
pub unsafe fn read_flat_array<T: Copy>(array: *const u8) -> Vec<T> {
	let count = unsafe { array_len(array) } as usize;
	let slot_size = size_of::<T>().next_multiple_of(FLAT_ARRAY_ALIGN);
	(0..count).map(|i| unsafe { array.add(FLAT_ARRAY_HEADER_SIZE + i * slot_size).cast::<T>().read() }).collect()
}

/// Handles of a serialized list
///
/// # Safety
/// `list.data` must point to a live flat array of handles.
pub unsafe fn read_list(list: &ListFFI) -> Vec<HandleFFI> {
	unsafe { read_flat_array(list.data) }
}

/// # Safety
/// `ptr` must be null or a valid NUL-terminated string.
pub unsafe fn read_c_string(ptr: *const c_char) -> Option<String> {
	if ptr.is_null() {
		return None;
	}
	Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
}
