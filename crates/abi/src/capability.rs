// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Callbacks native code uses to re-enter the host
//!
//! Every polymorphic capability of a host object is exposed as a pair of the
//! object's handle and a trampoline. The trampoline resolves the handle on the
//! host side and dispatches to the concrete implementation.

use crate::handle::{HandleFFI, RequestFFI, StringFFI};

/// Trampoline taking a handle and a string, returning a handle
///
/// Used for lexing, parsing, building a semantic model and looking up a type.
/// Returns `NULL_HANDLE` when the callee produced no object or failed.
pub type TextTrampolineFFI = extern "C" fn(implementation: HandleFFI, text: StringFFI) -> HandleFFI;

/// Trampoline constructing a generic type instantiation from type arguments
///
/// # Parameters
/// - `implementation`: Handle of the generic type definition
/// - `count`: Number of type argument handles
/// - `arguments`: Pointer to `count` contiguous handles
pub type ConstructTrampolineFFI =
	extern "C" fn(implementation: HandleFFI, count: i32, arguments: *const HandleFFI) -> HandleFFI;

/// Host callback the engine calls to request serialized objects
///
/// # Parameters
/// - `request`: Identifier echoed back in `RegisterObjectResult`
/// - `kind`: Descriptor number in catalog order
/// - `count`: Number of handles
/// - `handles`: Pointer to `count` contiguous handles
pub type RegistrarFFI = extern "C" fn(request: RequestFFI, kind: i32, count: i32, handles: *const HandleFFI);

/// Lexer, parser or language server exposed to native code
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct CapabilityFFI {
	/// Handle of the implementation object
	pub implementation: HandleFFI,
	/// Entry point dispatching to the implementation
	pub trampoline: Option<TextTrampolineFFI>,
}
