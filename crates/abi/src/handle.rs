// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use core::ffi::c_char;

/// Opaque identity of a host object as seen by native code
pub type HandleFFI = i64;

/// Handle reserved for "no object"
pub const NULL_HANDLE: HandleFFI = 0;

/// Request identifier chosen by the engine when it asks the host to serialize objects
pub type RequestFFI = i64;

/// NUL-terminated UTF-8 string, or null
pub type StringFFI = *const c_char;
