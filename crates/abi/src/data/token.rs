// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use core::ptr::null;

use crate::handle::StringFFI;

/// Serialized token
///
/// The meaning of `ty` and the three payload fields depends on `kind`:
///
/// | kind        | ty               | value1     | value2   | value3                         |
/// |-------------|------------------|------------|----------|--------------------------------|
/// | identifier  | 0                | text       | 0        | contextual keyword kind or 0   |
/// | boolean     | built-in type    | null       | 1 or 0   | 0                              |
/// | integer     | built-in type    | null       | value    | 1 if a type suffix was present |
/// | rune        | built-in type    | null       | 0        | code point                     |
/// | string      | built-in type    | value      | 0        | 0                              |
///
/// All other kinds leave every payload field zeroed.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct TokenFFI {
	pub kind: i32,
	pub start: i32,
	pub end: i32,
	pub leading_trivia_length: i32,
	pub trailing_trivia_length: i32,
	pub ty: i32,
	pub value1: StringFFI,
	pub value2: i64,
	pub value3: i64,
}

impl TokenFFI {
	pub const fn empty() -> Self {
		Self {
			kind: 0,
			start: 0,
			end: 0,
			leading_trivia_length: 0,
			trailing_trivia_length: 0,
			ty: 0,
			value1: null(),
			value2: 0,
			value3: 0,
		}
	}
}
