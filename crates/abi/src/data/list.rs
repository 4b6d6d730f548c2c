// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

/// Header of a variable-length list
///
/// `data` points to a flat array: an `i64` element count followed by `size`
/// handle slots.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ListFFI {
	pub size: i32,
	pub padding: i32,
	pub data: *const u8,
}
