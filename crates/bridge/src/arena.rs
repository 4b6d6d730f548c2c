// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{alloc::Layout, ffi::c_char, ptr};

use bumpalo::Bump;
use syspro_abi::FLAT_ARRAY_ALIGN;

use crate::{BridgeError, Result};

/// Scratch memory handed to native code for the duration of one crossing
///
/// All allocations are zeroed and aligned to 8 bytes. Memory stays valid
/// until the arena is cleared or dropped.
pub struct Arena {
	bump: Bump,
}

impl Arena {
	pub fn new() -> Self {
		Self {
			bump: Bump::new(),
		}
	}

	pub fn alloc(&mut self, size: usize) -> Result<*mut u8> {
		let layout = Layout::from_size_align(size, FLAT_ARRAY_ALIGN).map_err(|_| BridgeError::Allocation(size))?;
		let ptr = self.bump.try_alloc_layout(layout).map_err(|_| BridgeError::Allocation(size))?.as_ptr();
		unsafe { ptr::write_bytes(ptr, 0, size) };
		Ok(ptr)
	}

	/// NUL-terminated copy of `value`
	pub fn copy_c_string(&mut self, value: &str) -> Result<*const c_char> {
		if value.as_bytes().contains(&0) {
			return Err(BridgeError::InteriorNul);
		}
		// the extra byte stays zero
		let ptr = self.alloc(value.len() + 1)?;
		unsafe { ptr::copy_nonoverlapping(value.as_ptr(), ptr, value.len()) };
		Ok(ptr.cast_const().cast())
	}

	pub fn allocated_bytes(&self) -> usize {
		self.bump.allocated_bytes()
	}

	pub fn clear(&mut self) {
		self.bump.reset();
	}
}

impl Default for Arena {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use std::ffi::CStr;

	use super::*;

	#[test]
	fn test_alloc_is_zeroed_and_aligned() {
		let mut arena = Arena::new();
		let ptr = arena.alloc(13).unwrap();
		assert_eq!(ptr as usize % FLAT_ARRAY_ALIGN, 0);
		let bytes = unsafe { std::slice::from_raw_parts(ptr, 13) };
		assert!(bytes.iter().all(|b| *b == 0));
	}

	#[test]
	fn test_copy_c_string() {
		let mut arena = Arena::new();
		let ptr = arena.copy_c_string("héllo").unwrap();
		assert_eq!(unsafe { CStr::from_ptr(ptr) }.to_str().unwrap(), "héllo");
	}

	#[test]
	fn test_interior_nul_rejected() {
		let mut arena = Arena::new();
		assert!(matches!(arena.copy_c_string("a\0b"), Err(BridgeError::InteriorNul)));
	}

	#[test]
	fn test_clear_zeroes_reused_memory() {
		let mut arena = Arena::new();
		arena.copy_c_string("dirty").unwrap();
		assert!(arena.allocated_bytes() > 0);

		arena.clear();
		let ptr = arena.alloc(6).unwrap();
		assert!(unsafe { std::slice::from_raw_parts(ptr, 6) }.iter().all(|b| *b == 0));
	}
}
