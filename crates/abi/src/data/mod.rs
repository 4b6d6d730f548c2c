// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Struct layouts of serialized host objects
//!
//! Field order is part of the contract with the native engine. Every layout
//! here is written into 8-byte aligned slots of a flat array.

pub mod diagnostic;
pub mod list;
pub mod semantic;
pub mod syntax;
pub mod token;

pub use diagnostic::*;
pub use list::*;
pub use semantic::*;
pub use syntax::*;
pub use token::*;

#[cfg(all(test, target_pointer_width = "64"))]
mod tests {
	use core::mem::{align_of, offset_of, size_of};

	use super::*;
	use crate::CapabilityFFI;

	#[test]
	fn test_layout_sizes() {
		assert_eq!(size_of::<TokenFFI>(), 48);
		assert_eq!(size_of::<ListFFI>(), 16);
		assert_eq!(size_of::<CapabilityFFI>(), 16);
		assert_eq!(size_of::<ParseResultFFI>(), 24);
		assert_eq!(size_of::<SyntaxNodeFFI>(), 48);
		assert_eq!(size_of::<TextSpanFFI>(), 8);
		assert_eq!(size_of::<DiagnosticFFI>(), 32);
		assert_eq!(size_of::<ErrorCodeFFI>(), 8);
		assert_eq!(size_of::<DiagnosticArgumentFFI>(), 16);
		assert_eq!(size_of::<SemanticModelFFI>(), 48);
		assert_eq!(size_of::<SemanticSymbolFFI>(), 80);
	}

	#[test]
	fn test_layouts_fit_flat_array_slots() {
		assert!(align_of::<TokenFFI>() <= crate::FLAT_ARRAY_ALIGN);
		assert!(align_of::<SemanticSymbolFFI>() <= crate::FLAT_ARRAY_ALIGN);
		assert!(align_of::<TextSpanFFI>() <= crate::FLAT_ARRAY_ALIGN);
	}

	#[test]
	fn test_token_field_offsets() {
		assert_eq!(offset_of!(TokenFFI, kind), 0);
		assert_eq!(offset_of!(TokenFFI, ty), 20);
		assert_eq!(offset_of!(TokenFFI, value1), 24);
		assert_eq!(offset_of!(TokenFFI, value2), 32);
		assert_eq!(offset_of!(TokenFFI, value3), 40);
	}

	#[test]
	fn test_symbol_field_offsets() {
		assert_eq!(offset_of!(SemanticSymbolFFI, param4), 48);
		assert_eq!(offset_of!(SemanticSymbolFFI, name), 56);
		assert_eq!(offset_of!(SemanticSymbolFFI, construct), 64);
		assert_eq!(offset_of!(SemanticSymbolFFI, kind), 72);
		assert_eq!(offset_of!(SemanticSymbolFFI, flags), 76);
	}
}
