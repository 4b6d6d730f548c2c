// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Descriptor catalog
//!
//! One descriptor per object shape. The catalog index of a descriptor is the
//! `kind` the engine passes to the registrar, and the descriptor writes an
//! object into its fixed-layout struct inside a flat array slot.

mod capability;
mod diagnostic;
mod list;
mod semantic;
mod syntax;
mod token;

use syspro_abi::{
	CapabilityFFI, DiagnosticArgumentFFI, DiagnosticFFI, ErrorCodeFFI, FLAT_ARRAY_ALIGN, ListFFI, ParseResultFFI,
	SemanticModelFFI, SemanticSymbolFFI, SyntaxNodeFFI, TextSpanFFI, TokenFFI,
};

use crate::{BridgeError, Result, context::CallContext, object::Object};

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
	Token = 0,
	List = 1,
	Lexer = 2,
	Parser = 3,
	ParseResult = 4,
	SyntaxNode = 5,
	TextSpan = 6,
	Diagnostic = 7,
	ErrorCode = 8,
	DiagnosticArgument = 9,
	LanguageServer = 10,
	SemanticModel = 11,
	SemanticSymbol = 12,
}

impl DescriptorKind {
	pub const ALL: [DescriptorKind; 13] = [
		DescriptorKind::Token,
		DescriptorKind::List,
		DescriptorKind::Lexer,
		DescriptorKind::Parser,
		DescriptorKind::ParseResult,
		DescriptorKind::SyntaxNode,
		DescriptorKind::TextSpan,
		DescriptorKind::Diagnostic,
		DescriptorKind::ErrorCode,
		DescriptorKind::DiagnosticArgument,
		DescriptorKind::LanguageServer,
		DescriptorKind::SemanticModel,
		DescriptorKind::SemanticSymbol,
	];

	pub fn index(self) -> i32 {
		self as i32
	}

	/// Size of one flat array slot, rounded up to the slot alignment
	pub fn slot_size(self) -> usize {
		let size = match self {
			DescriptorKind::Token => size_of::<TokenFFI>(),
			DescriptorKind::List => size_of::<ListFFI>(),
			DescriptorKind::Lexer | DescriptorKind::Parser | DescriptorKind::LanguageServer => {
				size_of::<CapabilityFFI>()
			}
			DescriptorKind::ParseResult => size_of::<ParseResultFFI>(),
			DescriptorKind::SyntaxNode => size_of::<SyntaxNodeFFI>(),
			DescriptorKind::TextSpan => size_of::<TextSpanFFI>(),
			DescriptorKind::Diagnostic => size_of::<DiagnosticFFI>(),
			DescriptorKind::ErrorCode => size_of::<ErrorCodeFFI>(),
			DescriptorKind::DiagnosticArgument => size_of::<DiagnosticArgumentFFI>(),
			DescriptorKind::SemanticModel => size_of::<SemanticModelFFI>(),
			DescriptorKind::SemanticSymbol => size_of::<SemanticSymbolFFI>(),
		};
		size.next_multiple_of(FLAT_ARRAY_ALIGN)
	}
}

impl TryFrom<i32> for DescriptorKind {
	type Error = BridgeError;

	fn try_from(value: i32) -> Result<Self> {
		usize::try_from(value)
			.ok()
			.and_then(|index| Self::ALL.get(index).copied())
			.ok_or(BridgeError::UnknownDescriptor(value))
	}
}

fn write<T>(slot: *mut u8, value: T) {
	unsafe { slot.cast::<T>().write(value) }
}

/// Serialize `object` as `kind` into `slot`
///
/// `slot` must point to at least `kind.slot_size()` zeroed bytes. A null
/// object leaves the slot untouched.
pub(crate) fn serialize(ctx: &mut CallContext, kind: DescriptorKind, object: Option<&Object>, slot: *mut u8) -> Result<()> {
	let Some(object) = object else {
		return Ok(());
	};

	match (kind, object) {
		(DescriptorKind::Token, Object::Token(o)) => write(slot, token::serialize(ctx, o)?),
		(DescriptorKind::List, Object::List(o)) => write(slot, list::serialize(ctx, o)?),
		(DescriptorKind::Lexer, Object::Lexer(_)) => {
			let trampoline = ctx.bridge().trampolines().lex();
			write(slot, capability::serialize(ctx, object, trampoline))
		}
		(DescriptorKind::Parser, Object::Parser(_)) => {
			let trampoline = ctx.bridge().trampolines().parse();
			write(slot, capability::serialize(ctx, object, trampoline))
		}
		(DescriptorKind::LanguageServer, Object::LanguageServer(_)) => {
			let trampoline = ctx.bridge().trampolines().build_model();
			write(slot, capability::serialize(ctx, object, trampoline))
		}
		(DescriptorKind::ParseResult, Object::ParseResult(o)) => write(slot, syntax::serialize_parse_result(ctx, object, o)?),
		(DescriptorKind::SyntaxNode, Object::SyntaxNode(o)) => write(slot, syntax::serialize_node(ctx, object, o)?),
		(DescriptorKind::TextSpan, Object::TextSpan(o)) => write(slot, syntax::serialize_text_span(o)),
		(DescriptorKind::Diagnostic, Object::Diagnostic(o)) => write(slot, diagnostic::serialize(ctx, object, o)?),
		(DescriptorKind::ErrorCode, Object::ErrorCode(o)) => write(slot, diagnostic::serialize_error_code(ctx, o)?),
		(DescriptorKind::DiagnosticArgument, Object::DiagnosticArgument(o)) => {
			write(slot, diagnostic::serialize_argument(ctx, o)?)
		}
		(DescriptorKind::SemanticModel, Object::SemanticModel(o)) => write(slot, semantic::serialize_model(ctx, object, o)?),
		(DescriptorKind::SemanticSymbol, Object::SemanticSymbol(o)) => {
			write(slot, semantic::serialize_symbol(ctx, object, o)?)
		}
		(requested, actual) => {
			return Err(BridgeError::ShapeMismatch {
				requested,
				actual: actual.descriptor(),
			});
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_catalog_order() {
		for (index, kind) in DescriptorKind::ALL.iter().enumerate() {
			assert_eq!(kind.index(), index as i32);
			assert_eq!(DescriptorKind::try_from(index as i32).unwrap(), *kind);
		}
		assert_eq!(DescriptorKind::SemanticSymbol.index(), 12);
	}

	#[test]
	fn test_unknown_kind() {
		assert!(matches!(DescriptorKind::try_from(13), Err(BridgeError::UnknownDescriptor(13))));
		assert!(matches!(DescriptorKind::try_from(-1), Err(BridgeError::UnknownDescriptor(-1))));
	}

	#[test]
	fn test_slot_sizes_are_aligned() {
		for kind in DescriptorKind::ALL {
			assert_eq!(kind.slot_size() % FLAT_ARRAY_ALIGN, 0);
		}
		assert_eq!(DescriptorKind::TextSpan.slot_size(), 8);
	}
}
