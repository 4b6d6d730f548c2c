// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use syspro_abi::TokenFFI;
use syspro_model::{Token, TokenKind};

use crate::{Result, context::CallContext};

/// Common header plus the per-kind payload in `ty` and `value1..value3`
///
/// | kind       | ty   | value1 | value2 | value3                  |
/// |------------|------|--------|--------|-------------------------|
/// | identifier |      | name   |        | contextual keyword code |
/// | boolean    | type |        | 0 / 1  |                         |
/// | integer    | type |        | value  | has type suffix         |
/// | rune       | type |        |        | code point              |
/// | string     | type | value  |        |                         |
pub(super) fn serialize(ctx: &mut CallContext, token: &Token) -> Result<TokenFFI> {
	let mut result = TokenFFI {
		kind: token.code(),
		start: token.start,
		end: token.end,
		leading_trivia_length: token.leading_trivia_length,
		trailing_trivia_length: token.trailing_trivia_length,
		..TokenFFI::empty()
	};

	match &token.kind {
		TokenKind::Bad | TokenKind::Indent | TokenKind::Dedent | TokenKind::Keyword(_) | TokenKind::Symbol(_) => {}
		TokenKind::Identifier {
			value,
			contextual_keyword,
		} => {
			result.value1 = ctx.serialize_string(value)?;
			result.value3 = contextual_keyword.map_or(0, |keyword| keyword.code() as i64);
		}
		TokenKind::Boolean {
			ty,
			value,
		} => {
			result.ty = ty.ordinal();
			result.value2 = *value as i64;
		}
		TokenKind::Integer {
			ty,
			has_type_suffix,
			value,
		} => {
			result.ty = ty.ordinal();
			result.value2 = *value as i64;
			result.value3 = *has_type_suffix as i64;
		}
		TokenKind::Rune {
			ty,
			value,
		} => {
			result.ty = ty.ordinal();
			result.value3 = *value as i64;
		}
		TokenKind::String {
			ty,
			value,
		} => {
			result.ty = ty.ordinal();
			result.value1 = ctx.serialize_string(value)?;
		}
	}

	Ok(result)
}
