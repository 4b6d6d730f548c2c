// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	panic::{AssertUnwindSafe, catch_unwind},
	sync::Arc,
};

use syspro_abi::{ParseResultFFI, SyntaxNodeFFI, TextSpanFFI};
use syspro_model::{ParseResult, SyntaxNode, TextSpan};
use tracing::warn;

use crate::{
	BridgeError, Result,
	context::CallContext,
	object::{Field, Object},
};

pub(super) fn serialize_parse_result(
	ctx: &CallContext,
	owner: &Object,
	result: &Arc<dyn ParseResult>,
) -> Result<ParseResultFFI> {
	Ok(ParseResultFFI {
		root: ctx.handle(result.root().map(Object::SyntaxNode)),
		invalid_ranges: ctx.field_list(owner, Field::InvalidRanges, || Ok(spans(result.invalid_ranges())))?,
		diagnostics: ctx.field_list(owner, Field::Diagnostics, || {
			Ok(result.diagnostics().into_iter().map(|d| Some(Object::Diagnostic(d))).collect())
		})?,
	})
}

pub(super) fn spans(spans: Vec<TextSpan>) -> Vec<Option<Object>> {
	spans.into_iter().map(|span| Some(Object::text_span(span))).collect()
}

pub(super) fn serialize_node(ctx: &CallContext, owner: &Object, node: &Arc<dyn SyntaxNode>) -> Result<SyntaxNodeFFI> {
	let slot_count = node.slot_count();

	Ok(SyntaxNodeFFI {
		kind: node.kind().code(),
		position: metric(node, "position", || node.position()),
		full_length: metric(node, "full_length", || node.full_length()),
		leading_trivia_length: metric(node, "leading_trivia_length", || node.leading_trivia_length()),
		trailing_trivia_length: metric(node, "trailing_trivia_length", || node.trailing_trivia_length()),
		slot_count: i32::try_from(slot_count).map_err(|_| BridgeError::CountOverflow(slot_count))?,
		token: ctx.handle(node.token().map(Object::Token)),
		slots: ctx.field_list(owner, Field::Slots, || {
			Ok((0..slot_count).map(|i| node.slot(i).map(Object::SyntaxNode)).collect())
		})?,
		symbol: ctx.handle(node.symbol().map(Object::SemanticSymbol)),
	})
}

/// Positional metrics are best effort: a node whose metric cannot be computed reports -1
fn metric(
	node: &Arc<dyn SyntaxNode>,
	name: &'static str,
	compute: impl FnOnce() -> syspro_model::Result<i32>,
) -> i32 {
	match catch_unwind(AssertUnwindSafe(compute)) {
		Ok(Ok(value)) => value,
		Ok(Err(e)) => {
			warn!(kind = %node.kind(), metric = name, error = %e, "syntax node metric unavailable");
			-1
		}
		Err(_) => {
			warn!(kind = %node.kind(), metric = name, "syntax node metric panicked");
			-1
		}
	}
}

pub(super) fn serialize_text_span(span: &TextSpan) -> TextSpanFFI {
	TextSpanFFI {
		start: span.start,
		length: span.length,
	}
}
