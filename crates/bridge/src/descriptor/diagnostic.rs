// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use syspro_abi::{DiagnosticArgumentFFI, DiagnosticFFI, ErrorCodeFFI};
use syspro_model::{Diagnostic, DiagnosticArgument, ErrorCode};

use crate::{
	Result,
	context::CallContext,
	object::{Field, Object},
};

pub(super) fn serialize(ctx: &CallContext, owner: &Object, diagnostic: &Diagnostic) -> Result<DiagnosticFFI> {
	Ok(DiagnosticFFI {
		error_code: ctx.handle(Some(Object::ErrorCode(diagnostic.error_code().clone()))),
		arguments: ctx.field_list(owner, Field::Arguments, || {
			Ok(diagnostic.arguments().iter().map(|argument| Some(Object::DiagnosticArgument(argument.clone()))).collect())
		})?,
		location: ctx.handle(Some(Object::TextSpan(diagnostic.location.clone()))),
		hints: ctx.field_list(owner, Field::Hints, || {
			Ok(diagnostic.hints.iter().map(|hint| Some(Object::Diagnostic(hint.clone()))).collect())
		})?,
	})
}

pub(super) fn serialize_error_code(ctx: &mut CallContext, code: &Arc<dyn ErrorCode>) -> Result<ErrorCodeFFI> {
	Ok(ErrorCodeFFI {
		name: ctx.serialize_string(code.name())?,
	})
}

pub(super) fn serialize_argument(ctx: &mut CallContext, argument: &DiagnosticArgument) -> Result<DiagnosticArgumentFFI> {
	Ok(DiagnosticArgumentFFI {
		string_value: ctx.serialize_string(argument.as_text())?,
		node_value: ctx.handle(argument.as_node().cloned().map(Object::SyntaxNode)),
	})
}
