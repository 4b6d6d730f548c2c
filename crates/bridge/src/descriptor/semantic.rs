// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use syspro_abi::{
	FUNCTION_FLAG_ABSTRACT, FUNCTION_FLAG_NATIVE, FUNCTION_FLAG_OVERRIDE, FUNCTION_FLAG_VIRTUAL, HandleFFI,
	NULL_HANDLE, SemanticModelFFI, SemanticSymbolFFI, TYPE_FLAG_ABSTRACT,
};
use syspro_model::{SemanticModel, SymbolDetail, SymbolId, SymbolRef};

use super::syntax::spans;
use crate::{
	Result,
	context::CallContext,
	object::{Field, Object},
};

pub(super) fn serialize_model(
	ctx: &CallContext,
	owner: &Object,
	model: &Arc<dyn SemanticModel>,
) -> Result<SemanticModelFFI> {
	Ok(SemanticModelFFI {
		implementation: ctx.handle(Some(owner.clone())),
		root: ctx.handle(model.root().map(Object::SyntaxNode)),
		invalid_ranges: ctx.field_list(owner, Field::InvalidRanges, || Ok(spans(model.invalid_ranges())))?,
		diagnostics: ctx.field_list(owner, Field::Diagnostics, || {
			Ok(model.diagnostics().into_iter().map(|d| Some(Object::Diagnostic(d))).collect())
		})?,
		type_definitions: ctx.field_list(owner, Field::TypeDefinitions, || {
			Ok(model.type_definitions().into_iter().map(|symbol| Some(Object::SemanticSymbol(symbol))).collect())
		})?,
		lookup_type: Some(ctx.bridge().trampolines().lookup_type()),
	})
}

/// Common header plus four kind-specific parameters
///
/// | kind           | param1     | param2         | param3              | param4  |
/// |----------------|------------|----------------|---------------------|---------|
/// | type           | base types | type arguments | original definition | members |
/// | function       | parameters | return type    | locals              |         |
/// | variable       | type       |                |                     |         |
/// | type parameter | bounds     |                |                     |         |
pub(super) fn serialize_symbol(ctx: &mut CallContext, owner: &Object, symbol: &SymbolRef) -> Result<SemanticSymbolFFI> {
	let data = ctx.pin(symbol.data()?);

	let mut result = SemanticSymbolFFI {
		implementation: ctx.handle(Some(owner.clone())),
		definition: ctx.handle(data.definition.clone().map(Object::SyntaxNode)),
		owner: ctx.handle(symbol.owner()?.map(Object::SemanticSymbol)),
		param1: NULL_HANDLE,
		param2: NULL_HANDLE,
		param3: NULL_HANDLE,
		param4: NULL_HANDLE,
		name: ctx.serialize_string(&data.name)?,
		construct: None,
		kind: data.kind.ordinal(),
		flags: 0,
	};

	match &data.detail {
		SymbolDetail::Type(detail) => {
			result.flags = if detail.is_abstract { TYPE_FLAG_ABSTRACT } else { 0 };
			result.param1 = symbol_list(ctx, owner, symbol, Field::BaseTypes, &detail.base_types)?;
			result.param2 = symbol_list(ctx, owner, symbol, Field::TypeArguments, &detail.type_arguments)?;
			result.param3 = symbol_handle(ctx, symbol, detail.original_definition)?;
			result.param4 = symbol_list(ctx, owner, symbol, Field::Members, &detail.members)?;
			result.construct = Some(ctx.bridge().trampolines().construct());
		}
		SymbolDetail::Function(detail) => {
			let flags = [
				(detail.is_native, FUNCTION_FLAG_NATIVE),
				(detail.is_virtual, FUNCTION_FLAG_VIRTUAL),
				(detail.is_abstract, FUNCTION_FLAG_ABSTRACT),
				(detail.is_override, FUNCTION_FLAG_OVERRIDE),
			];
			result.flags = flags.iter().filter(|(set, _)| *set).fold(0, |acc, (_, flag)| acc | flag);
			result.param1 = symbol_list(ctx, owner, symbol, Field::Parameters, &detail.parameters)?;
			result.param2 = symbol_handle(ctx, symbol, detail.return_type)?;
			result.param3 = symbol_list(ctx, owner, symbol, Field::Locals, &detail.locals)?;
		}
		SymbolDetail::Variable(detail) => {
			result.param1 = symbol_handle(ctx, symbol, detail.ty)?;
		}
		SymbolDetail::TypeParameter(detail) => {
			result.param1 = symbol_list(ctx, owner, symbol, Field::Bounds, &detail.bounds)?;
		}
	}

	Ok(result)
}

fn symbol_handle(ctx: &CallContext, symbol: &SymbolRef, id: Option<SymbolId>) -> Result<HandleFFI> {
	let sibling = id.map(|id| symbol.sibling(id)).transpose()?;
	Ok(ctx.handle(sibling.map(Object::SemanticSymbol)))
}

fn symbol_list(ctx: &CallContext, owner: &Object, symbol: &SymbolRef, field: Field, ids: &[SymbolId]) -> Result<HandleFFI> {
	ctx.field_list(owner, field, || {
		Ok(symbol.siblings(ids)?.into_iter().map(|s| Some(Object::SemanticSymbol(s))).collect())
	})
}
