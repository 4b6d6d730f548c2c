// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::{
	capability::{ConstructTrampolineFFI, TextTrampolineFFI},
	handle::{HandleFFI, StringFFI},
};

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SemanticModelFFI {
	pub implementation: HandleFFI,
	pub root: HandleFFI,
	pub invalid_ranges: HandleFFI,
	pub diagnostics: HandleFFI,
	/// List of semantic symbols
	pub type_definitions: HandleFFI,
	pub lookup_type: Option<TextTrampolineFFI>,
}

/// Serialized semantic symbol
///
/// `param1`..`param4` are interpreted per symbol kind:
///
/// | kind                        | param1      | param2         | param3              | param4  |
/// |-----------------------------|-------------|----------------|---------------------|---------|
/// | class, object, interface    | base types  | type arguments | original definition | members |
/// | field, local, parameter     | type        |                |                     |         |
/// | function                    | parameters  | return type    | locals              |         |
/// | type parameter              | bounds      |                |                     |         |
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SemanticSymbolFFI {
	pub implementation: HandleFFI,
	pub definition: HandleFFI,
	pub owner: HandleFFI,
	pub param1: HandleFFI,
	pub param2: HandleFFI,
	pub param3: HandleFFI,
	pub param4: HandleFFI,
	pub name: StringFFI,
	/// Present on type symbols only
	pub construct: Option<ConstructTrampolineFFI>,
	pub kind: i32,
	pub flags: i32,
}
