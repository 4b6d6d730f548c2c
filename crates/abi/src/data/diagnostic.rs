// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::handle::{HandleFFI, StringFFI};

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticFFI {
	pub error_code: HandleFFI,
	/// List of diagnostic arguments
	pub arguments: HandleFFI,
	/// Text span
	pub location: HandleFFI,
	/// List of diagnostics
	pub hints: HandleFFI,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ErrorCodeFFI {
	pub name: StringFFI,
}

/// Argument of a diagnostic message
///
/// Every argument carries its textual rendering. Syntax node arguments
/// additionally carry the node handle.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticArgumentFFI {
	pub string_value: StringFFI,
	pub node_value: HandleFFI,
}
