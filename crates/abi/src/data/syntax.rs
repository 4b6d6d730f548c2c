// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::handle::HandleFFI;

/// Serialized syntax node
///
/// Metrics that the host could not compute are written as -1.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SyntaxNodeFFI {
	pub kind: i32,
	pub position: i32,
	pub full_length: i32,
	pub leading_trivia_length: i32,
	pub trailing_trivia_length: i32,
	pub slot_count: i32,
	/// Token of a terminal node, or null
	pub token: HandleFFI,
	/// List of child nodes, entries may be null
	pub slots: HandleFFI,
	/// Symbol bound to this node, or null
	pub symbol: HandleFFI,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ParseResultFFI {
	pub root: HandleFFI,
	/// List of text spans
	pub invalid_ranges: HandleFFI,
	/// List of diagnostics
	pub diagnostics: HandleFFI,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSpanFFI {
	pub start: i32,
	pub length: i32,
}
