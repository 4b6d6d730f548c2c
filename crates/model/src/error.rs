// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::Display;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// Failure reported by a lexer, parser or language server implementation
	#[error("{0}")]
	Implementation(String),

	#[error("syntax node of kind {0} has no terminal descendant")]
	MissingTerminal(String),

	#[error("symbol #{0} does not exist in its table")]
	UnknownSymbol(usize),

	#[error("symbol `{0}` has details that do not match its kind")]
	SymbolShapeMismatch(String),

	#[error("symbol `{0}` is not a type")]
	NotAType(String),

	#[error("type `{0}` has no constructor")]
	NotConstructible(String),

	#[error("text span start {start} with length {length} is invalid")]
	InvalidSpan {
		start: i32,
		length: i32,
	},
}

impl Error {
	pub fn implementation(message: impl Display) -> Self {
		Error::Implementation(message.to_string())
	}
}
