// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Capabilities implemented by language implementations
//!
//! The native engine drives these through trampolines. Implementations report
//! failures through [`crate::Error`]; panics are tolerated as well and are
//! treated like errors at the boundary.

use std::sync::Arc;

use syspro_abi::{TEST_MODE_PARALLEL, TEST_MODE_REPEATED, TEST_MODE_SHUFFLED};

use crate::{
	Result,
	diagnostic::Diagnostic,
	symbol::SymbolRef,
	syntax::{SyntaxNode, TextSpan, node_at_position},
	token::Token,
};

pub trait Lexer: Send + Sync {
	fn lex(&self, text: &str) -> Result<Vec<Token>>;
}

pub trait Parser: Send + Sync {
	fn parse(&self, text: &str) -> Result<Arc<dyn ParseResult>>;
}

pub trait LanguageServer: Send + Sync {
	fn build_model(&self, text: &str) -> Result<Arc<dyn SemanticModel>>;
}

pub trait ParseResult: Send + Sync {
	fn root(&self) -> Option<Arc<dyn SyntaxNode>>;

	fn invalid_ranges(&self) -> Vec<TextSpan>;

	fn diagnostics(&self) -> Vec<Arc<Diagnostic>>;

	fn node_at_position(&self, position: i32) -> Option<Arc<dyn SyntaxNode>> {
		node_at_position(self.root().as_ref(), position)
	}
}

pub trait SemanticModel: Send + Sync {
	fn root(&self) -> Option<Arc<dyn SyntaxNode>>;

	fn invalid_ranges(&self) -> Vec<TextSpan>;

	fn diagnostics(&self) -> Vec<Arc<Diagnostic>>;

	fn type_definitions(&self) -> Vec<SymbolRef>;

	fn lookup_type(&self, name: &str) -> Result<Option<SymbolRef>>;

	fn node_at_position(&self, position: i32) -> Option<Arc<dyn SyntaxNode>> {
		node_at_position(self.root().as_ref(), position)
	}
}

/// How the engine runs the lexer test suite
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TestMode {
	pub repeated: bool,
	pub shuffled: bool,
	pub parallel: bool,
}

impl TestMode {
	pub fn repeated(mut self, value: bool) -> Self {
		self.repeated = value;
		self
	}

	pub fn shuffled(mut self, value: bool) -> Self {
		self.shuffled = value;
		self
	}

	pub fn parallel(mut self, value: bool) -> Self {
		self.parallel = value;
		self
	}

	pub fn to_mask(self) -> i32 {
		let mut mask = 0;
		if self.repeated {
			mask |= TEST_MODE_REPEATED;
		}
		if self.shuffled {
			mask |= TEST_MODE_SHUFFLED;
		}
		if self.parallel {
			mask |= TEST_MODE_PARALLEL;
		}
		mask
	}
}
