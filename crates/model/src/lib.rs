// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Object model shared between language implementations and the native bridge
//!
//! Lexers, parsers and language servers are supplied by third parties and
//! implement the capability traits of this crate. Everything they return
//! (tokens, syntax trees, diagnostics, semantic symbols) is expressed in the
//! types defined here so the bridge can serialize it.

pub mod capability;
pub mod diagnostic;
pub mod error;
pub mod symbol;
pub mod syntax;
pub mod token;

pub use capability::{LanguageServer, Lexer, ParseResult, Parser, SemanticModel, TestMode};
pub use diagnostic::{Diagnostic, DiagnosticArgument, DiagnosticInfo, ErrorCode};
pub use error::{Error, Result};
pub use symbol::{
	FunctionDetail, Symbol, SymbolDetail, SymbolId, SymbolKind, SymbolRef, SymbolTable, TypeConstructor,
	TypeDetail, TypeParameterDetail, VariableDetail,
};
pub use syntax::{
	AnySyntaxKind, SyntaxKind, SyntaxNode, TextSpan, descendants, first_terminal, last_terminal, node_at_position,
};
pub use token::{BuiltInType, Keyword, Symbol as SymbolToken, Token, TokenKind};
