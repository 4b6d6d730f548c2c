// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Syntax trees
//!
//! Trees are supplied by parser implementations through the [`SyntaxNode`]
//! trait. Node metrics default to values derived from the first and last
//! terminal token found by a pre-order walk that tolerates shared subtrees and
//! cycles.

use std::{
	collections::HashSet,
	fmt::{self, Display, Formatter},
	sync::Arc,
};

use syspro_abi::NON_TERMINAL_KIND_BASE;

use crate::{
	Error, Result,
	symbol::SymbolRef,
	token::{Keyword, Symbol, Token},
};

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
	Bad,
	Indent,
	Dedent,
	Identifier,
	Boolean,
	Integer,
	Rune,
	String,

	SourceText,
	TypeBound,
	List,
	SeparatedList,

	TypeDefinition,
	FunctionDefinition,
	VariableDefinition,
	TypeParameterDefinition,
	ParameterDefinition,

	VariableDefinitionStatement,
	AssignmentStatement,
	ExpressionStatement,
	ReturnStatement,
	BreakStatement,
	ContinueStatement,
	IfStatement,
	WhileStatement,
	ForStatement,

	LogicalAndExpression,
	LogicalOrExpression,
	LogicalNotExpression,
	EqualsExpression,
	NotEqualsExpression,
	LessThanExpression,
	LessThanOrEqualExpression,
	GreaterThanExpression,
	GreaterThanOrEqualExpression,
	IsExpression,
	BitwiseAndExpression,
	BitwiseOrExpression,
	BitwiseExclusiveOrExpression,
	BitwiseLeftShiftExpression,
	BitwiseRightShiftExpression,
	AddExpression,
	SubtractExpression,
	MultiplyExpression,
	DivideExpression,
	ModuloExpression,
	UnaryPlusExpression,
	UnaryMinusExpression,
	BitwiseNotExpression,
	MemberAccessExpression,
	InvocationExpression,
	IndexExpression,
	ThisExpression,
	SuperExpression,
	NullLiteralExpression,
	TrueLiteralExpression,
	FalseLiteralExpression,
	StringLiteralExpression,
	RuneLiteralExpression,
	IntegerLiteralExpression,
	ParenthesizedExpression,
	IdentifierNameExpression,
	OptionNameExpression,
	GenericNameExpression,
}

impl SyntaxKind {
	pub fn ordinal(self) -> i32 {
		self as i32
	}

	pub fn is_terminal(self) -> bool {
		self.ordinal() < SyntaxKind::SourceText.ordinal()
	}

	/// Wire kind code; non-terminals are rebased above every token kind
	pub fn code(self) -> i32 {
		if self.is_terminal() {
			self.ordinal()
		} else {
			NON_TERMINAL_KIND_BASE + self.ordinal() - SyntaxKind::SourceText.ordinal()
		}
	}
}

/// Kind of any syntax node: a syntax kind proper, or a keyword or symbol terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnySyntaxKind {
	Syntax(SyntaxKind),
	Keyword(Keyword),
	Symbol(Symbol),
}

impl AnySyntaxKind {
	pub fn is_terminal(self) -> bool {
		match self {
			AnySyntaxKind::Syntax(kind) => kind.is_terminal(),
			AnySyntaxKind::Keyword(_) | AnySyntaxKind::Symbol(_) => true,
		}
	}

	pub fn code(self) -> i32 {
		match self {
			AnySyntaxKind::Syntax(kind) => kind.code(),
			AnySyntaxKind::Keyword(keyword) => keyword.code(),
			AnySyntaxKind::Symbol(symbol) => symbol.code(),
		}
	}
}

impl From<SyntaxKind> for AnySyntaxKind {
	fn from(kind: SyntaxKind) -> Self {
		AnySyntaxKind::Syntax(kind)
	}
}

impl Display for AnySyntaxKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			AnySyntaxKind::Syntax(kind) => write!(f, "{kind:?}"),
			AnySyntaxKind::Keyword(keyword) => write!(f, "{keyword:?}"),
			AnySyntaxKind::Symbol(symbol) => write!(f, "{symbol:?}"),
		}
	}
}

/// Half-open range of source positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextSpan {
	pub start: i32,
	pub length: i32,
}

impl TextSpan {
	pub fn new(start: i32, length: i32) -> Result<Self> {
		if start < 0 || start.checked_add(length).is_none_or(|end| end < start) {
			return Err(Error::InvalidSpan {
				start,
				length,
			});
		}
		Ok(Self {
			start,
			length,
		})
	}

	pub fn from_bounds(start: i32, end: i32) -> Result<Self> {
		Self::new(start, end - start)
	}

	pub fn end(&self) -> i32 {
		self.start + self.length
	}

	pub fn is_empty(&self) -> bool {
		self.length == 0
	}

	pub fn contains(&self, position: i32) -> bool {
		self.start <= position && position < self.end()
	}
}

impl Display for TextSpan {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "[{}, {})", self.start, self.end())
	}
}

/// Node of a syntax tree built by a parser implementation
///
/// Only `kind`, `slot_count`, `slot` and `token` are required. A node is
/// terminal when it carries a token.
pub trait SyntaxNode: Send + Sync {
	fn kind(&self) -> AnySyntaxKind;

	fn slot_count(&self) -> usize;

	fn slot(&self, index: usize) -> Option<Arc<dyn SyntaxNode>>;

	fn token(&self) -> Option<Arc<Token>>;

	/// Semantic symbol bound to this node, if any
	fn symbol(&self) -> Option<SymbolRef> {
		None
	}

	fn is_terminal(&self) -> bool {
		self.token().is_some()
	}

	fn position(&self) -> Result<i32> {
		Ok(first_terminal_token(self)?.start)
	}

	/// Distance from the first character of the first terminal to the last character of the last terminal
	fn full_length(&self) -> Result<i32> {
		let first = first_terminal_token(self)?;
		let last = last_terminal_token(self)?;
		Ok(last.end - first.start + 1)
	}

	fn leading_trivia_length(&self) -> Result<i32> {
		Ok(first_terminal_token(self)?.leading_trivia_length)
	}

	fn trailing_trivia_length(&self) -> Result<i32> {
		Ok(last_terminal_token(self)?.trailing_trivia_length)
	}

	/// Span without leading and trailing trivia
	fn span(&self) -> Result<TextSpan> {
		let full = self.full_span()?;
		TextSpan::from_bounds(full.start + self.leading_trivia_length()?, full.end() - self.trailing_trivia_length()?)
	}

	fn full_span(&self) -> Result<TextSpan> {
		TextSpan::new(self.position()?, self.full_length()?)
	}
}

fn address<N: SyntaxNode + ?Sized>(node: &N) -> usize {
	node as *const N as *const () as usize
}

/// Pre-order walk below `node`, visiting every reachable node once
fn walk<N: SyntaxNode + ?Sized>(node: &N) -> Vec<Arc<dyn SyntaxNode>> {
	let mut result = Vec::new();
	let mut visited = HashSet::from([address(node)]);
	let mut stack: Vec<Arc<dyn SyntaxNode>> = (0..node.slot_count()).rev().filter_map(|i| node.slot(i)).collect();

	while let Some(current) = stack.pop() {
		if !visited.insert(Arc::as_ptr(&current) as *const () as usize) {
			continue;
		}
		stack.extend((0..current.slot_count()).rev().filter_map(|i| current.slot(i)));
		result.push(current);
	}

	result
}

fn first_terminal_token<N: SyntaxNode + ?Sized>(node: &N) -> Result<Arc<Token>> {
	if let Some(token) = node.token() {
		return Ok(token);
	}
	walk(node)
		.into_iter()
		.find_map(|descendant| descendant.token())
		.ok_or_else(|| Error::MissingTerminal(node.kind().to_string()))
}

fn last_terminal_token<N: SyntaxNode + ?Sized>(node: &N) -> Result<Arc<Token>> {
	if let Some(token) = node.token() {
		return Ok(token);
	}
	walk(node)
		.into_iter()
		.rev()
		.find_map(|descendant| descendant.token())
		.ok_or_else(|| Error::MissingTerminal(node.kind().to_string()))
}

/// All nodes reachable from `node` in pre-order, each listed once
pub fn descendants(node: &Arc<dyn SyntaxNode>, include_self: bool) -> Vec<Arc<dyn SyntaxNode>> {
	let below = walk(node.as_ref());
	if !include_self {
		return below;
	}
	let mut result = Vec::with_capacity(below.len() + 1);
	result.push(node.clone());
	result.extend(below);
	result
}

pub fn first_terminal(node: &Arc<dyn SyntaxNode>) -> Option<Arc<dyn SyntaxNode>> {
	descendants(node, true).into_iter().find(|n| n.is_terminal())
}

pub fn last_terminal(node: &Arc<dyn SyntaxNode>) -> Option<Arc<dyn SyntaxNode>> {
	if node.is_terminal() {
		return Some(node.clone());
	}
	descendants(node, false).into_iter().rev().find(|n| n.is_terminal())
}

/// Smallest node whose full span contains `position`
pub fn node_at_position(root: Option<&Arc<dyn SyntaxNode>>, position: i32) -> Option<Arc<dyn SyntaxNode>> {
	let root = root?;
	descendants(root, true)
		.into_iter()
		.enumerate()
		.filter_map(|(index, node)| {
			let span = node.full_span().ok()?;
			span.contains(position).then_some((span.length, index, node))
		})
		.min_by_key(|(length, index, _)| (*length, *index))
		.map(|(_, _, node)| node)
}
