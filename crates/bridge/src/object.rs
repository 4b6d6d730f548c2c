// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Host objects that can cross the boundary
//!
//! The set of shapes is closed: every object that may be handed to native
//! code is one variant of [`Object`], and each variant has exactly one
//! descriptor.

use std::{
	fmt::{self, Debug, Formatter},
	sync::Arc,
};

use syspro_model::{
	Diagnostic, DiagnosticArgument, ErrorCode, LanguageServer, Lexer, ParseResult, Parser, SemanticModel, SymbolRef,
	SyntaxNode, TextSpan, Token,
};

use crate::descriptor::DescriptorKind;

#[derive(Clone)]
pub enum Object {
	Token(Arc<Token>),
	List(Arc<ObjectList>),
	Lexer(Arc<dyn Lexer>),
	Parser(Arc<dyn Parser>),
	ParseResult(Arc<dyn ParseResult>),
	SyntaxNode(Arc<dyn SyntaxNode>),
	TextSpan(Arc<TextSpan>),
	Diagnostic(Arc<Diagnostic>),
	ErrorCode(Arc<dyn ErrorCode>),
	DiagnosticArgument(Arc<DiagnosticArgument>),
	LanguageServer(Arc<dyn LanguageServer>),
	SemanticModel(Arc<dyn SemanticModel>),
	SemanticSymbol(SymbolRef),
}

/// Identity of an object in the handle registry
///
/// Two objects share a key only when they are the same allocation (or the
/// same symbol of the same table) seen through the same shape. Lists read
/// from a field of another object are keyed by that object and field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectKey {
	kind: DescriptorKind,
	address: usize,
	index: usize,
	field: Option<Field>,
}

impl ObjectKey {
	/// Key of the list held in `field` of the object keyed by `self`
	pub fn field(self, field: Field) -> ObjectKey {
		ObjectKey {
			kind: DescriptorKind::List,
			field: Some(field),
			..self
		}
	}
}

/// Field of an object whose value crosses as a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
	InvalidRanges,
	Diagnostics,
	Slots,
	Arguments,
	Hints,
	TypeDefinitions,
	BaseTypes,
	TypeArguments,
	Members,
	Parameters,
	Locals,
	Bounds,
}

fn address<T: ?Sized>(object: &Arc<T>) -> usize {
	Arc::as_ptr(object) as *const () as usize
}

impl Object {
	/// Descriptor that serializes this object
	pub fn descriptor(&self) -> DescriptorKind {
		match self {
			Object::Token(_) => DescriptorKind::Token,
			Object::List(_) => DescriptorKind::List,
			Object::Lexer(_) => DescriptorKind::Lexer,
			Object::Parser(_) => DescriptorKind::Parser,
			Object::ParseResult(_) => DescriptorKind::ParseResult,
			Object::SyntaxNode(_) => DescriptorKind::SyntaxNode,
			Object::TextSpan(_) => DescriptorKind::TextSpan,
			Object::Diagnostic(_) => DescriptorKind::Diagnostic,
			Object::ErrorCode(_) => DescriptorKind::ErrorCode,
			Object::DiagnosticArgument(_) => DescriptorKind::DiagnosticArgument,
			Object::LanguageServer(_) => DescriptorKind::LanguageServer,
			Object::SemanticModel(_) => DescriptorKind::SemanticModel,
			Object::SemanticSymbol(_) => DescriptorKind::SemanticSymbol,
		}
	}

	pub fn key(&self) -> ObjectKey {
		let (address, index) = match self {
			Object::Token(o) => (address(o), 0),
			Object::List(o) => match &o.owner {
				Some((owner, field)) => return owner.key().field(*field),
				None => (address(o), 0),
			},
			Object::Lexer(o) => (address(o), 0),
			Object::Parser(o) => (address(o), 0),
			Object::ParseResult(o) => (address(o), 0),
			Object::SyntaxNode(o) => (address(o), 0),
			Object::TextSpan(o) => (address(o), 0),
			Object::Diagnostic(o) => (address(o), 0),
			Object::ErrorCode(o) => (address(o), 0),
			Object::DiagnosticArgument(o) => (address(o), 0),
			Object::LanguageServer(o) => (address(o), 0),
			Object::SemanticModel(o) => (address(o), 0),
			Object::SemanticSymbol(symbol) => symbol.identity(),
		};
		ObjectKey {
			kind: self.descriptor(),
			address,
			index,
			field: None,
		}
	}

	/// Fresh list object, entries may be null
	pub fn list(items: impl IntoIterator<Item = Option<Object>>) -> Object {
		Object::List(Arc::new(ObjectList::new(items)))
	}

	pub fn token(token: Token) -> Object {
		Object::Token(Arc::new(token))
	}

	pub fn text_span(span: TextSpan) -> Object {
		Object::TextSpan(Arc::new(span))
	}
}

impl Debug for Object {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Object::Token(token) => write!(f, "Token({token})"),
			Object::List(list) => write!(f, "List({})", list.len()),
			Object::TextSpan(span) => write!(f, "TextSpan({span})"),
			Object::SemanticSymbol(symbol) => write!(f, "{symbol:?}"),
			other => write!(f, "{:?}@{:#x}", other.descriptor(), other.key().address),
		}
	}
}

/// Sequence of objects shared with native code as a list handle
#[derive(Debug, Clone, Default)]
pub struct ObjectList {
	items: Vec<Option<Object>>,
	/// Object and field the items were read from, which also keeps the owner alive
	owner: Option<(Object, Field)>,
}

impl ObjectList {
	pub fn new(items: impl IntoIterator<Item = Option<Object>>) -> Self {
		Self {
			items: items.into_iter().collect(),
			owner: None,
		}
	}

	/// Snapshot of `field` of `owner`
	pub fn field_of(owner: Object, field: Field, items: impl IntoIterator<Item = Option<Object>>) -> Self {
		Self {
			items: items.into_iter().collect(),
			owner: Some((owner, field)),
		}
	}

	pub fn items(&self) -> &[Option<Object>] {
		&self.items
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use syspro_model::{Symbol, SymbolDetail, SymbolKind, SymbolTable, VariableDetail};

	use super::*;

	#[test]
	fn test_clones_share_key() {
		let token = Object::token(Token::identifier(0, 0, "x"));
		assert_eq!(token.key(), token.clone().key());
	}

	#[test]
	fn test_equal_values_have_distinct_keys() {
		let a = Object::token(Token::identifier(0, 0, "x"));
		let b = Object::token(Token::identifier(0, 0, "x"));
		assert_ne!(a.key(), b.key());
	}

	#[test]
	fn test_symbol_key_follows_identity() {
		let table = SymbolTable::new();
		let x = table.insert(Symbol::new(SymbolKind::Local, "x", SymbolDetail::Variable(VariableDetail::default()))).unwrap();
		let again = table.get(x.id()).unwrap();
		assert_eq!(Object::SemanticSymbol(x).key(), Object::SemanticSymbol(again).key());
	}

	#[test]
	fn test_field_list_keyed_by_owner() {
		let span = Object::text_span(TextSpan::new(0, 1).unwrap());
		let owner = Object::token(Token::identifier(0, 0, "x"));

		let first = Object::List(Arc::new(ObjectList::field_of(owner.clone(), Field::Slots, [Some(span.clone())])));
		let second = Object::List(Arc::new(ObjectList::field_of(owner.clone(), Field::Slots, [])));
		assert_eq!(first.key(), second.key());
		assert_eq!(first.key(), owner.key().field(Field::Slots));

		let other_field = Object::List(Arc::new(ObjectList::field_of(owner.clone(), Field::Hints, [])));
		assert_ne!(first.key(), other_field.key());
		assert_ne!(first.key(), Object::list([Some(span)]).key());
	}

	#[test]
	fn test_descriptor_of_list() {
		let list = Object::list([None, Some(Object::text_span(TextSpan::new(0, 1).unwrap()))]);
		assert_eq!(list.descriptor(), DescriptorKind::List);
		let Object::List(items) = list else {
			panic!("expected a list");
		};
		assert_eq!(items.len(), 2);
	}
}
