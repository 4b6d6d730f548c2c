// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Small language implementations for exercising the bridge

use std::sync::Arc;

use syspro_model::{
	AnySyntaxKind, BuiltInType, Diagnostic, DiagnosticArgument, DiagnosticInfo, Error, Keyword, LanguageServer, Lexer,
	ParseResult, Parser, Result, SemanticModel, Symbol, SymbolDetail, SymbolKind, SymbolRef, SymbolTable, SyntaxKind,
	SyntaxNode, TextSpan, Token, TokenKind, TypeConstructor, TypeDetail,
};

/// Splits on ASCII whitespace; words become integers, keywords or identifiers
///
/// Whitespace after a word is its trailing trivia, whitespace before the
/// first word is leading trivia of the first token.
pub struct WhitespaceLexer;

impl Lexer for WhitespaceLexer {
	fn lex(&self, text: &str) -> Result<Vec<Token>> {
		let bytes = text.as_bytes();
		let mut tokens = Vec::new();
		let mut index = 0;

		while index < bytes.len() && bytes[index].is_ascii_whitespace() {
			index += 1;
		}
		let mut leading = index;
		let mut start = 0;

		while index < bytes.len() {
			let word_start = index;
			while index < bytes.len() && !bytes[index].is_ascii_whitespace() {
				index += 1;
			}
			let word = &text[word_start..index];
			while index < bytes.len() && bytes[index].is_ascii_whitespace() {
				index += 1;
			}
			let trailing = index - word_start - word.len();

			let kind = if let Ok(value) = word.parse::<u64>() {
				TokenKind::Integer {
					ty: BuiltInType::Int64,
					has_type_suffix: false,
					value,
				}
			} else if let Some(keyword) = Keyword::from_text(word).filter(|k| !k.is_contextual()) {
				TokenKind::Keyword(keyword)
			} else {
				Token::identifier(0, 0, word).kind
			};

			tokens.push(
				Token::new(start as i32, index as i32 - 1, kind).with_trivia(leading as i32, trailing as i32),
			);
			leading = 0;
			start = index;
		}

		Ok(tokens)
	}
}

/// Always reports an error
pub struct FailingLexer;

impl Lexer for FailingLexer {
	fn lex(&self, _text: &str) -> Result<Vec<Token>> {
		Err(Error::implementation("lexer failed"))
	}
}

/// Always panics
pub struct PanickingLexer;

impl Lexer for PanickingLexer {
	fn lex(&self, _text: &str) -> Result<Vec<Token>> {
		panic!("lexer panicked")
	}
}

pub struct TreeNode {
	pub kind: AnySyntaxKind,
	pub slots: Vec<Option<Arc<dyn SyntaxNode>>>,
	pub token: Option<Arc<Token>>,
	pub symbol: Option<SymbolRef>,
}

impl TreeNode {
	pub fn terminal(token: Token) -> Arc<dyn SyntaxNode> {
		Arc::new(TreeNode {
			kind: token.to_syntax_kind(),
			slots: Vec::new(),
			token: Some(Arc::new(token)),
			symbol: None,
		})
	}

	pub fn node(kind: SyntaxKind, slots: Vec<Option<Arc<dyn SyntaxNode>>>) -> Arc<dyn SyntaxNode> {
		Arc::new(TreeNode {
			kind: AnySyntaxKind::Syntax(kind),
			slots,
			token: None,
			symbol: None,
		})
	}
}

impl SyntaxNode for TreeNode {
	fn kind(&self) -> AnySyntaxKind {
		self.kind
	}

	fn slot_count(&self) -> usize {
		self.slots.len()
	}

	fn slot(&self, index: usize) -> Option<Arc<dyn SyntaxNode>> {
		self.slots.get(index).cloned().flatten()
	}

	fn token(&self) -> Option<Arc<Token>> {
		self.token.clone()
	}

	fn symbol(&self) -> Option<SymbolRef> {
		self.symbol.clone()
	}
}

pub struct SampleParseResult {
	pub root: Option<Arc<dyn SyntaxNode>>,
	pub invalid_ranges: Vec<TextSpan>,
	pub diagnostics: Vec<Arc<Diagnostic>>,
}

impl ParseResult for SampleParseResult {
	fn root(&self) -> Option<Arc<dyn SyntaxNode>> {
		self.root.clone()
	}

	fn invalid_ranges(&self) -> Vec<TextSpan> {
		self.invalid_ranges.clone()
	}

	fn diagnostics(&self) -> Vec<Arc<Diagnostic>> {
		self.diagnostics.clone()
	}
}

/// Parses a flat list of whitespace separated words under a source text node
///
/// The word `bad` is reported as an invalid range with a diagnostic.
pub struct FlatParser;

impl Parser for FlatParser {
	fn parse(&self, text: &str) -> Result<Arc<dyn ParseResult>> {
		let tokens = WhitespaceLexer.lex(text)?;
		let mut invalid_ranges = Vec::new();
		let mut diagnostics = Vec::new();
		let mut slots = Vec::new();

		for token in tokens {
			let is_bad = matches!(&token.kind, TokenKind::Identifier { value, .. } if value == "bad");
			let node = TreeNode::terminal(token);
			if is_bad {
				let span = node.span()?;
				invalid_ranges.push(span);
				let info = DiagnosticInfo::new(
					Arc::new("UNEXPECTED_WORD"),
					vec![DiagnosticArgument::text("bad"), DiagnosticArgument::node(node.clone())],
				);
				let hint = Diagnostic::new(DiagnosticInfo::new(Arc::new("REMOVE_WORD"), Vec::new()), span);
				diagnostics.push(Arc::new(Diagnostic::new(info, span).with_hint(hint)));
			}
			slots.push(Some(node));
		}

		Ok(Arc::new(SampleParseResult {
			root: Some(TreeNode::node(SyntaxKind::SourceText, slots)),
			invalid_ranges,
			diagnostics,
		}))
	}
}

/// Instantiates generic classes by name, `List` with `Int` becomes `List<Int>`
pub struct Instantiate;

impl TypeConstructor for Instantiate {
	fn construct(&self, definition: &SymbolRef, type_arguments: &[SymbolRef]) -> Result<SymbolRef> {
		let names = type_arguments.iter().map(|argument| argument.name()).collect::<Result<Vec<_>>>()?;
		let detail = TypeDetail {
			type_arguments: type_arguments.iter().map(|argument| argument.id()).collect(),
			original_definition: Some(definition.id()),
			..TypeDetail::default()
		};
		definition.table().insert(Symbol::new(
			SymbolKind::Class,
			format!("{}<{}>", definition.name()?, names.join(", ")),
			SymbolDetail::Type(detail),
		))
	}
}

pub struct SampleModel {
	pub root: Option<Arc<dyn SyntaxNode>>,
	pub types: Vec<SymbolRef>,
}

impl SemanticModel for SampleModel {
	fn root(&self) -> Option<Arc<dyn SyntaxNode>> {
		self.root.clone()
	}

	fn invalid_ranges(&self) -> Vec<TextSpan> {
		Vec::new()
	}

	fn diagnostics(&self) -> Vec<Arc<Diagnostic>> {
		Vec::new()
	}

	fn type_definitions(&self) -> Vec<SymbolRef> {
		self.types.clone()
	}

	fn lookup_type(&self, name: &str) -> Result<Option<SymbolRef>> {
		for ty in &self.types {
			if ty.name()? == name {
				return Ok(Some(ty.clone()));
			}
		}
		Ok(None)
	}
}

/// Every word of the source declares a class of that name, `List` is generic
///
/// Each class is defined by the terminal node of its word.
pub struct SampleLanguageServer;

impl LanguageServer for SampleLanguageServer {
	fn build_model(&self, text: &str) -> Result<Arc<dyn SemanticModel>> {
		let root = FlatParser.parse(text)?.root();
		let table = SymbolTable::new();
		let mut types = Vec::new();
		for (index, word) in text.split_ascii_whitespace().enumerate() {
			let detail = TypeDetail {
				constructor: (word == "List").then(|| Arc::new(Instantiate) as Arc<dyn TypeConstructor>),
				..TypeDetail::default()
			};
			let mut symbol = Symbol::new(SymbolKind::Class, word, SymbolDetail::Type(detail));
			if let Some(definition) = root.as_ref().and_then(|root| root.slot(index)) {
				symbol = symbol.with_definition(definition);
			}
			types.push(table.insert(symbol)?);
		}
		Ok(Arc::new(SampleModel {
			root,
			types,
		}))
	}
}
