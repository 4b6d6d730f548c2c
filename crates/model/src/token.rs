// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Tokens produced by lexers
//!
//! Token kinds share one flat numbering with syntax kinds: literal and
//! structural shapes take 0..8, keywords start at 100 and symbols at 200.

use std::fmt::{self, Display, Formatter};

use syspro_abi::{KEYWORD_KIND_BASE, SYMBOL_KIND_BASE};

use crate::syntax::{AnySyntaxKind, SyntaxKind};

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
	This,
	Super,
	Is,
	If,
	Else,
	For,
	In,
	While,
	Def,
	Var,
	Val,
	Return,
	Break,
	Continue,
	Abstract,
	Virtual,
	Override,
	Native,
	Class,
	Object,
	Interface,
	Null,
}

impl Keyword {
	pub const ALL: [Keyword; 22] = [
		Keyword::This,
		Keyword::Super,
		Keyword::Is,
		Keyword::If,
		Keyword::Else,
		Keyword::For,
		Keyword::In,
		Keyword::While,
		Keyword::Def,
		Keyword::Var,
		Keyword::Val,
		Keyword::Return,
		Keyword::Break,
		Keyword::Continue,
		Keyword::Abstract,
		Keyword::Virtual,
		Keyword::Override,
		Keyword::Native,
		Keyword::Class,
		Keyword::Object,
		Keyword::Interface,
		Keyword::Null,
	];

	pub fn ordinal(self) -> i32 {
		self as i32
	}

	pub fn code(self) -> i32 {
		KEYWORD_KIND_BASE + self.ordinal()
	}

	/// Contextual keywords are lexed as identifiers and only act as keywords in some positions
	pub fn is_contextual(self) -> bool {
		matches!(self, Keyword::Class | Keyword::Object | Keyword::Interface | Keyword::Null)
	}

	pub fn text(self) -> &'static str {
		match self {
			Keyword::This => "this",
			Keyword::Super => "super",
			Keyword::Is => "is",
			Keyword::If => "if",
			Keyword::Else => "else",
			Keyword::For => "for",
			Keyword::In => "in",
			Keyword::While => "while",
			Keyword::Def => "def",
			Keyword::Var => "var",
			Keyword::Val => "val",
			Keyword::Return => "return",
			Keyword::Break => "break",
			Keyword::Continue => "continue",
			Keyword::Abstract => "abstract",
			Keyword::Virtual => "virtual",
			Keyword::Override => "override",
			Keyword::Native => "native",
			Keyword::Class => "class",
			Keyword::Object => "object",
			Keyword::Interface => "interface",
			Keyword::Null => "null",
		}
	}

	pub fn from_text(text: &str) -> Option<Keyword> {
		Keyword::ALL.into_iter().find(|k| k.text() == text)
	}
}

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
	Dot,
	Colon,
	Comma,
	Plus,
	Minus,
	Asterisk,
	Slash,
	Percent,
	Exclamation,
	Tilde,
	Ampersand,
	Bar,
	AmpersandAmpersand,
	BarBar,
	Caret,
	LessThan,
	LessThanEquals,
	GreaterThan,
	GreaterThanEquals,
	LessThanLessThan,
	GreaterThanGreaterThan,
	OpenBracket,
	CloseBracket,
	OpenParen,
	CloseParen,
	Equals,
	EqualsEquals,
	ExclamationEquals,
	Question,
	Bound,
}

impl Symbol {
	pub const ALL: [Symbol; 30] = [
		Symbol::Dot,
		Symbol::Colon,
		Symbol::Comma,
		Symbol::Plus,
		Symbol::Minus,
		Symbol::Asterisk,
		Symbol::Slash,
		Symbol::Percent,
		Symbol::Exclamation,
		Symbol::Tilde,
		Symbol::Ampersand,
		Symbol::Bar,
		Symbol::AmpersandAmpersand,
		Symbol::BarBar,
		Symbol::Caret,
		Symbol::LessThan,
		Symbol::LessThanEquals,
		Symbol::GreaterThan,
		Symbol::GreaterThanEquals,
		Symbol::LessThanLessThan,
		Symbol::GreaterThanGreaterThan,
		Symbol::OpenBracket,
		Symbol::CloseBracket,
		Symbol::OpenParen,
		Symbol::CloseParen,
		Symbol::Equals,
		Symbol::EqualsEquals,
		Symbol::ExclamationEquals,
		Symbol::Question,
		Symbol::Bound,
	];

	pub fn ordinal(self) -> i32 {
		self as i32
	}

	pub fn code(self) -> i32 {
		SYMBOL_KIND_BASE + self.ordinal()
	}

	pub fn text(self) -> &'static str {
		match self {
			Symbol::Dot => ".",
			Symbol::Colon => ":",
			Symbol::Comma => ",",
			Symbol::Plus => "+",
			Symbol::Minus => "-",
			Symbol::Asterisk => "*",
			Symbol::Slash => "/",
			Symbol::Percent => "%",
			Symbol::Exclamation => "!",
			Symbol::Tilde => "~",
			Symbol::Ampersand => "&",
			Symbol::Bar => "|",
			Symbol::AmpersandAmpersand => "&&",
			Symbol::BarBar => "||",
			Symbol::Caret => "^",
			Symbol::LessThan => "<",
			Symbol::LessThanEquals => "<=",
			Symbol::GreaterThan => ">",
			Symbol::GreaterThanEquals => ">=",
			Symbol::LessThanLessThan => "<<",
			Symbol::GreaterThanGreaterThan => ">>",
			Symbol::OpenBracket => "[",
			Symbol::CloseBracket => "]",
			Symbol::OpenParen => "(",
			Symbol::CloseParen => ")",
			Symbol::Equals => "=",
			Symbol::EqualsEquals => "==",
			Symbol::ExclamationEquals => "!=",
			Symbol::Question => "?",
			Symbol::Bound => "<:",
		}
	}
}

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltInType {
	Int32,
	Int64,
	UInt32,
	UInt64,
	Boolean,
	Rune,
	String,
}

impl BuiltInType {
	pub fn ordinal(self) -> i32 {
		self as i32
	}

	fn suffix(self) -> &'static str {
		match self {
			BuiltInType::Int32 => "i32",
			BuiltInType::Int64 => "i64",
			BuiltInType::UInt32 => "u32",
			BuiltInType::UInt64 => "u64",
			BuiltInType::Boolean | BuiltInType::Rune | BuiltInType::String => "",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
	Bad,
	Indent,
	Dedent,
	Identifier {
		value: String,
		contextual_keyword: Option<Keyword>,
	},
	Keyword(Keyword),
	Symbol(Symbol),
	Boolean {
		ty: BuiltInType,
		value: bool,
	},
	Integer {
		ty: BuiltInType,
		has_type_suffix: bool,
		value: u64,
	},
	Rune {
		ty: BuiltInType,
		value: u32,
	},
	String {
		ty: BuiltInType,
		value: String,
	},
}

/// Lexed token with inclusive `start`..=`end` bounds including trivia
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
	pub start: i32,
	pub end: i32,
	pub leading_trivia_length: i32,
	pub trailing_trivia_length: i32,
	pub kind: TokenKind,
}

impl Token {
	pub fn new(start: i32, end: i32, kind: TokenKind) -> Self {
		Self {
			start,
			end,
			leading_trivia_length: 0,
			trailing_trivia_length: 0,
			kind,
		}
	}

	pub fn with_trivia(mut self, leading: i32, trailing: i32) -> Self {
		self.leading_trivia_length = leading;
		self.trailing_trivia_length = trailing;
		self
	}

	pub fn identifier(start: i32, end: i32, value: impl Into<String>) -> Self {
		let value = value.into();
		let contextual_keyword = Keyword::from_text(&value).filter(|k| k.is_contextual());
		Self::new(
			start,
			end,
			TokenKind::Identifier {
				value,
				contextual_keyword,
			},
		)
	}

	pub fn to_syntax_kind(&self) -> AnySyntaxKind {
		match &self.kind {
			TokenKind::Bad => AnySyntaxKind::Syntax(SyntaxKind::Bad),
			TokenKind::Indent => AnySyntaxKind::Syntax(SyntaxKind::Indent),
			TokenKind::Dedent => AnySyntaxKind::Syntax(SyntaxKind::Dedent),
			TokenKind::Identifier {
				..
			} => AnySyntaxKind::Syntax(SyntaxKind::Identifier),
			TokenKind::Keyword(keyword) => AnySyntaxKind::Keyword(*keyword),
			TokenKind::Symbol(symbol) => AnySyntaxKind::Symbol(*symbol),
			TokenKind::Boolean {
				..
			} => AnySyntaxKind::Syntax(SyntaxKind::Boolean),
			TokenKind::Integer {
				..
			} => AnySyntaxKind::Syntax(SyntaxKind::Integer),
			TokenKind::Rune {
				..
			} => AnySyntaxKind::Syntax(SyntaxKind::Rune),
			TokenKind::String {
				..
			} => AnySyntaxKind::Syntax(SyntaxKind::String),
		}
	}

	/// Wire kind code of this token
	pub fn code(&self) -> i32 {
		self.to_syntax_kind().code()
	}
}

impl Display for Token {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match &self.kind {
			TokenKind::Bad => f.write_str("<BAD>"),
			TokenKind::Indent => f.write_str("<INDENT>"),
			TokenKind::Dedent => f.write_str("<DEDENT>"),
			TokenKind::Identifier {
				value,
				..
			} => f.write_str(value),
			TokenKind::Keyword(keyword) => f.write_str(keyword.text()),
			TokenKind::Symbol(symbol) => f.write_str(symbol.text()),
			TokenKind::Boolean {
				value,
				..
			} => write!(f, "{value}"),
			TokenKind::Integer {
				ty,
				has_type_suffix,
				value,
			} => {
				if *has_type_suffix {
					write!(f, "{value}{}", ty.suffix())
				} else {
					write!(f, "{value}")
				}
			}
			TokenKind::Rune {
				value,
				..
			} => match char::from_u32(*value) {
				Some(c) => write!(f, "'{c}'"),
				None => write!(f, "'\\u{{{value:x}}}'"),
			},
			TokenKind::String {
				value,
				..
			} => write!(f, "\"{value}\""),
		}
	}
}

#[cfg(test)]
mod tests {
	use syspro_abi::NON_TERMINAL_KIND_BASE;

	use super::*;

	fn shape(kind: TokenKind) -> Token {
		Token::new(0, 0, kind)
	}

	#[test]
	fn test_terminal_shapes_are_dense() {
		let codes: Vec<i32> = vec![
			shape(TokenKind::Bad).code(),
			shape(TokenKind::Indent).code(),
			shape(TokenKind::Dedent).code(),
			Token::identifier(0, 0, "x").code(),
			shape(TokenKind::Boolean {
				ty: BuiltInType::Boolean,
				value: true,
			})
			.code(),
			shape(TokenKind::Integer {
				ty: BuiltInType::Int64,
				has_type_suffix: false,
				value: 1,
			})
			.code(),
			shape(TokenKind::Rune {
				ty: BuiltInType::Rune,
				value: 'a' as u32,
			})
			.code(),
			shape(TokenKind::String {
				ty: BuiltInType::String,
				value: "s".to_string(),
			})
			.code(),
		];
		assert_eq!(codes, (0..8).collect::<Vec<_>>());
	}

	#[test]
	fn test_keyword_codes_in_range() {
		for (index, keyword) in Keyword::ALL.into_iter().enumerate() {
			let code = shape(TokenKind::Keyword(keyword)).code();
			assert_eq!(code, KEYWORD_KIND_BASE + index as i32);
			assert!(code < KEYWORD_KIND_BASE + Keyword::ALL.len() as i32);
		}
	}

	#[test]
	fn test_symbol_codes_in_range() {
		for (index, symbol) in Symbol::ALL.into_iter().enumerate() {
			let code = shape(TokenKind::Symbol(symbol)).code();
			assert_eq!(code, SYMBOL_KIND_BASE + index as i32);
			assert!(code < SYMBOL_KIND_BASE + Symbol::ALL.len() as i32);
		}
	}

	#[test]
	fn test_token_kinds_stay_below_non_terminals() {
		assert!(SYMBOL_KIND_BASE + (Symbol::ALL.len() as i32) < NON_TERMINAL_KIND_BASE);
	}

	#[test]
	fn test_contextual_identifier() {
		let token = Token::identifier(0, 4, "class");
		assert_eq!(
			token.kind,
			TokenKind::Identifier {
				value: "class".to_string(),
				contextual_keyword: Some(Keyword::Class),
			}
		);

		let token = Token::identifier(0, 1, "if");
		assert!(matches!(
			token.kind,
			TokenKind::Identifier {
				contextual_keyword: None,
				..
			}
		));
	}

	#[test]
	fn test_integer_display() {
		let token = shape(TokenKind::Integer {
			ty: BuiltInType::UInt32,
			has_type_suffix: true,
			value: 42,
		});
		assert_eq!(token.to_string(), "42u32");
	}
}
