// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use syspro_abi::{
	CapabilityFFI, DiagnosticArgumentFFI, DiagnosticFFI, ErrorCodeFFI, HandleFFI, KEYWORD_KIND_BASE, ListFFI,
	NULL_HANDLE, ParseResultFFI, SemanticModelFFI, SemanticSymbolFFI, SyntaxNodeFFI, TYPE_FLAG_ABSTRACT, TextSpanFFI,
	TokenFFI,
};
use syspro_bridge::{DescriptorKind, Object};
use syspro_model::{
	BuiltInType, Keyword, LanguageServer, Lexer, Parser, Symbol, SymbolDetail, SymbolKind, SymbolTable, SyntaxKind, TextSpan, Token,
	TokenKind, TypeDetail, VariableDetail,
};
use syspro_testing::{
	bridge_scope,
	engine::{array_len, exit_code, read_c_string, read_flat_array, read_list, request, request_raw},
	fake_bridge, init_test_logging,
	sample::{FlatParser, SampleLanguageServer, TreeNode, WhitespaceLexer},
};

fn tokens(handles: &[HandleFFI]) -> Vec<(TokenFFI, Option<String>)> {
	request(1, DescriptorKind::Token, handles, |array| unsafe {
		read_flat_array::<TokenFFI>(array).into_iter().map(|t| (t, read_c_string(t.value1))).collect()
	})
	.unwrap()
}

#[test]
fn test_empty_request_has_only_the_count() {
	init_test_logging();
	bridge_scope!(Scope);
	fake_bridge::<Scope>();

	let count = request(7, DescriptorKind::Token, &[], |array| unsafe { array_len(array) });
	assert_eq!(count, Some(0));
}

#[test]
fn test_single_token() {
	bridge_scope!(Scope);
	let bridge = fake_bridge::<Scope>();

	let token = Object::token(Token::identifier(3, 7, "value").with_trivia(1, 2));
	let handle = bridge.registry().to_handle(Some(&token));

	let result = tokens(&[handle]);
	assert_eq!(result.len(), 1);
	let (ffi, name) = &result[0];
	assert_eq!(ffi.kind, SyntaxKind::Identifier.code());
	assert_eq!((ffi.start, ffi.end), (3, 7));
	assert_eq!((ffi.leading_trivia_length, ffi.trailing_trivia_length), (1, 2));
	assert_eq!(name.as_deref(), Some("value"));
	assert_eq!(ffi.value3, 0);
}

#[test]
fn test_token_payloads() {
	bridge_scope!(Scope);
	let bridge = fake_bridge::<Scope>();

	let objects = [
		Object::token(Token::identifier(0, 4, "class")),
		Object::token(Token::new(0, 2, TokenKind::Keyword(Keyword::Var))),
		Object::token(Token::new(
			0,
			3,
			TokenKind::Boolean {
				ty: BuiltInType::Boolean,
				value: true,
			},
		)),
		Object::token(Token::new(
			0,
			5,
			TokenKind::Integer {
				ty: BuiltInType::UInt64,
				has_type_suffix: true,
				value: u64::MAX,
			},
		)),
		Object::token(Token::new(
			0,
			2,
			TokenKind::Rune {
				ty: BuiltInType::Rune,
				value: 'λ' as u32,
			},
		)),
		Object::token(Token::new(
			0,
			6,
			TokenKind::String {
				ty: BuiltInType::String,
				value: "text".to_string(),
			},
		)),
	];
	let handles: Vec<_> = objects.iter().map(|o| bridge.registry().to_handle(Some(o))).collect();
	let result = tokens(&handles);

	let (identifier, name) = &result[0];
	assert_eq!(name.as_deref(), Some("class"));
	assert_eq!(identifier.value3, (KEYWORD_KIND_BASE + Keyword::Class.ordinal()) as i64);

	let (keyword, _) = &result[1];
	assert_eq!(keyword.kind, KEYWORD_KIND_BASE + Keyword::Var.ordinal());
	assert!(keyword.value1.is_null());

	let (boolean, _) = &result[2];
	assert_eq!((boolean.ty, boolean.value2), (BuiltInType::Boolean.ordinal(), 1));

	let (integer, _) = &result[3];
	assert_eq!(integer.ty, BuiltInType::UInt64.ordinal());
	assert_eq!(integer.value2 as u64, u64::MAX);
	assert_eq!(integer.value3, 1);

	let (rune, _) = &result[4];
	assert_eq!(rune.value3, 'λ' as i64);

	let (string, value) = &result[5];
	assert_eq!(string.ty, BuiltInType::String.ordinal());
	assert_eq!(value.as_deref(), Some("text"));
}

#[test]
fn test_many_tokens_from_lexer() {
	bridge_scope!(Scope);
	let bridge = fake_bridge::<Scope>();

	let source = (0..200).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
	let lexed = WhitespaceLexer.lex(&source).unwrap();
	let handles: Vec<_> =
		lexed.iter().map(|t| bridge.registry().to_handle(Some(&Object::token(t.clone())))).collect();

	let result = tokens(&handles);
	assert_eq!(result.len(), 200);
	for (index, ((ffi, name), token)) in result.iter().zip(&lexed).enumerate() {
		assert_eq!(name.as_deref(), Some(format!("w{index}").as_str()));
		assert_eq!((ffi.start, ffi.end), (token.start, token.end));
	}
}

#[test]
fn test_null_entries_leave_zeroed_slots() {
	bridge_scope!(Scope);
	let bridge = fake_bridge::<Scope>();

	let span = bridge.registry().to_handle(Some(&Object::text_span(TextSpan::new(4, 2).unwrap())));
	let spans = request(2, DescriptorKind::TextSpan, &[NULL_HANDLE, span], |array| unsafe {
		read_flat_array::<TextSpanFFI>(array)
	})
	.unwrap();
	assert_eq!(
		spans,
		vec![
			TextSpanFFI {
				start: 0,
				length: 0
			},
			TextSpanFFI {
				start: 4,
				length: 2
			}
		]
	);
}

#[test]
fn test_list_data_is_count_prefixed() {
	bridge_scope!(Scope);
	let bridge = fake_bridge::<Scope>();

	let a = Object::text_span(TextSpan::new(0, 1).unwrap());
	let list = Object::list([Some(a.clone()), None, Some(a.clone())]);
	let handle = bridge.registry().to_handle(Some(&list));

	let (size, items) = request(3, DescriptorKind::List, &[handle], |array| unsafe {
		let lists = read_flat_array::<ListFFI>(array);
		(lists[0].size, read_list(&lists[0]))
	})
	.unwrap();

	let a_handle = bridge.registry().to_handle(Some(&a));
	assert_eq!(size, 3);
	assert_eq!(items, vec![a_handle, NULL_HANDLE, a_handle]);
}

#[test]
fn test_capability_carries_trampoline() {
	bridge_scope!(Scope);
	let bridge = fake_bridge::<Scope>();

	let lexer = Object::Lexer(Arc::new(WhitespaceLexer));
	let handle = bridge.registry().to_handle(Some(&lexer));
	let capability = request(4, DescriptorKind::Lexer, &[handle], |array| unsafe {
		read_flat_array::<CapabilityFFI>(array)[0]
	})
	.unwrap();

	assert_eq!(capability.implementation, handle);
	let trampoline = capability.trampoline.unwrap();
	assert_eq!(trampoline as usize, bridge.trampolines().lex() as usize);
}

#[test]
fn test_parse_result_graph() {
	bridge_scope!(Scope);
	let bridge = fake_bridge::<Scope>();

	let result = Object::ParseResult(FlatParser.parse("a bad").unwrap());
	let handle = bridge.registry().to_handle(Some(&result));

	let parse_result =
		request(5, DescriptorKind::ParseResult, &[handle], |array| unsafe { read_flat_array::<ParseResultFFI>(array)[0] })
			.unwrap();
	assert_ne!(parse_result.root, NULL_HANDLE);

	let root = request(6, DescriptorKind::SyntaxNode, &[parse_result.root], |array| unsafe {
		read_flat_array::<SyntaxNodeFFI>(array)[0]
	})
	.unwrap();
	assert_eq!(root.kind, SyntaxKind::SourceText.code());
	assert_eq!(root.kind, 2000);
	assert_eq!((root.position, root.full_length, root.slot_count), (0, 5, 2));
	assert_eq!(root.token, NULL_HANDLE);

	let slots = request(7, DescriptorKind::List, &[root.slots], |array| unsafe {
		read_list(&read_flat_array::<ListFFI>(array)[0])
	})
	.unwrap();
	assert_eq!(slots.len(), 2);

	let terminal =
		request(8, DescriptorKind::SyntaxNode, &[slots[1]], |array| unsafe { read_flat_array::<SyntaxNodeFFI>(array)[0] })
			.unwrap();
	assert_eq!(terminal.kind, SyntaxKind::Identifier.code());
	assert_eq!((terminal.position, terminal.full_length), (2, 3));
	assert_ne!(terminal.token, NULL_HANDLE);

	let diagnostics = request(9, DescriptorKind::List, &[parse_result.diagnostics], |array| unsafe {
		read_list(&read_flat_array::<ListFFI>(array)[0])
	})
	.unwrap();
	let diagnostic =
		request(10, DescriptorKind::Diagnostic, &diagnostics, |array| unsafe { read_flat_array::<DiagnosticFFI>(array)[0] })
			.unwrap();

	let code = request(11, DescriptorKind::ErrorCode, &[diagnostic.error_code], |array| unsafe {
		read_c_string(read_flat_array::<ErrorCodeFFI>(array)[0].name)
	})
	.unwrap();
	assert_eq!(code.as_deref(), Some("UNEXPECTED_WORD"));

	let location = request(12, DescriptorKind::TextSpan, &[diagnostic.location], |array| unsafe {
		read_flat_array::<TextSpanFFI>(array)[0]
	})
	.unwrap();
	assert_eq!(
		location,
		TextSpanFFI {
			start: 2,
			length: 3
		}
	);

	let arguments = request(13, DescriptorKind::List, &[diagnostic.arguments], |array| unsafe {
		read_list(&read_flat_array::<ListFFI>(array)[0])
	})
	.unwrap();
	let arguments = request(14, DescriptorKind::DiagnosticArgument, &arguments, |array| unsafe {
		read_flat_array::<DiagnosticArgumentFFI>(array)
			.into_iter()
			.map(|argument| (read_c_string(argument.string_value), argument.node_value))
			.collect::<Vec<_>>()
	})
	.unwrap();
	assert_eq!(arguments[0], (Some("bad".to_string()), NULL_HANDLE));
	assert_eq!(arguments[1].0.as_deref(), Some("Identifier [2, 5)"));
	assert_eq!(arguments[1].1, slots[1]);

	let hints = request(15, DescriptorKind::List, &[diagnostic.hints], |array| unsafe {
		read_list(&read_flat_array::<ListFFI>(array)[0])
	})
	.unwrap();
	let hint = request(16, DescriptorKind::Diagnostic, &hints, |array| unsafe { read_flat_array::<DiagnosticFFI>(array)[0] })
		.unwrap();
	let hint_code = request(17, DescriptorKind::ErrorCode, &[hint.error_code], |array| unsafe {
		read_c_string(read_flat_array::<ErrorCodeFFI>(array)[0].name)
	})
	.unwrap();
	assert_eq!(hint_code.as_deref(), Some("REMOVE_WORD"));
	let hint_location = request(18, DescriptorKind::TextSpan, &[hint.location], |array| unsafe {
		read_flat_array::<TextSpanFFI>(array)[0]
	})
	.unwrap();
	assert_eq!(hint_location, location);
}

#[test]
fn test_repeated_requests_reuse_field_handles() {
	bridge_scope!(Scope);
	let bridge = fake_bridge::<Scope>();

	let result = Object::ParseResult(FlatParser.parse("a bad").unwrap());
	let handle = bridge.registry().to_handle(Some(&result));
	let parse_result = || {
		request(1, DescriptorKind::ParseResult, &[handle], |array| unsafe { read_flat_array::<ParseResultFFI>(array)[0] })
			.unwrap()
	};
	let diagnostic = |handles: &[HandleFFI]| {
		request(2, DescriptorKind::Diagnostic, handles, |array| unsafe { read_flat_array::<DiagnosticFFI>(array)[0] })
			.unwrap()
	};
	let list = |list: HandleFFI| {
		request(3, DescriptorKind::List, &[list], |array| unsafe { read_list(&read_flat_array::<ListFFI>(array)[0]) })
			.unwrap()
	};

	let first = parse_result();
	let first_diagnostic = diagnostic(&list(first.diagnostics));
	let registered = bridge.registry().len();

	let second = parse_result();
	let second_diagnostic = diagnostic(&list(second.diagnostics));
	assert_eq!(bridge.registry().len(), registered);

	assert_eq!((second.root, second.invalid_ranges, second.diagnostics), (first.root, first.invalid_ranges, first.diagnostics));
	assert_eq!(list(second.invalid_ranges), list(first.invalid_ranges));
	assert_eq!(
		(second_diagnostic.error_code, second_diagnostic.arguments, second_diagnostic.location, second_diagnostic.hints),
		(first_diagnostic.error_code, first_diagnostic.arguments, first_diagnostic.location, first_diagnostic.hints)
	);

	let node = |handle: HandleFFI| {
		request(4, DescriptorKind::SyntaxNode, &[handle], |array| unsafe { read_flat_array::<SyntaxNodeFFI>(array)[0] })
			.unwrap()
	};
	assert_eq!(node(first.root).slots, node(first.root).slots);
	assert!(!bridge.fatal().is_raised());
}

#[test]
fn test_symbol_lists_are_stable() {
	bridge_scope!(Scope);
	let bridge = fake_bridge::<Scope>();

	let model = Object::SemanticModel(SampleLanguageServer.build_model("Int List").unwrap());
	let handle = bridge.registry().to_handle(Some(&model));
	let model = || {
		request(1, DescriptorKind::SemanticModel, &[handle], |array| unsafe { read_flat_array::<SemanticModelFFI>(array)[0] })
			.unwrap()
	};

	let first = model();
	let types = request(2, DescriptorKind::List, &[first.type_definitions], |array| unsafe {
		read_list(&read_flat_array::<ListFFI>(array)[0])
	})
	.unwrap();
	let members = |types: &[HandleFFI]| {
		request(3, DescriptorKind::SemanticSymbol, types, |array| unsafe {
			read_flat_array::<SemanticSymbolFFI>(array).into_iter().map(|symbol| symbol.param4).collect::<Vec<_>>()
		})
		.unwrap()
	};
	let first_members = members(&types);
	let registered = bridge.registry().len();

	let second = model();
	assert_eq!(second.type_definitions, first.type_definitions);
	assert_eq!(second.diagnostics, first.diagnostics);
	assert_eq!(members(&types), first_members);
	assert_eq!(bridge.registry().len(), registered);
}

#[test]
fn test_metrics_of_node_without_terminals_are_negative() {
	bridge_scope!(Scope);
	let bridge = fake_bridge::<Scope>();

	let empty = Object::SyntaxNode(TreeNode::node(SyntaxKind::List, vec![None]));
	let handle = bridge.registry().to_handle(Some(&empty));
	let node =
		request(1, DescriptorKind::SyntaxNode, &[handle], |array| unsafe { read_flat_array::<SyntaxNodeFFI>(array)[0] })
			.unwrap();

	assert_eq!(
		(node.position, node.full_length, node.leading_trivia_length, node.trailing_trivia_length),
		(-1, -1, -1, -1)
	);
	assert_eq!(node.slot_count, 1);
	assert!(!bridge.fatal().is_raised());
}

#[test]
fn test_semantic_model_and_symbols() {
	bridge_scope!(Scope);
	let bridge = fake_bridge::<Scope>();

	let model = Object::SemanticModel(SampleLanguageServer.build_model("Int List").unwrap());
	let handle = bridge.registry().to_handle(Some(&model));

	let model =
		request(1, DescriptorKind::SemanticModel, &[handle], |array| unsafe { read_flat_array::<SemanticModelFFI>(array)[0] })
			.unwrap();
	assert_eq!(model.implementation, handle);
	assert_eq!(model.lookup_type.unwrap() as usize, bridge.trampolines().lookup_type() as usize);

	let types = request(2, DescriptorKind::List, &[model.type_definitions], |array| unsafe {
		read_list(&read_flat_array::<ListFFI>(array)[0])
	})
	.unwrap();
	let symbols = request(3, DescriptorKind::SemanticSymbol, &types, |array| unsafe {
		read_flat_array::<SemanticSymbolFFI>(array)
			.into_iter()
			.map(|symbol| (symbol, read_c_string(symbol.name)))
			.collect::<Vec<_>>()
	})
	.unwrap();

	assert_eq!(symbols.len(), 2);
	let (int, name) = &symbols[0];
	assert_eq!(name.as_deref(), Some("Int"));
	assert_eq!(int.kind, SymbolKind::Class.ordinal());
	assert_eq!(int.owner, NULL_HANDLE);
	assert!(int.construct.is_some());
	assert_eq!(int.implementation, types[0]);

	let definition = request(4, DescriptorKind::SyntaxNode, &[int.definition], |array| unsafe {
		read_flat_array::<SyntaxNodeFFI>(array)[0]
	})
	.unwrap();
	assert_eq!(definition.kind, SyntaxKind::Identifier.code());
	assert_eq!(definition.position, 0);
}

#[test]
fn test_symbol_params_by_kind() {
	bridge_scope!(Scope);
	let bridge = fake_bridge::<Scope>();

	let table = SymbolTable::new();
	let class = table
		.insert(Symbol::new(
			SymbolKind::Class,
			"Shape",
			SymbolDetail::Type(TypeDetail {
				is_abstract: true,
				..TypeDetail::default()
			}),
		))
		.unwrap();
	let field = table
		.insert(
			Symbol::new(
				SymbolKind::Field,
				"area",
				SymbolDetail::Variable(VariableDetail {
					ty: Some(class.id()),
				}),
			)
			.with_owner(class.id()),
		)
		.unwrap();
	table
		.update(class.id(), |symbol| {
			if let SymbolDetail::Type(detail) = &mut symbol.detail {
				detail.members.push(field.id());
			}
		})
		.unwrap();

	let class_handle = bridge.registry().to_handle(Some(&Object::SemanticSymbol(class.clone())));
	let field_handle = bridge.registry().to_handle(Some(&Object::SemanticSymbol(field.clone())));
	let symbols = request(1, DescriptorKind::SemanticSymbol, &[class_handle, field_handle], |array| unsafe {
		read_flat_array::<SemanticSymbolFFI>(array)
	})
	.unwrap();

	let (class_ffi, field_ffi) = (symbols[0], symbols[1]);
	assert_eq!(class_ffi.flags, TYPE_FLAG_ABSTRACT);
	assert_eq!(field_ffi.kind, SymbolKind::Field.ordinal());
	assert_eq!(field_ffi.owner, class_handle);
	assert_eq!(field_ffi.param1, class_handle);
	assert!(field_ffi.construct.is_none());

	let members = request(2, DescriptorKind::List, &[class_ffi.param4], |array| unsafe {
		read_list(&read_flat_array::<ListFFI>(array)[0])
	})
	.unwrap();
	assert_eq!(members, vec![field_handle]);
}

#[test]
fn test_shape_mismatch_is_fatal() {
	bridge_scope!(Scope);
	let bridge = fake_bridge::<Scope>();

	let token = bridge.registry().to_handle(Some(&Object::token(Token::identifier(0, 0, "x"))));
	let answered = request(1, DescriptorKind::TextSpan, &[token], |_| ());

	assert!(answered.is_none());
	assert!(bridge.fatal().is_raised());
	assert_eq!(bridge.active_contexts(), 0);
	assert!(bridge.registry().resolve(token).is_ok());
	// the registrar is a callback, termination is left to the next entry point
	assert_eq!(exit_code(), None);
}

#[test]
fn test_unknown_descriptor_is_fatal() {
	bridge_scope!(Scope);
	let bridge = fake_bridge::<Scope>();

	assert!(request_raw(1, 42, &[], |_| ()).is_none());
	assert!(bridge.fatal().is_raised());
}

#[test]
fn test_out_of_range_handle_is_fatal() {
	bridge_scope!(Scope);
	let bridge = fake_bridge::<Scope>();

	assert!(request(1, DescriptorKind::Token, &[999], |_| ()).is_none());
	assert!(bridge.fatal().is_raised());
	assert_eq!(bridge.fatal().failures(), 1);
}
