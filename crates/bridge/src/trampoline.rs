// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Native-callable entry points into host capabilities
//!
//! Each trampoline is a plain `extern "C"` function, monomorphized per
//! [`BridgeScope`] so it can find its bridge without any context pointer.
//! They run their body inside a crossing and never unwind: on failure they
//! return the null handle and raise the fatal flag.

use std::{
	ffi::{CStr, c_char},
	slice,
	sync::{Arc, OnceLock},
};

use syspro_abi::{
	ConstructTrampolineFFI, HandleFFI, NULL_HANDLE, RegistrarFFI, RequestFFI, StringFFI, TextTrampolineFFI,
};
use syspro_model::{LanguageServer, Lexer, Parser, SemanticModel, SymbolRef};
use tracing::{error, trace};

use crate::{Bridge, BridgeError, BridgeScope, Result, descriptor::DescriptorKind, object::Object};

/// Builds the trampolines of one scope on demand
#[derive(Clone, Copy)]
pub struct TrampolineFactory {
	lex: fn() -> TextTrampolineFFI,
	parse: fn() -> TextTrampolineFFI,
	build_model: fn() -> TextTrampolineFFI,
	lookup_type: fn() -> TextTrampolineFFI,
	construct: fn() -> ConstructTrampolineFFI,
	registrar: fn() -> RegistrarFFI,
}

impl TrampolineFactory {
	pub fn of<S: BridgeScope>() -> Self {
		Self {
			lex: || lex::<S>,
			parse: || parse::<S>,
			build_model: || build_model::<S>,
			lookup_type: || lookup_type::<S>,
			construct: || construct::<S>,
			registrar: || register_object::<S>,
		}
	}
}

/// Trampolines of one bridge, each created on first use and fixed afterwards
pub struct Trampolines {
	factory: TrampolineFactory,
	lex: OnceLock<TextTrampolineFFI>,
	parse: OnceLock<TextTrampolineFFI>,
	build_model: OnceLock<TextTrampolineFFI>,
	lookup_type: OnceLock<TextTrampolineFFI>,
	construct: OnceLock<ConstructTrampolineFFI>,
	registrar: OnceLock<RegistrarFFI>,
}

fn cached<T: Copy>(cell: &OnceLock<T>, name: &'static str, create: fn() -> T) -> T {
	*cell.get_or_init(|| {
		trace!(trampoline = name, "creating trampoline");
		create()
	})
}

impl Trampolines {
	pub fn new(factory: TrampolineFactory) -> Self {
		Self {
			factory,
			lex: OnceLock::new(),
			parse: OnceLock::new(),
			build_model: OnceLock::new(),
			lookup_type: OnceLock::new(),
			construct: OnceLock::new(),
			registrar: OnceLock::new(),
		}
	}

	pub fn lex(&self) -> TextTrampolineFFI {
		cached(&self.lex, "lex", self.factory.lex)
	}

	pub fn parse(&self) -> TextTrampolineFFI {
		cached(&self.parse, "parse", self.factory.parse)
	}

	pub fn build_model(&self) -> TextTrampolineFFI {
		cached(&self.build_model, "build_model", self.factory.build_model)
	}

	pub fn lookup_type(&self) -> TextTrampolineFFI {
		cached(&self.lookup_type, "lookup_type", self.factory.lookup_type)
	}

	pub fn construct(&self) -> ConstructTrampolineFFI {
		cached(&self.construct, "construct", self.factory.construct)
	}

	pub fn registrar(&self) -> RegistrarFFI {
		cached(&self.registrar, "registrar", self.factory.registrar)
	}
}

fn scoped<S: BridgeScope>(trampoline: &'static str) -> Option<&'static Bridge> {
	let bridge = S::bridge();
	if bridge.is_none() {
		error!(trampoline, "trampoline invoked before the bridge was installed");
	}
	bridge
}

/// Borrow a native string argument for the duration of the call
fn read_str<'a>(ptr: *const c_char, argument: &'static str) -> Result<&'a str> {
	if ptr.is_null() {
		return Err(BridgeError::NullPointer(argument));
	}
	Ok(unsafe { CStr::from_ptr(ptr) }.to_str()?)
}

fn read_handles<'a>(count: i32, ptr: *const HandleFFI, argument: &'static str) -> Result<&'a [HandleFFI]> {
	let len = usize::try_from(count).map_err(|_| BridgeError::NegativeCount(count))?;
	if len == 0 {
		return Ok(&[]);
	}
	if ptr.is_null() {
		return Err(BridgeError::NullPointer(argument));
	}
	Ok(unsafe { slice::from_raw_parts(ptr, len) })
}

fn expect<T>(
	bridge: &Bridge,
	handle: HandleFFI,
	expected: DescriptorKind,
	pick: impl FnOnce(Object) -> std::result::Result<T, Object>,
) -> Result<T> {
	pick(bridge.registry().resolve(handle)?).map_err(|actual| BridgeError::UnexpectedObject {
		handle,
		expected,
		actual: actual.descriptor(),
	})
}

fn lexer(bridge: &Bridge, handle: HandleFFI) -> Result<Arc<dyn Lexer>> {
	expect(bridge, handle, DescriptorKind::Lexer, |object| match object {
		Object::Lexer(lexer) => Ok(lexer),
		other => Err(other),
	})
}

fn parser(bridge: &Bridge, handle: HandleFFI) -> Result<Arc<dyn Parser>> {
	expect(bridge, handle, DescriptorKind::Parser, |object| match object {
		Object::Parser(parser) => Ok(parser),
		other => Err(other),
	})
}

fn language_server(bridge: &Bridge, handle: HandleFFI) -> Result<Arc<dyn LanguageServer>> {
	expect(bridge, handle, DescriptorKind::LanguageServer, |object| match object {
		Object::LanguageServer(server) => Ok(server),
		other => Err(other),
	})
}

fn semantic_model(bridge: &Bridge, handle: HandleFFI) -> Result<Arc<dyn SemanticModel>> {
	expect(bridge, handle, DescriptorKind::SemanticModel, |object| match object {
		Object::SemanticModel(model) => Ok(model),
		other => Err(other),
	})
}

fn symbol(bridge: &Bridge, handle: HandleFFI) -> Result<SymbolRef> {
	expect(bridge, handle, DescriptorKind::SemanticSymbol, |object| match object {
		Object::SemanticSymbol(symbol) => Ok(symbol),
		other => Err(other),
	})
}

/// Lex `text` with the lexer behind `implementation`, returning a list of tokens
pub extern "C" fn lex<S: BridgeScope>(implementation: HandleFFI, text: StringFFI) -> HandleFFI {
	let Some(bridge) = scoped::<S>("lex") else {
		return NULL_HANDLE;
	};
	bridge.callback("lex", |_| {
		let lexer = lexer(bridge, implementation)?;
		let tokens = lexer.lex(read_str(text, "text")?)?;
		Ok(Some(Object::list(tokens.into_iter().map(|token| Some(Object::token(token))))))
	})
}

pub extern "C" fn parse<S: BridgeScope>(implementation: HandleFFI, text: StringFFI) -> HandleFFI {
	let Some(bridge) = scoped::<S>("parse") else {
		return NULL_HANDLE;
	};
	bridge.callback("parse", |_| {
		let parser = parser(bridge, implementation)?;
		Ok(Some(Object::ParseResult(parser.parse(read_str(text, "text")?)?)))
	})
}

pub extern "C" fn build_model<S: BridgeScope>(implementation: HandleFFI, text: StringFFI) -> HandleFFI {
	let Some(bridge) = scoped::<S>("build_model") else {
		return NULL_HANDLE;
	};
	bridge.callback("build_model", |_| {
		let server = language_server(bridge, implementation)?;
		Ok(Some(Object::SemanticModel(server.build_model(read_str(text, "text")?)?)))
	})
}

/// Look up a type by name in a semantic model, null when there is no such type
pub extern "C" fn lookup_type<S: BridgeScope>(implementation: HandleFFI, name: StringFFI) -> HandleFFI {
	let Some(bridge) = scoped::<S>("lookup_type") else {
		return NULL_HANDLE;
	};
	bridge.callback("lookup_type", |_| {
		let model = semantic_model(bridge, implementation)?;
		Ok(model.lookup_type(read_str(name, "name")?)?.map(Object::SemanticSymbol))
	})
}

/// Instantiate the generic type behind `implementation` with `count` type argument handles
pub extern "C" fn construct<S: BridgeScope>(
	implementation: HandleFFI,
	count: i32,
	type_arguments: *const HandleFFI,
) -> HandleFFI {
	let Some(bridge) = scoped::<S>("construct") else {
		return NULL_HANDLE;
	};
	bridge.callback("construct", |_| {
		let definition = symbol(bridge, implementation)?;
		let arguments = read_handles(count, type_arguments, "type_arguments")?
			.iter()
			.map(|handle| symbol(bridge, *handle))
			.collect::<Result<Vec<_>>>()?;
		Ok(Some(Object::SemanticSymbol(definition.construct(&arguments)?)))
	})
}

/// Answer an engine request for the contents of `count` objects, serialized as catalog entry `kind`
pub extern "C" fn register_object<S: BridgeScope>(
	request: RequestFFI,
	kind: i32,
	count: i32,
	handles: *const HandleFFI,
) {
	let Some(bridge) = scoped::<S>("registrar") else {
		return;
	};
	bridge.crossing("registrar", |ctx| {
		let kind = DescriptorKind::try_from(kind)?;
		let objects = read_handles(count, handles, "handles")?
			.iter()
			.map(|handle| ctx.bridge().registry().from_handle(*handle))
			.collect::<Result<Vec<_>>>()?;
		trace!(request, ?kind, count = objects.len(), "answering object request");
		let array = ctx.serialize_flat_objects(&objects, kind)?;
		ctx.bridge().engine().register_object_result(request, array);
		Ok(())
	});
}
