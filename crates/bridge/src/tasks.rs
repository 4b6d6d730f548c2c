// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Registration of task solutions and test filters

use std::{ffi::CString, sync::Arc};

use syspro_abi::{TEST_FILTER_EXCLUDE, TEST_FILTER_INCLUDE};
use syspro_model::{LanguageServer, Lexer, Parser, TestMode};
use tracing::instrument;

use crate::{Bridge, BridgeError, global, object::Object};

impl Bridge {
	/// Submit a lexer as the solution of task 1 and run its tests
	#[instrument(name = "bridge::register_lexer", level = "debug", skip_all, fields(mode = mode.to_mask()))]
	pub fn register_lexer(&self, lexer: Arc<dyn Lexer>, mode: TestMode) {
		self.crossing("register_lexer", |ctx| {
			let handle = ctx.handle(Some(Object::Lexer(lexer)));
			self.engine().register_task1_solution(handle, mode.to_mask());
			Ok(())
		});
		self.exit_on_fatal_errors();
	}

	/// Submit a parser as the solution of task 2 and run its tests
	#[instrument(name = "bridge::register_parser", level = "debug", skip_all)]
	pub fn register_parser(&self, parser: Arc<dyn Parser>) {
		self.crossing("register_parser", |ctx| {
			let handle = ctx.handle(Some(Object::Parser(parser)));
			self.engine().register_task2_solution(handle);
			Ok(())
		});
		self.exit_on_fatal_errors();
	}

	/// Submit a language server as the solution of task 3 and run its tests
	#[instrument(name = "bridge::register_language_server", level = "debug", skip_all)]
	pub fn register_language_server(&self, server: Arc<dyn LanguageServer>) {
		self.crossing("register_language_server", |ctx| {
			let handle = ctx.handle(Some(Object::LanguageServer(server)));
			self.engine().register_task3_solution(handle);
			Ok(())
		});
		self.exit_on_fatal_errors();
	}

	/// Run only tests whose name matches `pattern`
	pub fn add_test_include_filter(&self, pattern: &str) {
		self.add_test_filter(pattern, TEST_FILTER_INCLUDE);
	}

	/// Skip tests whose name matches `pattern`
	pub fn add_test_exclude_filter(&self, pattern: &str) {
		self.add_test_filter(pattern, TEST_FILTER_EXCLUDE);
	}

	fn add_test_filter(&self, pattern: &str, kind: i32) {
		self.crossing("add_test_filter", |_| {
			let pattern = CString::new(pattern).map_err(|_| BridgeError::InteriorNul)?;
			self.engine().add_test_filter(&pattern, kind);
			Ok(())
		});
		self.exit_on_fatal_errors();
	}

	pub fn clear_test_filters(&self) {
		self.crossing("clear_test_filters", |_| {
			self.engine().clear_test_filters();
			Ok(())
		});
		self.exit_on_fatal_errors();
	}
}

pub fn register_lexer(lexer: impl Lexer + 'static, mode: TestMode) {
	global().register_lexer(Arc::new(lexer), mode);
}

pub fn register_parser(parser: impl Parser + 'static) {
	global().register_parser(Arc::new(parser));
}

pub fn register_language_server(server: impl LanguageServer + 'static) {
	global().register_language_server(Arc::new(server));
}

pub fn add_test_include_filter(pattern: &str) {
	global().add_test_include_filter(pattern);
}

pub fn add_test_exclude_filter(pattern: &str) {
	global().add_test_exclude_filter(pattern);
}

pub fn clear_test_filters() {
	global().clear_test_filters();
}
