// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Debug, Display, Formatter},
	sync::Arc,
};

use crate::syntax::{SyntaxNode, TextSpan};

/// Identifier of a diagnostic message
pub trait ErrorCode: Send + Sync {
	fn name(&self) -> &str;
}

impl ErrorCode for String {
	fn name(&self) -> &str {
		self
	}
}

impl ErrorCode for &'static str {
	fn name(&self) -> &str {
		self
	}
}

/// Argument substituted into a diagnostic message
///
/// Every argument has a textual rendering; node arguments keep the node so
/// native code can link to it.
pub struct DiagnosticArgument {
	text: String,
	node: Option<Arc<dyn SyntaxNode>>,
}

impl DiagnosticArgument {
	pub fn text(value: impl Display) -> Self {
		Self {
			text: value.to_string(),
			node: None,
		}
	}

	pub fn node(node: Arc<dyn SyntaxNode>) -> Self {
		let text = match node.span() {
			Ok(span) => format!("{} {}", node.kind(), span),
			Err(_) => node.kind().to_string(),
		};
		Self {
			text,
			node: Some(node),
		}
	}

	pub fn as_text(&self) -> &str {
		&self.text
	}

	pub fn as_node(&self) -> Option<&Arc<dyn SyntaxNode>> {
		self.node.as_ref()
	}
}

impl Debug for DiagnosticArgument {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("DiagnosticArgument").field("text", &self.text).field("node", &self.node.is_some()).finish()
	}
}

pub struct DiagnosticInfo {
	pub error_code: Arc<dyn ErrorCode>,
	pub arguments: Vec<Arc<DiagnosticArgument>>,
}

impl DiagnosticInfo {
	pub fn new(error_code: Arc<dyn ErrorCode>, arguments: Vec<DiagnosticArgument>) -> Self {
		Self {
			error_code,
			arguments: arguments.into_iter().map(Arc::new).collect(),
		}
	}
}

pub struct Diagnostic {
	pub info: DiagnosticInfo,
	pub location: Arc<TextSpan>,
	pub hints: Vec<Arc<Diagnostic>>,
}

impl Diagnostic {
	pub fn new(info: DiagnosticInfo, location: TextSpan) -> Self {
		Self {
			info,
			location: Arc::new(location),
			hints: Vec::new(),
		}
	}

	pub fn with_hint(mut self, hint: Diagnostic) -> Self {
		self.hints.push(Arc::new(hint));
		self
	}

	pub fn error_code(&self) -> &Arc<dyn ErrorCode> {
		&self.info.error_code
	}

	pub fn arguments(&self) -> &[Arc<DiagnosticArgument>] {
		&self.info.arguments
	}
}

impl Debug for Diagnostic {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Diagnostic")
			.field("error_code", &self.info.error_code.name())
			.field("arguments", &self.info.arguments)
			.field("location", &self.location)
			.field("hints", &self.hints)
			.finish()
	}
}
