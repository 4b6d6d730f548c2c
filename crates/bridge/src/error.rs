// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{path::PathBuf, str::Utf8Error};

use syspro_abi::HandleFFI;

use crate::descriptor::DescriptorKind;

pub type Result<T> = std::result::Result<T, BridgeError>;

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
	#[error("handle {0} is out of range")]
	HandleOutOfRange(HandleFFI),

	#[error("null handle where an object is required")]
	NullHandle,

	#[error("descriptor kind {0} is not in the catalog")]
	UnknownDescriptor(i32),

	#[error("{actual:?} object cannot be serialized as {requested:?}")]
	ShapeMismatch {
		requested: DescriptorKind,
		actual: DescriptorKind,
	},

	#[error("handle {handle} refers to a {actual:?} object, expected {expected:?}")]
	UnexpectedObject {
		handle: HandleFFI,
		expected: DescriptorKind,
		actual: DescriptorKind,
	},

	#[error("null pointer passed for {0}")]
	NullPointer(&'static str),

	#[error("negative count {0}")]
	NegativeCount(i32),

	#[error("{0} elements do not fit a 32-bit count")]
	CountOverflow(usize),

	#[error("string is not valid UTF-8: {0}")]
	InvalidUtf8(#[from] Utf8Error),

	#[error("string contains an interior NUL byte")]
	InteriorNul,

	#[error("arena allocation of {0} bytes failed")]
	Allocation(usize),

	#[error("failed to load native module {path}: {source}")]
	Load {
		path: PathBuf,
		#[source]
		source: libloading::Error,
	},

	#[error("native module does not export `{name}`: {source}")]
	MissingSymbol {
		name: String,
		#[source]
		source: libloading::Error,
	},

	#[error("bridge is already initialized")]
	AlreadyInitialized,

	#[error("bridge was built for a different scope")]
	ScopeMismatch,

	#[error("panic: {0}")]
	Panic(String),

	#[error(transparent)]
	Model(#[from] syspro_model::Error),

	#[error(transparent)]
	Native(#[from] syspro_native::NativeError),
}
