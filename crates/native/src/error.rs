// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{io, path::PathBuf};

use crate::platform::Platform;

pub type Result<T> = std::result::Result<T, NativeError>;

#[derive(Debug, thiserror::Error)]
pub enum NativeError {
	#[error("unsupported platform {os}/{arch}; supported platforms are {}", Platform::supported_list())]
	UnsupportedPlatform {
		os: String,
		arch: String,
	},

	#[error("native module override {0} does not exist")]
	MissingOverride(PathBuf),

	#[error("no native module is embedded for {0}; supported platforms are {supported}", supported = Platform::supported_list())]
	MissingEmbeddedModule(Platform),

	#[error("{context}: {source}")]
	Io {
		context: String,
		#[source]
		source: io::Error,
	},
}

impl NativeError {
	pub(crate) fn io(context: impl Into<String>) -> impl FnOnce(io::Error) -> NativeError {
		let context = context.into();
		move |source| NativeError::Io {
			context,
			source,
		}
	}
}
