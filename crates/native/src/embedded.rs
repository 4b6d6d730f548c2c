// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashMap, sync::Arc};

use crate::{NativeError, Platform, Result};

/// Engine binaries compiled into the host, one per platform
///
/// Embedders register the binaries they ship, typically with
/// `include_bytes!`.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedModules {
	modules: HashMap<Platform, Arc<[u8]>>,
}

impl EmbeddedModules {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, platform: Platform, bytes: impl Into<Arc<[u8]>>) -> Self {
		self.modules.insert(platform, bytes.into());
		self
	}

	pub fn get(&self, platform: Platform) -> Option<&Arc<[u8]>> {
		self.modules.get(&platform)
	}

	pub fn require(&self, platform: Platform) -> Result<&Arc<[u8]>> {
		self.get(platform).ok_or(NativeError::MissingEmbeddedModule(platform))
	}
}
