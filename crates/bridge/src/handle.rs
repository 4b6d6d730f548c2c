// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashMap;

use parking_lot::Mutex;
use syspro_abi::{HandleFFI, NULL_HANDLE};
use tracing::trace;

use crate::{
	BridgeError, Result,
	object::{Object, ObjectKey},
};

/// Process-wide table mapping host objects to integer handles
///
/// Handle `0` is reserved for null. Every other handle is the index of the
/// object in the table, assigned on first sight and stable for the lifetime
/// of the registry. Objects are never released.
pub struct HandleRegistry {
	inner: Mutex<Inner>,
}

struct Inner {
	handles: HashMap<ObjectKey, HandleFFI>,
	objects: Vec<Option<Object>>,
}

impl HandleRegistry {
	pub fn new() -> Self {
		Self {
			inner: Mutex::new(Inner {
				handles: HashMap::new(),
				objects: vec![None],
			}),
		}
	}

	/// Handle of `object`, registering it when first seen
	pub fn to_handle(&self, object: Option<&Object>) -> HandleFFI {
		let Some(object) = object else {
			return NULL_HANDLE;
		};
		self.inner.lock().register(object.key(), || object.clone())
	}

	/// Handle of the object keyed by `key`, building it with `make` only when none is registered yet
	///
	/// `make` runs without the registry lock held. When another thread registers
	/// the same key meanwhile, its object wins and the built one is dropped.
	pub fn to_handle_with(&self, key: ObjectKey, make: impl FnOnce() -> Result<Object>) -> Result<HandleFFI> {
		if let Some(handle) = self.inner.lock().handles.get(&key) {
			return Ok(*handle);
		}
		let object = make()?;
		Ok(self.inner.lock().register(key, || object))
	}

	/// Object registered under `handle`, `None` for the null handle
	pub fn from_handle(&self, handle: HandleFFI) -> Result<Option<Object>> {
		let inner = self.inner.lock();
		usize::try_from(handle)
			.ok()
			.and_then(|index| inner.objects.get(index))
			.cloned()
			.ok_or(BridgeError::HandleOutOfRange(handle))
	}

	/// Like [`from_handle`](Self::from_handle) but rejects the null handle
	pub fn resolve(&self, handle: HandleFFI) -> Result<Object> {
		self.from_handle(handle)?.ok_or(BridgeError::NullHandle)
	}

	/// Number of slots, including the reserved null slot
	pub fn len(&self) -> usize {
		self.inner.lock().objects.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() <= 1
	}
}

impl Inner {
	fn register(&mut self, key: ObjectKey, object: impl FnOnce() -> Object) -> HandleFFI {
		if let Some(handle) = self.handles.get(&key) {
			return *handle;
		}

		let object = object();
		let handle = self.objects.len() as HandleFFI;
		trace!(handle, ?object, "registered object");
		self.objects.push(Some(object));
		self.handles.insert(key, handle);
		handle
	}
}

impl Default for HandleRegistry {
	fn default() -> Self {
		Self::new()
	}
}
