// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashMap, ffi::c_char, sync::Arc};

use syspro_abi::{FLAT_ARRAY_HEADER_SIZE, HandleFFI, StringFFI};
use syspro_model::Symbol;

use tracing::trace;

use crate::{
	Bridge, Result,
	arena::Arena,
	descriptor,
	descriptor::DescriptorKind,
	object::{Field, Object, ObjectList},
};

/// Scope of a single host/native crossing
///
/// Owns the arena that backs every pointer handed to native code while the
/// crossing runs, and interns strings so the same host string is copied
/// once. Everything is released when the context drops.
pub struct CallContext<'b> {
	bridge: &'b Bridge,
	arena: Arena,
	strings: HashMap<(usize, usize), *const c_char>,
	pinned: Vec<Arc<Symbol>>,
}

impl<'b> CallContext<'b> {
	pub fn new(bridge: &'b Bridge) -> Self {
		bridge.enter_context();
		Self {
			bridge,
			arena: Arena::new(),
			strings: HashMap::new(),
			pinned: Vec::new(),
		}
	}

	pub fn bridge(&self) -> &'b Bridge {
		self.bridge
	}

	pub fn handle(&self, object: Option<Object>) -> HandleFFI {
		self.bridge.registry().to_handle(object.as_ref())
	}

	/// Handle of the list read from `field` of `owner`
	///
	/// The list is read once, on the first request for that field, and every
	/// later request gets the same handle. Host objects do not change after
	/// they cross, so the snapshot stays accurate.
	pub fn field_list(
		&self,
		owner: &Object,
		field: Field,
		items: impl FnOnce() -> Result<Vec<Option<Object>>>,
	) -> Result<HandleFFI> {
		self.bridge.registry().to_handle_with(owner.key().field(field), || {
			Ok(Object::List(Arc::new(ObjectList::field_of(owner.clone(), field, items()?))))
		})
	}

	/// Keep a symbol snapshot alive until the crossing ends, so strings borrowed from it stay put
	pub fn pin(&mut self, symbol: Arc<Symbol>) -> Arc<Symbol> {
		self.pinned.push(symbol.clone());
		symbol
	}

	/// NUL-terminated copy of `value` in the arena, one copy per string per crossing
	pub fn serialize_string(&mut self, value: &str) -> Result<StringFFI> {
		let key = (value.as_ptr() as usize, value.len());
		if let Some(ptr) = self.strings.get(&key) {
			return Ok(*ptr);
		}
		let ptr = self.arena.copy_c_string(value)?;
		self.strings.insert(key, ptr);
		Ok(ptr)
	}

	/// Flat array of `objects` laid out as `kind`: an `i64` count followed by one slot per object
	///
	/// Null entries leave their slot zeroed.
	pub fn serialize_flat_objects(&mut self, objects: &[Option<Object>], kind: DescriptorKind) -> Result<*const u8> {
		let slot_size = kind.slot_size();
		let buffer = self.alloc_flat_array(objects.len(), slot_size)?;
		for (index, object) in objects.iter().enumerate() {
			let slot = unsafe { buffer.add(FLAT_ARRAY_HEADER_SIZE + index * slot_size) };
			descriptor::serialize(self, kind, object.as_ref(), slot)?;
		}
		Ok(buffer.cast_const())
	}

	/// Flat array of raw handles
	pub fn serialize_handles(&mut self, handles: &[HandleFFI]) -> Result<*const u8> {
		let slot_size = size_of::<HandleFFI>();
		let buffer = self.alloc_flat_array(handles.len(), slot_size)?;
		for (index, handle) in handles.iter().enumerate() {
			unsafe { buffer.add(FLAT_ARRAY_HEADER_SIZE + index * slot_size).cast::<HandleFFI>().write(*handle) };
		}
		Ok(buffer.cast_const())
	}

	fn alloc_flat_array(&mut self, count: usize, slot_size: usize) -> Result<*mut u8> {
		let size = slot_size
			.checked_mul(count)
			.and_then(|body| body.checked_add(FLAT_ARRAY_HEADER_SIZE))
			.ok_or(crate::BridgeError::Allocation(usize::MAX))?;
		let buffer = self.arena.alloc(size)?;
		unsafe { buffer.cast::<i64>().write(count as i64) };
		Ok(buffer)
	}
}

impl Drop for CallContext<'_> {
	fn drop(&mut self) {
		trace!(bytes = self.arena.allocated_bytes(), strings = self.strings.len(), "releasing call context");
		self.strings.clear();
		self.arena.clear();
		self.bridge.leave_context();
	}
}
