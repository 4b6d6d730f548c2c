// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use syspro_abi::{HandleFFI, ListFFI};

use crate::{BridgeError, Result, context::CallContext, object::ObjectList};

pub(super) fn serialize(ctx: &mut CallContext, list: &ObjectList) -> Result<ListFFI> {
	let size = i32::try_from(list.len()).map_err(|_| BridgeError::CountOverflow(list.len()))?;
	let handles: Vec<HandleFFI> = list.items().iter().map(|item| ctx.handle(item.clone())).collect();
	Ok(ListFFI {
		size,
		padding: 0,
		data: ctx.serialize_handles(&handles)?,
	})
}
