// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use syspro_abi::{CapabilityFFI, TextTrampolineFFI};

use crate::{context::CallContext, object::Object};

/// Lexers, parsers and language servers all cross as their own handle plus the trampoline that drives them
pub(super) fn serialize(ctx: &CallContext, implementation: &Object, trampoline: TextTrampolineFFI) -> CapabilityFFI {
	CapabilityFFI {
		implementation: ctx.handle(Some(implementation.clone())),
		trampoline: Some(trampoline),
	}
}
