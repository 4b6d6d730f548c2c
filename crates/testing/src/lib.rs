// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub mod engine;
pub mod logging;
pub mod sample;

pub use engine::{EngineCall, fake_bridge, fake_engine};
pub use logging::init_test_logging;

/// Declare a bridge scope with its own static cell
///
/// Every test that installs a bridge needs its own scope, since the fatal
/// flag of a bridge is never lowered.
#[macro_export]
macro_rules! bridge_scope {
	($name:ident) => {
		struct $name;

		impl ::syspro_bridge::BridgeScope for $name {
			fn cell() -> &'static ::std::sync::OnceLock<::syspro_bridge::Bridge> {
				static CELL: ::std::sync::OnceLock<::syspro_bridge::Bridge> = ::std::sync::OnceLock::new();
				&CELL
			}
		}
	};
}
