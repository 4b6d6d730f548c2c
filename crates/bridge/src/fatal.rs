// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Message printed before the process terminates on fatal errors
pub const FATAL_MESSAGE: &str = "Fatal errors occurred.";

/// Exit code of a process terminated on fatal errors
pub const FATAL_EXIT_CODE: i32 = 1;

/// Fatal flag of one bridge
///
/// Raised by any failed crossing and never lowered. Public entry points check
/// it after their own work and terminate the process when it is set.
#[derive(Debug, Default)]
pub struct FatalState {
	raised: AtomicBool,
	failures: AtomicUsize,
	wait_for_web_server: AtomicBool,
}

impl FatalState {
	pub fn new() -> Self {
		Self::default()
	}

	/// Record a failure, returns `true` for the call that raised the flag
	pub fn raise(&self) -> bool {
		self.failures.fetch_add(1, Ordering::SeqCst);
		!self.raised.swap(true, Ordering::SeqCst)
	}

	pub fn is_raised(&self) -> bool {
		self.raised.load(Ordering::SeqCst)
	}

	/// Failures recorded so far, including those after the flag was raised
	pub fn failures(&self) -> usize {
		self.failures.load(Ordering::SeqCst)
	}

	/// Whether termination first waits for the web server to exit
	pub fn waits_for_web_server(&self) -> bool {
		self.wait_for_web_server.load(Ordering::SeqCst)
	}

	pub fn set_wait_for_web_server(&self, wait: bool) {
		self.wait_for_web_server.store(wait, Ordering::SeqCst);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_raised_once() {
		let state = FatalState::new();
		assert!(!state.is_raised());
		assert!(state.raise());
		assert!(!state.raise());
		assert!(state.is_raised());
		assert_eq!(state.failures(), 2);
	}

	#[test]
	fn test_wait_for_web_server() {
		let state = FatalState::new();
		assert!(!state.waits_for_web_server());
		state.set_wait_for_web_server(true);
		assert!(state.waits_for_web_server());
	}
}
