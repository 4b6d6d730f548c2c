// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Hooks run when the process exits normally
//!
//! The global hook list is drained from a C `atexit` handler, so hooks also
//! run when the process is terminated through `std::process::exit`.

use std::{
	panic::{AssertUnwindSafe, catch_unwind},
	sync::Once,
};

use parking_lot::Mutex;
use tracing::{error, trace};

type Hook = Box<dyn FnOnce() + Send>;

#[derive(Default)]
pub struct ShutdownHooks {
	hooks: Mutex<Vec<(&'static str, Hook)>>,
}

static GLOBAL: ShutdownHooks = ShutdownHooks {
	hooks: Mutex::new(Vec::new()),
};
static INSTALL: Once = Once::new();

extern "C" fn run_global_hooks() {
	GLOBAL.run();
}

impl ShutdownHooks {
	pub fn new() -> Self {
		Self::default()
	}

	/// Process-wide hooks, installed into `atexit` on first use
	pub fn global() -> &'static ShutdownHooks {
		INSTALL.call_once(|| {
			let result = unsafe { libc::atexit(run_global_hooks) };
			if result != 0 {
				error!("failed to install shutdown hooks");
			}
		});
		&GLOBAL
	}

	pub fn register(&self, name: &'static str, hook: impl FnOnce() + Send + 'static) {
		trace!(hook = name, "registered shutdown hook");
		self.hooks.lock().push((name, Box::new(hook)));
	}

	/// Run and forget every registered hook in registration order
	pub fn run(&self) {
		let hooks = std::mem::take(&mut *self.hooks.lock());
		for (name, hook) in hooks {
			if catch_unwind(AssertUnwindSafe(hook)).is_err() {
				error!(hook = name, "shutdown hook panicked");
			}
		}
	}

	pub fn len(&self) -> usize {
		self.hooks.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
