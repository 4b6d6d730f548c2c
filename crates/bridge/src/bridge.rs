// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	any::{Any, TypeId},
	fmt::{self, Debug, Formatter},
	panic::{AssertUnwindSafe, catch_unwind},
	sync::{
		OnceLock,
		atomic::{AtomicUsize, Ordering},
	},
};

use syspro_abi::HandleFFI;
use syspro_native::ShutdownHooks;
use tracing::{debug, debug_span, error, warn};

use crate::{
	BridgeError, Result,
	context::CallContext,
	engine::Engine,
	fatal::{FATAL_EXIT_CODE, FATAL_MESSAGE, FatalState},
	handle::HandleRegistry,
	object::Object,
	trampoline::{TrampolineFactory, Trampolines},
};

/// Static home of one bridge
///
/// Trampolines are plain functions without a context argument, so they are
/// generated per scope and reach their bridge through [`BridgeScope::cell`].
pub trait BridgeScope: 'static {
	fn cell() -> &'static OnceLock<Bridge>;

	fn bridge() -> Option<&'static Bridge> {
		Self::cell().get()
	}

	/// Install `bridge` into this scope and connect it to its engine
	fn install(bridge: Bridge) -> Result<&'static Bridge>
	where
		Self: Sized,
	{
		if bridge.scope != TypeId::of::<Self>() {
			return Err(BridgeError::ScopeMismatch);
		}
		Self::cell().set(bridge).map_err(|_| BridgeError::AlreadyInitialized)?;
		let bridge = Self::bridge().ok_or(BridgeError::AlreadyInitialized)?;
		bridge.connect();
		Ok(bridge)
	}
}

pub type Terminator = Box<dyn Fn(i32) + Send + Sync>;

/// Host side of the boundary: handle registry, trampolines, engine and fatal flag
pub struct Bridge {
	scope: TypeId,
	registry: HandleRegistry,
	trampolines: Trampolines,
	engine: Engine,
	fatal: FatalState,
	hooks: &'static ShutdownHooks,
	terminator: Terminator,
	contexts: AtomicUsize,
}

impl Bridge {
	pub fn new<S: BridgeScope>(engine: Engine) -> Self {
		Self {
			scope: TypeId::of::<S>(),
			registry: HandleRegistry::new(),
			trampolines: Trampolines::new(TrampolineFactory::of::<S>()),
			engine,
			fatal: FatalState::new(),
			hooks: ShutdownHooks::global(),
			terminator: Box::new(|code| std::process::exit(code)),
			contexts: AtomicUsize::new(0),
		}
	}

	pub fn with_shutdown_hooks(mut self, hooks: &'static ShutdownHooks) -> Self {
		self.hooks = hooks;
		self
	}

	/// Replace process termination, used where exiting is not an option
	pub fn with_terminator(mut self, terminator: impl Fn(i32) + Send + Sync + 'static) -> Self {
		self.terminator = Box::new(terminator);
		self
	}

	pub fn registry(&self) -> &HandleRegistry {
		&self.registry
	}

	pub fn trampolines(&self) -> &Trampolines {
		&self.trampolines
	}

	pub fn engine(&self) -> &Engine {
		&self.engine
	}

	pub fn fatal(&self) -> &FatalState {
		&self.fatal
	}

	pub(crate) fn hooks(&self) -> &'static ShutdownHooks {
		self.hooks
	}

	/// Call contexts currently open on any thread
	pub fn active_contexts(&self) -> usize {
		self.contexts.load(Ordering::SeqCst)
	}

	pub(crate) fn enter_context(&self) {
		self.contexts.fetch_add(1, Ordering::SeqCst);
	}

	pub(crate) fn leave_context(&self) {
		self.contexts.fetch_sub(1, Ordering::SeqCst);
	}

	/// Hand the registrar to the engine so it can request object contents
	pub fn connect(&self) {
		self.crossing("connect", |ctx| {
			let registrar = ctx.bridge().trampolines().registrar();
			ctx.bridge().engine().register_registrar(registrar);
			Ok(())
		});
		debug!("registrar connected");
		self.exit_on_fatal_errors();
	}

	/// Run `f` as one crossing
	///
	/// Errors and panics are logged and raise the fatal flag; the crossing
	/// then yields `R::default()`. The call context is released on every path.
	pub(crate) fn crossing<R: Default>(
		&self,
		name: &'static str,
		f: impl FnOnce(&mut CallContext<'_>) -> Result<R>,
	) -> R {
		let _span = debug_span!("crossing", name).entered();
		let outcome = catch_unwind(AssertUnwindSafe(|| {
			let mut ctx = CallContext::new(self);
			f(&mut ctx)
		}));

		let error = match outcome {
			Ok(Ok(value)) => return value,
			Ok(Err(e)) => e,
			Err(payload) => BridgeError::Panic(panic_message(payload.as_ref())),
		};

		error!(crossing = name, error = %error, "crossing failed");
		if self.fatal.raise() {
			debug!("fatal flag raised");
		}
		R::default()
	}

	/// Crossing that yields a handle, the null handle on failure
	pub(crate) fn callback(
		&self,
		name: &'static str,
		f: impl FnOnce(&mut CallContext<'_>) -> Result<Option<Object>>,
	) -> HandleFFI {
		self.crossing(name, |ctx| {
			let object = f(ctx)?;
			Ok(self.registry.to_handle(object.as_ref()))
		})
	}

	/// Terminate the process when the fatal flag is raised
	pub fn exit_on_fatal_errors(&self) {
		if !self.fatal.is_raised() {
			return;
		}

		error!(failures = self.fatal.failures(), "terminating on fatal errors");
		eprintln!("{FATAL_MESSAGE}");

		if self.fatal.waits_for_web_server() {
			warn!("waiting for the web server to exit, internal state after fatal errors is unreliable");
			eprintln!("Waiting for the web server to exit. Internal state is unreliable after fatal errors.");
			self.engine.wait_for_web_server_exit();
		}

		(self.terminator)(FATAL_EXIT_CODE);
	}
}

impl Debug for Bridge {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Bridge")
			.field("handles", &self.registry.len())
			.field("fatal", &self.fatal)
			.field("contexts", &self.active_contexts())
			.finish_non_exhaustive()
	}
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(message) = payload.downcast_ref::<&str>() {
		message.to_string()
	} else if let Some(message) = payload.downcast_ref::<String>() {
		message.clone()
	} else {
		"unknown panic".to_string()
	}
}
