// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Control of the engine's inspection web server

use std::time::Duration;

use syspro_abi::DEFAULT_WEB_SERVER_PORT;
use tracing::{info, instrument};

use crate::{Bridge, global};

impl Bridge {
	/// Start the web server on `port`; it is stopped again when the process exits normally
	#[instrument(name = "bridge::start_web_server", level = "debug", skip(self))]
	pub fn start_web_server(&self, port: i32) {
		let stop = self.engine().vtable().stop_web_server;
		self.hooks().register("web server", move || unsafe { stop() });

		self.crossing("start_web_server", |_| {
			self.engine().start_web_server(port);
			Ok(())
		});
		info!(port, "web server started");
		self.exit_on_fatal_errors();
	}

	pub fn start_web_server_default(&self) {
		self.start_web_server(DEFAULT_WEB_SERVER_PORT);
	}

	pub fn stop_web_server(&self) {
		self.crossing("stop_web_server", |_| {
			self.engine().stop_web_server();
			Ok(())
		});
		self.exit_on_fatal_errors();
	}

	/// Block until the web server exits
	pub fn wait_for_web_server_exit(&self) {
		self.crossing("wait_for_web_server_exit", |_| {
			self.engine().wait_for_web_server_exit();
			Ok(())
		});
		self.exit_on_fatal_errors();
	}

	/// Block until the web server exits or `timeout` elapses
	pub fn wait_for_web_server_exit_with_timeout(&self, timeout: Duration) {
		let millis = i64::try_from(timeout.as_millis()).unwrap_or(i64::MAX);
		self.crossing("wait_for_web_server_exit_with_timeout", |_| {
			self.engine().wait_for_web_server_exit_with_timeout(millis);
			Ok(())
		});
		self.exit_on_fatal_errors();
	}

	/// On fatal errors, keep the process alive until the web server exits so the failure can be inspected
	pub fn wait_for_web_server_exit_on_fatal_errors(&self) {
		self.fatal().set_wait_for_web_server(true);
	}
}

pub fn start(port: i32) {
	global().start_web_server(port);
}

pub fn start_default() {
	global().start_web_server_default();
}

pub fn stop() {
	global().stop_web_server();
}

pub fn wait_for_exit() {
	global().wait_for_web_server_exit();
}

pub fn wait_for_exit_with_timeout(timeout: Duration) {
	global().wait_for_web_server_exit_with_timeout(timeout);
}

pub fn wait_for_exit_on_fatal_errors() {
	global().wait_for_web_server_exit_on_fatal_errors();
}
