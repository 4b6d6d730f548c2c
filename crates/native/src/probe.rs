// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{env, ffi::OsString};

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessStatus {
	Missing,
	/// `command_line` is `None` when the process exists but its command line cannot be read
	Running {
		command_line: Option<String>,
	},
}

/// Looks up live processes by id
pub trait ProcessProbe: Send + Sync {
	fn status(&self, pid: u32) -> ProcessStatus;
}

/// Probe backed by the operating system process table
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl ProcessProbe for SystemProbe {
	fn status(&self, pid: u32) -> ProcessStatus {
		let pid = Pid::from_u32(pid);
		let mut system = System::new();
		system.refresh_processes_specifics(
			ProcessesToUpdate::Some(&[pid]),
			true,
			ProcessRefreshKind::nothing().with_cmd(UpdateKind::Always),
		);

		match system.process(pid) {
			None => ProcessStatus::Missing,
			Some(process) => {
				let command_line = render_command_line(process.cmd());
				ProcessStatus::Running {
					command_line: (!command_line.is_empty()).then_some(command_line),
				}
			}
		}
	}
}

/// Arguments joined by single spaces, surrounding whitespace removed
pub fn render_command_line(arguments: &[OsString]) -> String {
	arguments.iter().map(|a| a.to_string_lossy()).collect::<Vec<_>>().join(" ").trim().to_string()
}

/// Command line of this process as other processes will observe it
pub fn current_command_line(probe: &dyn ProcessProbe) -> String {
	match probe.status(std::process::id()) {
		ProcessStatus::Running {
			command_line: Some(command_line),
		} => command_line,
		_ => render_command_line(&env::args_os().collect::<Vec<_>>()),
	}
}
