// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Lock files marking extraction directories as in use
//!
//! A lock file is named `lock-<pid>` and contains the command line of the
//! owning process. A directory is locked while one of its lock files names a
//! live process whose current command line equals the recorded one, so a
//! reused pid does not keep a stale directory alive.

use std::{
	fs, io,
	path::{Path, PathBuf},
};

use tracing::trace;

use crate::{
	NativeError, Result,
	probe::{ProcessProbe, ProcessStatus},
};

pub const LOCK_FILE_PREFIX: &str = "lock-";

pub fn lock_file_name(pid: u32) -> String {
	format!("{LOCK_FILE_PREFIX}{pid}")
}

pub fn parse_lock_file_name(name: &str) -> Option<u32> {
	name.strip_prefix(LOCK_FILE_PREFIX)?.parse().ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockFile {
	path: PathBuf,
	pid: u32,
}

impl LockFile {
	pub fn create(directory: &Path, pid: u32, command_line: &str) -> Result<LockFile> {
		let path = directory.join(lock_file_name(pid));
		fs::write(&path, command_line.trim()).map_err(NativeError::io(format!("writing {}", path.display())))?;
		trace!(path = %path.display(), "created lock file");
		Ok(LockFile {
			path,
			pid,
		})
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn pid(&self) -> u32 {
		self.pid
	}

	/// Delete the lock file; a lock file that is already gone counts as released
	pub fn release(&self) -> io::Result<()> {
		match fs::remove_file(&self.path) {
			Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
			_ => Ok(()),
		}
	}
}

/// Whether some lock file in `directory` belongs to a live process with the recorded command line
///
/// Unreadable directories and lock files count as unlocked. A live process
/// whose command line cannot be read counts as a match, and so does a lock
/// file whose name carries no pid.
pub fn is_locked(directory: &Path, probe: &dyn ProcessProbe) -> bool {
	let Ok(entries) = fs::read_dir(directory) else {
		return false;
	};

	for entry in entries.flatten() {
		let Ok(file_type) = entry.file_type() else {
			continue;
		};
		if !file_type.is_file() {
			continue;
		}
		let name = entry.file_name().to_string_lossy().into_owned();
		if !name.starts_with(LOCK_FILE_PREFIX) {
			continue;
		}
		let Some(pid) = parse_lock_file_name(&name) else {
			trace!(file = name, directory = %directory.display(), "malformed lock file name");
			return true;
		};
		let Ok(recorded) = fs::read_to_string(entry.path()) else {
			continue;
		};

		match probe.status(pid) {
			ProcessStatus::Missing => {}
			ProcessStatus::Running {
				command_line: None,
			} => return true,
			ProcessStatus::Running {
				command_line: Some(current),
			} => {
				if current.trim() == recorded.trim() {
					return true;
				}
				trace!(pid, directory = %directory.display(), "lock file names a reused pid");
			}
		}
	}

	false
}

#[cfg(test)]
pub(crate) mod tests {
	use std::collections::HashMap;

	use super::*;
	use crate::testing::temp_dir;

	/// Probe answering from a fixed process table
	pub(crate) struct FakeProbe(pub HashMap<u32, ProcessStatus>);

	impl ProcessProbe for FakeProbe {
		fn status(&self, pid: u32) -> ProcessStatus {
			self.0.get(&pid).cloned().unwrap_or(ProcessStatus::Missing)
		}
	}

	pub(crate) fn running(pid: u32, command_line: &str) -> (u32, ProcessStatus) {
		(
			pid,
			ProcessStatus::Running {
				command_line: Some(command_line.to_string()),
			},
		)
	}

	#[test]
	fn test_lock_file_name_round_trip() {
		assert_eq!(lock_file_name(42), "lock-42");
		assert_eq!(parse_lock_file_name("lock-42"), Some(42));
		assert_eq!(parse_lock_file_name("lock-x"), None);
		assert_eq!(parse_lock_file_name("SysPro.TM.Library.so"), None);
	}

	#[test]
	fn test_matching_live_process_is_locked() {
		temp_dir(|dir| {
			LockFile::create(dir, 42, "host --run\n").unwrap();
			let probe = FakeProbe(HashMap::from([running(42, "host --run")]));
			assert!(is_locked(dir, &probe));
			Ok(())
		})
		.unwrap();
	}

	#[test]
	fn test_reused_pid_is_unlocked() {
		temp_dir(|dir| {
			LockFile::create(dir, 42, "host --run").unwrap();
			let probe = FakeProbe(HashMap::from([running(42, "/usr/bin/unrelated")]));
			assert!(!is_locked(dir, &probe));
			Ok(())
		})
		.unwrap();
	}

	#[test]
	fn test_dead_process_is_unlocked() {
		temp_dir(|dir| {
			LockFile::create(dir, 42, "host --run").unwrap();
			assert!(!is_locked(dir, &FakeProbe(HashMap::new())));
			Ok(())
		})
		.unwrap();
	}

	#[test]
	fn test_missing_lock_file_is_unlocked() {
		temp_dir(|dir| {
			fs::write(dir.join("SysPro.TM.Library.so"), b"\x7fELF")?;
			let probe = FakeProbe(HashMap::from([running(42, "host")]));
			assert!(!is_locked(dir, &probe));
			Ok(())
		})
		.unwrap();
	}

	#[test]
	fn test_unreadable_command_line_is_locked() {
		temp_dir(|dir| {
			LockFile::create(dir, 7, "host").unwrap();
			let probe = FakeProbe(HashMap::from([(
				7,
				ProcessStatus::Running {
					command_line: None,
				},
			)]));
			assert!(is_locked(dir, &probe));
			Ok(())
		})
		.unwrap();
	}

	#[test]
	fn test_lock_file_without_pid_is_locked() {
		temp_dir(|dir| {
			fs::write(dir.join("lock-abc"), b"host")?;
			assert!(is_locked(dir, &FakeProbe(HashMap::new())));
			Ok(())
		})
		.unwrap();
	}

	#[test]
	fn test_any_matching_lock_file_locks() {
		temp_dir(|dir| {
			LockFile::create(dir, 1, "stale").unwrap();
			LockFile::create(dir, 2, "host").unwrap();
			let probe = FakeProbe(HashMap::from([running(2, "host")]));
			assert!(is_locked(dir, &probe));
			Ok(())
		})
		.unwrap();
	}

	#[test]
	fn test_release() {
		temp_dir(|dir| {
			let lock = LockFile::create(dir, 3, "host").unwrap();
			assert!(lock.path().exists());
			lock.release()?;
			assert!(!lock.path().exists());
			lock.release()?;
			Ok(())
		})
		.unwrap();
	}
}
