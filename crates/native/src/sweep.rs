// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Reclaims extraction directories left behind by earlier processes
//!
//! The sweep is best effort: every I/O error is ignored and a directory that
//! cannot be classified is kept.

use std::{
	fs, io,
	path::{Path, PathBuf},
	sync::Arc,
	thread::{self, JoinHandle},
	time::{Duration, SystemTime},
};

use tracing::{debug, trace};

use crate::{lock::is_locked, probe::ProcessProbe};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepReport {
	pub removed: Vec<PathBuf>,
	pub retained: Vec<PathBuf>,
}

pub struct Sweeper {
	root: PathBuf,
	prefix: String,
	exclude: Option<PathBuf>,
	grace: Duration,
	probe: Arc<dyn ProcessProbe>,
}

impl Sweeper {
	pub fn new(root: impl Into<PathBuf>, prefix: impl Into<String>, probe: Arc<dyn ProcessProbe>) -> Self {
		Self {
			root: root.into(),
			prefix: prefix.into(),
			exclude: None,
			grace: Duration::ZERO,
			probe,
		}
	}

	/// Never touch `directory`, typically the one this process extracted into
	pub fn exclude(mut self, directory: impl Into<PathBuf>) -> Self {
		self.exclude = Some(directory.into());
		self
	}

	pub fn grace(mut self, grace: Duration) -> Self {
		self.grace = grace;
		self
	}

	pub fn sweep(&self) -> SweepReport {
		let mut report = SweepReport::default();
		let Ok(entries) = fs::read_dir(&self.root) else {
			return report;
		};

		for entry in entries.flatten() {
			let path = entry.path();
			if !self.is_candidate(&entry) {
				continue;
			}
			if self.exclude.as_deref() == Some(path.as_path()) || is_recent(&path, self.grace) {
				report.retained.push(path);
				continue;
			}
			if is_locked(&path, self.probe.as_ref()) {
				trace!(directory = %path.display(), "extraction directory is in use");
				report.retained.push(path);
				continue;
			}

			debug!(directory = %path.display(), "removing stale extraction directory");
			remove_tree(&path);
			report.removed.push(path);
		}

		report
	}

	/// Run the sweep on a detached lowest-priority thread
	pub fn spawn(self) -> io::Result<JoinHandle<SweepReport>> {
		thread::Builder::new().name("syspro-native-sweep".to_string()).spawn(move || {
			lower_current_thread_priority();
			self.sweep()
		})
	}

	fn is_candidate(&self, entry: &fs::DirEntry) -> bool {
		let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
		is_dir && entry.file_name().to_str().is_some_and(|name| name.starts_with(&self.prefix))
	}
}

fn is_recent(path: &Path, grace: Duration) -> bool {
	if grace.is_zero() {
		return false;
	}
	let Ok(modified) = fs::metadata(path).and_then(|m| m.modified()) else {
		return true;
	};
	SystemTime::now().duration_since(modified).map(|age| age < grace).unwrap_or(true)
}

/// Delete a tree bottom-up: walk it pre-order, then remove entries in reverse
pub fn remove_tree(root: &Path) {
	let mut walked = Vec::new();
	let mut stack = vec![root.to_path_buf()];

	while let Some(path) = stack.pop() {
		let is_dir = fs::symlink_metadata(&path).map(|m| m.is_dir()).unwrap_or(false);
		if is_dir {
			if let Ok(entries) = fs::read_dir(&path) {
				stack.extend(entries.flatten().map(|e| e.path()));
			}
		}
		walked.push((path, is_dir));
	}

	for (path, is_dir) in walked.into_iter().rev() {
		let _ = if is_dir {
			fs::remove_dir(&path)
		} else {
			fs::remove_file(&path)
		};
	}
}

#[cfg(unix)]
fn lower_current_thread_priority() {
	// On Linux the nice value is per thread, so this leaves the rest of the process alone.
	let result = unsafe { libc::setpriority(libc::PRIO_PROCESS, 0, 19) };
	if result != 0 {
		trace!("could not lower sweep thread priority");
	}
}

#[cfg(not(unix))]
fn lower_current_thread_priority() {}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;
	use crate::{
		LockFile,
		lock::tests::{FakeProbe, running},
		testing::temp_dir,
	};

	const PREFIX: &str = "SysPro.TM.Rust-";

	fn extraction_dir(root: &Path, name: &str) -> io::Result<PathBuf> {
		let dir = root.join(format!("{PREFIX}{name}"));
		fs::create_dir_all(dir.join("nested"))?;
		fs::write(dir.join("SysPro.TM.Library.so"), b"binary")?;
		fs::write(dir.join("nested").join("data"), b"data")?;
		Ok(dir)
	}

	#[test]
	fn test_sweep_classifies_directories() {
		temp_dir(|root| {
			let live = extraction_dir(root, "live")?;
			LockFile::create(&live, 10, "host --a").unwrap();

			let reused = extraction_dir(root, "reused")?;
			LockFile::create(&reused, 11, "host --b").unwrap();

			let dead = extraction_dir(root, "dead")?;
			LockFile::create(&dead, 12, "host --c").unwrap();

			let unlocked = extraction_dir(root, "unlocked")?;

			let unrelated = root.join("unrelated");
			fs::create_dir(&unrelated)?;

			let probe = FakeProbe(HashMap::from([running(10, "host --a"), running(11, "other")]));
			let report = Sweeper::new(root, PREFIX, Arc::new(probe)).sweep();

			assert!(live.exists());
			assert!(!reused.exists());
			assert!(!dead.exists());
			assert!(!unlocked.exists());
			assert!(unrelated.exists());
			assert_eq!(report.removed.len(), 3);
			assert_eq!(report.retained, vec![live]);
			Ok(())
		})
		.unwrap();
	}

	#[test]
	fn test_sweep_keeps_directory_with_malformed_lock() {
		temp_dir(|root| {
			let malformed = extraction_dir(root, "malformed")?;
			fs::write(malformed.join("lock-abc"), b"host --a")?;
			let stale = extraction_dir(root, "stale")?;
			LockFile::create(&stale, 12, "host --c").unwrap();

			let report = Sweeper::new(root, PREFIX, Arc::new(FakeProbe(HashMap::new()))).sweep();

			assert!(malformed.join("SysPro.TM.Library.so").exists());
			assert!(malformed.join("lock-abc").exists());
			assert!(!stale.exists());
			assert_eq!(report.retained, vec![malformed]);
			assert_eq!(report.removed, vec![stale]);
			Ok(())
		})
		.unwrap();
	}

	#[test]
	fn test_sweep_skips_excluded_and_recent() {
		temp_dir(|root| {
			let own = extraction_dir(root, "own")?;
			let other = extraction_dir(root, "other")?;

			let probe: Arc<dyn ProcessProbe> = Arc::new(FakeProbe(HashMap::new()));
			Sweeper::new(root, PREFIX, probe.clone()).exclude(&own).grace(Duration::from_secs(3600)).sweep();
			assert!(own.exists());
			assert!(other.exists());

			Sweeper::new(root, PREFIX, probe).exclude(&own).sweep();
			assert!(own.exists());
			assert!(!other.exists());
			Ok(())
		})
		.unwrap();
	}

	#[test]
	fn test_spawned_sweep_reports() {
		temp_dir(|root| {
			let stale = extraction_dir(root, "stale")?;
			let handle = Sweeper::new(root, PREFIX, Arc::new(FakeProbe(HashMap::new()))).spawn()?;
			let report = handle.join().unwrap();
			assert_eq!(report.removed, vec![stale.clone()]);
			assert!(!stale.exists());
			Ok(())
		})
		.unwrap();
	}

	#[test]
	fn test_remove_tree_missing_root() {
		temp_dir(|root| {
			remove_tree(&root.join("does-not-exist"));
			Ok(())
		})
		.unwrap();
	}
}
