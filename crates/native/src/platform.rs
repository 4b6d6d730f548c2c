// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use crate::{NativeError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatingSystem {
	Windows,
	Linux,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
	Amd64,
	AArch64,
}

/// Platform the native engine is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
	WindowsAmd64,
	LinuxAmd64,
	LinuxAArch64,
}

const LIBRARY_NAME: &str = "SysPro.TM.Library";

impl Platform {
	pub const SUPPORTED: [Platform; 3] = [Platform::WindowsAmd64, Platform::LinuxAmd64, Platform::LinuxAArch64];

	/// Platform of the running process
	pub fn current() -> Result<Platform> {
		Self::detect(std::env::consts::OS, std::env::consts::ARCH)
	}

	/// Classify loosely formatted OS and architecture names such as `Windows 11`, `amd64` or `x86_64`
	pub fn detect(os: &str, arch: &str) -> Result<Platform> {
		let os_name = os.to_lowercase();
		let arch_name = arch.to_lowercase();

		let os_kind = if os_name.contains("darwin") {
			None
		} else if os_name.contains("win") {
			Some(OperatingSystem::Windows)
		} else if os_name.contains("linux") {
			Some(OperatingSystem::Linux)
		} else {
			None
		};

		let arch_kind = if arch_name == "aarch64" || arch_name == "arm64" {
			Some(Architecture::AArch64)
		} else if (arch_name.contains("86") || arch_name.contains("amd")) && arch_name.contains("64") {
			Some(Architecture::Amd64)
		} else {
			None
		};

		match (os_kind, arch_kind) {
			(Some(OperatingSystem::Windows), Some(Architecture::Amd64)) => Ok(Platform::WindowsAmd64),
			(Some(OperatingSystem::Linux), Some(Architecture::Amd64)) => Ok(Platform::LinuxAmd64),
			(Some(OperatingSystem::Linux), Some(Architecture::AArch64)) => Ok(Platform::LinuxAArch64),
			_ => Err(NativeError::UnsupportedPlatform {
				os: os.to_string(),
				arch: arch.to_string(),
			}),
		}
	}

	pub fn operating_system(self) -> OperatingSystem {
		match self {
			Platform::WindowsAmd64 => OperatingSystem::Windows,
			Platform::LinuxAmd64 | Platform::LinuxAArch64 => OperatingSystem::Linux,
		}
	}

	pub fn architecture(self) -> Architecture {
		match self {
			Platform::WindowsAmd64 | Platform::LinuxAmd64 => Architecture::Amd64,
			Platform::LinuxAArch64 => Architecture::AArch64,
		}
	}

	pub fn library_file_name(self) -> String {
		match self.operating_system() {
			OperatingSystem::Windows => format!("{LIBRARY_NAME}.dll"),
			OperatingSystem::Linux => format!("{LIBRARY_NAME}.so"),
		}
	}

	pub(crate) fn supported_list() -> String {
		Self::SUPPORTED.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(", ")
	}
}

impl Display for Platform {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Platform::WindowsAmd64 => f.write_str("Windows/AMD64"),
			Platform::LinuxAmd64 => f.write_str("Linux/AMD64"),
			Platform::LinuxAArch64 => f.write_str("Linux/AArch64"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_detect_linux_aarch64() {
		assert_eq!(Platform::detect("Linux", "aarch64").unwrap(), Platform::LinuxAArch64);
	}

	#[test]
	fn test_detect_windows_amd64() {
		assert_eq!(Platform::detect("Windows", "amd64").unwrap(), Platform::WindowsAmd64);
		assert_eq!(Platform::detect("Windows 11", "x86_64").unwrap(), Platform::WindowsAmd64);
	}

	#[test]
	fn test_detect_linux_amd64() {
		assert_eq!(Platform::detect("linux", "x86_64").unwrap(), Platform::LinuxAmd64);
	}

	#[test]
	fn test_detect_darwin_is_unsupported() {
		let err = Platform::detect("Darwin", "arm64").unwrap_err();
		assert!(matches!(err, NativeError::UnsupportedPlatform { .. }));

		let message = err.to_string();
		assert!(message.contains("Darwin/arm64"));
		assert!(message.contains("Windows/AMD64"));
		assert!(message.contains("Linux/AMD64"));
		assert!(message.contains("Linux/AArch64"));
	}

	#[test]
	fn test_detect_darwin_amd64_is_not_windows() {
		assert!(Platform::detect("Darwin", "x86_64").is_err());
		assert!(Platform::detect("macos", "x86_64").is_err());
	}

	#[test]
	fn test_detect_windows_aarch64_is_unsupported() {
		assert!(Platform::detect("Windows", "aarch64").is_err());
		assert!(Platform::detect("Linux", "x86").is_err());
	}

	#[test]
	fn test_library_names() {
		assert_eq!(Platform::WindowsAmd64.library_file_name(), "SysPro.TM.Library.dll");
		assert_eq!(Platform::LinuxAArch64.library_file_name(), "SysPro.TM.Library.so");
	}
}
