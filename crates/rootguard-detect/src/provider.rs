//! Read-only environment facts consumed by the probes.
//!
//! Everything a probe needs to know about the running system comes
//! through [`SystemInfoProvider`], so the whole battery can be exercised
//! hermetically against a mock without a device.

use crate::DetectError;
use std::process::Command;
use tracing::debug;

/// Build metadata fields, as exposed by the platform property table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildInfo {
    pub tags: String,
    pub board: String,
    pub device: String,
    pub hardware: String,
    pub model: String,
    pub product: String,
}

/// Read-only facts about the execution environment.
///
/// Implementations must be side-effect free from the probes' point of
/// view: repeated calls against an unchanged system return the same
/// answers, which is what makes a detection run deterministic.
#[cfg_attr(test, mockall::automock)]
pub trait SystemInfoProvider {
    /// Value of an environment variable, if set.
    fn env_var(&self, name: &str) -> Option<String>;

    /// Whether a filesystem path exists.
    fn path_exists(&self, path: &str) -> bool;

    /// Runs a whitespace-separated command line and returns its stdout
    /// as line-oriented text. The child process is always reaped, on
    /// every exit path.
    fn command_output(&self, command_line: &str) -> Result<String, DetectError>;

    /// Whether a package id is present in the installed-application
    /// registry.
    fn package_installed(&self, package_id: &str) -> bool;

    /// Build metadata of the running system.
    fn build_info(&self) -> BuildInfo;

    /// The USB debug flag as an integer setting; 0 means disabled.
    fn usb_debug_setting(&self) -> i64;
}

/// Live implementation backed by the real device: `std::env`, the
/// filesystem, and shell tools (`getprop`, `mount`, `pm`, `settings`).
#[derive(Debug, Default)]
pub struct DeviceInfoProvider;

impl DeviceInfoProvider {
    pub fn new() -> Self {
        Self
    }

    fn property(&self, key: &str) -> String {
        self.command_output(&format!("getprop {key}"))
            .map(|out| out.trim().to_string())
            .unwrap_or_default()
    }
}

impl SystemInfoProvider for DeviceInfoProvider {
    fn env_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn path_exists(&self, path: &str) -> bool {
        std::path::Path::new(path).exists()
    }

    fn command_output(&self, command_line: &str) -> Result<String, DetectError> {
        let mut parts = command_line.split_whitespace();
        let program = parts.next().ok_or(DetectError::EmptyCommand)?;
        // `output()` waits for the child and reaps it regardless of how
        // the command itself fares.
        let output = Command::new(program)
            .args(parts)
            .output()
            .map_err(|source| DetectError::Command {
                command: program.to_string(),
                source,
            })?;
        String::from_utf8(output.stdout).map_err(|_| DetectError::NonUtf8 {
            command: program.to_string(),
        })
    }

    fn package_installed(&self, package_id: &str) -> bool {
        match self.command_output(&format!("pm path {package_id}")) {
            Ok(out) => out.contains("package:"),
            Err(err) => {
                debug!(package = package_id, %err, "package registry query failed");
                false
            }
        }
    }

    fn build_info(&self) -> BuildInfo {
        BuildInfo {
            tags: self.property("ro.build.tags"),
            board: self.property("ro.product.board"),
            device: self.property("ro.product.device"),
            hardware: self.property("ro.hardware"),
            model: self.property("ro.product.model"),
            product: self.property("ro.product.name"),
        }
    }

    fn usb_debug_setting(&self) -> i64 {
        self.command_output("settings get global adb_enabled")
            .ok()
            .and_then(|out| out.trim().parse().ok())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn command_output_reports_spawn_failure() {
        let sys = DeviceInfoProvider::new();
        let err = sys
            .command_output("rootguard-no-such-binary")
            .unwrap_err();
        assert_matches!(err, DetectError::Command { .. });
    }

    #[test]
    fn empty_command_line_is_rejected() {
        let sys = DeviceInfoProvider::new();
        assert_matches!(sys.command_output("  "), Err(DetectError::EmptyCommand));
    }

    #[test]
    fn missing_env_var_is_none() {
        let sys = DeviceInfoProvider::new();
        assert!(sys.env_var("ROOTGUARD_UNSET_VARIABLE").is_none());
    }

    #[test]
    fn nonexistent_path_does_not_exist() {
        let sys = DeviceInfoProvider::new();
        assert!(!sys.path_exists("/rootguard/no/such/path"));
    }
}
