//! Privileged identity query through a root shell.

use super::Probe;
use crate::provider::SystemInfoProvider;
use rootguard_api::ProbeOutcome;
use tracing::{info, warn};

/// Asks `su` for the current identity and records whether a root shell
/// is actually granted.
///
/// Diagnostic-only: the evidence is kept but the match flag never counts
/// toward the verdict. Asking for a root shell may pop an authorization
/// prompt from a root management app, so the surrounding path check is
/// already the counted signal; this probe only annotates it. Spawn
/// failures are logged, never propagated.
pub struct ShellPrivilegeProbe;

impl ShellPrivilegeProbe {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ShellPrivilegeProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for ShellPrivilegeProbe {
    fn name(&self) -> &str {
        "shell-privilege"
    }

    fn evaluate(&self, sys: &dyn SystemInfoProvider) -> ProbeOutcome {
        match sys.command_output("su -c id") {
            Ok(output) => {
                let first_line = output.lines().next().unwrap_or("");
                if first_line.to_lowercase().contains("uid=0") {
                    info!(probe = "shell-privilege", "root shell granted");
                    ProbeOutcome::diagnostic(vec!["Root access is available".to_string()])
                } else {
                    ProbeOutcome::no_match()
                }
            }
            Err(err) => {
                warn!(probe = "shell-privilege", %err, "su spawn failed");
                ProbeOutcome::no_match()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockSystemInfoProvider;
    use crate::DetectError;

    #[test]
    fn root_identity_is_recorded_but_never_counted() {
        let mut sys = MockSystemInfoProvider::new();
        sys.expect_command_output()
            .returning(|_| Ok("uid=0(root) gid=0(root) groups=0(root)\n".to_string()));

        let outcome = ShellPrivilegeProbe::new().evaluate(&sys);
        assert!(!outcome.matched);
        assert_eq!(
            outcome.evidence,
            vec!["Root access is available".to_string()]
        );
    }

    #[test]
    fn unprivileged_identity_is_a_non_match() {
        let mut sys = MockSystemInfoProvider::new();
        sys.expect_command_output()
            .returning(|_| Ok("uid=2000(shell) gid=2000(shell)\n".to_string()));

        assert_eq!(
            ShellPrivilegeProbe::new().evaluate(&sys),
            ProbeOutcome::no_match()
        );
    }

    #[test]
    fn spawn_failure_is_swallowed() {
        let mut sys = MockSystemInfoProvider::new();
        sys.expect_command_output().returning(|_| {
            Err(DetectError::Command {
                command: "su".to_string(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            })
        });

        assert_eq!(
            ShellPrivilegeProbe::new().evaluate(&sys),
            ProbeOutcome::no_match()
        );
    }
}
