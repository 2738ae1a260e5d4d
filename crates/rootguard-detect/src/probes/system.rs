//! Property table, mount table and USB debug checks.

use super::Probe;
use crate::blacklists::{DANGEROUS_PROPS, PATHS_THAT_SHOULD_NOT_BE_WRITABLE};
use crate::provider::SystemInfoProvider;
use rootguard_api::ProbeOutcome;
use tracing::{info, warn};

/// Scans the device property table for sensitive key/value pairs.
///
/// A key is flagged only when its line also carries the exact bracketed
/// unsafe value (`[0]`, `[1]`), so property keys that merely contain a
/// sensitive substring do not false-positive.
pub struct SystemPropertyProbe;

impl SystemPropertyProbe {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemPropertyProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for SystemPropertyProbe {
    fn name(&self) -> &str {
        "dangerous-properties"
    }

    fn evaluate(&self, sys: &dyn SystemInfoProvider) -> ProbeOutcome {
        let lines = match sys.command_output("getprop") {
            Ok(output) => output,
            Err(err) => {
                warn!(probe = "dangerous-properties", %err, "getprop failed");
                return ProbeOutcome::no_match();
            }
        };

        let mut evidence = Vec::new();
        for line in lines.lines() {
            for &(key, unsafe_value) in DANGEROUS_PROPS {
                let bracketed = format!("[{unsafe_value}]");
                if line.contains(key) && line.contains(&bracketed) {
                    info!(probe = "dangerous-properties", key, value = %bracketed, "unsafe property");
                    evidence.push(format!(
                        "Dangerous Property detected: {key} = {bracketed}"
                    ));
                }
            }
        }
        if evidence.is_empty() {
            ProbeOutcome::no_match()
        } else {
            ProbeOutcome::hit(evidence)
        }
    }
}

/// Checks the mount table for never-writable paths mounted `rw`.
///
/// Options are compared token-by-token against exactly `rw`; a substring
/// match would misclassify options like `rw_something`.
pub struct MountWritabilityProbe;

impl MountWritabilityProbe {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MountWritabilityProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for MountWritabilityProbe {
    fn name(&self) -> &str {
        "rw-system-paths"
    }

    fn evaluate(&self, sys: &dyn SystemInfoProvider) -> ProbeOutcome {
        let table = match sys.command_output("mount") {
            Ok(output) => output,
            Err(err) => {
                warn!(probe = "rw-system-paths", %err, "mount failed");
                return ProbeOutcome::no_match();
            }
        };

        let mut evidence = Vec::new();
        for line in table.lines() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 4 {
                warn!(probe = "rw-system-paths", line, "malformed mount line");
                continue;
            }
            let mount_point = fields[1];
            let options = fields[3];

            for protected in PATHS_THAT_SHOULD_NOT_BE_WRITABLE {
                if !mount_point.eq_ignore_ascii_case(protected) {
                    continue;
                }
                if options
                    .split(',')
                    .any(|option| option.eq_ignore_ascii_case("rw"))
                {
                    info!(probe = "rw-system-paths", path = protected, line, "rw mount");
                    evidence.push(format!("Following RW path was detected: {protected}"));
                }
            }
        }
        if evidence.is_empty() {
            ProbeOutcome::no_match()
        } else {
            ProbeOutcome::hit(evidence)
        }
    }
}

/// Flags an enabled USB debug setting.
pub struct UsbDebugProbe;

impl UsbDebugProbe {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UsbDebugProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for UsbDebugProbe {
    fn name(&self) -> &str {
        "usb-debug"
    }

    fn evaluate(&self, sys: &dyn SystemInfoProvider) -> ProbeOutcome {
        if sys.usb_debug_setting() != 0 {
            info!(probe = "usb-debug", "USB debugging enabled");
            ProbeOutcome::hit(vec!["USB debugging enabled".to_string()])
        } else {
            ProbeOutcome::no_match()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockSystemInfoProvider;
    use crate::DetectError;
    use rstest::rstest;

    fn props_sys(output: &str) -> MockSystemInfoProvider {
        let owned = output.to_string();
        let mut sys = MockSystemInfoProvider::new();
        sys.expect_command_output()
            .returning(move |_| Ok(owned.clone()));
        sys
    }

    #[rstest]
    #[case("[ro.secure]: [0]\n", true)]
    #[case("[ro.secure]: [1]\n", false)]
    #[case("[ro.debuggable]: [1]\n", true)]
    #[case("[ro.debuggable]: [0]\n", false)]
    fn bracketed_values_decide_dangerous_properties(
        #[case] line: &str,
        #[case] dangerous: bool,
    ) {
        let sys = props_sys(line);
        let outcome = SystemPropertyProbe::new().evaluate(&sys);
        assert_eq!(outcome.matched, dangerous);
    }

    #[test]
    fn dangerous_property_evidence_names_key_and_value() {
        let sys = props_sys("[ro.secure]: [0]\n[ro.build.tags]: [release-keys]\n");
        let outcome = SystemPropertyProbe::new().evaluate(&sys);
        assert_eq!(
            outcome.evidence,
            vec!["Dangerous Property detected: ro.secure = [0]".to_string()]
        );
    }

    #[test]
    fn ro_mount_of_protected_path_does_not_match() {
        let sys = props_sys("/ /system ext4 ro,relatime 0 0\n");
        assert_eq!(
            MountWritabilityProbe::new().evaluate(&sys),
            ProbeOutcome::no_match()
        );
    }

    #[test]
    fn rw_mount_of_protected_path_matches_with_path_evidence() {
        let sys = props_sys("/ /system ext4 rw,relatime 0 0\n");
        let outcome = MountWritabilityProbe::new().evaluate(&sys);
        assert!(outcome.matched);
        assert_eq!(
            outcome.evidence,
            vec!["Following RW path was detected: /system".to_string()]
        );
    }

    #[test]
    fn rw_prefixed_option_token_does_not_match() {
        let sys = props_sys("/ /system ext4 rw_something,relatime 0 0\n");
        assert_eq!(
            MountWritabilityProbe::new().evaluate(&sys),
            ProbeOutcome::no_match()
        );
    }

    #[test]
    fn short_mount_lines_are_skipped_not_fatal() {
        let sys = props_sys("garbage\n/ /system ext4 rw,relatime 0 0\n");
        let outcome = MountWritabilityProbe::new().evaluate(&sys);
        assert!(outcome.matched);
        assert_eq!(outcome.evidence.len(), 1);
    }

    #[test]
    fn unprotected_rw_mount_is_ignored() {
        let sys = props_sys("/dev/block /data ext4 rw,relatime 0 0\n");
        assert_eq!(
            MountWritabilityProbe::new().evaluate(&sys),
            ProbeOutcome::no_match()
        );
    }

    #[test]
    fn command_failure_is_a_non_match() {
        let mut sys = MockSystemInfoProvider::new();
        sys.expect_command_output().returning(|_| {
            Err(DetectError::Command {
                command: "mount".to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        });
        assert_eq!(
            MountWritabilityProbe::new().evaluate(&sys),
            ProbeOutcome::no_match()
        );
        assert_eq!(
            SystemPropertyProbe::new().evaluate(&sys),
            ProbeOutcome::no_match()
        );
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(7, true)]
    fn usb_debug_flag_is_a_plain_integer_check(#[case] setting: i64, #[case] matched: bool) {
        let mut sys = MockSystemInfoProvider::new();
        sys.expect_usb_debug_setting().return_const(setting);

        let outcome = UsbDebugProbe::new().evaluate(&sys);
        assert_eq!(outcome.matched, matched);
        if matched {
            assert_eq!(outcome.evidence, vec!["USB debugging enabled".to_string()]);
        }
    }
}
