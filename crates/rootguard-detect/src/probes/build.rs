//! Build metadata checks: signing tags and emulator fingerprints.

use super::Probe;
use crate::provider::SystemInfoProvider;
use rootguard_api::ProbeOutcome;
use tracing::info;

/// Inspects the build metadata for test-keys signing and emulator
/// fingerprints.
///
/// Each sub-check contributes its own evidence string; emulator-likeness
/// is the logical OR of the board, device, hardware, model and product
/// signals. `dev-keys` is handled by [`DevKeysProbe`].
pub struct BuildFingerprintProbe;

impl BuildFingerprintProbe {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BuildFingerprintProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for BuildFingerprintProbe {
    fn name(&self) -> &str {
        "build-fingerprint"
    }

    fn evaluate(&self, sys: &dyn SystemInfoProvider) -> ProbeOutcome {
        let build = sys.build_info();
        let mut evidence = Vec::new();

        if build.tags.contains("test-keys") {
            evidence.push("Test keys found".to_string());
        }

        // The board of an emulator is "unknown".
        if build.board.contains("unknown") {
            evidence.push("Emulator detected: Unknown board".to_string());
        }
        // The device name of an emulator is generic_x86 or similar.
        if build.device.contains("generic") {
            evidence.push("Emulator detected: device contains generic".to_string());
        }
        // "goldfish" is the classic emulator hardware, "ranchu" the newer one.
        if build.hardware.contains("goldfish") || build.hardware.contains("ranchu") {
            evidence.push("Emulator detected: Hardware contained goldfish or ranchu".to_string());
        }
        if build.model.to_uppercase().contains("SDK")
            || build.model.to_uppercase().contains("GENERIC")
        {
            evidence.push("Emulator detected: Build Model contains SDK or generic".to_string());
        }
        // Emulator products look like sdk_gphone_x86.
        if build.product.contains("sdk") {
            evidence.push("Emulator detected: product name contained SDK".to_string());
        }

        if evidence.is_empty() {
            ProbeOutcome::no_match()
        } else {
            info!(probe = "build-fingerprint", hits = evidence.len(), "suspicious build");
            ProbeOutcome::hit(evidence)
        }
    }
}

/// Flags builds signed with dev-keys.
pub struct DevKeysProbe;

impl DevKeysProbe {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DevKeysProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for DevKeysProbe {
    fn name(&self) -> &str {
        "dev-keys"
    }

    fn evaluate(&self, sys: &dyn SystemInfoProvider) -> ProbeOutcome {
        if sys.build_info().tags.contains("dev-keys") {
            info!(probe = "dev-keys", "dev keys found");
            ProbeOutcome::hit(vec!["Dev keys found".to_string()])
        } else {
            ProbeOutcome::no_match()
        }
    }
}
