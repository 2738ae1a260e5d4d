//! The probe battery: independent heuristics for root access and
//! tampering.
//!
//! Each probe is one weak signal. None is authoritative on its own; the
//! aggregator unions their evidence and ORs their match flags. Probes
//! never abort a run: internal failures are logged and reported as a
//! non-match.

mod binaries;
mod build;
mod packages;
mod shell;
mod system;

pub use binaries::{
    BinaryPresenceProbe, LibcPathChecker, NativeBinaryPresenceProbe, NativePathChecker,
    SuPathProbe,
};
pub use build::{BuildFingerprintProbe, DevKeysProbe};
pub use packages::PackageBlacklistProbe;
pub use shell::ShellPrivilegeProbe;
pub use system::{MountWritabilityProbe, SystemPropertyProbe, UsbDebugProbe};

use crate::provider::SystemInfoProvider;
use rootguard_api::ProbeOutcome;

/// A single heuristic check for device tampering.
///
/// Probes are independent and side-effect free besides evidence
/// collection; they may run in any order. A matching probe must record
/// at least one evidence string explaining the hit.
pub trait Probe {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Evaluates the heuristic against the given environment.
    fn evaluate(&self, sys: &dyn SystemInfoProvider) -> ProbeOutcome;
}
