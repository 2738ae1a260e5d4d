//! Runs the probe battery and folds the outcomes into one verdict.

use crate::probes::{
    BinaryPresenceProbe, BuildFingerprintProbe, DevKeysProbe, LibcPathChecker,
    MountWritabilityProbe, NativeBinaryPresenceProbe, NativePathChecker, PackageBlacklistProbe,
    Probe, SuPathProbe, SystemPropertyProbe, UsbDebugProbe,
};
use crate::provider::SystemInfoProvider;
use rootguard_api::DetectionResult;
use tracing::{debug, info};

/// The default battery, in registration order, with the native binary
/// cross-check backed by the given strategy.
pub fn default_battery(native: Box<dyn NativePathChecker>) -> Vec<Box<dyn Probe>> {
    vec![
        Box::new(PackageBlacklistProbe::root_management()),
        Box::new(PackageBlacklistProbe::dangerous()),
        Box::new(PackageBlacklistProbe::cloaking()),
        Box::new(SuPathProbe::new()),
        Box::new(BinaryPresenceProbe::su()),
        Box::new(BinaryPresenceProbe::magisk()),
        Box::new(BinaryPresenceProbe::busybox()),
        Box::new(MountWritabilityProbe::new()),
        Box::new(SystemPropertyProbe::new()),
        Box::new(BuildFingerprintProbe::new()),
        Box::new(DevKeysProbe::new()),
        Box::new(UsbDebugProbe::new()),
        Box::new(NativeBinaryPresenceProbe::new(native)),
    ]
}

/// Orchestrates the probe battery into a single verdict with evidence.
///
/// Every registered probe runs exactly once per [`evaluate`] call;
/// evidence is unioned in registration order and the verdict is the
/// Boolean OR of the probes' match flags. This is a union of independent
/// weak signals, not a scoring system. A probe that cannot complete
/// reports a non-match and the run proceeds.
///
/// [`evaluate`]: DetectionAggregator::evaluate
pub struct DetectionAggregator {
    sys: Box<dyn SystemInfoProvider>,
    probes: Vec<Box<dyn Probe>>,
}

impl DetectionAggregator {
    /// Aggregator with the default battery and the libc-backed native
    /// cross-check.
    pub fn new(sys: Box<dyn SystemInfoProvider>) -> Self {
        Self::with_probes(sys, default_battery(Box::new(LibcPathChecker)))
    }

    /// Aggregator over a custom probe battery.
    pub fn with_probes(sys: Box<dyn SystemInfoProvider>, probes: Vec<Box<dyn Probe>>) -> Self {
        Self { sys, probes }
    }

    /// Runs every probe once and returns the combined verdict.
    ///
    /// The result is created fresh on each call; re-running against an
    /// unchanged environment yields an identical result.
    pub fn evaluate(&self) -> DetectionResult {
        let mut rooted = false;
        let mut reasons = Vec::new();

        for probe in &self.probes {
            let outcome = probe.evaluate(self.sys.as_ref());
            debug!(
                probe = probe.name(),
                matched = outcome.matched,
                evidence = outcome.evidence.len(),
                "probe finished"
            );
            rooted |= outcome.matched;
            reasons.extend(outcome.evidence);
        }

        info!(rooted, reasons = reasons.len(), "detection run complete");
        DetectionResult { rooted, reasons }
    }
}
