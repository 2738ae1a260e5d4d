//! Installed-application blacklist checks.

use super::Probe;
use crate::blacklists;
use crate::provider::SystemInfoProvider;
use rootguard_api::ProbeOutcome;
use tracing::info;

/// Queries the installed-application registry for a fixed blacklist.
///
/// Three instances cover root management apps, otherwise dangerous apps
/// and root cloaking apps; they differ only by their list. Absence of a
/// package is the expected, non-evidentiary case.
pub struct PackageBlacklistProbe {
    name: &'static str,
    packages: &'static [&'static str],
}

impl PackageBlacklistProbe {
    pub fn root_management() -> Self {
        Self {
            name: "root-management-apps",
            packages: blacklists::ROOT_MANAGEMENT_APPS,
        }
    }

    pub fn dangerous() -> Self {
        Self {
            name: "dangerous-apps",
            packages: blacklists::DANGEROUS_APPS,
        }
    }

    pub fn cloaking() -> Self {
        Self {
            name: "root-cloaking-apps",
            packages: blacklists::ROOT_CLOAKING_APPS,
        }
    }
}

impl Probe for PackageBlacklistProbe {
    fn name(&self) -> &str {
        self.name
    }

    fn evaluate(&self, sys: &dyn SystemInfoProvider) -> ProbeOutcome {
        let mut evidence = Vec::new();
        for package in self.packages {
            if sys.package_installed(package) {
                info!(probe = self.name, package, "blacklisted package installed");
                evidence.push(format!("Root app detected: {package}"));
            }
        }
        if evidence.is_empty() {
            ProbeOutcome::no_match()
        } else {
            ProbeOutcome::hit(evidence)
        }
    }
}
