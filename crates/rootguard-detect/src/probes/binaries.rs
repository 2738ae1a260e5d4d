//! Privileged-binary presence checks: managed filesystem path, `PATH`
//! environment scan, and the out-of-runtime native cross-check.

use super::{Probe, ShellPrivilegeProbe};
use crate::blacklists::SU_PATHS;
use crate::provider::SystemInfoProvider;
use rootguard_api::{PathProbe, ProbeOutcome};
use tracing::{debug, info};

/// Tests a fixed list of privileged-binary directories for one filename.
///
/// Three instances cover `su`, `magisk` and `busybox`. Every matching
/// path is reported; the scan never stops at the first hit, because the
/// evidence list is the user-facing audit trail.
pub struct BinaryPresenceProbe {
    name: &'static str,
    filename: &'static str,
}

impl BinaryPresenceProbe {
    pub fn su() -> Self {
        Self {
            name: "su-binary",
            filename: "su",
        }
    }

    pub fn magisk() -> Self {
        Self {
            name: "magisk-binary",
            filename: "magisk",
        }
    }

    pub fn busybox() -> Self {
        Self {
            name: "busybox-binary",
            filename: "busybox",
        }
    }
}

impl Probe for BinaryPresenceProbe {
    fn name(&self) -> &str {
        self.name
    }

    fn evaluate(&self, sys: &dyn SystemInfoProvider) -> ProbeOutcome {
        let mut evidence = Vec::new();
        for dir in SU_PATHS {
            let complete = format!("{}{}", dir, self.filename);
            if sys.path_exists(&complete) {
                info!(probe = self.name, path = %complete, "binary present");
                evidence.push(format!("{complete} binary detected"));
            }
        }
        if evidence.is_empty() {
            ProbeOutcome::no_match()
        } else {
            ProbeOutcome::hit(evidence)
        }
    }
}

/// Scans the colon-separated `PATH` variable for a `su` entry.
///
/// On a hit this probe also runs the shell privilege check: an `su` on
/// the `PATH` is the only situation where asking for a root shell can
/// tell us anything, and may trigger an authorization prompt from a root
/// management app. The shell check's evidence is appended but its result
/// stays diagnostic-only.
pub struct SuPathProbe {
    shell: ShellPrivilegeProbe,
}

impl SuPathProbe {
    pub fn new() -> Self {
        Self {
            shell: ShellPrivilegeProbe::new(),
        }
    }
}

impl Default for SuPathProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for SuPathProbe {
    fn name(&self) -> &str {
        "su-path"
    }

    fn evaluate(&self, sys: &dyn SystemInfoProvider) -> ProbeOutcome {
        let Some(path) = sys.env_var("PATH") else {
            return ProbeOutcome::no_match();
        };
        let found = path
            .split(':')
            .filter(|dir| !dir.is_empty())
            .any(|dir| sys.path_exists(&format!("{dir}/su")));
        if !found {
            return ProbeOutcome::no_match();
        }
        info!(probe = "su-path", "su found on PATH");
        let mut evidence = vec!["Path SU found".to_string()];
        evidence.extend(self.shell.evaluate(sys).evidence);
        ProbeOutcome::hit(evidence)
    }
}

/// Per-path existence verdicts from a checker running outside the
/// managed runtime. Parallel to its input path list.
pub trait NativePathChecker {
    fn check_paths(&self, paths: &[String]) -> Vec<PathProbe>;
}

/// Existence check through `libc::fopen`, bypassing the std filesystem
/// layer as a harder-to-intercept code path.
pub struct LibcPathChecker;

impl LibcPathChecker {
    #[cfg(unix)]
    fn probe_path(path: &str) -> PathProbe {
        let Ok(c_path) = std::ffi::CString::new(path) else {
            return PathProbe::Unavailable;
        };
        // fopen instead of stat: mirrors the access pattern of real
        // privileged binaries, and returns a handle we must close.
        unsafe {
            let file = libc::fopen(c_path.as_ptr(), c"r".as_ptr());
            if file.is_null() {
                PathProbe::NotFound
            } else {
                libc::fclose(file);
                PathProbe::Found
            }
        }
    }

    #[cfg(not(unix))]
    fn probe_path(_path: &str) -> PathProbe {
        PathProbe::Unavailable
    }
}

impl NativePathChecker for LibcPathChecker {
    fn check_paths(&self, paths: &[String]) -> Vec<PathProbe> {
        paths.iter().map(|p| Self::probe_path(p)).collect()
    }
}

/// Cross-checks the managed `su` scan through a [`NativePathChecker`].
///
/// Candidate paths deliberately overlap [`BinaryPresenceProbe::su`]:
/// divergence between the two evidence sets is itself a strong
/// anti-tamper signal, so findings are not deduplicated.
pub struct NativeBinaryPresenceProbe {
    checker: Box<dyn NativePathChecker>,
}

impl NativeBinaryPresenceProbe {
    pub fn new(checker: Box<dyn NativePathChecker>) -> Self {
        Self { checker }
    }

    fn candidate_paths() -> Vec<String> {
        SU_PATHS.iter().map(|dir| format!("{dir}su")).collect()
    }
}

impl Probe for NativeBinaryPresenceProbe {
    fn name(&self) -> &str {
        "native-su-binary"
    }

    fn evaluate(&self, _sys: &dyn SystemInfoProvider) -> ProbeOutcome {
        let paths = Self::candidate_paths();
        let results = self.checker.check_paths(&paths);
        let mut evidence = Vec::new();
        for (path, result) in paths.iter().zip(results) {
            match result {
                PathProbe::Found => {
                    info!(probe = "native-su-binary", path = %path, "binary present");
                    evidence.push(format!("Native found binary: {path}"));
                }
                PathProbe::NotFound => {}
                PathProbe::Unavailable => {
                    debug!(probe = "native-su-binary", path = %path, "native checker unavailable");
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
