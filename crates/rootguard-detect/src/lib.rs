// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Rootguard

//! Rootguard Detection Engine
//!
//! A battery of independent local heuristics for root access and
//! tampering: blacklisted packages, privileged binaries, writable system
//! mounts, dangerous properties, suspicious build fingerprints and an
//! out-of-runtime cross-check. The aggregator unions all evidence into a
//! single verdict with a human-readable audit trail.
//!
//! Detection is synchronous and fail-safe: a probe that cannot complete
//! reports a non-match and the run carries on, so `evaluate()` always
//! returns a verdict.

pub mod aggregator;
pub mod blacklists;
pub mod probes;
pub mod provider;

pub use aggregator::{default_battery, DetectionAggregator};
pub use provider::{BuildInfo, DeviceInfoProvider, SystemInfoProvider};

/// Probe-level I/O failures. Always recovered inside the aggregator:
/// they are logged and turned into a non-match, never surfaced to the
/// caller of `evaluate()`.
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    #[error("failed to run {command}: {source}")]
    Command {
        command: String,
        source: std::io::Error,
    },
    #[error("{command} produced non-UTF-8 output")]
    NonUtf8 { command: String },
    #[error("empty command line")]
    EmptyCommand,
}
