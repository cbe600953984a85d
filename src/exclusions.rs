//! The exclusion filter.
//!
//! Some applications never make sense to multi-instance: system utilities,
//! the Finder, the Dock, anything living under the protected system or
//! binary directories. The policy is compiled in, built once at process
//! start, and passed by reference wherever filtering happens. It is the
//! single source of truth for eligibility; any search or sort a host
//! performs sits on top of its output.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::catalog::AppDescriptor;

/// Applications that don't make sense to launch new instances of.
const EXCLUDED_NAMES: &[&str] = &[
    "System Preferences",
    "System Settings",
    "Activity Monitor",
    "Console",
    "Keychain Access",
    "Terminal",
    "Finder",
    "Dock",
    "Launchpad",
    "Mission Control",
    "Boot Camp Assistant",
    "Migration Assistant",
    "AirPort Utility",
    "Bluetooth Screen Sharing",
    "Directory Utility",
    "Disk Utility",
    "Grapher",
    "Network Utility",
    "RAID Utility",
    "System Information",
    "VoiceOver Utility",
    "Wireless Diagnostics",
];

/// Protected system directory: apps under it are OS components.
const SYSTEM_DIR_MARKER: &str = "/System/";

/// Protected binary directory: loose executables, not user applications.
const BINARY_DIR_MARKER: &str = "/usr/";

/// The standard policy, constructed once per process.
pub static STANDARD_POLICY: Lazy<ExclusionPolicy> = Lazy::new(ExclusionPolicy::standard);

/// Immutable eligibility policy for multi-instance launch.
#[derive(Debug, Clone)]
pub struct ExclusionPolicy {
    names: HashSet<&'static str>,
    path_markers: Vec<&'static str>,
}

impl ExclusionPolicy {
    /// The compiled-in policy: excluded display names plus the protected
    /// system and binary directory markers.
    pub fn standard() -> Self {
        Self {
            names: EXCLUDED_NAMES.iter().copied().collect(),
            path_markers: vec![SYSTEM_DIR_MARKER, BINARY_DIR_MARKER],
        }
    }

    /// Whether an application may be offered for multi-instance launch.
    ///
    /// Evaluated in order, first match wins: excluded name, then each
    /// protected path marker, otherwise eligible.
    pub fn is_eligible(&self, app: &AppDescriptor) -> bool {
        if self.names.contains(app.name.as_str()) {
            return false;
        }

        let path = app.path.to_string_lossy();
        for marker in &self.path_markers {
            if path.contains(marker) {
                return false;
            }
        }

        true
    }
}
