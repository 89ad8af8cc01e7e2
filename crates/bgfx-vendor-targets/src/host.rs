//! The host-to-targets table.
//!
//! Each host the driver can run on maps to the bgfx targets that host is
//! able to cross-compile. Target identifiers follow bgfx's own
//! `<platform>[-<arch>]` naming, so they can be handed to its makefile as-is.

use std::collections::BTreeSet;

use serde::Serialize;

/// One row of the host table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HostConfig {
    /// Host identifier (e.g., "win-x86_64", "macos").
    pub name: &'static str,
    /// Targets buildable from this host, in build order. Never empty.
    pub targets: &'static [&'static str],
}

/// Every known host, in display order.
pub const HOST_CONFIGS: &[HostConfig] = &[
    HostConfig {
        name: "win-x86_64",
        targets: &[
            "windows-x64",
            "windows-arm64",
            "android-arm64",
            "android-x86_64",
            "android-x86",
            "asmjs",
        ],
    },
    HostConfig {
        name: "linux-x86_64",
        targets: &[
            "linux-x64",
            "linux-arm64",
            "android-arm64",
            "android-x86_64",
            "android-x86",
            "asmjs",
        ],
    },
    HostConfig {
        name: "macos",
        targets: &[
            "osx",
            "ios",
            "android-arm64",
            "android-x86_64",
            "android-x86",
            "asmjs",
        ],
    },
];

/// Look up a host by its identifier.
pub fn host_config(name: &str) -> Option<&'static HostConfig> {
    HOST_CONFIGS.iter().find(|h| h.name == name)
}

/// The union of every host's targets, without duplicates.
///
/// Sorted by name so that `--all` builds in a stable order.
pub fn all_targets() -> Vec<&'static str> {
    HOST_CONFIGS
        .iter()
        .flat_map(|h| h.targets.iter().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The host identifier for the machine this binary runs on, if it has one.
pub fn detect_host() -> Option<&'static str> {
    host_for(std::env::consts::OS, std::env::consts::ARCH)
}

/// Map an OS/architecture pair (as in `std::env::consts`) to a host identifier.
pub fn host_for(os: &str, arch: &str) -> Option<&'static str> {
    match (os, arch) {
        ("windows", "x86_64") => Some("win-x86_64"),
        ("linux", "x86_64") => Some("linux-x86_64"),
        ("macos", "aarch64") => Some("macos"),
        _ => None,
    }
}
