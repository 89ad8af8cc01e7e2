//! Host and target model for vendored bgfx builds.
//!
//! A run starts from a [`Selection`] (one host, or every host), resolves it
//! against the static host table into an ordered list of bgfx target
//! identifiers, and probes the machine for the toolchain each target needs.
//!
//! - **Hosts:** the fixed host-to-targets table and host detection
//! - **Selection:** turning command-line flags into a target list
//! - **Toolchain:** per-target requirements, probing, and the missing-tools report

pub mod error;
pub mod host;
pub mod selection;
pub mod toolchain;

pub use error::{Result, TargetError};
pub use host::{all_targets, detect_host, host_config, HostConfig, HOST_CONFIGS};
pub use selection::Selection;
pub use toolchain::{
    check_target, check_toolchains, FixedProbe, Probe, Requirement, SystemProbe, TargetCheck,
    Tool, ToolchainReport,
};
