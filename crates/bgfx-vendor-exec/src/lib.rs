//! External process plumbing for vendored bgfx builds.
//!
//! Everything that leaves the process goes through a [`CommandRunner`]:
//! cloning the bx/bimg/bgfx repositories and invoking bgfx's makefile once
//! per target. Invocations are blocking and strictly sequential, and the
//! first failure ends the run.

pub mod build;
pub mod error;
pub mod repos;
pub mod runner;

pub use build::{build_invocation, build_targets, release_config, RELEASE_SUFFIX};
pub use error::{ExecError, Result};
pub use repos::{clone_invocation, clone_missing, default_repositories, Repository};
pub use runner::{CommandRunner, DryRunRunner, Invocation, RecordingRunner, SystemRunner};
