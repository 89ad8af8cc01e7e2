//! Per-target invocation of bgfx's makefile.

use std::path::Path;

use crate::error::Result;
use crate::runner::{CommandRunner, Invocation};

/// Suffix of the 64-bit release configuration in bgfx's makefile.
pub const RELEASE_SUFFIX: &str = "release64";

/// The makefile configuration for `target` (e.g., `windows-x64-release64`).
pub fn release_config(target: &str) -> String {
    format!("{target}-{RELEASE_SUFFIX}")
}

/// `make config=<target>-release64`, run inside `project_dir`.
pub fn build_invocation(project_dir: &Path, target: &str, make: &str) -> Invocation {
    Invocation::new(make, project_dir).arg(format!("config={}", release_config(target)))
}

/// Build every target in order, stopping at the first failure.
///
/// `on_target` is called with each target right before its build starts.
pub fn build_targets<S: AsRef<str>>(
    project_dir: &Path,
    targets: &[S],
    make: &str,
    runner: &mut dyn CommandRunner,
    mut on_target: impl FnMut(&str),
) -> Result<()> {
    for target in targets {
        let target = target.as_ref();
        on_target(target);
        runner.run(&build_invocation(project_dir, target, make))?;
    }
    Ok(())
}
