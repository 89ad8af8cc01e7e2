//! `bgfx-vendor --target <host>` / `--all` — check, clone, build.

use anyhow::Result;
use bgfx_vendor_exec::{build_targets, clone_missing, CommandRunner};
use bgfx_vendor_targets::{check_toolchains, Probe, Selection};
use log::info;

use crate::config::Workspace;

/// Run the full flow: resolve targets, warn about missing toolchains,
/// clone missing repositories, then build every target in order.
pub fn run(
    all: bool,
    target: Option<&str>,
    workspace: &Workspace,
    probe: &dyn Probe,
    runner: &mut dyn CommandRunner,
) -> Result<()> {
    let targets = Selection::from_flags(all, target)?.resolve()?;
    info!("resolved {} target(s): {}", targets.len(), targets.join(", "));

    let report = check_toolchains(&targets, probe);
    for line in report.warning_lines() {
        println!("{line}");
    }

    let cloned = clone_missing(&workspace.root, &workspace.repos, &workspace.git, runner)?;
    if !cloned.is_empty() {
        info!("cloned {}", cloned.join(", "));
    }

    build_targets(
        &workspace.project_dir,
        &targets,
        &workspace.make,
        runner,
        |t| println!("Building for target: {t}"),
    )?;
    Ok(())
}
