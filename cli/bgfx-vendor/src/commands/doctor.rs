//! `bgfx-vendor doctor` — toolchain and checkout diagnostics.

use std::process::Command;

use anyhow::{bail, Result};
use bgfx_vendor_targets::{check_target, check_toolchains, detect_host, Probe, Selection};

use crate::config::Workspace;

/// Print the toolchain status of every selected target, the external
/// programs, and the state of each checkout. Never clones or builds.
///
/// With neither flag, the detected host's targets are checked.
pub fn run(all: bool, target: Option<&str>, workspace: &Workspace, probe: &dyn Probe) -> Result<()> {
    let detected = detect_host();
    let selection = match (all, target, detected) {
        (false, None, Some(host)) => Selection::Host(host.to_string()),
        (false, None, None) => bail!("cannot detect this host; use --target or --all"),
        _ => Selection::from_flags(all, target)?,
    };
    let targets = selection.resolve()?;

    println!("=== bgfx-vendor doctor ===");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!("Host:    {}", detected.unwrap_or("unknown"));
    println!();

    println!("--- Targets ---");
    for target in &targets {
        let check = check_target(target, probe);
        match check.tool {
            Some(tool) => println!(
                "  {target:<16} {:<15} {:<10} ({})",
                tool.name(),
                if check.present { "found" } else { "missing" },
                tool.requirement()
            ),
            None => println!("  {target:<16} (no toolchain required)"),
        }
    }
    println!();

    println!("--- Programs ---");
    print_tool_status(&workspace.git, &["--version"]);
    print_tool_status(&workspace.make, &["--version"]);
    println!();

    println!("--- Repositories ---");
    for repo in &workspace.repos {
        let dir = workspace.root.join(&repo.name);
        if dir.exists() {
            println!("  {:<5} present at {}", repo.name, dir.display());
        } else {
            println!("  {:<5} missing, will clone {}", repo.name, repo.url);
        }
    }

    let report = check_toolchains(&targets, probe);
    if !report.is_empty() {
        println!();
        for line in report.warning_lines() {
            println!("{line}");
        }
    }

    Ok(())
}

fn print_tool_status(name: &str, args: &[&str]) {
    match Command::new(name).args(args).output() {
        Ok(output) => {
            let version = String::from_utf8_lossy(&output.stdout);
            let first_line = version.lines().next().unwrap_or("(unknown version)");
            println!("  {name}: {first_line}");
        }
        Err(_) => {
            println!("  {name}: not found");
        }
    }
}
