//! bgfx-vendor — build bgfx for every target a host can produce.

mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use bgfx_vendor_exec::{CommandRunner, DryRunRunner, ExecError, SystemRunner};
use bgfx_vendor_targets::SystemProbe;
use clap::{ArgAction, Args, Parser, Subcommand};

use commands::hosts::Format;
use config::Workspace;

#[derive(Parser)]
#[command(
    name = "bgfx-vendor",
    version,
    about = "Check toolchains, fetch bx/bimg/bgfx, and build bgfx per target"
)]
struct Cli {
    #[command(flatten)]
    select: SelectArgs,
    /// Print git/make invocations instead of running them
    #[arg(long)]
    dry_run: bool,
    /// Configuration file (default: nearest bgfx-vendor.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct SelectArgs {
    /// Host whose targets to build (win-x86_64, linux-x86_64, macos)
    #[arg(long)]
    target: Option<String>,
    /// Build the targets of every host
    #[arg(long)]
    all: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Report toolchain, program, and checkout status without building
    Doctor {
        #[command(flatten)]
        select: SelectArgs,
    },
    /// List known hosts and their targets
    Hosts {
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Human)]
        format: Format,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(exit_code(&e));
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        None => {
            let workspace = Workspace::load(&cwd, cli.config.as_deref())?;
            let mut runner: Box<dyn CommandRunner> = if cli.dry_run {
                Box::new(DryRunRunner)
            } else {
                Box::new(SystemRunner)
            };
            commands::build::run(
                cli.select.all,
                cli.select.target.as_deref(),
                &workspace,
                &SystemProbe,
                runner.as_mut(),
            )
        }

        Some(Commands::Doctor { select }) => {
            let workspace = Workspace::load(&cwd, cli.config.as_deref())?;
            commands::doctor::run(select.all, select.target.as_deref(), &workspace, &SystemProbe)
        }

        Some(Commands::Hosts { format }) => commands::hosts::list(format),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Failed `git`/`make` runs exit with the child's code; everything else with 1.
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<ExecError>()
        .map_or(1, ExecError::exit_code)
}

#[cfg(test)]
mod tests {
    use bgfx_vendor_targets::TargetError;
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_target_and_all() {
        let cli = Cli::try_parse_from(["bgfx-vendor", "--target", "macos", "--all"]).unwrap();
        assert_eq!(cli.select.target.as_deref(), Some("macos"));
        assert!(cli.select.all);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parse_doctor_and_hosts() {
        let cli = Cli::try_parse_from(["bgfx-vendor", "doctor", "--target", "win-x86_64"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Doctor { ref select }) if select.target.as_deref() == Some("win-x86_64")
        ));
        let cli = Cli::try_parse_from(["bgfx-vendor", "hosts", "--format", "json", "-vv"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Hosts { format: Format::Json })));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn usage_errors_exit_one() {
        let err = anyhow::Error::from(TargetError::NoSelection);
        assert_eq!(exit_code(&err), 1);
        let err = anyhow::Error::from(TargetError::UnknownHost {
            host: "amiga".into(),
        });
        assert_eq!(exit_code(&err), 1);
        assert_eq!(exit_code(&anyhow::anyhow!("bad config")), 1);
    }

    #[test]
    fn process_failures_pass_exit_code_through() {
        let err = anyhow::Error::from(ExecError::Failed {
            command: "make config=osx-release64".into(),
            code: Some(2),
        });
        assert_eq!(exit_code(&err), 2);
        let err = anyhow::Error::from(ExecError::Failed {
            command: "git clone".into(),
            code: None,
        });
        assert_eq!(exit_code(&err), 1);
    }
}
