//! Running external commands.
//!
//! The `CommandRunner` trait abstracts over how an invocation is carried out.
//! [`SystemRunner`] spawns the real process, [`DryRunRunner`] only prints it,
//! and [`RecordingRunner`] keeps a log of invocations for tests.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::info;

use crate::error::{ExecError, Result};

/// A program, its arguments, and the directory it runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Carries out invocations, one at a time.
pub trait CommandRunner {
    /// Run `invocation` to completion. A non-zero exit is an error.
    fn run(&mut self, invocation: &Invocation) -> Result<()>;
}

/// Spawns real processes with inherited stdio and waits for each to exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<()> {
        info!("running `{invocation}` in {}", invocation.cwd.display());
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .status()
            .map_err(|source| ExecError::Spawn {
                command: invocation.to_string(),
                source,
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(ExecError::Failed {
                command: invocation.to_string(),
                code: status.code(),
            })
        }
    }
}

/// Prints each invocation instead of running it.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunRunner;

impl CommandRunner for DryRunRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<()> {
        println!("[dry-run] (in {}) {invocation}", invocation.cwd.display());
        Ok(())
    }
}

type FailPredicate = Box<dyn Fn(&Invocation) -> bool>;

/// Records invocations without running anything.
///
/// Can be told to fail invocations matching a predicate, to exercise
/// fail-fast paths.
#[derive(Default)]
pub struct RecordingRunner {
    invocations: Vec<Invocation>,
    fail: Option<(FailPredicate, i32)>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every invocation for which `predicate` holds, with exit `code`.
    pub fn failing_when(
        mut self,
        predicate: impl Fn(&Invocation) -> bool + 'static,
        code: i32,
    ) -> Self {
        self.fail = Some((Box::new(predicate), code));
        self
    }

    /// Every invocation attempted so far, failed ones included.
    pub fn invocations(&self) -> &[Invocation] {
        &self.invocations
    }

    /// Invocations of `program`.
    pub fn of(&self, program: &str) -> Vec<&Invocation> {
        self.invocations
            .iter()
            .filter(|i| i.program == program)
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<()> {
        self.invocations.push(invocation.clone());
        match &self.fail {
            Some((predicate, code)) if predicate(invocation) => Err(ExecError::Failed {
                command: invocation.to_string(),
                code: Some(*code),
            }),
            _ => Ok(()),
        }
    }
}
