//! Toolchain requirements and presence probing.
//!
//! Every target needs at most one external toolchain. Presence is a cheap
//! probe (an environment variable is set, or a path exists) and the result
//! is advisory: a missing toolchain is reported, never fatal.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;

/// Environment variable pointing at the Android NDK.
pub const ANDROID_NDK_ENV: &str = "ANDROID_NDK_ROOT";
/// Environment variable set by the Emscripten SDK's `emsdk_env` script.
pub const EMSDK_ENV: &str = "EMSDK";
/// Xcode application bundle.
pub const XCODE_PATH: &str = "/Applications/Xcode.app";
/// Visual Studio installer locator.
pub const VSWHERE_PATH: &str =
    r"C:\Program Files (x86)\Microsoft Visual Studio\Installer\vswhere.exe";

/// An external toolchain some targets depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Tool {
    AndroidNdk,
    EmscriptenSdk,
    Xcode,
    VisualStudio,
}

/// How a tool's presence is detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// The environment variable must be set to a non-empty value.
    EnvVar(&'static str),
    /// The path must exist.
    Path(&'static str),
}

impl Tool {
    /// The tool a target needs, if any.
    ///
    /// Rules are tried in order: `android*`, `asmjs`, `ios`/`osx`, `windows*`.
    pub fn for_target(target: &str) -> Option<Tool> {
        if target.starts_with("android") {
            Some(Tool::AndroidNdk)
        } else if target == "asmjs" {
            Some(Tool::EmscriptenSdk)
        } else if target == "ios" || target == "osx" {
            Some(Tool::Xcode)
        } else if target.starts_with("windows") {
            Some(Tool::VisualStudio)
        } else {
            None
        }
    }

    /// Human-readable tool name.
    pub fn name(self) -> &'static str {
        match self {
            Tool::AndroidNdk => "Android NDK",
            Tool::EmscriptenSdk => "Emscripten SDK",
            Tool::Xcode => "Xcode",
            Tool::VisualStudio => "Visual Studio",
        }
    }

    pub fn requirement(self) -> Requirement {
        match self {
            Tool::AndroidNdk => Requirement::EnvVar(ANDROID_NDK_ENV),
            Tool::EmscriptenSdk => Requirement::EnvVar(EMSDK_ENV),
            Tool::Xcode => Requirement::Path(XCODE_PATH),
            Tool::VisualStudio => Requirement::Path(VSWHERE_PATH),
        }
    }

    /// Whether the tool is present according to `probe`.
    pub fn is_present(self, probe: &dyn Probe) -> bool {
        match self.requirement() {
            Requirement::EnvVar(key) => probe.env_is_set(key),
            Requirement::Path(path) => probe.path_exists(Path::new(path)),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::EnvVar(key) => write!(f, "${key}"),
            Requirement::Path(path) => f.write_str(path),
        }
    }
}

/// Source of truth for environment variables and paths.
///
/// [`SystemProbe`] reads the real process environment; [`FixedProbe`]
/// answers from fixed sets.
pub trait Probe {
    /// Whether `key` is set to a non-empty value.
    fn env_is_set(&self, key: &str) -> bool;

    /// Whether `path` exists.
    fn path_exists(&self, path: &Path) -> bool;
}

/// Probes the running process's environment and filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl Probe for SystemProbe {
    fn env_is_set(&self, key: &str) -> bool {
        std::env::var_os(key).is_some_and(|v| !v.is_empty())
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// A probe answering from fixed sets of variables and paths.
#[derive(Debug, Default, Clone)]
pub struct FixedProbe {
    env: HashSet<String>,
    paths: HashSet<PathBuf>,
}

impl FixedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an environment variable as set.
    pub fn with_env(mut self, key: impl Into<String>) -> Self {
        self.env.insert(key.into());
        self
    }

    /// Mark a path as existing.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(path.into());
        self
    }
}

impl Probe for FixedProbe {
    fn env_is_set(&self, key: &str) -> bool {
        self.env.contains(key)
    }

    fn path_exists(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }
}

/// The toolchain status of one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetCheck {
    pub target: String,
    /// Required tool, `None` if the target needs nothing.
    pub tool: Option<Tool>,
    /// Whether the requirement is satisfied. Always true when `tool` is `None`.
    pub present: bool,
}

/// Check a single target.
pub fn check_target(target: &str, probe: &dyn Probe) -> TargetCheck {
    let tool = Tool::for_target(target);
    let present = tool.map_or(true, |t| t.is_present(probe));
    debug!("toolchain probe: {target} -> {tool:?} present={present}");
    TargetCheck {
        target: target.to_string(),
        tool,
        present,
    }
}

/// Missing tools collected over a target list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolchainReport {
    /// One entry per target whose requirement is unmet, in target order.
    /// A tool appears once per target needing it.
    pub missing: Vec<Tool>,
}

impl ToolchainReport {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty()
    }

    /// The missing tools with duplicates removed.
    pub fn unique(&self) -> BTreeSet<Tool> {
        self.missing.iter().copied().collect()
    }

    /// Warning lines for display, or nothing if every tool is present.
    pub fn warning_lines(&self) -> Vec<String> {
        if self.is_empty() {
            return Vec::new();
        }
        let mut lines = vec!["Warning: The following required tools were not found:".to_string()];
        lines.extend(self.unique().into_iter().map(|t| format!(" - {t}")));
        lines.push("Please ensure these are installed and configured correctly.".to_string());
        lines
    }
}

/// Check every target and collect the tools that are missing.
pub fn check_toolchains<S: AsRef<str>>(targets: &[S], probe: &dyn Probe) -> ToolchainReport {
    let missing = targets
        .iter()
        .map(|t| check_target(t.as_ref(), probe))
        .filter(|c| !c.present)
        .filter_map(|c| c.tool)
        .collect();
    ToolchainReport { missing }
}
