//! `bgfx-vendor.toml` parsing and workspace layout.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use bgfx_vendor_exec::{default_repositories, Repository};
use serde::{Deserialize, Serialize};

/// File name searched for when no `--config` is given.
pub const CONFIG_FILE: &str = "bgfx-vendor.toml";

/// The top-level configuration file. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VendorConfig {
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
    /// URL overrides keyed by repository name.
    #[serde(default)]
    pub repos: BTreeMap<String, String>,
}

/// Where repositories live and which one is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Clone directory, relative to the config file.
    #[serde(default)]
    pub dir: Option<PathBuf>,
    /// Repository whose checkout `make` runs in.
    #[serde(default = "default_project")]
    pub project: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            dir: None,
            project: default_project(),
        }
    }
}

fn default_project() -> String {
    "bgfx".to_string()
}

/// External program names or paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_git")]
    pub git: String,
    #[serde(default = "default_make")]
    pub make: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            git: default_git(),
            make: default_make(),
        }
    }
}

fn default_git() -> String {
    "git".to_string()
}

fn default_make() -> String {
    "make".to_string()
}

impl VendorConfig {
    /// Search upward from `start_dir` for `bgfx-vendor.toml`, parse it and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                return Ok(Some((Self::load(&candidate)?, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing bgfx-vendor.toml")
    }

    /// The default repositories with `[repos]` overrides applied.
    pub fn repositories(&self) -> Result<Vec<Repository>> {
        let mut repos = default_repositories();
        for (name, url) in &self.repos {
            match repos.iter().position(|r| &r.name == name) {
                Some(i) => repos[i].url = url.clone(),
                None => bail!(
                    "unknown repository '{name}' in [repos]; expected one of: {}",
                    known_names(&repos)
                ),
            }
        }
        Ok(repos)
    }
}

fn known_names(repos: &[Repository]) -> String {
    repos
        .iter()
        .map(|r| r.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Resolved on-disk layout for a run.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Directory repositories are cloned into.
    pub root: PathBuf,
    pub repos: Vec<Repository>,
    /// Checkout `make` runs in.
    pub project_dir: PathBuf,
    pub git: String,
    pub make: String,
}

impl Workspace {
    /// Build the layout from an optional config and the directory it was
    /// found in. Without a config everything happens in `cwd`.
    pub fn resolve(config: Option<(VendorConfig, PathBuf)>, cwd: &Path) -> Result<Self> {
        let (config, base) = match config {
            Some((config, dir)) => (config, dir),
            None => (VendorConfig::default(), cwd.to_path_buf()),
        };
        let root = match &config.workspace.dir {
            Some(dir) => base.join(dir),
            None => base,
        };
        let repos = config.repositories()?;
        let project = &config.workspace.project;
        if !repos.iter().any(|r| &r.name == project) {
            bail!(
                "workspace project '{project}' is not a known repository; expected one of: {}",
                known_names(&repos)
            );
        }
        Ok(Self {
            project_dir: root.join(project),
            root,
            repos,
            git: config.tools.git,
            make: config.tools.make,
        })
    }

    /// Load the config named by `--config`, or search upward from `cwd`.
    pub fn load(cwd: &Path, explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => {
                let config = VendorConfig::load(path)?;
                let dir = path
                    .parent()
                    .map(|p| cwd.join(p))
                    .unwrap_or_else(|| cwd.to_path_buf());
                Some((config, dir))
            }
            None => VendorConfig::find_and_load(cwd)?,
        };
        Self::resolve(config, cwd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let config = VendorConfig::from_str(
            r#"
[workspace]
dir = "third_party"
project = "bgfx"

[tools]
git = "/usr/local/bin/git"
make = "gmake"

[repos]
bx = "https://mirror.example/bx.git"
"#,
        )
        .unwrap();
        assert_eq!(config.workspace.dir.as_deref(), Some(Path::new("third_party")));
        assert_eq!(config.tools.git, "/usr/local/bin/git");
        assert_eq!(config.tools.make, "gmake");
        let repos = config.repositories().unwrap();
        assert_eq!(repos[0].url, "https://mirror.example/bx.git");
        assert_eq!(repos[1].url, "https://github.com/bkaradzic/bimg.git");
    }

    #[test]
    fn parse_empty_config_uses_defaults() {
        let config = VendorConfig::from_str("").unwrap();
        assert!(config.workspace.dir.is_none());
        assert_eq!(config.workspace.project, "bgfx");
        assert_eq!(config.tools.git, "git");
        assert_eq!(config.tools.make, "make");
        assert_eq!(config.repositories().unwrap(), default_repositories());
    }

    #[test]
    fn reject_invalid_toml() {
        assert!(VendorConfig::from_str("this is not valid toml [[[").is_err());
    }

    #[test]
    fn reject_unknown_repository() {
        let config = VendorConfig::from_str("[repos]\nglfw = \"https://x\"\n").unwrap();
        let err = config.repositories().unwrap_err();
        assert!(err.to_string().contains("unknown repository 'glfw'"));
    }

    #[test]
    fn workspace_without_config_is_cwd() {
        let ws = Workspace::resolve(None, Path::new("/work")).unwrap();
        assert_eq!(ws.root, Path::new("/work"));
        assert_eq!(ws.project_dir, Path::new("/work/bgfx"));
        assert_eq!(ws.repos.len(), 3);
        assert_eq!(ws.git, "git");
        assert_eq!(ws.make, "make");
    }

    #[test]
    fn workspace_dir_is_relative_to_config() {
        let config = VendorConfig::from_str("[workspace]\ndir = \"vendor\"\n").unwrap();
        let ws = Workspace::resolve(Some((config, PathBuf::from("/repo"))), Path::new("/repo/src")).unwrap();
        assert_eq!(ws.root, Path::new("/repo/vendor"));
        assert_eq!(ws.project_dir, Path::new("/repo/vendor/bgfx"));
    }

    #[test]
    fn workspace_rejects_unknown_project() {
        let config = VendorConfig::from_str("[workspace]\nproject = \"glfw\"\n").unwrap();
        let err = Workspace::resolve(Some((config, PathBuf::from("/repo"))), Path::new("/repo")).unwrap_err();
        assert!(err.to_string().contains("'glfw'"));
    }

    #[test]
    fn find_and_load_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[tools]\nmake = \"gmake\"\n").unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, found_dir) = VendorConfig::find_and_load(&nested).unwrap().unwrap();
        assert_eq!(config.tools.make, "gmake");
        assert_eq!(found_dir, dir.path());
    }

    #[test]
    fn load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[workspace]\ndir = \"deps\"\n").unwrap();

        let ws = Workspace::load(Path::new("/elsewhere"), Some(&path)).unwrap();
        assert_eq!(ws.root, dir.path().join("deps"));
    }

    #[test]
    fn load_explicit_missing_file() {
        let err = Workspace::load(Path::new("/"), Some(Path::new("/nonexistent/bgfx-vendor.toml")))
            .unwrap_err();
        assert!(format!("{err:#}").contains("reading"));
    }
}
