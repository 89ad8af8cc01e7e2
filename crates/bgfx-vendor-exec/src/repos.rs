//! Source repositories bgfx is built from.
//!
//! bgfx depends on bx and bimg being checked out next to it. Each
//! repository is cloned once, into a directory named after it, and left
//! alone afterwards.

use std::path::Path;

use log::debug;

use crate::error::Result;
use crate::runner::{CommandRunner, Invocation};

/// Default repositories, in clone order.
pub const DEFAULT_REPOSITORIES: &[(&str, &str)] = &[
    ("bx", "https://github.com/bkaradzic/bx.git"),
    ("bimg", "https://github.com/bkaradzic/bimg.git"),
    ("bgfx", "https://github.com/bkaradzic/bgfx.git"),
];

/// A named repository and where to clone it from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// Directory name of the checkout.
    pub name: String,
    pub url: String,
}

impl Repository {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// The bx/bimg/bgfx repositories at their upstream URLs.
pub fn default_repositories() -> Vec<Repository> {
    DEFAULT_REPOSITORIES
        .iter()
        .map(|(name, url)| Repository::new(*name, *url))
        .collect()
}

/// The `git clone` invocation for `repo`, run from `root`.
pub fn clone_invocation(root: &Path, repo: &Repository, git: &str) -> Invocation {
    Invocation::new(git, root)
        .arg("clone")
        .arg(&repo.url)
        .arg(&repo.name)
}

/// Clone every repository whose directory is missing under `root`.
///
/// Existing directories are skipped without checking what they contain.
/// Stops at the first failed clone; returns the names that were cloned.
pub fn clone_missing(
    root: &Path,
    repos: &[Repository],
    git: &str,
    runner: &mut dyn CommandRunner,
) -> Result<Vec<String>> {
    let mut cloned = Vec::new();
    for repo in repos {
        let dir = root.join(&repo.name);
        if dir.exists() {
            debug!("{} already present at {}, skipping clone", repo.name, dir.display());
            continue;
        }
        runner.run(&clone_invocation(root, repo, git))?;
        cloned.push(repo.name.clone());
    }
    Ok(cloned)
}
