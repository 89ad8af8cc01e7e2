//! Turning `--all` / `--target` into a list of targets.

use log::warn;

use crate::error::{Result, TargetError};
use crate::host::{all_targets, host_config};

/// Which hosts' targets a run covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every target of every host.
    All,
    /// The targets of a single host, by identifier.
    Host(String),
}

impl Selection {
    /// Build a selection from the command-line flags.
    ///
    /// `--all` is checked first and wins over `--target`.
    pub fn from_flags(all: bool, target: Option<&str>) -> Result<Self> {
        if all {
            if let Some(host) = target {
                warn!("--all was given, ignoring --target {host}");
            }
            return Ok(Selection::All);
        }
        match target {
            Some(host) => Ok(Selection::Host(host.to_string())),
            None => Err(TargetError::NoSelection),
        }
    }

    /// Resolve the selection against the host table.
    ///
    /// A single host yields its list verbatim. `All` yields the
    /// de-duplicated union of every list.
    pub fn resolve(&self) -> Result<Vec<&'static str>> {
        match self {
            Selection::All => Ok(all_targets()),
            Selection::Host(name) => host_config(name)
                .map(|h| h.targets.to_vec())
                .ok_or_else(|| TargetError::UnknownHost { host: name.clone() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::host::HOST_CONFIGS;

    #[test]
    fn each_host_resolves_to_its_list_in_order() {
        for host in HOST_CONFIGS {
            let targets = Selection::Host(host.name.into()).resolve().unwrap();
            assert_eq!(targets, host.targets);
        }
    }

    #[test]
    fn win_host_example() {
        let targets = Selection::from_flags(false, Some("win-x86_64"))
            .unwrap()
            .resolve()
            .unwrap();
        assert_eq!(
            targets,
            [
                "windows-x64",
                "windows-arm64",
                "android-arm64",
                "android-x86_64",
                "android-x86",
                "asmjs"
            ]
        );
    }

    #[test]
    fn all_resolves_to_union_without_duplicates() {
        let targets = Selection::All.resolve().unwrap();
        let unique: BTreeSet<_> = targets.iter().collect();
        assert_eq!(unique.len(), targets.len());
        for host in HOST_CONFIGS {
            for t in host.targets {
                assert!(targets.contains(t), "missing {t}");
            }
        }
    }

    #[test]
    fn all_takes_precedence_over_target() {
        assert_eq!(
            Selection::from_flags(true, Some("macos")).unwrap(),
            Selection::All
        );
        assert_eq!(
            Selection::from_flags(true, Some("bogus")).unwrap(),
            Selection::All
        );
    }

    #[test]
    fn no_flags_is_an_error() {
        let err = Selection::from_flags(false, None).unwrap_err();
        assert!(matches!(err, TargetError::NoSelection));
        assert_eq!(err.to_string(), "No target specified. Use --target or --all.");
    }

    #[test]
    fn unknown_host_is_an_error() {
        let err = Selection::from_flags(false, Some("amiga"))
            .unwrap()
            .resolve()
            .unwrap_err();
        assert!(matches!(err, TargetError::UnknownHost { ref host } if host == "amiga"));
        assert_eq!(err.to_string(), "Unknown target configuration: amiga");
    }
}
