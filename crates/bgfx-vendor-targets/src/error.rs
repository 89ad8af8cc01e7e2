//! Error types for target resolution.

/// Errors that can occur while turning flags into a target list.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// Neither `--all` nor `--target` was given.
    #[error("No target specified. Use --target or --all.")]
    NoSelection,

    /// `--target` named a host that is not in the host table.
    #[error("Unknown target configuration: {host}")]
    UnknownHost {
        /// The host identifier as given on the command line.
        host: String,
    },
}

/// Result type for target operations.
pub type Result<T> = std::result::Result<T, TargetError>;
