//! Errors from external process invocation.

/// Errors that can occur while running `git` or `make`.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// The program could not be started at all.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully.
    #[error("`{command}` failed ({})", describe_code(*code))]
    Failed {
        command: String,
        /// Exit code, `None` if the process was killed by a signal.
        code: Option<i32>,
    },
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {c}"),
        None => "terminated by signal".to_string(),
    }
}

impl ExecError {
    /// The exit code this driver should terminate with.
    ///
    /// A child's own non-zero code is passed through; anything else maps to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExecError::Failed {
                code: Some(c), ..
            } if *c != 0 => *c,
            _ => 1,
        }
    }
}

/// Result type for exec operations.
pub type Result<T> = std::result::Result<T, ExecError>;
