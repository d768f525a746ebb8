use std::path::PathBuf;

use scrollwin_core::WindowError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot open trace {path}: {source}")]
    OpenTrace {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("line {line}: invalid trace record: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line {line}: trace must start with a config record")]
    MissingConfig { line: usize },

    #[error("line {line}: duplicate config record")]
    DuplicateConfig { line: usize },

    #[error("line {line}: {current} + {added} rows exceeds the replay limit of {limit}")]
    ItemLimit {
        line: usize,
        current: usize,
        added: usize,
        limit: usize,
    },

    #[error("window error: {0}")]
    Window(#[from] WindowError),

    #[error("frame {frame} (line {line}): invariant violated: {message}")]
    InvariantViolation {
        frame: u64,
        line: usize,
        message: String,
    },
}

impl HarnessError {
    /// Process exit code: 2 for a failed invariant check, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvariantViolation { .. } => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn violation(frame: u64, line: usize, message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            frame,
            line,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::HarnessError;
    use scrollwin_core::WindowError;

    #[test]
    fn violation_exits_with_two() {
        let error = HarnessError::violation(3, 9, "end past item count");
        assert_eq!(error.exit_code(), 2);
        assert_eq!(
            error.to_string(),
            "frame 3 (line 9): invariant violated: end past item count"
        );
    }

    #[test]
    fn window_errors_are_wrapped() {
        let error: HarnessError = WindowError::DegenerateConfiguration { row_height: 0 }.into();
        assert_eq!(error.exit_code(), 1);
        assert!(error.to_string().contains("row height must be positive"));
    }
}
