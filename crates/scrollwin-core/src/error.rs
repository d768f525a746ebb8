use thiserror::Error;

pub type Result<T> = std::result::Result<T, WindowError>;

/// Failures surfaced by a [`ScrollWindow`](crate::ScrollWindow).
///
/// Out-of-range offsets and indices are clamped, never reported here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    /// The host handed over a row slice whose length disagrees with the
    /// item count last reported to the window.
    #[error("row slice has {actual} rows but the window tracks {expected}")]
    ContractViolation { expected: usize, actual: usize },

    /// Row height must be strictly positive.
    #[error("row height must be positive, got {row_height}")]
    DegenerateConfiguration { row_height: i64 },
}

impl WindowError {
    /// Whether the host can recover by resynchronizing its list snapshot.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ContractViolation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::WindowError;

    #[test]
    fn contract_violation_message_names_both_lengths() {
        let error = WindowError::ContractViolation {
            expected: 12,
            actual: 11,
        };
        assert_eq!(
            error.to_string(),
            "row slice has 11 rows but the window tracks 12"
        );
        assert!(error.is_recoverable());
    }

    #[test]
    fn degenerate_configuration_is_not_recoverable() {
        let error = WindowError::DegenerateConfiguration { row_height: 0 };
        assert_eq!(error.to_string(), "row height must be positive, got 0");
        assert!(!error.is_recoverable());
    }
}
