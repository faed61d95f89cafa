//! Execution result types for operations

use crate::LogEntry;

/// Result of executing an operation
///
/// Distinguishes between:
/// - Logged: operations that mutate state and should be audited
/// - Unlogged: read-only operations with no side effects
/// - Failed: errors (optionally logged)
pub enum ExecutionResult<T, E> {
    /// Operation succeeded and should be logged
    Logged { value: T, log_entry: LogEntry },
    /// Operation succeeded but no logging needed (read-only)
    Unlogged { value: T },
    /// Operation failed
    Failed {
        error: E,
        log_entry: Option<LogEntry>,
    },
}

impl<T, E> ExecutionResult<T, E> {
    /// Extract the result (Ok or Err)
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Logged { value, .. } => Ok(value),
            Self::Unlogged { value } => Ok(value),
            Self::Failed { error, .. } => Err(error),
        }
    }

    /// Get the value and log entry separately
    pub fn split(self) -> (Result<T, E>, Option<LogEntry>) {
        match self {
            Self::Logged { value, log_entry } => (Ok(value), Some(log_entry)),
            Self::Unlogged { value } => (Ok(value), None),
            Self::Failed { error, log_entry } => (Err(error), log_entry),
        }
    }

    /// Check if this should be logged
    pub fn should_log(&self) -> bool {
        matches!(
            self,
            Self::Logged { .. }
                | Self::Failed {
                    log_entry: Some(_),
                    ..
                }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn into_result_unwraps_each_variant() {
        let logged: ExecutionResult<_, String> = ExecutionResult::Logged {
            value: 1,
            log_entry: LogEntry::new("add deal", json!({}), json!({}), None, 0),
        };
        assert_eq!(logged.into_result(), Ok(1));

        let unlogged: ExecutionResult<_, String> = ExecutionResult::Unlogged { value: 2 };
        assert_eq!(unlogged.into_result(), Ok(2));

        let failed: ExecutionResult<i32, _> = ExecutionResult::Failed {
            error: "boom".to_string(),
            log_entry: None,
        };
        assert_eq!(failed.into_result(), Err("boom".to_string()));
    }

    #[test]
    fn should_log_only_with_entry() {
        let unlogged: ExecutionResult<i32, String> = ExecutionResult::Unlogged { value: 2 };
        assert!(!unlogged.should_log());

        let failed_silent: ExecutionResult<i32, String> = ExecutionResult::Failed {
            error: "boom".into(),
            log_entry: None,
        };
        assert!(!failed_silent.should_log());
    }
}
