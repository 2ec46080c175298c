use thiserror::Error;

/// Closed failure taxonomy for the executor core. Everything except
/// [`ExecutorError::OrderingViolation`] is retryable: the monitor aborts the
/// height's transaction and replays the same height on the next cycle.
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("chain query failed: {0}")]
    Chain(#[from] reqwest::Error),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("malformed {context}: {reason}")]
    Decode {
        context: &'static str,
        reason: String,
    },

    #[error("withdrawal amount must be a positive integer, got {0:?}")]
    InvalidAmount(String),

    #[error("no output available")]
    NoOutput,

    /// The persisted checkpoint moved in a way the sequential loop can never
    /// produce. Continuing would risk double-processing or skipped heights.
    #[error("checkpoint for {monitor} moved from {expected} to {stored} outside the monitor loop")]
    OrderingViolation {
        monitor: String,
        expected: i64,
        stored: i64,
    },
}

impl ExecutorError {
    pub fn decode(context: &'static str, reason: impl ToString) -> Self {
        Self::Decode {
            context,
            reason: reason.to_string(),
        }
    }

    /// Fatal errors halt the monitor instead of being retried.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::OrderingViolation { .. })
    }
}

impl From<sea_orm::DbErr> for ExecutorError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<eyre::Report> for ExecutorError {
    fn from(err: eyre::Report) -> Self {
        Self::Storage(format!("{err:#}"))
    }
}
