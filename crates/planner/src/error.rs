use venue_core::error::CoreError;

/// Error type for planner sessions.
///
/// Wraps [`CoreError`] for domain refusals and adds configuration failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlannerError {
    /// A domain-level error from `venue_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An environment variable held an unusable value.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Convenience alias for session return values.
pub type PlannerResult<T> = Result<T, PlannerError>;

impl PlannerError {
    /// The wrapped domain error, if any.
    pub fn core(&self) -> Option<&CoreError> {
        match self {
            Self::Core(err) => Some(err),
            Self::Config(_) => None,
        }
    }
}
