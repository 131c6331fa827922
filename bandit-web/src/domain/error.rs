use bandit_client::BanditError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimerError {
    #[error("timer already running")]
    TimerAlreadyRunning,
    #[error("no timer running")]
    NoTimerRunning,
}

/// Errors that can occur while serving a tracking use case.
#[derive(Debug, Error)]
pub enum TrackingError {
    #[error(transparent)]
    Backend(#[from] BanditError),
    #[error(transparent)]
    Timer(#[from] TimerError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl TrackingError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
