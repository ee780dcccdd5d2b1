use crate::pomodoro::TimerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid timer configuration: {0}")]
    Timer(#[from] TimerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode status: {0}")]
    Json(#[from] serde_json::Error),
}
