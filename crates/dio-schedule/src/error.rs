use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("routine parse error: {0}")]
    Parse(String),

    #[error("invalid routine: {0}")]
    InvalidRoutine(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
