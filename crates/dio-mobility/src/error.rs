use dio_core::DioError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("invalid motion tuning: {0}")]
    Tuning(#[from] DioError),
}

pub type MobilityResult<T> = Result<T, MobilityError>;
