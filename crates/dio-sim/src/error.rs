use dio_core::{AgentId, DioError};
use dio_mobility::MobilityError;
use dio_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("scene configuration error: {0}")]
    Config(String),

    #[error("agent {0} is not in the scene")]
    AgentNotFound(AgentId),

    #[error(transparent)]
    Core(#[from] DioError),

    #[error("spatial error: {0}")]
    Spatial(#[from] SpatialError),

    #[error("mobility error: {0}")]
    Mobility(#[from] MobilityError),
}

pub type SimResult<T> = Result<T, SimError>;
