use thiserror::Error;

/// Rejections from explicit simulation commands. Ticks never fail.
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("unknown UAV: {0}")]
    UnknownUav(String),

    #[error("unknown restricted zone: {0}")]
    UnknownZone(String),

    #[error("invalid restricted zone: {}", .0.join("; "))]
    InvalidZone(Vec<String>),

    #[error("invalid world: {}", .0.join("; "))]
    InvalidWorld(Vec<String>),
}

pub type SimResult<T> = Result<T, SimError>;
