use crate::graph::LocationId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Location not found: {0}")]
    LocationNotFound(LocationId),

    #[error("Location id already in use: {0}")]
    IdExists(LocationId),

    #[error("Location name not found: {0}")]
    NameNotFound(String),

    #[error("Location name cannot be empty")]
    EmptyName,

    #[error("Location with name '{0}' already exists")]
    NameExists(String),

    #[error("Invalid location ids: {from} -> {to}")]
    InvalidIds { from: LocationId, to: LocationId },

    #[error("Source and destination are the same: {0}")]
    SameEndpoints(LocationId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
