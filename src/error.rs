//! Error type shared by the workout model, the store and the session controller.

/// Everything that can go wrong below the CLI.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Data is not valid: {field} must be a finite number greater than 0 (got {value})")]
    InvalidMeasurement { field: &'static str, value: f64 },

    #[error("Stored workouts could not be decoded: {0}")]
    StorageDeserialize(#[source] serde_json::Error),

    #[error("Stored workouts repeat the id {0}")]
    DuplicateId(String),

    #[error("Workout not found: {0}")]
    RecordNotFound(String),

    #[error("No map position selected; click the map first")]
    NoPositionSelected,

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Encoding workouts: {0}")]
    Encode(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
