//! Geo-tagged workout log: the workout model, a durable store and the session state
//! machine that ties them to a map and a list view.

pub mod cli;
pub mod database;
pub mod error;
pub mod id;
pub mod render;
pub mod session;
pub mod store;
pub mod types;
pub mod utils;

pub use error::{Error, Result};
pub use session::{ListView, MapService, SessionConfig, SessionController};
pub use store::WorkoutStore;
pub use types::{Position, WorkoutForm, WorkoutKind, WorkoutRecord, WorkoutType};
