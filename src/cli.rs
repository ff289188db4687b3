use crate::types::Position;
use crate::utils::parse_position;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

const DEFAULT_DB: &str = "mapty.sqlite3";

#[derive(Parser, Debug)]
#[command(
    name = "mapty",
    about = "Log running and cycling workouts pinned to a map position"
)]
pub struct Cli {
    /// SQLite file holding the workout storage.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_DB, global = true)]
    pub db: PathBuf,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Print all workouts in the order they were logged.
    List {
        /// Include index, id, position and interaction count.
        #[arg(long)]
        details: bool,
    },
    /// Log a new workout.
    Add {
        #[command(subcommand)]
        workout: AddCmd,
    },
    /// Print a single workout.
    Show { id: String },
    /// Select a workout: counts the interaction and centers the map on it.
    Select { id: String },
    /// Delete a workout.
    Remove { id: String },
    /// Delete every workout.
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum AddCmd {
    Running {
        #[command(flatten)]
        common: CommonArgs,
        /// Steps per minute.
        #[arg(long)]
        cadence: f64,
    },
    Cycling {
        #[command(flatten)]
        common: CommonArgs,
        /// Meters climbed.
        #[arg(long)]
        elevation_gain: f64,
    },
}

#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Where the workout happened, as LAT,LNG.
    #[arg(long, value_name = "LAT,LNG", value_parser = parse_position, allow_hyphen_values = true)]
    pub at: Position,

    /// Kilometers.
    #[arg(long)]
    pub distance: f64,

    /// Minutes.
    #[arg(long)]
    pub duration: f64,
}
