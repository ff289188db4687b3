#![deny(
    warnings,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::Parser;
use mapty::cli::{AddCmd, Cmd};
use mapty::database::SqliteStorage;
use mapty::render::{LogMap, TextList};
use mapty::{
    Position, SessionConfig, SessionController, WorkoutForm, WorkoutRecord, WorkoutStore,
    WorkoutType, cli, dlog, utils,
};

/// Where the map opens when there is nothing logged yet.
const DEFAULT_CENTER: Position = Position::new(0.0, 0.0);

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    let storage = SqliteStorage::open(&cli.db)?;
    let store = WorkoutStore::hydrate(storage);
    dlog!("db={} workouts={}", cli.db.display(), store.len());

    let details = matches!(
        cli.cmd,
        Some(Cmd::List { details: true } | Cmd::Show { .. } | Cmd::Select { .. })
    );
    let center = store
        .all()
        .last()
        .map_or(DEFAULT_CENTER, WorkoutRecord::position);

    let mut session = SessionController::new(
        store,
        LogMap::default(),
        TextList::new(details),
        SessionConfig::default(),
    );
    session.on_map_ready(center);

    match cli.cmd {
        None | Some(Cmd::List { .. }) => {}
        Some(Cmd::Add { workout }) => {
            let (at, form) = form_from_args(workout);
            session.on_map_click(at);
            let id = session.submit(&form)?;
            tracing::info!(id = %id, "workout logged");
        }
        Some(Cmd::Show { id }) => {
            let record = session.store().get(&id)?;
            println!("{}", session.view().format_row(0, record));
            return Ok(());
        }
        Some(Cmd::Select { id }) => {
            if !session.select(&id) {
                tracing::warn!(id = %id, "no workout with this id");
                return Ok(());
            }
            if let Some(record) = session.store().find(&id) {
                println!("{}", session.view().format_row(0, record));
            }
            return Ok(());
        }
        Some(Cmd::Remove { id }) => match session.delete(&id)? {
            Some(removed) => {
                tracing::info!(id = %id, position = %removed.position(), "workout deleted");
            }
            None => tracing::info!(id = %id, "nothing to delete"),
        },
        Some(Cmd::Clear) => session.clear()?,
    }

    if session.store().is_empty() {
        println!("No workouts logged yet.");
    }
    for line in session.view().lines() {
        println!("{line}");
    }

    Ok(())
}

fn form_from_args(workout: AddCmd) -> (Position, WorkoutForm) {
    match workout {
        AddCmd::Running { common, cadence } => (
            common.at,
            WorkoutForm {
                workout_type: WorkoutType::Running,
                distance: common.distance,
                duration: common.duration,
                cadence,
                elevation_gain: 0.0,
            },
        ),
        AddCmd::Cycling {
            common,
            elevation_gain,
        } => (
            common.at,
            WorkoutForm {
                workout_type: WorkoutType::Cycling,
                distance: common.distance,
                duration: common.duration,
                cadence: 0.0,
                elevation_gain,
            },
        ),
    }
}
