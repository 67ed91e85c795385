//! Travel wishlist: mark places on a map as wishlist or visited.

mod cli;
mod commands;
mod config;
mod dto;
mod render;
mod shell;
mod state;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, LocationCommand};
use commands::EditChanges;
use config::Config;
use state::AppState;
use std::io::{self, IsTerminal};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wishlist_core::{Coordinates, FileStore, KeyValueStore, LocationForm, LocationId, Store};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    let command = match cli.command {
        Commands::Config { write } => {
            return show_config(&config, cli.config.or_else(Config::default_path), write);
        }
        Commands::Location(command) => command,
    };

    let data_dir = config
        .resolve_data_dir(cli.data_dir.as_deref())
        .context("Could not determine a data directory, pass --data-dir")?;
    tracing::debug!(dir = %data_dir.display(), "opening location store");

    let store = Store::open(FileStore::new(&data_dir))
        .with_context(|| format!("Failed to load locations from {}", data_dir.display()))?;
    let mut state = AppState::new(store, &config);

    run(&mut state, command)
}

fn run<S: KeyValueStore>(state: &mut AppState<S>, command: LocationCommand) -> Result<()> {
    match command {
        LocationCommand::List {
            filter,
            search,
            sort,
            json,
        } => {
            if let Some(filter) = filter {
                state.store.set_filter(filter);
            }
            if let Some(sort) = sort {
                state.sort = sort;
            }
            let snapshot = commands::search_set(state, search.as_deref().unwrap_or(""));
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                println!("{}", render::list(&snapshot));
            }
        }
        LocationCommand::Add {
            name,
            lat,
            lng,
            notes,
            status,
        } => {
            let form = LocationForm {
                name,
                notes,
                status,
                coordinates: Coordinates::new(lat, lng),
            };
            let location = commands::location_add(state, form)?;
            println!("Added {}", render::location_line(&location));
        }
        LocationCommand::Edit {
            id,
            name,
            notes,
            status,
            lat,
            lng,
        } => {
            let changes = EditChanges {
                name,
                notes,
                status,
                coordinates: lat.zip(lng).map(Coordinates::from),
            };
            let location = commands::location_edit(state, &LocationId::from(id), changes)?;
            println!("Updated {}", render::location_line(&location));
        }
        LocationCommand::Toggle { id } => {
            let location = commands::location_toggle_status(state, &LocationId::from(id))?;
            println!("{}", render::location_line(&location));
        }
        LocationCommand::Delete { id } => {
            let id = LocationId::from(id);
            commands::location_delete(state, &id)?;
            println!("Deleted {id}");
        }
        LocationCommand::Show { id, json } => {
            let location = commands::location_get(state, &LocationId::from(id))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&location)?);
            } else {
                println!("{}", render::location_detail(&location));
            }
        }
        LocationCommand::Markers => {
            println!("{}", serde_json::to_string_pretty(&commands::map_get(state))?);
        }
        LocationCommand::Shell => {
            let stdin = io::stdin();
            let prompt = stdin.is_terminal();
            shell::run(state, stdin.lock(), &mut io::stdout(), prompt)?;
        }
    }
    Ok(())
}

fn show_config(config: &Config, path: Option<std::path::PathBuf>, write: bool) -> Result<()> {
    match &path {
        Some(path) => println!("# {}", path.display()),
        None => println!("# no config directory on this platform"),
    }
    print!("{}", toml::to_string_pretty(config)?);

    if write {
        let path = path.context("No config path to write to, pass --config")?;
        config
            .save_to(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("# written");
    }
    Ok(())
}
