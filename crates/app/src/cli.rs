use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wishlist_core::{Filter, SortMode, Status};

#[derive(Parser, Debug)]
#[command(author, version, about = "Track places you want to visit and places you've been")]
pub struct Cli {
    /// Directory holding the stored location list
    #[arg(long, global = true, env = "WISHLIST_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file to read instead of the default one
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        write: bool,
    },

    #[command(flatten)]
    Location(LocationCommand),
}

/// Subcommands that work on the stored location list.
#[derive(Subcommand, Debug)]
pub enum LocationCommand {
    /// List locations
    List {
        /// Only show wishlist or visited locations
        #[arg(short, long)]
        filter: Option<Filter>,
        /// Only show locations whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// newest or alphabetical
        #[arg(long)]
        sort: Option<SortMode>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Add a location
    Add {
        name: String,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        #[arg(short, long, default_value = "")]
        notes: String,
        #[arg(long, default_value_t = Status::Wishlist)]
        status: Status,
    },

    /// Change fields of a location
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
        #[arg(long)]
        status: Option<Status>,
        #[arg(long, allow_negative_numbers = true, requires = "lng")]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lng: Option<f64>,
    },

    /// Flip a location between wishlist and visited
    Toggle { id: String },

    /// Delete a location
    Delete { id: String },

    /// Show one location
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },

    /// Print map view and markers as JSON
    Markers,

    /// Interactive session reading commands from stdin
    Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_with_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "wishlist", "add", "Rio de Janeiro", "--lat", "-22.9", "--lng", "-43.2", "--status",
            "visited",
        ])
        .expect("parse");

        match cli.command {
            Commands::Location(LocationCommand::Add {
                name,
                lat,
                lng,
                notes,
                status,
            }) => {
                assert_eq!(name, "Rio de Janeiro");
                assert_eq!(lat, -22.9);
                assert_eq!(lng, -43.2);
                assert_eq!(notes, "");
                assert_eq!(status, Status::Visited);
            }
            other => panic!("expected Add, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_list_filter() {
        let cli = Cli::try_parse_from(["wishlist", "list", "--filter", "visited", "--json"])
            .expect("parse");

        assert!(matches!(
            cli.command,
            Commands::Location(LocationCommand::List {
                filter: Some(Filter::Visited),
                json: true,
                ..
            })
        ));
    }

    #[test]
    fn test_parse_config() {
        let cli = Cli::try_parse_from(["wishlist", "config", "--write"]).expect("parse");

        assert!(matches!(cli.command, Commands::Config { write: true }));
    }

    #[test]
    fn test_parse_rejects_unknown_filter() {
        assert!(Cli::try_parse_from(["wishlist", "list", "--filter", "someday"]).is_err());
    }

    #[test]
    fn test_edit_coordinates_come_in_pairs() {
        assert!(Cli::try_parse_from(["wishlist", "edit", "abc", "--lat", "1.0"]).is_err());
        assert!(
            Cli::try_parse_from(["wishlist", "edit", "abc", "--lat", "1.0", "--lng", "2.0"])
                .is_ok()
        );
    }
}
