//! Line-oriented interactive session.
//!
//! Unlike one-shot subcommands, the shell keeps filter, search and modal state alive between
//! lines, so the full add/edit flow of the UI can be driven from a terminal or a script.

use crate::commands::{self, FormField};
use crate::render;
use crate::state::AppState;
use anyhow::{Context, anyhow, bail};
use std::io::{BufRead, Write};
use wishlist_core::{Coordinates, Filter, KeyValueStore, LocationId, SortMode, Submitted};

const HELP: &str = "\
commands:
  list                      show the filtered list
  filter all|wishlist|visited
  search [TEXT]             narrow the list by name (empty clears)
  sort newest|alphabetical
  show ID                   one location with notes
  click LAT LNG             map click: start a new location there
  new                       start a new location
  edit ID                   edit a location
  toggle-modal [ID]         flip the form open/closed
  set FIELD VALUE           fill the open form (name, notes, status, lat, lng)
  submit                    save the open form
  cancel                    close the form
  toggle ID                 flip wishlist/visited
  delete ID
  markers                   map markers as JSON
  state                     session snapshot as JSON
  help
  quit";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    List,
    Filter(Filter),
    Search(String),
    Sort(SortMode),
    Show(LocationId),
    Click(Coordinates),
    New,
    Edit(LocationId),
    ToggleModal(Option<LocationId>),
    Set(FormField, String),
    Submit,
    Cancel,
    Toggle(LocationId),
    Delete(LocationId),
    Markers,
    State,
    Help,
    Quit,
}

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim();
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (s, ""),
    }
}

fn require_id(rest: &str, usage: &str) -> anyhow::Result<LocationId> {
    let (id, extra) = split_word(rest);
    if id.is_empty() || !extra.is_empty() {
        bail!("usage: {usage}");
    }
    Ok(LocationId::from(id))
}

impl ShellCommand {
    /// Parse one input line. Blank lines and `#` comments parse to `None`.
    pub fn parse(line: &str) -> anyhow::Result<Option<Self>> {
        let (word, rest) = split_word(line);
        if word.is_empty() || word.starts_with('#') {
            return Ok(None);
        }

        let command = match word.to_ascii_lowercase().as_str() {
            "list" | "ls" => ShellCommand::List,
            "filter" => ShellCommand::Filter(rest.parse()?),
            "search" => ShellCommand::Search(rest.to_string()),
            "sort" => ShellCommand::Sort(rest.parse()?),
            "show" => ShellCommand::Show(require_id(rest, "show ID")?),
            "click" => {
                let mut parts = rest.split_whitespace();
                let (Some(lat), Some(lng), None) = (parts.next(), parts.next(), parts.next())
                else {
                    bail!("usage: click LAT LNG");
                };
                ShellCommand::Click(Coordinates::new(
                    commands::parse_coordinate(lat, "latitude")?,
                    commands::parse_coordinate(lng, "longitude")?,
                ))
            }
            "new" | "add" => ShellCommand::New,
            "edit" => ShellCommand::Edit(require_id(rest, "edit ID")?),
            "toggle-modal" => {
                if rest.is_empty() {
                    ShellCommand::ToggleModal(None)
                } else {
                    ShellCommand::ToggleModal(Some(require_id(rest, "toggle-modal [ID]")?))
                }
            }
            "set" => {
                let (field, value) = split_word(rest);
                if field.is_empty() {
                    bail!("usage: set FIELD VALUE");
                }
                ShellCommand::Set(field.parse()?, value.to_string())
            }
            "submit" | "save" => ShellCommand::Submit,
            "cancel" | "close" => ShellCommand::Cancel,
            "toggle" => ShellCommand::Toggle(require_id(rest, "toggle ID")?),
            "delete" | "rm" => ShellCommand::Delete(require_id(rest, "delete ID")?),
            "markers" => ShellCommand::Markers,
            "state" => ShellCommand::State,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => return Err(anyhow!("unknown command '{other}', try 'help'")),
        };
        Ok(Some(command))
    }
}

/// Run one command against the session, writing its output to `out`.
pub fn execute<S: KeyValueStore, W: Write>(
    state: &mut AppState<S>,
    command: ShellCommand,
    out: &mut W,
) -> anyhow::Result<Flow> {
    match command {
        ShellCommand::List => writeln!(out, "{}", render::list(&commands::list_get(state)))?,
        ShellCommand::Filter(filter) => {
            let snapshot = commands::filter_set(state, filter);
            writeln!(out, "{}", render::list(&snapshot))?;
        }
        ShellCommand::Search(term) => {
            let snapshot = commands::search_set(state, &term);
            writeln!(out, "{}", render::list(&snapshot))?;
        }
        ShellCommand::Sort(sort) => {
            let snapshot = commands::sort_set(state, sort);
            writeln!(out, "{}", render::list(&snapshot))?;
        }
        ShellCommand::Show(id) => {
            let location = commands::location_get(state, &id)?;
            writeln!(out, "{}", render::location_detail(&location))?;
        }
        ShellCommand::Click(coordinates) => {
            let snapshot = commands::map_click(state, coordinates);
            writeln!(out, "{}", render::session(&snapshot))?;
        }
        ShellCommand::New => {
            let snapshot = commands::modal_open_create(state);
            writeln!(out, "{}", render::session(&snapshot))?;
        }
        ShellCommand::Edit(id) => {
            let snapshot = commands::modal_open_edit(state, &id)?;
            writeln!(out, "{}", render::session(&snapshot))?;
        }
        ShellCommand::ToggleModal(id) => {
            let snapshot = commands::modal_toggle(state, id.as_ref())?;
            writeln!(out, "{}", render::session(&snapshot))?;
        }
        ShellCommand::Set(field, value) => {
            let snapshot = commands::form_set(state, field, &value)?;
            writeln!(out, "{}", render::session(&snapshot))?;
        }
        ShellCommand::Submit => match commands::form_submit(state)? {
            Submitted::Added(id) => writeln!(out, "Added {id}")?,
            Submitted::Updated(id) => writeln!(out, "Updated {id}")?,
            Submitted::Unmatched(id) => writeln!(out, "Location {id} no longer exists")?,
        },
        ShellCommand::Cancel => {
            let snapshot = commands::modal_close(state);
            writeln!(out, "{}", render::session(&snapshot))?;
        }
        ShellCommand::Toggle(id) => {
            let location = commands::location_toggle_status(state, &id)?;
            writeln!(out, "{}", render::location_line(&location))?;
        }
        ShellCommand::Delete(id) => {
            commands::location_delete(state, &id)?;
            writeln!(out, "Deleted {id}")?;
        }
        ShellCommand::Markers => {
            writeln!(
                out,
                "{}",
                serde_json::to_string_pretty(&commands::map_get(state))?
            )?;
        }
        ShellCommand::State => {
            writeln!(
                out,
                "{}",
                serde_json::to_string_pretty(&commands::session_get(state))?
            )?;
        }
        ShellCommand::Help => writeln!(out, "{HELP}")?,
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// Read commands from `input` until EOF or `quit`.
///
/// Command errors are reported on `out` and the session continues. A storage failure is
/// reported the same way; the in-memory list stays as the command left it.
pub fn run<S, R, W>(
    state: &mut AppState<S>,
    input: R,
    out: &mut W,
    prompt: bool,
) -> anyhow::Result<()>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    if prompt {
        write!(out, "> ")?;
        out.flush()?;
    }

    for line in input.lines() {
        let line = line.context("Failed to read input")?;

        let flow = match ShellCommand::parse(&line) {
            Ok(Some(command)) => {
                tracing::debug!(?command, "shell command");
                match execute(state, command, out) {
                    Ok(flow) => flow,
                    Err(e) => {
                        writeln!(out, "error: {e:#}")?;
                        Flow::Continue
                    }
                }
            }
            Ok(None) => Flow::Continue,
            Err(e) => {
                writeln!(out, "error: {e:#}")?;
                Flow::Continue
            }
        };

        if flow == Flow::Quit {
            break;
        }
        if prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::io::Cursor;
    use wishlist_core::{MemoryStore, Status, Store};

    fn state() -> AppState<MemoryStore> {
        let store = Store::open(MemoryStore::new()).expect("open");
        AppState::new(store, &Config::default())
    }

    fn run_script(state: &mut AppState<MemoryStore>, script: &str) -> String {
        let mut out = Vec::new();
        run(state, Cursor::new(script), &mut out, false).expect("run");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(ShellCommand::parse("").expect("parse"), None);
        assert_eq!(ShellCommand::parse("  # note").expect("parse"), None);
        assert_eq!(
            ShellCommand::parse("click 48.85 -2.35").expect("parse"),
            Some(ShellCommand::Click(Coordinates::new(48.85, -2.35)))
        );
        assert_eq!(
            ShellCommand::parse("set name  Paris, France ").expect("parse"),
            Some(ShellCommand::Set(FormField::Name, "Paris, France".to_string()))
        );
        assert_eq!(
            ShellCommand::parse("FILTER visited").expect("parse"),
            Some(ShellCommand::Filter(Filter::Visited))
        );
        assert_eq!(
            ShellCommand::parse("toggle-modal").expect("parse"),
            Some(ShellCommand::ToggleModal(None))
        );
        assert_eq!(
            ShellCommand::parse("search").expect("parse"),
            Some(ShellCommand::Search(String::new()))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(ShellCommand::parse("fly home").is_err());
        assert!(ShellCommand::parse("click 1").is_err());
        assert!(ShellCommand::parse("click a b").is_err());
        assert!(ShellCommand::parse("click nan 0").is_err());
        assert!(ShellCommand::parse("click 0 inf").is_err());
        assert!(ShellCommand::parse("delete").is_err());
        assert!(ShellCommand::parse("delete a b").is_err());
        assert!(ShellCommand::parse("filter nearby").is_err());
        assert!(ShellCommand::parse("set").is_err());
    }

    #[test]
    fn test_script_adds_location_from_map_click() {
        let mut state = state();

        let output = run_script(
            &mut state,
            "click 41.39 2.17\nset name Barcelona\nset notes Sagrada Familia\nsubmit\nlist\n",
        );

        assert_eq!(state.store.locations().len(), 1);
        let location = &state.store.locations()[0];
        assert_eq!(location.name, "Barcelona");
        assert_eq!(location.notes, "Sagrada Familia");
        assert_eq!(location.coordinates, Coordinates::new(41.39, 2.17));
        assert!(output.contains(&format!("Added {}", location.id)));
        assert!(output.contains("1 of 1 locations"));
    }

    #[test]
    fn test_script_reports_errors_and_continues() {
        let mut state = state();

        let output = run_script(&mut state, "new\nsubmit\nbogus\nset name Rome\nsubmit\n");

        assert!(output.contains("error: Location name must not be empty"));
        assert!(output.contains("error: unknown command 'bogus'"));
        assert_eq!(state.store.locations().len(), 1);
        assert_eq!(state.store.locations()[0].name, "Rome");
    }

    #[test]
    fn test_script_stops_at_quit() {
        let mut state = state();

        run_script(&mut state, "new\nset name Rome\nsubmit\nquit\nnew\nset name Milan\nsubmit\n");

        assert_eq!(state.store.locations().len(), 1);
    }

    #[test]
    fn test_script_edit_and_toggle() {
        let mut state = state();
        run_script(&mut state, "new\nset name Kyiv\nsubmit\n");
        let id = state.store.locations()[0].id.clone();

        let output = run_script(
            &mut state,
            &format!("edit {id}\nset status visited\nsubmit\ntoggle {id}\nfilter visited\n"),
        );

        assert!(output.contains(&format!("Updated {id}")));
        assert_eq!(state.store.locations()[0].status, Status::Wishlist);
        assert!(output.contains("0 of 1 locations (filter: visited"));
    }

    #[test]
    fn test_toggle_modal_twice_closes() {
        let mut state = state();
        run_script(&mut state, "new\nset name A\nsubmit\nnew\nset name B\nsubmit\n");
        let b = state.store.locations()[0].id.clone();
        let a = state.store.locations()[1].id.clone();

        run_script(&mut state, &format!("toggle-modal {a}\n"));
        assert_eq!(state.store.editing().map(|l| l.id.clone()), Some(a));

        run_script(&mut state, &format!("toggle-modal {b}\n"));
        assert!(!state.store.is_modal_open());
    }

    #[test]
    fn test_markers_output_is_json() {
        let mut state = state();
        run_script(&mut state, "click 1 2\nset name Spot\nsubmit\n");

        let output = run_script(&mut state, "markers\n");
        let value: serde_json::Value = serde_json::from_str(&output).expect("json");

        assert_eq!(value["markers"][0]["name"], "Spot");
        assert_eq!(value["markers"][0]["icon"], "gold");
    }
}
