//! Operations the CLI and the interactive shell dispatch.
//!
//! Each command works on the [`AppState`], goes through the store's public operations and
//! returns a snapshot so the caller can show the result without a second lookup.

use crate::dto::{
    ListSnapshot, LocationSummary, MapSnapshot, SessionSnapshot, map_snapshot,
    session_to_snapshot,
};
use crate::state::AppState;
use anyhow::{Context, anyhow, bail};
use std::str::FromStr;
use wishlist_core::{
    Coordinates, CoreError, Filter, KeyValueStore, LocationForm, LocationId, SortMode, Status,
    Submitted,
};

pub type CommandResult<T> = anyhow::Result<T>;

/// Field changes for an edit; `None` keeps the current value.
#[derive(Debug, Default, Clone)]
pub struct EditChanges {
    pub name: Option<String>,
    pub notes: Option<String>,
    pub status: Option<Status>,
    pub coordinates: Option<Coordinates>,
}

/// A form field addressable from the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Notes,
    Status,
    Lat,
    Lng,
}

impl FromStr for FormField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(FormField::Name),
            "notes" => Ok(FormField::Notes),
            "status" => Ok(FormField::Status),
            "lat" | "latitude" => Ok(FormField::Lat),
            "lng" | "lon" | "longitude" => Ok(FormField::Lng),
            other => Err(anyhow!(
                "unknown field '{other}' (expected name, notes, status, lat or lng)"
            )),
        }
    }
}

fn not_found(id: &LocationId) -> anyhow::Error {
    anyhow!("No location with id '{id}'")
}

/// Parse one coordinate component. `what` names it in the error.
pub fn parse_coordinate(value: &str, what: &str) -> CommandResult<f64> {
    let parsed: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("invalid {what} '{value}'"))?;
    if !parsed.is_finite() {
        bail!("invalid {what} '{value}', expected a finite number");
    }
    Ok(parsed)
}

// ============================================================================
// Location commands
// ============================================================================

/// Add a location through the form, so a blank name is refused exactly as in the UI.
pub fn location_add<S: KeyValueStore>(
    state: &mut AppState<S>,
    form: LocationForm,
) -> CommandResult<LocationSummary> {
    state.store.open_for_create(Some(form.coordinates));
    state.form = form;
    match form_submit(state)? {
        Submitted::Added(id) => location_get(state, &id),
        other => bail!("unexpected submit outcome {other:?}"),
    }
}

/// Edit an existing location through the form.
pub fn location_edit<S: KeyValueStore>(
    state: &mut AppState<S>,
    id: &LocationId,
    changes: EditChanges,
) -> CommandResult<LocationSummary> {
    modal_open_edit(state, id)?;

    if let Some(name) = changes.name {
        state.form.name = name;
    }
    if let Some(notes) = changes.notes {
        state.form.notes = notes;
    }
    if let Some(status) = changes.status {
        state.form.status = status;
    }
    if let Some(coordinates) = changes.coordinates {
        state.form.coordinates = coordinates;
    }

    match form_submit(state)? {
        Submitted::Updated(id) => location_get(state, &id),
        Submitted::Unmatched(id) => Err(not_found(&id)),
        other => bail!("unexpected submit outcome {other:?}"),
    }
}

pub fn location_toggle_status<S: KeyValueStore>(
    state: &mut AppState<S>,
    id: &LocationId,
) -> CommandResult<LocationSummary> {
    state
        .store
        .toggle_status(id)
        .context("Failed to save status change")?
        .ok_or_else(|| not_found(id))?;
    location_get(state, id)
}

pub fn location_delete<S: KeyValueStore>(
    state: &mut AppState<S>,
    id: &LocationId,
) -> CommandResult<()> {
    let found = state
        .store
        .delete_location(id)
        .context("Failed to save deletion")?;
    if !found {
        return Err(not_found(id));
    }
    Ok(())
}

pub fn location_get<S: KeyValueStore>(
    state: &AppState<S>,
    id: &LocationId,
) -> CommandResult<LocationSummary> {
    state
        .store
        .location(id)
        .map(LocationSummary::from)
        .ok_or_else(|| not_found(id))
}

// ============================================================================
// View commands
// ============================================================================

pub fn list_get<S: KeyValueStore>(state: &AppState<S>) -> ListSnapshot {
    state.list_snapshot()
}

pub fn map_get<S: KeyValueStore>(state: &AppState<S>) -> MapSnapshot {
    map_snapshot(state.store.locations(), &state.map)
}

pub fn session_get<S: KeyValueStore>(state: &AppState<S>) -> SessionSnapshot {
    session_to_snapshot(state)
}

pub fn filter_set<S: KeyValueStore>(state: &mut AppState<S>, filter: Filter) -> ListSnapshot {
    state.store.set_filter(filter);
    state.list_snapshot()
}

pub fn search_set<S: KeyValueStore>(state: &mut AppState<S>, term: &str) -> ListSnapshot {
    state.search = term.trim().to_string();
    state.list_snapshot()
}

pub fn sort_set<S: KeyValueStore>(state: &mut AppState<S>, sort: SortMode) -> ListSnapshot {
    state.sort = sort;
    state.list_snapshot()
}

// ============================================================================
// Modal and form commands
// ============================================================================

/// A click on the map: open the create form at that position.
pub fn map_click<S: KeyValueStore>(
    state: &mut AppState<S>,
    coordinates: Coordinates,
) -> SessionSnapshot {
    state.store.open_for_create(Some(coordinates));
    state.reset_form();
    session_to_snapshot(state)
}

pub fn modal_open_create<S: KeyValueStore>(state: &mut AppState<S>) -> SessionSnapshot {
    state.store.open_for_create(None);
    state.reset_form();
    session_to_snapshot(state)
}

pub fn modal_open_edit<S: KeyValueStore>(
    state: &mut AppState<S>,
    id: &LocationId,
) -> CommandResult<SessionSnapshot> {
    if !state.store.open_for_edit(id) {
        return Err(not_found(id));
    }
    state.reset_form();
    Ok(session_to_snapshot(state))
}

/// Flip the modal the way a toolbar toggle does: closes it if open, whatever `id` is.
pub fn modal_toggle<S: KeyValueStore>(
    state: &mut AppState<S>,
    id: Option<&LocationId>,
) -> CommandResult<SessionSnapshot> {
    if state.store.is_modal_open() {
        return Ok(modal_close(state));
    }

    let target = match id {
        Some(id) => Some(state.store.location(id).cloned().ok_or_else(|| not_found(id))?),
        None => None,
    };
    state.store.toggle_modal(target.as_ref());
    state.reset_form();
    Ok(session_to_snapshot(state))
}

pub fn modal_close<S: KeyValueStore>(state: &mut AppState<S>) -> SessionSnapshot {
    state.store.close_modal();
    state.form = LocationForm::default();
    session_to_snapshot(state)
}

pub fn form_set<S: KeyValueStore>(
    state: &mut AppState<S>,
    field: FormField,
    value: &str,
) -> CommandResult<SessionSnapshot> {
    if !state.store.is_modal_open() {
        return Err(CoreError::ModalClosed.into());
    }

    match field {
        FormField::Name => state.form.name = value.to_string(),
        FormField::Notes => state.form.notes = value.to_string(),
        FormField::Status => state.form.status = value.parse()?,
        FormField::Lat => state.form.coordinates.lat = parse_coordinate(value, "latitude")?,
        FormField::Lng => state.form.coordinates.lng = parse_coordinate(value, "longitude")?,
    }
    Ok(session_to_snapshot(state))
}

/// Submit the open form. On success the modal is closed and the form cleared; on a
/// validation error the form stays as it is.
pub fn form_submit<S: KeyValueStore>(state: &mut AppState<S>) -> CommandResult<Submitted> {
    let outcome = state.store.submit(&state.form)?;
    state.form = LocationForm::default();
    Ok(outcome)
}
