//! Snapshot types handed to the outside: JSON output of the CLI and the marker feed a map
//! widget renders from.

use crate::config::MapConfig;
use crate::state::AppState;
use serde::{Deserialize, Serialize};
use wishlist_core::{Filter, KeyValueStore, Location, LocationForm, Modal, SortMode, Status};

/// Bounds the map is not allowed to pan past.
const WORLD_BOUNDS: [[f64; 2]; 2] = [[-90.0, -180.0], [90.0, 180.0]];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSummary {
    pub id: String,
    pub name: String,
    pub coordinates: [f64; 2],
    pub notes: String,
    pub status: Status,
    pub created_at: i64,
}

/// A filtered, searched and sorted view of the list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSnapshot {
    pub filter: Filter,
    pub search: String,
    pub sort: SortMode,
    /// Size of the whole list, before filtering.
    pub total: usize,
    pub locations: Vec<LocationSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerDto {
    pub id: String,
    pub name: String,
    pub notes: String,
    pub position: [f64; 2],
    pub status: Status,
    /// Marker colour for the status.
    pub icon: String,
    pub label: String,
}

/// Everything a map widget needs to draw the current list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSnapshot {
    pub center: [f64; 2],
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_bounds: [[f64; 2]; 2],
    pub markers: Vec<MarkerDto>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDto {
    pub name: String,
    pub notes: String,
    pub status: Status,
    pub coordinates: [f64; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalDto {
    pub open: bool,
    pub mode: Option<ModalMode>,
    pub editing_id: Option<String>,
    pub form: Option<FormDto>,
}

/// Complete snapshot of an interactive session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub list: ListSnapshot,
    pub modal: ModalDto,
}

impl From<&Location> for LocationSummary {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id.to_string(),
            name: location.name.clone(),
            coordinates: location.coordinates.into(),
            notes: location.notes.clone(),
            status: location.status,
            created_at: location.created_at,
        }
    }
}

impl From<&Location> for MarkerDto {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id.to_string(),
            name: location.name.clone(),
            notes: location.notes.clone(),
            position: location.coordinates.into(),
            status: location.status,
            icon: location.status.marker_color().to_string(),
            label: location.status.label().to_string(),
        }
    }
}

impl From<&LocationForm> for FormDto {
    fn from(form: &LocationForm) -> Self {
        Self {
            name: form.name.clone(),
            notes: form.notes.clone(),
            status: form.status,
            coordinates: form.coordinates.into(),
        }
    }
}

/// Markers cover the whole list, whatever the sidebar filter is.
pub fn map_snapshot(locations: &[Location], map: &MapConfig) -> MapSnapshot {
    MapSnapshot {
        center: map.center.into(),
        zoom: map.zoom,
        min_zoom: map.min_zoom,
        max_bounds: WORLD_BOUNDS,
        markers: locations.iter().map(MarkerDto::from).collect(),
    }
}

pub fn modal_to_dto(modal: &Modal, form: &LocationForm) -> ModalDto {
    match modal {
        Modal::Closed => ModalDto {
            open: false,
            mode: None,
            editing_id: None,
            form: None,
        },
        Modal::Create { .. } => ModalDto {
            open: true,
            mode: Some(ModalMode::Create),
            editing_id: None,
            form: Some(form.into()),
        },
        Modal::Edit { id } => ModalDto {
            open: true,
            mode: Some(ModalMode::Edit),
            editing_id: Some(id.to_string()),
            form: Some(form.into()),
        },
    }
}

pub fn session_to_snapshot<S: KeyValueStore>(state: &AppState<S>) -> SessionSnapshot {
    SessionSnapshot {
        list: state.list_snapshot(),
        modal: modal_to_dto(state.store.modal(), &state.form),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wishlist_core::{Coordinates, LocationDraft, LocationId};

    fn lima() -> Location {
        Location::from_draft(
            LocationDraft::new("Lima", (-12.05, -77.04))
                .with_notes("ceviche")
                .with_status(Status::Visited),
            LocationId::from("l1ma000"),
            1_650_000_000_000,
        )
    }

    #[test]
    fn test_summary_json_is_camel_case() {
        let value = serde_json::to_value(LocationSummary::from(&lima())).expect("serialize");

        assert_eq!(value["createdAt"], 1_650_000_000_000i64);
        assert_eq!(value["coordinates"], serde_json::json!([-12.05, -77.04]));
        assert_eq!(value["status"], "visited");
    }

    #[test]
    fn test_marker_icon_follows_status() {
        let mut location = lima();
        let marker = MarkerDto::from(&location);
        assert_eq!(marker.icon, "green");
        assert_eq!(marker.label, "Visited");

        location.status = Status::Wishlist;
        let marker = MarkerDto::from(&location);
        assert_eq!(marker.icon, "gold");
        assert_eq!(marker.label, "Wishlist");
    }

    #[test]
    fn test_map_snapshot() {
        let snapshot = map_snapshot(&[lima()], &MapConfig::default());
        let value = serde_json::to_value(&snapshot).expect("serialize");

        assert_eq!(value["center"], serde_json::json!([20.0, 0.0]));
        assert_eq!(value["minZoom"], 2);
        assert_eq!(value["maxBounds"][1], serde_json::json!([90.0, 180.0]));
        assert_eq!(value["markers"][0]["position"], serde_json::json!([-12.05, -77.04]));
    }

    #[test]
    fn test_modal_dto() {
        let form = LocationForm {
            name: "Lima".to_string(),
            coordinates: Coordinates::new(1.0, 2.0),
            ..Default::default()
        };

        let closed = modal_to_dto(&Modal::Closed, &form);
        assert!(!closed.open);
        assert!(closed.form.is_none());

        let edit = modal_to_dto(
            &Modal::Edit {
                id: LocationId::from("l1ma000"),
            },
            &form,
        );
        assert!(edit.open);
        assert_eq!(edit.mode, Some(ModalMode::Edit));
        assert_eq!(edit.editing_id.as_deref(), Some("l1ma000"));
        assert_eq!(edit.form.map(|f| f.name), Some("Lima".to_string()));
    }
}
