//! Plain-text rendering of snapshots for the terminal.

use crate::dto::{ListSnapshot, LocationSummary, ModalMode, SessionSnapshot};
use chrono::{DateTime, Utc};
use std::fmt::Write;
use wishlist_core::Status;

fn status_marker(status: Status) -> &'static str {
    match status {
        Status::Wishlist => "[ ]",
        Status::Visited => "[x]",
    }
}

fn format_date(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "?".to_string())
}

pub fn location_line(location: &LocationSummary) -> String {
    let [lat, lng] = location.coordinates;
    format!(
        "{} {}  {}  ({:.4}, {:.4})  {}  added {}",
        status_marker(location.status),
        location.id,
        location.name,
        lat,
        lng,
        location.status.label(),
        format_date(location.created_at),
    )
}

pub fn location_detail(location: &LocationSummary) -> String {
    let mut out = location_line(location);
    if !location.notes.is_empty() {
        let _ = write!(out, "\n    {}", location.notes.replace('\n', "\n    "));
    }
    out
}

pub fn list(snapshot: &ListSnapshot) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "{} of {} locations (filter: {}, sort: {}",
        snapshot.locations.len(),
        snapshot.total,
        snapshot.filter,
        snapshot.sort,
    );
    if !snapshot.search.is_empty() {
        let _ = write!(out, ", search: \"{}\"", snapshot.search);
    }
    out.push(')');

    if snapshot.locations.is_empty() {
        out.push_str("\nNo locations found");
    }
    for location in &snapshot.locations {
        out.push('\n');
        out.push_str(&location_detail(location));
    }
    out
}

pub fn session(snapshot: &SessionSnapshot) -> String {
    let modal = &snapshot.modal;
    let mut out = match (modal.mode, modal.editing_id.as_deref()) {
        (Some(ModalMode::Edit), Some(id)) => format!("Editing location {id}"),
        (Some(ModalMode::Edit), None) => "Editing location".to_string(),
        (Some(ModalMode::Create), _) => "Adding new location".to_string(),
        (None, _) => return list(&snapshot.list),
    };

    if let Some(form) = &modal.form {
        let [lat, lng] = form.coordinates;
        let _ = write!(
            out,
            "\n  name:   {}\n  notes:  {}\n  status: {}\n  at:     ({:.4}, {:.4})",
            form.name, form.notes, form.status, lat, lng
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use wishlist_core::{Filter, SortMode};

    fn summary(name: &str, status: Status) -> LocationSummary {
        LocationSummary {
            id: "abc1234".to_string(),
            name: name.to_string(),
            coordinates: [48.8566, 2.3522],
            notes: String::new(),
            status,
            created_at: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_location_line() {
        let line = location_line(&summary("Paris", Status::Visited));

        assert!(line.starts_with("[x] abc1234  Paris"));
        assert!(line.contains("(48.8566, 2.3522)"));
        assert!(line.contains("Visited"));
        assert!(line.contains("added 2023-11-14"));
    }

    #[test]
    fn test_detail_includes_notes() {
        let mut location = summary("Paris", Status::Wishlist);
        location.notes = "Louvre\nOrsay".to_string();

        let detail = location_detail(&location);

        assert!(detail.contains("\n    Louvre\n    Orsay"));
    }

    #[test]
    fn test_empty_list() {
        let snapshot = ListSnapshot {
            filter: Filter::Visited,
            search: "zzz".to_string(),
            sort: SortMode::Newest,
            total: 4,
            locations: vec![],
        };

        let text = list(&snapshot);

        assert!(
            text.starts_with("0 of 4 locations (filter: visited, sort: newest, search: \"zzz\")")
        );
        assert!(text.ends_with("No locations found"));
    }
}
