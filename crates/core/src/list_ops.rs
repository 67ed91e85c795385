//! Pure functions over the location list, testable without any storage behind them.

use wishlist_model::{Filter, Location, LocationId, Status};

/// Insert `location` at the front, making it the most recent entry.
pub fn prepend(locations: &mut Vec<Location>, location: Location) {
    locations.insert(0, location);
}

/// Replace the editable fields of the entry whose id matches `replacement.id`.
///
/// The stored `id` and `created_at` are kept even if `replacement` carries a different
/// `created_at`. Position in the list is unchanged. Returns `false` if no entry matched.
pub fn replace_by_id(locations: &mut [Location], replacement: &Location) -> bool {
    let Some(existing) = locations.iter_mut().find(|l| l.id == replacement.id) else {
        return false;
    };
    existing.name = replacement.name.clone();
    existing.coordinates = replacement.coordinates;
    existing.notes = replacement.notes.clone();
    existing.status = replacement.status;
    true
}

/// Remove the entry with `id`. Returns `false` if there was none.
pub fn remove_by_id(locations: &mut Vec<Location>, id: &LocationId) -> bool {
    let before = locations.len();
    locations.retain(|l| &l.id != id);
    locations.len() != before
}

/// Flip the status of the entry with `id`, returning its new status.
pub fn toggle_status_by_id(locations: &mut [Location], id: &LocationId) -> Option<Status> {
    let location = locations.iter_mut().find(|l| &l.id == id)?;
    location.status = location.status.toggled();
    Some(location.status)
}

pub fn filter_by(locations: &[Location], filter: Filter) -> Vec<&Location> {
    locations
        .iter()
        .filter(|l| filter.matches(l.status))
        .collect()
}

/// Keep entries whose name contains `term`, ignoring case. A blank term keeps everything.
pub fn search_by_name<'a>(locations: Vec<&'a Location>, term: &str) -> Vec<&'a Location> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return locations;
    }
    locations
        .into_iter()
        .filter(|l| l.name.to_lowercase().contains(&term))
        .collect()
}
