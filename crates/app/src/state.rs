//! Session state shared by every command.

use crate::config::{Config, MapConfig};
use crate::dto::{ListSnapshot, LocationSummary};
use wishlist_core::{KeyValueStore, LocationForm, SortMode, Store, sort_locations};

/// The store plus the presentation-side state that sits around it: the search box, the sort
/// order, the form being filled in and the map view.
pub struct AppState<S: KeyValueStore> {
    pub store: Store<S>,
    pub search: String,
    pub sort: SortMode,
    pub form: LocationForm,
    pub map: MapConfig,
}

impl<S: KeyValueStore> AppState<S> {
    pub fn new(mut store: Store<S>, config: &Config) -> Self {
        store.set_filter(config.default_filter);
        Self {
            store,
            search: String::new(),
            sort: config.default_sort,
            form: LocationForm::default(),
            map: config.map.clone(),
        }
    }

    /// Re-read the form from the store's modal state. Call after the modal opens.
    pub fn reset_form(&mut self) {
        self.form = LocationForm::for_modal(&self.store);
    }

    pub fn list_snapshot(&self) -> ListSnapshot {
        let visible: Vec<_> = self
            .store
            .visible_locations(&self.search)
            .into_iter()
            .cloned()
            .collect();

        ListSnapshot {
            filter: self.store.filter(),
            search: self.search.clone(),
            sort: self.sort,
            total: self.store.locations().len(),
            locations: sort_locations(&visible, self.sort)
                .iter()
                .map(LocationSummary::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wishlist_core::{Filter, LocationDraft, MemoryStore, Status};

    fn state() -> AppState<MemoryStore> {
        let store = Store::open(MemoryStore::new()).expect("open");
        AppState::new(store, &Config::default())
    }

    #[test]
    fn test_new_applies_config_defaults() {
        let config = Config {
            default_filter: Filter::Visited,
            default_sort: SortMode::Alphabetical,
            ..Default::default()
        };
        let store = Store::open(MemoryStore::new()).expect("open");

        let state = AppState::new(store, &config);

        assert_eq!(state.store.filter(), Filter::Visited);
        assert_eq!(state.sort, SortMode::Alphabetical);
    }

    #[test]
    fn test_list_snapshot_sorts_filtered_view() {
        let mut state = state();
        for (name, status) in [
            ("Zagreb", Status::Wishlist),
            ("Amman", Status::Visited),
            ("Bogota", Status::Wishlist),
        ] {
            state
                .store
                .add_location(LocationDraft::new(name, (0.0, 0.0)).with_status(status))
                .expect("add");
        }

        state.sort = SortMode::Alphabetical;
        state.store.set_filter(Filter::Wishlist);
        let snapshot = state.list_snapshot();

        assert_eq!(snapshot.total, 3);
        let names: Vec<&str> = snapshot.locations.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Bogota", "Zagreb"]);
    }

    #[test]
    fn test_list_snapshot_applies_search() {
        let mut state = state();
        state
            .store
            .add_location(LocationDraft::new("Marrakesh", (31.6, -8.0)))
            .expect("add");
        state
            .store
            .add_location(LocationDraft::new("Montreal", (45.5, -73.6)))
            .expect("add");

        state.search = "MARR".to_string();

        let snapshot = state.list_snapshot();
        assert_eq!(snapshot.locations.len(), 1);
        assert_eq!(snapshot.locations[0].name, "Marrakesh");
    }
}
