use crate::CoreError;
use crate::form::LocationForm;
use crate::list_ops;
use crate::modal::Modal;
use wishlist_model::{
    Coordinates, Filter, Location, LocationDraft, LocationId, Status, generate_id, now_millis,
};
use wishlist_storage::{KeyValueStore, load_locations, save_locations};

/// What a form submission turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    Added(LocationId),
    Updated(LocationId),
    /// The edit target no longer exists; nothing changed.
    Unmatched(LocationId),
}

/// Owner of the location list and of the UI selection state.
///
/// Every change to the list is written back through the storage backend as a full snapshot.
/// Filter and modal changes stay in memory.
pub struct Store<S: KeyValueStore> {
    storage: S,
    locations: Vec<Location>,
    filter: Filter,
    modal: Modal,
}

impl<S: KeyValueStore> Store<S> {
    /// Load the persisted list from `storage` and build the session state.
    ///
    /// An empty persisted list is treated the same as nothing persisted.
    pub fn open(storage: S) -> Result<Self, CoreError> {
        let loaded = load_locations(&storage)?;

        let mut store = Self {
            storage,
            locations: Vec::new(),
            filter: Filter::default(),
            modal: Modal::default(),
        };

        if !loaded.locations.is_empty() {
            if loaded.needs_migration() {
                tracing::info!(
                    version = ?loaded.schema_version,
                    "stored locations use an older layout; rewriting on next change"
                );
            }
            store.locations = loaded.locations;
        }

        Ok(store)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// All locations, newest first.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn location(&self, id: &LocationId) -> Option<&Location> {
        self.locations.iter().find(|l| &l.id == id)
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal.is_open()
    }

    /// The location being edited, if the modal is open in edit mode and the target still
    /// exists.
    pub fn editing(&self) -> Option<&Location> {
        self.modal.edit_target().and_then(|id| self.location(id))
    }

    /// Locations matching the active filter.
    pub fn filtered_locations(&self) -> Vec<&Location> {
        list_ops::filter_by(&self.locations, self.filter)
    }

    /// Locations matching the active filter whose name contains `search`.
    pub fn visible_locations(&self, search: &str) -> Vec<&Location> {
        list_ops::search_by_name(self.filtered_locations(), search)
    }

    /// Prepend a new location. Non-finite coordinates are refused before anything changes.
    pub fn add_location(&mut self, draft: LocationDraft) -> Result<LocationId, CoreError> {
        CoreError::check_coordinates(draft.coordinates)?;
        let id = self.fresh_id();
        let location = Location::from_draft(draft, id.clone(), now_millis());
        list_ops::prepend(&mut self.locations, location);
        self.modal = Modal::Closed;

        tracing::debug!(%id, "added location");
        self.persist()?;
        Ok(id)
    }

    /// Overwrite the editable fields of the location with `location.id`.
    ///
    /// Returns `Ok(false)` if no location has that id; the list is left as it was. Non-finite
    /// coordinates are refused with the list and modal untouched.
    pub fn update_location(&mut self, location: &Location) -> Result<bool, CoreError> {
        CoreError::check_coordinates(location.coordinates)?;
        let found = list_ops::replace_by_id(&mut self.locations, location);
        self.modal = Modal::Closed;

        if !found {
            tracing::debug!(id = %location.id, "update for unknown location ignored");
        }
        self.persist()?;
        Ok(found)
    }

    pub fn delete_location(&mut self, id: &LocationId) -> Result<bool, CoreError> {
        let found = list_ops::remove_by_id(&mut self.locations, id);
        if !found {
            tracing::debug!(%id, "delete for unknown location ignored");
        }
        self.persist()?;
        Ok(found)
    }

    /// Flip wishlist/visited. Returns the new status, or `None` for an unknown id.
    pub fn toggle_status(&mut self, id: &LocationId) -> Result<Option<Status>, CoreError> {
        let status = list_ops::toggle_status_by_id(&mut self.locations, id);
        if status.is_none() {
            tracing::debug!(%id, "status toggle for unknown location ignored");
        }
        self.persist()?;
        Ok(status)
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Flip modal visibility.
    ///
    /// When opening, `location` selects edit mode and `None` selects create mode. When the
    /// modal is already open this always closes it, whatever `location` is. Prefer
    /// [`open_for_create`](Self::open_for_create), [`open_for_edit`](Self::open_for_edit) and
    /// [`close_modal`](Self::close_modal).
    pub fn toggle_modal(&mut self, location: Option<&Location>) {
        self.modal = self.modal.toggled(location.map(|l| l.id.clone()));
    }

    /// Open the modal to add a location, optionally at a map-click position.
    pub fn open_for_create(&mut self, prefill: Option<Coordinates>) {
        self.modal = Modal::Create { prefill };
    }

    /// Open the modal to edit `id`, replacing any current target.
    ///
    /// Returns `false` and leaves the modal as it was if `id` is unknown.
    pub fn open_for_edit(&mut self, id: &LocationId) -> bool {
        if self.location(id).is_none() {
            return false;
        }
        self.modal = Modal::Edit { id: id.clone() };
        true
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
    }

    /// Submit the form for the currently open modal.
    ///
    /// A blank name is rejected and nothing is dispatched; the modal stays open.
    pub fn submit(&mut self, form: &LocationForm) -> Result<Submitted, CoreError> {
        let draft = form.validate()?;

        match self.modal.clone() {
            Modal::Closed => Err(CoreError::ModalClosed),
            Modal::Create { .. } => self.add_location(draft).map(Submitted::Added),
            Modal::Edit { id } => {
                let created_at = self.location(&id).map_or(0, |l| l.created_at);
                let location = Location::from_draft(draft, id.clone(), created_at);
                if self.update_location(&location)? {
                    Ok(Submitted::Updated(id))
                } else {
                    Ok(Submitted::Unmatched(id))
                }
            }
        }
    }

    fn fresh_id(&self) -> LocationId {
        loop {
            let id = generate_id();
            if self.location(&id).is_none() {
                return id;
            }
            tracing::warn!(%id, "generated id already in use, retrying");
        }
    }

    fn persist(&mut self) -> Result<(), CoreError> {
        save_locations(&mut self.storage, &self.locations)?;
        Ok(())
    }
}
