//! Input boundary for the add/edit form.

use crate::{CoreError, Modal, Store};
use wishlist_model::{Coordinates, LocationDraft, Status};
use wishlist_storage::KeyValueStore;

/// Field values of the add/edit form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocationForm {
    pub name: String,
    pub notes: String,
    pub status: Status,
    pub coordinates: Coordinates,
}

impl LocationForm {
    /// Form contents for the store's current modal state: the edit target's fields, the map
    /// click position for a new location, or blank defaults.
    pub fn for_modal<S: KeyValueStore>(store: &Store<S>) -> Self {
        match store.modal() {
            Modal::Edit { .. } => store
                .editing()
                .map(|location| Self::from(location.to_draft()))
                .unwrap_or_default(),
            Modal::Create {
                prefill: Some(coordinates),
            } => Self {
                coordinates: *coordinates,
                ..Default::default()
            },
            Modal::Create { prefill: None } | Modal::Closed => Self::default(),
        }
    }

    /// Check the form and turn it into a draft. The name must not be blank and both
    /// coordinates must be finite.
    pub fn validate(&self) -> Result<LocationDraft, CoreError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CoreError::EmptyName);
        }
        CoreError::check_coordinates(self.coordinates)?;
        Ok(LocationDraft {
            name: name.to_string(),
            coordinates: self.coordinates,
            notes: self.notes.clone(),
            status: self.status,
        })
    }
}

impl From<LocationDraft> for LocationForm {
    fn from(draft: LocationDraft) -> Self {
        Self {
            name: draft.name,
            notes: draft.notes,
            status: draft.status,
            coordinates: draft.coordinates,
        }
    }
}
