pub mod form;
pub mod list_ops;
pub mod modal;
pub mod store;

pub use form::LocationForm;
pub use modal::Modal;
pub use store::{Store, Submitted};

pub use wishlist_model::{
    Coordinates, Filter, Location, LocationDraft, LocationId, ParseError, SortMode, Status,
    generate_id, sort_locations,
};
pub use wishlist_storage::{
    FileStore, KeyValueStore, MemoryStore, SCHEMA_VERSION, STORAGE_KEY, StorageError,
};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Location name must not be empty")]
    EmptyName,

    #[error("No add/edit form is open")]
    ModalClosed,

    #[error("Coordinates must be finite numbers, got ({lat}, {lng})")]
    NonFiniteCoordinates { lat: f64, lng: f64 },
}

impl CoreError {
    pub(crate) fn check_coordinates(coordinates: Coordinates) -> Result<(), Self> {
        if coordinates.is_finite() {
            Ok(())
        } else {
            Err(Self::NonFiniteCoordinates {
                lat: coordinates.lat,
                lng: coordinates.lng,
            })
        }
    }
}
