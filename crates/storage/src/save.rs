use crate::{KeyValueStore, SCHEMA_VERSION, STORAGE_KEY, StorageError};
use serde::Serialize;
use wishlist_model::Location;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    locations: &'a [Location],
}

/// Serialize the full list into the versioned envelope.
///
/// Fails with [`StorageError::NonFiniteCoordinates`] rather than writing a value that could not
/// be read back.
pub fn encode_locations(locations: &[Location]) -> Result<String, StorageError> {
    if let Some(bad) = locations.iter().find(|l| !l.coordinates.is_finite()) {
        return Err(StorageError::NonFiniteCoordinates {
            id: bad.id.to_string(),
            lat: bad.coordinates.lat,
            lng: bad.coordinates.lng,
        });
    }

    let envelope = EnvelopeRef {
        version: SCHEMA_VERSION,
        locations,
    };
    serde_json::to_string(&envelope).map_err(StorageError::Serialize)
}

/// Write the full list under [`STORAGE_KEY`], replacing any previous value.
pub fn save_locations<S: KeyValueStore + ?Sized>(
    store: &mut S,
    locations: &[Location],
) -> Result<(), StorageError> {
    let text = encode_locations(locations)?;
    store.set(STORAGE_KEY, &text)?;
    tracing::debug!(count = locations.len(), "saved locations");
    Ok(())
}
