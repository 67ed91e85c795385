use crate::{Envelope, KeyValueStore, SCHEMA_VERSION, STORAGE_KEY, StorageError};
use serde_json::Value;
use wishlist_model::Location;

/// Result of reading the persisted list.
#[derive(Debug, Clone, Default)]
pub struct LoadedLocations {
    pub locations: Vec<Location>,
    /// Schema version the data was stored with; 0 for the unversioned bare-array layout,
    /// `None` when nothing was stored.
    pub schema_version: Option<u32>,
}

impl LoadedLocations {
    /// Whether the stored value predates the current schema and should be rewritten.
    pub fn needs_migration(&self) -> bool {
        matches!(self.schema_version, Some(v) if v < SCHEMA_VERSION)
    }
}

/// Parse a stored value, checking its schema version before touching the payload.
pub fn decode_locations(text: &str) -> Result<LoadedLocations, StorageError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| StorageError::Malformed(e.to_string()))?;

    match value {
        // Written before the envelope existed.
        Value::Array(_) => {
            let locations: Vec<Location> = serde_json::from_value(value)
                .map_err(|e| StorageError::Malformed(e.to_string()))?;
            Ok(LoadedLocations {
                locations,
                schema_version: Some(0),
            })
        }
        Value::Object(ref map) => {
            let version = match map.get("version") {
                Some(Value::Number(n)) => n.as_u64().ok_or_else(|| {
                    StorageError::Malformed(format!("invalid schema version {n}"))
                })?,
                Some(other) => {
                    return Err(StorageError::Malformed(format!(
                        "invalid schema version {other}"
                    )));
                }
                None => {
                    return Err(StorageError::Malformed(
                        "missing schema version".to_string(),
                    ));
                }
            };

            if version != u64::from(SCHEMA_VERSION) {
                return Err(StorageError::UnsupportedVersion {
                    found: version,
                    supported: SCHEMA_VERSION,
                });
            }

            let envelope: Envelope = serde_json::from_value(value)
                .map_err(|e| StorageError::Malformed(e.to_string()))?;
            Ok(LoadedLocations {
                locations: envelope.locations,
                schema_version: Some(envelope.version),
            })
        }
        other => Err(StorageError::Malformed(format!(
            "expected an object or array, found {}",
            json_kind(&other)
        ))),
    }
}

/// Read the list stored under [`STORAGE_KEY`]. An absent key yields an empty list.
pub fn load_locations<S: KeyValueStore + ?Sized>(
    store: &S,
) -> Result<LoadedLocations, StorageError> {
    let Some(text) = store.get(STORAGE_KEY)? else {
        tracing::debug!("no stored locations");
        return Ok(LoadedLocations::default());
    };

    let loaded = decode_locations(&text)?;
    tracing::debug!(
        count = loaded.locations.len(),
        version = ?loaded.schema_version,
        "loaded locations"
    );
    Ok(loaded)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
