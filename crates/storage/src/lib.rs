mod kv;
mod load;
mod save;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use wishlist_model::Location;

pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use load::{LoadedLocations, decode_locations, load_locations};
pub use save::{encode_locations, save_locations};

/// The single key the location list lives under.
pub const STORAGE_KEY: &str = "travel-wishlist-locations";

/// Version written into every envelope. Bare arrays from before versioning read as version 0.
pub const SCHEMA_VERSION: u32 = 1;

/// On-disk layout of the persisted list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub version: u32,
    pub locations: Vec<Location>,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Stored location data is malformed: {0}")]
    Malformed(String),

    #[error("Stored location data has schema version {found}, this build supports {supported}")]
    UnsupportedVersion { found: u64, supported: u32 },

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("Location {id} has non-finite coordinates ({lat}, {lng})")]
    NonFiniteCoordinates { id: String, lat: f64, lng: f64 },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
