mod id;
mod sort;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use id::generate_id;
pub use sort::{SortMode, sort_locations};

/// Opaque identifier of a location. Assigned once at creation and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub String);

impl LocationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for LocationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A latitude/longitude pair. No geographic range check is applied.
///
/// Serialized as a two-element array `[lat, lng]`, the layout map widgets expect.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components are finite. NaN and infinities have no JSON form.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self::new(lat, lng)
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lat, c.lng]
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Wishlist,
    Visited,
}

impl Status {
    pub fn toggled(self) -> Self {
        match self {
            Status::Wishlist => Status::Visited,
            Status::Visited => Status::Wishlist,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Wishlist => "Wishlist",
            Status::Visited => "Visited",
        }
    }

    /// Marker colour used when the location is drawn on the map.
    pub fn marker_color(self) -> &'static str {
        match self {
            Status::Wishlist => "gold",
            Status::Visited => "green",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Wishlist => "wishlist",
            Status::Visited => "visited",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wishlist" => Ok(Status::Wishlist),
            "visited" => Ok(Status::Visited),
            _ => Err(ParseError::Status(s.to_string())),
        }
    }
}

/// Subset of the list currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Wishlist,
    Visited,
}

impl Filter {
    pub fn matches(self, status: Status) -> bool {
        match self {
            Filter::All => true,
            Filter::Wishlist => status == Status::Wishlist,
            Filter::Visited => status == Status::Visited,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Wishlist => "wishlist",
            Filter::Visited => "visited",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "wishlist" => Ok(Filter::Wishlist),
            "visited" => Ok(Filter::Visited),
            _ => Err(ParseError::Filter(s.to_string())),
        }
    }
}

impl From<Status> for Filter {
    fn from(status: Status) -> Self {
        match status {
            Status::Wishlist => Filter::Wishlist,
            Status::Visited => Filter::Visited,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown status '{0}' (expected wishlist or visited)")]
    Status(String),

    #[error("unknown filter '{0}' (expected all, wishlist or visited)")]
    Filter(String),

    #[error("unknown sort mode '{0}' (expected newest or alphabetical)")]
    SortMode(String),
}

/// A single point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub coordinates: Coordinates,
    pub notes: String,
    pub status: Status,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
}

impl Location {
    /// Build a location from a draft, stamping it with `id` and `created_at`.
    pub fn from_draft(draft: LocationDraft, id: LocationId, created_at: i64) -> Self {
        Self {
            id,
            name: draft.name,
            coordinates: draft.coordinates,
            notes: draft.notes,
            status: draft.status,
            created_at,
        }
    }

    pub fn to_draft(&self) -> LocationDraft {
        LocationDraft {
            name: self.name.clone(),
            coordinates: self.coordinates,
            notes: self.notes.clone(),
            status: self.status,
        }
    }
}

/// A location that hasn't been added yet: no id, no creation time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDraft {
    pub name: String,
    pub coordinates: Coordinates,
    pub notes: String,
    pub status: Status,
}

impl LocationDraft {
    pub fn new(name: impl Into<String>, coordinates: impl Into<Coordinates>) -> Self {
        Self {
            name: name.into(),
            coordinates: coordinates.into(),
            ..Default::default()
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }
}

/// Current time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
