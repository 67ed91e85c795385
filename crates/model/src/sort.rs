//! Ordered views over a location list.

use crate::{Location, ParseError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Most recently created first.
    #[default]
    Newest,
    /// By name, case-insensitive.
    Alphabetical,
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::Newest => f.write_str("newest"),
            SortMode::Alphabetical => f.write_str("alphabetical"),
        }
    }
}

impl FromStr for SortMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(SortMode::Newest),
            "alphabetical" | "name" => Ok(SortMode::Alphabetical),
            _ => Err(ParseError::SortMode(s.to_string())),
        }
    }
}

/// Return a sorted copy of `locations`. The input is left untouched.
///
/// The sort is stable, so entries that compare equal keep their relative order.
pub fn sort_locations(locations: &[Location], mode: SortMode) -> Vec<Location> {
    let mut sorted = locations.to_vec();
    match mode {
        SortMode::Newest => sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortMode::Alphabetical => sorted.sort_by(|a, b| compare_names(&a.name, &b.name)),
    }
    sorted
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
