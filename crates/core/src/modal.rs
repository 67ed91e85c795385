use wishlist_model::{Coordinates, LocationId};

/// State of the add/edit form overlay.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Modal {
    #[default]
    Closed,
    /// Adding a new location, optionally pre-filled from a map click.
    Create { prefill: Option<Coordinates> },
    /// Editing an existing location.
    Edit { id: LocationId },
}

impl Modal {
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::Closed)
    }

    pub fn edit_target(&self) -> Option<&LocationId> {
        match self {
            Modal::Edit { id } => Some(id),
            _ => None,
        }
    }

    /// Flip visibility. Opening with a target enters edit mode, opening without one enters
    /// create mode. Closing ignores `target`.
    pub fn toggled(&self, target: Option<LocationId>) -> Modal {
        if self.is_open() {
            return Modal::Closed;
        }
        match target {
            Some(id) => Modal::Edit { id },
            None => Modal::Create { prefill: None },
        }
    }
}
