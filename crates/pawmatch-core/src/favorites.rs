//! Client-local favorites set.

use crate::models::DogId;

/// Insertion-ordered set of favorited dog ids.
///
/// Lives as long as the catalog view that owns it and is only sent to the
/// remote service as the input of a match request. Equality compares
/// membership; order only matters for the match payload.
#[derive(Debug, Clone, Default)]
pub struct Favorites {
    ids: Vec<DogId>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the id if absent, remove it if present. Returns whether the id is
    /// a favorite afterwards.
    pub fn toggle(&mut self, id: &DogId) -> bool {
        if let Some(pos) = self.ids.iter().position(|f| f == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.clone());
            true
        }
    }

    pub fn contains(&self, id: &DogId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[DogId] {
        &self.ids
    }
}

impl PartialEq for Favorites {
    fn eq(&self, other: &Self) -> bool {
        self.ids.len() == other.ids.len() && self.ids.iter().all(|id| other.contains(id))
    }
}

impl Eq for Favorites {}

impl FromIterator<DogId> for Favorites {
    fn from_iter<I: IntoIterator<Item = DogId>>(iter: I) -> Self {
        let mut favorites = Favorites::new();
        for id in iter {
            if !favorites.contains(&id) {
                favorites.ids.push(id);
            }
        }
        favorites
    }
}
