//! In-memory favorites set.
//!
//! Pure set logic over film ids. Nothing is persisted; the set lives as long
//! as its owner.

use std::collections::HashSet;

use crate::types::Film;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    ids: HashSet<String>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `id` if absent, remove it if present. Returns whether `id` is a
    /// favorite afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &HashSet<String> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Keep only the ids for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.ids.retain(|id| keep(id));
    }
}

/// Films in `catalog` whose id is in `ids`, in catalog order.
pub fn favorites_of(catalog: &[Film], ids: &HashSet<String>) -> Vec<Film> {
    catalog
        .iter()
        .filter(|film| ids.contains(&film.id))
        .cloned()
        .collect()
}
