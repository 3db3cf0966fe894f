//! Ordered collection with stable per-item indices
//!
//! Every list in the player is an [`IndexedList`]: the list of playlists, the
//! plays of each playlist and the search result. Items are addressed by the
//! stable index they receive on insertion rather than by position, because
//! positions shift whenever the list is edited.
//!
//! A list optionally owns a storage key. Persisted lists rewrite their names to
//! the store after every mutation; an empty list removes its key.

use super::item::{Item, ItemIndex};
use crate::store::{decode_names, encode_names, SharedStore};
use std::fmt;

/// First index handed out by a new or cleared list
pub const INITIAL_INDEX: ItemIndex = 0;

/// Result of [`IndexedList::move_item_by_index`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The item now sits at `to`; items between the two positions shifted by one
    Moved { from: usize, to: usize },

    /// The computed target equals the current position
    Unchanged { position: usize },

    /// No item carries the requested index
    NotFound,
}

impl MoveOutcome {
    /// Position of the item after the move, if it exists
    pub fn position(&self) -> Option<usize> {
        match *self {
            MoveOutcome::Moved { to, .. } => Some(to),
            MoveOutcome::Unchanged { position } => Some(position),
            MoveOutcome::NotFound => None,
        }
    }

    /// Whether the list order changed
    pub fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }
}

struct Persistence {
    store: SharedStore,
    key: String,
}

impl fmt::Debug for Persistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Persistence").field("key", &self.key).finish()
    }
}

/// Ordered, index-addressed collection of items
#[derive(Debug)]
pub struct IndexedList<T> {
    items: Vec<T>,
    next_index: ItemIndex,
    persistence: Option<Persistence>,
}

impl<T: Item> IndexedList<T> {
    /// Create a list that is never written to a store
    pub fn transient() -> Self {
        Self {
            items: Vec::new(),
            next_index: INITIAL_INDEX,
            persistence: None,
        }
    }

    /// Create an empty list persisted under `key`
    ///
    /// Nothing is read from the store until [`load_with`](Self::load_with).
    pub fn persisted(store: SharedStore, key: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            next_index: INITIAL_INDEX,
            persistence: Some(Persistence {
                store,
                key: key.into(),
            }),
        }
    }

    /// Storage key, `None` for transient lists
    pub fn storage_key(&self) -> Option<&str> {
        self.persistence.as_ref().map(|p| p.key.as_str())
    }

    pub fn is_persisted(&self) -> bool {
        self.persistence.is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in display order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Item at `position`
    pub fn get(&self, position: usize) -> Option<&T> {
        self.items.get(position)
    }

    /// Index the next inserted item will receive
    pub fn next_index(&self) -> ItemIndex {
        self.next_index
    }

    /// Drop every item, reset the index counter and remove the storage key
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_index = INITIAL_INDEX;
        self.store();
    }

    /// Append `item`, give it the next index and persist
    ///
    /// Name uniqueness is not checked here.
    pub fn add_item(&mut self, item: T) -> &T {
        let position = self.push(item);
        self.store();
        &self.items[position]
    }

    /// Item carrying `index`
    pub fn item_by_index(&self, index: ItemIndex) -> Option<&T> {
        self.position_by_index(index).map(|position| &self.items[position])
    }

    pub(crate) fn item_by_index_mut(&mut self, index: ItemIndex) -> Option<&mut T> {
        self.position_by_index(index)
            .map(move |position| &mut self.items[position])
    }

    /// Current position of the item carrying `index`
    pub fn position_by_index(&self, index: ItemIndex) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.index() == Some(index))
    }

    /// Position of the first item named `name`
    pub fn position_by_name(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|item| item.name() == name)
    }

    pub fn contains_item_by_name(&self, name: &str) -> bool {
        self.position_by_name(name).is_some()
    }

    /// Remove the item carrying `index` and return the position it held
    ///
    /// A missing index leaves the list untouched.
    pub fn remove_item_by_index(&mut self, index: ItemIndex) -> Option<usize> {
        self.take_item_by_index(index).map(|(position, _)| position)
    }

    /// Remove the item carrying `index`, handing it back with its old position
    pub(crate) fn take_item_by_index(&mut self, index: ItemIndex) -> Option<(usize, T)> {
        let position = self.position_by_index(index)?;
        let item = self.items.remove(position);
        self.store();
        Some((position, item))
    }

    /// Wrap `shift` (relative to `position` or absolute) into `[0, len)`
    ///
    /// Returns `None` for an empty list. `shift = 0` absolute is the top,
    /// `shift = -1` absolute is the bottom, and a relative `shift = 1` from
    /// the last position wraps to the first.
    pub fn shift_position(&self, position: usize, shift: i64, relative: bool) -> Option<usize> {
        let length = self.items.len() as i128;
        if length == 0 {
            return None;
        }

        // i128 holds any usize + i64 sum
        let target = if relative {
            position as i128 + shift as i128
        } else {
            shift as i128
        };

        Some(target.rem_euclid(length) as usize)
    }

    /// Move the item carrying `index` using the wraparound rule
    ///
    /// Items between the old and the new position shift by one slot toward
    /// the vacated position; nothing else is touched.
    pub fn move_item_by_index(&mut self, index: ItemIndex, shift: i64, relative: bool) -> MoveOutcome {
        let Some(from) = self.position_by_index(index) else {
            return MoveOutcome::NotFound;
        };
        let Some(to) = self.shift_position(from, shift, relative) else {
            return MoveOutcome::NotFound;
        };

        if from == to {
            return MoveOutcome::Unchanged { position: from };
        }

        if to < from {
            self.items[to..=from].rotate_right(1);
        } else {
            self.items[from..=to].rotate_left(1);
        }

        self.store();
        MoveOutcome::Moved { from, to }
    }

    /// Write the item names under the storage key
    ///
    /// Write failures are logged; the in-memory list stays authoritative.
    pub fn store(&self) {
        let Some(persistence) = &self.persistence else {
            return;
        };

        let result = if self.items.is_empty() {
            persistence.store.remove(&persistence.key)
        } else {
            let value = encode_names(self.items.iter().map(|item| item.name()));
            persistence.store.set(&persistence.key, &value)
        };

        if let Err(e) = result {
            log::warn!("Failed to store {:?}: {}", persistence.key, e);
        }
    }

    /// Replace the in-memory items with the names stored under the key
    ///
    /// Each name is turned into an item by `make` and appended in stored order,
    /// receiving a fresh index. Indices are not persisted. Returns the number
    /// of items loaded; transient lists load nothing.
    pub fn load_with<F>(&mut self, mut make: F) -> usize
    where
        F: FnMut(String) -> T,
    {
        let Some((key, value)) = self
            .persistence
            .as_ref()
            .map(|p| (p.key.clone(), p.store.get(&p.key)))
        else {
            return 0;
        };

        self.items.clear();

        let Some(value) = value else {
            log::debug!("Nothing stored under {:?}", key);
            return 0;
        };

        let names = match decode_names(&value) {
            Ok(names) => names,
            Err(e) => {
                log::warn!("Ignoring unreadable value under {:?}: {}", key, e);
                return 0;
            }
        };

        for name in names {
            self.push(make(name));
        }

        log::debug!("Loaded {} items from {:?}", self.items.len(), key);
        self.items.len()
    }

    fn push(&mut self, mut item: T) -> usize {
        item.set_index(self.next_index);
        self.next_index += 1;
        self.items.push(item);
        self.items.len() - 1
    }
}

impl<T: Item> Default for IndexedList<T> {
    fn default() -> Self {
        Self::transient()
    }
}

impl<'a, T> IntoIterator for &'a IndexedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
