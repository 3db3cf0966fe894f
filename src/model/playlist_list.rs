//! The list of playlists
//!
//! Each child playlist stores its plays under its own key, derived from the
//! parent's key prefix and the playlist name, so loading and clearing the
//! parent cascades into every child.

use super::indexed_list::{IndexedList, MoveOutcome};
use super::item::{Item, ItemIndex};
use super::playlist::{PlayList, DEFAULT_PAGE_SIZE};
use crate::store::SharedStore;
use std::rc::Rc;

/// Persisted list of playlists
#[derive(Debug)]
pub struct PlayListList {
    playlists: IndexedList<PlayList>,
    store: SharedStore,
    key_prefix: String,
    page_size: usize,
}

impl PlayListList {
    /// Create an empty list stored under `key`, children under `key_prefix + name`
    ///
    /// Call [`load`](Self::load) to hydrate it from the store.
    pub fn new(store: SharedStore, key: impl Into<String>, key_prefix: impl Into<String>) -> Self {
        Self {
            playlists: IndexedList::persisted(Rc::clone(&store), key),
            store,
            key_prefix: key_prefix.into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Page size given to every child playlist
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Storage key of the playlist named `name`
    pub fn key_for(&self, name: &str) -> String {
        format!("{}{}", self.key_prefix, name)
    }

    pub fn playlists(&self) -> &IndexedList<PlayList> {
        &self.playlists
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlayList> {
        self.playlists.iter()
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    /// Load the playlist names, then every playlist's plays
    pub fn load(&mut self) -> usize {
        let store = Rc::clone(&self.store);
        let prefix = self.key_prefix.clone();
        let page_size = self.page_size;

        let count = self.playlists.load_with(|name| {
            let key = format!("{}{}", prefix, name);
            PlayList::persisted(Rc::clone(&store), key, name).with_page_size(page_size)
        });

        for playlist in self.playlists.iter_mut() {
            let plays = playlist.load();
            log::debug!("Playlist '{}': {} plays", playlist.name(), plays);
        }

        log::info!("Loaded {} playlists", count);
        count
    }

    /// Clear every playlist's plays, then the list itself
    pub fn clear(&mut self) {
        for playlist in self.playlists.iter_mut() {
            playlist.clear();
        }
        self.playlists.clear();
    }

    pub fn contains_playlist(&self, name: &str) -> bool {
        self.playlists.contains_item_by_name(name)
    }

    /// Append a new empty playlist
    ///
    /// Name uniqueness is the caller's responsibility, see
    /// [`contains_playlist`](Self::contains_playlist).
    pub fn add_playlist(&mut self, name: impl Into<String>) -> &PlayList {
        let name = name.into();
        let playlist = PlayList::persisted(Rc::clone(&self.store), self.key_for(&name), name)
            .with_page_size(self.page_size);
        self.playlists.add_item(playlist)
    }

    pub fn playlist_by_index(&self, index: ItemIndex) -> Option<&PlayList> {
        self.playlists.item_by_index(index)
    }

    pub fn playlist_by_index_mut(&mut self, index: ItemIndex) -> Option<&mut PlayList> {
        self.playlists.item_by_index_mut(index)
    }

    pub fn position_by_index(&self, index: ItemIndex) -> Option<usize> {
        self.playlists.position_by_index(index)
    }

    /// Remove a playlist together with its stored plays
    pub fn remove_playlist(&mut self, index: ItemIndex) -> Option<usize> {
        let (position, mut playlist) = self.playlists.take_item_by_index(index)?;
        playlist.clear();
        Some(position)
    }

    pub fn move_playlist(&mut self, index: ItemIndex, shift: i64, relative: bool) -> MoveOutcome {
        self.playlists.move_item_by_index(index, shift, relative)
    }
}
