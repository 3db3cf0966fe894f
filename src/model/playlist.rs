use super::indexed_list::{IndexedList, MoveOutcome};
use super::item::{Item, ItemIndex, Play};
use crate::store::SharedStore;

/// Plays shown per page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Named, ordered list of plays
#[derive(Debug)]
pub struct PlayList {
    /// Playlist name, unique within its parent list
    name: String,

    /// Index assigned by the parent list
    index: Option<ItemIndex>,

    /// Plays per page for paginated display
    page_size: usize,

    /// Playlist entries (ordered)
    plays: IndexedList<Play>,
}

impl PlayList {
    /// Create an empty playlist persisted under `key`
    pub fn persisted(store: SharedStore, key: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_plays(name.into(), IndexedList::persisted(store, key))
    }

    /// Create a playlist that lives only in memory, such as a search result
    pub fn transient(name: impl Into<String>) -> Self {
        Self::with_plays(name.into(), IndexedList::transient())
    }

    fn with_plays(name: String, plays: IndexedList<Play>) -> Self {
        Self {
            name,
            index: None,
            page_size: DEFAULT_PAGE_SIZE,
            plays,
        }
    }

    /// Set the page size; zero is treated as one
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The underlying ordered plays
    pub fn plays(&self) -> &IndexedList<Play> {
        &self.plays
    }

    /// Storage key of this playlist's plays
    pub fn storage_key(&self) -> Option<&str> {
        self.plays.storage_key()
    }

    /// Number of plays in this playlist
    pub fn len(&self) -> usize {
        self.plays.len()
    }

    /// Check if playlist is empty
    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    /// Append a play referencing the summary `name`
    pub fn add_play(&mut self, name: impl Into<String>) -> &Play {
        self.plays.add_item(Play::new(name))
    }

    pub fn play_by_index(&self, index: ItemIndex) -> Option<&Play> {
        self.plays.item_by_index(index)
    }

    pub fn position_by_index(&self, index: ItemIndex) -> Option<usize> {
        self.plays.position_by_index(index)
    }

    pub fn remove_play(&mut self, index: ItemIndex) -> Option<usize> {
        self.plays.remove_item_by_index(index)
    }

    pub fn move_play(&mut self, index: ItemIndex, shift: i64, relative: bool) -> MoveOutcome {
        self.plays.move_item_by_index(index, shift, relative)
    }

    /// Play following the one carrying `index`, wrapping from last to first
    pub fn next_play(&self, index: ItemIndex) -> Option<&Play> {
        let position = self.plays.position_by_index(index)?;
        let next = self.plays.shift_position(position, 1, true)?;
        self.plays.get(next)
    }

    /// Number of pages needed to show every play
    pub fn page_count(&self) -> usize {
        self.plays.len().div_ceil(self.page_size)
    }

    /// Position of the first play on page `number`
    pub fn page_start(&self, number: usize) -> usize {
        number.saturating_mul(self.page_size)
    }

    /// Plays on page `number` (zero based); empty past the last page
    pub fn page(&self, number: usize) -> &[Play] {
        let items = self.plays.items();
        let start = self.page_start(number).min(items.len());
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }

    /// Reload the plays from the store
    pub fn load(&mut self) -> usize {
        self.plays.load_with(Play::new)
    }

    /// Drop every play and its storage entry
    pub fn clear(&mut self) {
        self.plays.clear();
    }
}

impl Item for PlayList {
    fn name(&self) -> &str {
        &self.name
    }

    fn index(&self) -> Option<ItemIndex> {
        self.index
    }

    fn set_index(&mut self, index: ItemIndex) {
        self.index = Some(index);
    }
}
