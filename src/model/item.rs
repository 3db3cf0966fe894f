/// Stable identity of an item within its collection
///
/// Assigned once at insertion, never reused while the collection lives and
/// independent of the item's current position.
pub type ItemIndex = u64;

/// Anything held by an [`IndexedList`](super::IndexedList)
pub trait Item {
    /// Display name, also the persisted form of the item
    fn name(&self) -> &str;

    /// Stable index assigned by the owning collection
    fn index(&self) -> Option<ItemIndex>;

    /// Called by the owning collection on insertion
    fn set_index(&mut self, index: ItemIndex);
}

/// One playable entry of a playlist
///
/// The name references the entry's summary document in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Play {
    name: String,
    index: Option<ItemIndex>,
}

impl Play {
    /// Create a play that is not yet part of any playlist
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: None,
        }
    }
}

impl Item for Play {
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
