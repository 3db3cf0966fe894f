//! Player session state
//!
//! Owns the list of playlists, the current search result and the view state
//! (displayed playlist, page, playback cursor). Every command is total: misses
//! come back as `None` or [`MoveOutcome::NotFound`] and leave state untouched.

use super::config::PlayerConfig;
use super::names::escape_name;
use crate::catalog::{Summary, SummarySource};
use crate::model::{Item, ItemIndex, MoveOutcome, Play, PlayList, PlayListList};
use crate::search::{self, Dictionary};
use crate::store::SharedStore;

/// Which playlist a view refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayListRef {
    /// A playlist of the persisted list, by its stable index
    Stored(ItemIndex),

    /// The most recent search result
    SearchResult,
}

/// One play of the displayed page
#[derive(Debug, Clone)]
pub struct PlayView<'a> {
    /// Position within the whole playlist
    pub position: usize,

    pub play: &'a Play,

    /// `None` when the summary could not be fetched
    pub summary: Option<Summary>,
}

/// The displayed page of the displayed playlist
#[derive(Debug, Clone)]
pub struct PageView<'a> {
    pub playlist: &'a PlayList,
    pub page_number: usize,
    pub page_count: usize,
    pub plays: Vec<PlayView<'a>>,
}

/// Playlist manager session
pub struct Player<S: SummarySource> {
    config: PlayerConfig,
    playlists: PlayListList,
    search_result: PlayList,
    dictionary: Option<Dictionary>,
    displayed: Option<PlayListRef>,
    page_number: usize,
    played: Option<PlayListRef>,
    source: S,
}

impl<S: SummarySource> Player<S> {
    /// Create a session and load the stored playlists
    pub fn new(config: PlayerConfig, store: SharedStore, source: S) -> Self {
        let mut playlists = PlayListList::new(
            store,
            config.playlist_list_key(),
            config.playlist_key_prefix(),
        )
        .with_page_size(config.page_size);
        playlists.load();

        let search_result = PlayList::transient("").with_page_size(config.page_size);

        Self {
            config,
            playlists,
            search_result,
            dictionary: None,
            displayed: None,
            page_number: 0,
            played: None,
            source,
        }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn playlists(&self) -> &PlayListList {
        &self.playlists
    }

    pub fn search_result(&self) -> &PlayList {
        &self.search_result
    }

    pub fn dictionary(&self) -> Option<&Dictionary> {
        self.dictionary.as_ref()
    }

    /// Fetch the search dictionary; on failure searches keep finding nothing
    pub fn load_dictionary(&mut self) -> bool {
        match self.source.dictionary() {
            Ok(dictionary) => {
                log::info!(
                    "Dictionary loaded: {} tags, {} translations",
                    dictionary.tag_array.len(),
                    dictionary.translation_array.len()
                );
                self.dictionary = Some(dictionary);
                true
            }
            Err(e) => {
                log::warn!("An error occurred while retrieving the dictionary: {}", e);
                false
            }
        }
    }

    pub fn set_dictionary(&mut self, dictionary: Dictionary) {
        self.dictionary = Some(dictionary);
    }

    /// Fetch the summary of play `name`, logging failures
    pub fn summary(&self, name: &str) -> Option<Summary> {
        match self.source.summary(name) {
            Ok(summary) => Some(summary),
            Err(e) => {
                log::warn!("An error occurred while retrieving link file {:?}: {}", name, e);
                None
            }
        }
    }

    /// Create a playlist from a user-entered name
    ///
    /// The name is sanitised first; an empty or already used name creates
    /// nothing.
    pub fn create_playlist(&mut self, name: &str) -> Option<&PlayList> {
        let name = escape_name(name);

        if name.is_empty() {
            log::debug!("Refusing empty playlist name");
            return None;
        }
        if self.playlists.contains_playlist(&name) {
            log::debug!("Playlist {:?} already exists", name);
            return None;
        }

        log::info!("Creating playlist {:?}", name);
        Some(self.playlists.add_playlist(name))
    }

    pub fn remove_playlist(&mut self, index: ItemIndex) -> Option<usize> {
        let position = self.playlists.remove_playlist(index)?;

        let removed = Some(PlayListRef::Stored(index));
        if self.displayed == removed {
            self.displayed = None;
            self.page_number = 0;
        }
        if self.played == removed {
            self.played = None;
        }

        Some(position)
    }

    pub fn move_playlist(&mut self, index: ItemIndex, shift: i64, relative: bool) -> MoveOutcome {
        self.playlists.move_playlist(index, shift, relative)
    }

    /// `(index, name)` of every playlist a play can be added to
    pub fn add_targets(&self) -> Vec<(ItemIndex, &str)> {
        self.playlists
            .iter()
            .filter_map(|playlist| playlist.index().map(|index| (index, playlist.name())))
            .collect()
    }

    /// Append play `name` to the playlist carrying `playlist_index`
    pub fn add_play(&mut self, playlist_index: ItemIndex, name: &str) -> Option<&Play> {
        let playlist = self.playlists.playlist_by_index_mut(playlist_index)?;
        log::debug!("Adding {:?} to playlist {:?}", name, playlist.name());
        Some(playlist.add_play(name))
    }

    /// Display the stored playlist carrying `index`, from its first page
    pub fn select_playlist(&mut self, index: ItemIndex) -> bool {
        if self.playlists.playlist_by_index(index).is_none() {
            return false;
        }

        self.displayed = Some(PlayListRef::Stored(index));
        self.page_number = 0;
        true
    }

    pub fn displayed(&self) -> Option<PlayListRef> {
        self.displayed
    }

    pub fn displayed_playlist(&self) -> Option<&PlayList> {
        self.displayed.and_then(|target| self.resolve(target))
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    /// Switch to page `number` of the displayed playlist
    pub fn load_page(&mut self, number: usize) -> bool {
        let Some(playlist) = self.displayed_playlist() else {
            return false;
        };

        if number >= playlist.page_count().max(1) {
            return false;
        }

        self.page_number = number;
        true
    }

    /// Plays of the displayed page with their summaries
    pub fn page_view(&self) -> Option<PageView<'_>> {
        let playlist = self.displayed_playlist()?;
        let start = playlist.page_start(self.page_number);

        let plays = playlist
            .page(self.page_number)
            .iter()
            .enumerate()
            .map(|(offset, play)| PlayView {
                position: start + offset,
                play,
                summary: self.summary(play.name()),
            })
            .collect();

        Some(PageView {
            playlist,
            page_number: self.page_number,
            page_count: playlist.page_count(),
            plays,
        })
    }

    /// Remove a play from the displayed playlist
    pub fn remove_play(&mut self, index: ItemIndex) -> Option<usize> {
        let position = self.displayed_playlist_mut()?.remove_play(index)?;
        self.clamp_page();
        Some(position)
    }

    /// Move a play within the displayed playlist
    pub fn move_play(&mut self, index: ItemIndex, shift: i64, relative: bool) -> MoveOutcome {
        match self.displayed_playlist_mut() {
            Some(playlist) => playlist.move_play(index, shift, relative),
            None => MoveOutcome::NotFound,
        }
    }

    /// Start playing from the displayed playlist
    pub fn play(&mut self, index: ItemIndex) -> Option<&Play> {
        let displayed = self.displayed?;
        self.resolve(displayed)?.play_by_index(index)?;

        self.played = Some(displayed);
        self.resolve(displayed)?.play_by_index(index)
    }

    /// Play after `index` in the played playlist, wrapping to the start
    pub fn next_play(&self, index: ItemIndex) -> Option<&Play> {
        let played = self.played?;
        self.resolve(played)?.next_play(index)
    }

    pub fn played(&self) -> Option<PlayListRef> {
        self.played
    }

    /// Rank `query` and display the result from its first page
    ///
    /// The result replaces the previous one.
    pub fn search(&mut self, query: &str) -> &PlayList {
        self.search_result =
            search::search(self.dictionary.as_ref(), query).with_page_size(self.config.page_size);
        self.displayed = Some(PlayListRef::SearchResult);
        self.page_number = 0;
        &self.search_result
    }

    /// Drop every playlist and its stored plays
    pub fn clear_all(&mut self) {
        log::info!("Clearing {} playlists", self.playlists.len());
        self.playlists.clear();

        if matches!(self.displayed, Some(PlayListRef::Stored(_))) {
            self.displayed = None;
            self.page_number = 0;
        }
        if matches!(self.played, Some(PlayListRef::Stored(_))) {
            self.played = None;
        }
    }

    fn resolve(&self, target: PlayListRef) -> Option<&PlayList> {
        match target {
            PlayListRef::Stored(index) => self.playlists.playlist_by_index(index),
            PlayListRef::SearchResult => Some(&self.search_result),
        }
    }

    fn displayed_playlist_mut(&mut self) -> Option<&mut PlayList> {
        match self.displayed? {
            PlayListRef::Stored(index) => self.playlists.playlist_by_index_mut(index),
            PlayListRef::SearchResult => Some(&mut self.search_result),
        }
    }

    fn clamp_page(&mut self) {
        let last = self
            .displayed_playlist()
            .map(|playlist| playlist.page_count().saturating_sub(1))
            .unwrap_or(0);
        self.page_number = self.page_number.min(last);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogError;
    use crate::store::{KeyValueStore, MemoryStore};
    use std::rc::Rc;

    /// Source knowing only summaries named `known*`
    struct FakeSource;

    impl SummarySource for FakeSource {
        fn summary(&self, name: &str) -> Result<Summary, CatalogError> {
            if name.starts_with("known") {
                Ok(Summary {
                    path: format!("/{}", name),
                    mime_type: "video/mp4".to_string(),
                    title: name.to_uppercase(),
                    principal_array: Vec::new(),
                    name: name.to_string(),
                })
            } else {
                Err(CatalogError::NotFound(name.to_string()))
            }
        }

        fn dictionary(&self) -> Result<Dictionary, CatalogError> {
            Dictionary::from_json(
                r#"{"tagArray": [{"name": "cat", "referenceArray": [{"name": "known-a", "count": 1}, {"name": "known-b", "count": 4}]}]}"#,
            )
            .map_err(|source| CatalogError::Malformed {
                name: "dictionary.json".to_string(),
                source,
            })
        }
    }

    fn player(memory: &Rc<MemoryStore>) -> Player<FakeSource> {
        Player::new(
            PlayerConfig::default().with_page_size(2),
            memory.clone(),
            FakeSource,
        )
    }

    #[test]
    fn test_create_playlist_rejects_duplicates_and_empty() {
        let memory = Rc::new(MemoryStore::new());
        let mut player = player(&memory);

        assert!(player.create_playlist("cats").is_some());
        assert!(player.create_playlist("cats").is_none());
        assert!(player.create_playlist("").is_none());

        // Sanitised before the duplicate check
        assert_eq!(player.create_playlist("a\"b").unwrap().name(), "a?b");
        assert!(player.create_playlist("a'b").is_none());

        assert_eq!(player.playlists().len(), 2);
    }

    #[test]
    fn test_page_view_and_pagination() {
        let memory = Rc::new(MemoryStore::new());
        let mut player = player(&memory);
        player.create_playlist("mix");
        for name in ["known1", "missing", "known2"] {
            player.add_play(0, name);
        }

        assert!(player.page_view().is_none());
        assert!(player.select_playlist(0));

        let view = player.page_view().unwrap();
        assert_eq!(view.page_count, 2);
        assert_eq!(view.plays.len(), 2);
        assert_eq!(view.plays[0].summary.as_ref().unwrap().title, "KNOWN1");
        assert!(view.plays[1].summary.is_none());

        assert!(player.load_page(1));
        let view = player.page_view().unwrap();
        assert_eq!(view.plays[0].position, 2);
        assert!(!player.load_page(2));

        // Removing the only play of the last page moves back a page
        assert_eq!(player.remove_play(2), Some(2));
        assert_eq!(player.page_number(), 0);
    }

    #[test]
    fn test_move_and_remove_on_displayed() {
        let memory = Rc::new(MemoryStore::new());
        let mut player = player(&memory);
        assert_eq!(player.move_play(0, 1, true), MoveOutcome::NotFound);

        player.create_playlist("mix");
        player.add_play(0, "known1");
        player.add_play(0, "known2");
        player.select_playlist(0);

        assert_eq!(player.move_play(1, 0, false), MoveOutcome::Moved { from: 1, to: 0 });
        assert_eq!(
            memory.get("katube-playList-mix").as_deref(),
            Some(r#""known2", "known1""#)
        );
        assert_eq!(player.remove_play(5), None);
    }

    #[test]
    fn test_playback_cycles() {
        let memory = Rc::new(MemoryStore::new());
        let mut player = player(&memory);
        player.create_playlist("mix");
        player.add_play(0, "known1");
        player.add_play(0, "known2");

        assert!(player.play(0).is_none());
        player.select_playlist(0);

        assert_eq!(player.play(1).unwrap().name(), "known2");
        assert_eq!(player.next_play(1).unwrap().name(), "known1");
        assert_eq!(player.next_play(0).unwrap().name(), "known2");
    }

    #[test]
    fn test_search_needs_dictionary() {
        let memory = Rc::new(MemoryStore::new());
        let mut player = player(&memory);

        assert!(player.search("cat").is_empty());
        assert_eq!(player.displayed(), Some(PlayListRef::SearchResult));

        assert!(player.load_dictionary());
        let names: Vec<_> = player
            .search("cat")
            .plays()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, vec!["known-b", "known-a"]);

        // Search results never reach the store
        assert!(memory.is_empty());
    }

    #[test]
    fn test_injected_dictionary_is_searched() {
        let memory = Rc::new(MemoryStore::new());
        let mut player = player(&memory);

        let dictionary = Dictionary::from_json(
            r#"{"tagArray": [{"name": "dog", "referenceArray": [{"name": "k", "count": 1}]}],
                "translationArray": [{"key": "k", "value": "known-dog"}]}"#,
        )
        .unwrap();
        player.set_dictionary(dictionary);

        assert!(player.dictionary().is_some());
        let result = player.search("dog");
        assert_eq!(result.plays().get(0).unwrap().name(), "known-dog");
    }

    #[test]
    fn test_removing_displayed_playlist_resets_view() {
        let memory = Rc::new(MemoryStore::new());
        let mut player = player(&memory);
        player.create_playlist("a");
        player.create_playlist("b");
        player.add_play(1, "known1");
        player.select_playlist(1);
        player.play(0);

        assert_eq!(player.remove_playlist(1), Some(1));
        assert!(player.displayed().is_none());
        assert!(player.played().is_none());
        assert!(!memory.contains_key("katube-playList-b"));
    }

    #[test]
    fn test_clear_all_and_reload() {
        let memory = Rc::new(MemoryStore::new());
        {
            let mut player = player(&memory);
            player.create_playlist("a");
            player.add_play(0, "known1");
        }

        let mut player = player(&memory);
        assert_eq!(player.add_targets(), vec![(0, "a")]);
        assert_eq!(player.playlists().playlist_by_index(0).unwrap().len(), 1);

        player.clear_all();
        assert!(memory.is_empty());
        assert!(player.add_targets().is_empty());
    }
}
