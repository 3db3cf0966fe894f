//! Player configuration

use crate::model::DEFAULT_PAGE_SIZE;

/// Application id used when none is given
pub const DEFAULT_APP_NAME: &str = "katube";

/// Configuration for a player session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Prefix of every storage key
    pub app_name: String,

    /// Plays shown per page
    pub page_size: usize,
}

impl PlayerConfig {
    /// Create a configuration for application `app_name`
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set the page size (at least one)
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Key holding the playlist names
    pub fn playlist_list_key(&self) -> String {
        format!("{}-playListList", self.app_name)
    }

    /// Prefix of each playlist's own key
    pub fn playlist_key_prefix(&self) -> String {
        format!("{}-playList-", self.app_name)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_APP_NAME)
    }
}
