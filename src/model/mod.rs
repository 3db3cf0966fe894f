//! Playlist data model
//!
//! Every ordered list in the player is an [`IndexedList`]; playlists and the
//! list of playlists are thin typed layers over it.

mod indexed_list;
mod item;
mod playlist;
mod playlist_list;

pub use indexed_list::{IndexedList, MoveOutcome, INITIAL_INDEX};
pub use item::{Item, ItemIndex, Play};
pub use playlist::{PlayList, DEFAULT_PAGE_SIZE};
pub use playlist_list::PlayListList;
