//! Katube - playlist manager for a personal video catalog
//!
//! This library keeps named playlists of catalog videos in a key-value
//! store and ranks catalog entries against tag queries.

pub mod catalog;
pub mod model;
pub mod player;
pub mod search;
pub mod store;

pub use player::{Player, PlayerConfig};
