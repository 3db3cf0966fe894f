//! Command surface for the rendering front-end

mod config;
mod names;
mod session;

pub use config::{PlayerConfig, DEFAULT_APP_NAME};
pub use names::escape_name;
pub use session::{PageView, PlayListRef, PlayView, Player};
