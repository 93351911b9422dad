//! Application module: the model driven by the runtime and drawn by the UI.
//!
//! `App` owns both decks, the playlist view and the library browser.

mod model;
mod playlist;

pub use model::*;
pub use playlist::PlaylistView;
