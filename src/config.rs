//! Settings: audio defaults, control steps, playlist location, library
//! scanning, UI and logging.
//!
//! `Settings::load` layers environment variables over the TOML file over
//! the struct defaults; see `schema` for the keys.

mod load;
mod schema;

pub use schema::*;
