//! Preference state for cinedex.
//!
//! Favorites and theme are held by explicit state holders that write
//! through a [`KeyValueStore`] port. `SqliteStore` keeps them across runs
//! (bundled `SQLite` via `rusqlite`); `MemoryStore` keeps them for one process.

mod connection;
/// Favorite movies state holder.
pub mod favorites;
/// Key-value persistence port and backends.
pub mod kv;
mod migrations;
/// Theme state holder.
pub mod theme;

pub use connection::{open_db, resolve_db_path};
pub use favorites::{FAVORITES_KEY, FavoritesStore};
pub use kv::{KeyValueStore, MemoryStore, SqliteStore};
pub use theme::{THEME_KEY, Theme, ThemeStore};
